//! Forwarding of resolved control edges to the transport

use crate::mapping::LogicalControl;
use crate::transport::{ControllerEvent, TransportChannel};
use chrono::{DateTime, Local};
use std::fmt;
use tracing::{debug, warn};

/// Physical input that produced a dispatched control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicalInput {
    Key(String),
    Button(usize),
}

impl fmt::Display for PhysicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalInput::Key(code) => write!(f, "{}", code),
            PhysicalInput::Button(index) => write!(f, "Button {}", index),
        }
    }
}

/// Local echo of the most recent dispatched input
#[derive(Debug, Clone, PartialEq)]
pub struct InputEcho {
    pub control: LogicalControl,
    pub input: PhysicalInput,
    pub pressed: bool,
    pub timestamp: DateTime<Local>,
}

impl InputEcho {
    pub fn state_label(&self) -> &'static str {
        if self.pressed {
            "Pressed"
        } else {
            "Released"
        }
    }
}

pub struct InputDispatcher {
    transport: Box<dyn TransportChannel>,
    last_input: Option<InputEcho>,
    sent: usize,
}

impl InputDispatcher {
    pub fn new(transport: Box<dyn TransportChannel>) -> Self {
        Self {
            transport,
            last_input: None,
            sent: 0,
        }
    }

    /// Echoes the input locally and emits it, at most once, without waiting.
    ///
    /// `player_name` is taken from the caller on every call.
    pub fn dispatch(
        &mut self,
        control: LogicalControl,
        input: PhysicalInput,
        pressed: bool,
        player_name: &str,
    ) {
        let timestamp = Local::now();
        debug!(
            "Dispatching {} from {} pressed={} at {}",
            control,
            input,
            pressed,
            timestamp.format("%H:%M:%S.%3f")
        );
        self.last_input = Some(InputEcho {
            control,
            input,
            pressed,
            timestamp,
        });

        let event = ControllerEvent {
            button: control,
            pressed,
            player_name: player_name.to_string(),
        };
        match self.transport.emit(&event) {
            Ok(_) => self.sent += 1,
            Err(e) => warn!("Dropping {} event: {}", control, e),
        }
    }

    pub fn last_input(&self) -> Option<&InputEcho> {
        self.last_input.as_ref()
    }

    /// Events accepted by the transport so far
    pub fn sent(&self) -> usize {
        self.sent
    }
}
