//! Input session with statum state machine for the connection lifecycle
//!
//! The session owns all per-connection pipeline state: the keyboard and
//! gamepad edge detectors and the dispatcher holding the transport.
//! Dispatching is only possible once the transport reported a connection.
//!
//! # State Machine
//!
//! ```text
//! AwaitingConnection ──(on_connect)──► Live
//! ```
//!
//! # Entry points
//!
//! ```text
//! on_connect ─► start ticking
//! on_key     ─► KeyboardTracker ─┐
//! on_tick    ─► GamepadSource ─► GamepadTracker ─┴─► MappingTable ─► InputDispatcher ─► Transport
//! ```
//!
//! Entry points run to completion on the host's frame callback, so key
//! signals and ticks interleave but never overlap.

pub mod dispatcher;

pub use dispatcher::{InputDispatcher, InputEcho, PhysicalInput};

use crate::controller::{GamepadSource, GamepadTracker, KeyTransition, KeyboardTracker};
use crate::mapping::{DeviceMode, InputConfig};
use crate::transport::TransportChannel;
use statum::{machine, state};
use tracing::{debug, info};

/// States of the session lifecycle using statum
#[state]
#[derive(Debug, Clone)]
pub enum SessionState {
    AwaitingConnection, // transport not yet usable, nothing is dispatched
    Live,               // keyboard and gamepad edges are dispatched
}

#[machine]
pub struct InputSession<S: SessionState> {
    keyboard: KeyboardTracker,
    gamepad: GamepadTracker,
    dispatcher: InputDispatcher,
}

impl<S: SessionState> InputSession<S> {
    pub fn last_input(&self) -> Option<&InputEcho> {
        self.dispatcher.last_input()
    }

    pub fn keyboard(&self) -> &KeyboardTracker {
        &self.keyboard
    }

    pub fn gamepad(&self) -> &GamepadTracker {
        &self.gamepad
    }

    pub fn sent(&self) -> usize {
        self.dispatcher.sent()
    }
}

impl InputSession<AwaitingConnection> {
    pub fn create(transport: Box<dyn TransportChannel>) -> Self {
        info!("Creating input session");
        Self::new(
            KeyboardTracker::new(),
            GamepadTracker::new(),
            InputDispatcher::new(transport),
        )
    }

    pub fn on_connect(self) -> InputSession<Live> {
        info!("Transport connected, starting input polling");
        self.transition()
    }
}

impl InputSession<Live> {
    /// Handles one raw key signal, returns whether an event was dispatched
    pub fn on_key(&mut self, config: &InputConfig, transition: &KeyTransition) -> bool {
        match self.keyboard.apply(config, transition) {
            Some(edge) => {
                self.dispatcher.dispatch(
                    edge.control,
                    PhysicalInput::Key(edge.key_code),
                    edge.pressed,
                    &config.player_name,
                );
                true
            }
            None => false,
        }
    }

    /// Runs one polling tick, returns the number of dispatched events.
    ///
    /// The source is not sampled at all outside gamepad mode; a missing
    /// gamepad skips the tick.
    pub fn on_tick(&mut self, config: &InputConfig, source: &mut dyn GamepadSource) -> usize {
        if config.mode != DeviceMode::Gamepad {
            return 0;
        }
        let Some(frame) = source.sample() else {
            return 0;
        };

        let edges = self.gamepad.diff(config, frame);
        for edge in &edges {
            self.dispatcher.dispatch(
                edge.control,
                PhysicalInput::Button(edge.index),
                edge.pressed,
                &config.player_name,
            );
        }
        if !edges.is_empty() {
            debug!("Tick dispatched {} gamepad events", edges.len());
        }
        edges.len()
    }
}

/// Session as held by the host across the connection transition
pub enum SessionSlot {
    Awaiting(InputSession<AwaitingConnection>),
    Live(InputSession<Live>),
}

impl SessionSlot {
    pub fn new(transport: Box<dyn TransportChannel>) -> Self {
        SessionSlot::Awaiting(InputSession::create(transport))
    }

    /// Moves an awaiting session to live; a live session is kept as is
    pub fn connect(self) -> Self {
        match self {
            SessionSlot::Awaiting(session) => SessionSlot::Live(session.on_connect()),
            live => live,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, SessionSlot::Live(_))
    }

    pub fn on_key(&mut self, config: &InputConfig, transition: &KeyTransition) -> bool {
        match self {
            SessionSlot::Live(session) => session.on_key(config, transition),
            SessionSlot::Awaiting(_) => false,
        }
    }

    pub fn on_tick(&mut self, config: &InputConfig, source: &mut dyn GamepadSource) -> usize {
        match self {
            SessionSlot::Live(session) => session.on_tick(config, source),
            SessionSlot::Awaiting(_) => 0,
        }
    }

    pub fn last_input(&self) -> Option<&InputEcho> {
        match self {
            SessionSlot::Awaiting(session) => session.last_input(),
            SessionSlot::Live(session) => session.last_input(),
        }
    }

    pub fn sent(&self) -> usize {
        match self {
            SessionSlot::Awaiting(session) => session.sent(),
            SessionSlot::Live(session) => session.sent(),
        }
    }
}
