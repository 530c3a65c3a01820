//! # Transport
//!
//! Bidirectional event channel to the remote peer. The input pipeline only
//! sees [`TransportChannel::emit`]; everything coming back (connection state
//! and roster snapshots) arrives as [`InboundEvent`]s on an mpsc receiver that
//! the host drains once per frame.
//!
//! ```text
//! transport/
//! ├── config.rs           - broker address, credentials, topic prefix
//! ├── message_manager.rs  - outbound/inbound payloads and topic naming
//! └── mqtt_handler.rs     - rumqttc client and event loop task
//! ```
//!
//! Emits are fire-and-forget. What happens to an emit while the broker is
//! unreachable is decided by the underlying client, not by the pipeline.

pub mod config;
pub mod message_manager;
pub mod mqtt_handler;

pub use config::{TransportConfig, TransportKind};
pub use message_manager::{ControllerEvent, RosterEntry, RosterSnapshot};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Capacity of the inbound event queue towards the host
pub const INBOUND_CAPACITY: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid broker address: {0}")]
    InvalidBroker(String),

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to publish: {0}")]
    Publish(String),

    #[error("Channel closed")]
    Closed,
}

/// Signals delivered from the transport to the host
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Connected,
    Disconnected(String),
    Players(RosterSnapshot),
}

/// Outbound half of the event channel
pub trait TransportChannel: Send {
    /// Hands the event to the channel without waiting for delivery
    fn emit(&self, event: &ControllerEvent) -> Result<(), TransportError>;
}

/// In-process channel, outbound events end up on an mpsc receiver
#[derive(Debug, Clone)]
pub struct LoopbackTransport {
    outbound: mpsc::UnboundedSender<ControllerEvent>,
}

impl LoopbackTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        (Self { outbound }, outbound_rx)
    }
}

impl TransportChannel for LoopbackTransport {
    fn emit(&self, event: &ControllerEvent) -> Result<(), TransportError> {
        self.outbound
            .send(event.clone())
            .map_err(|_| TransportError::Closed)
    }
}

/// Opens the configured transport.
///
/// The returned receiver yields [`InboundEvent::Connected`] once the channel
/// is usable. Background tasks stop when `cancel` fires.
pub fn connect(
    config: &TransportConfig,
    cancel: CancellationToken,
) -> Result<(Box<dyn TransportChannel>, mpsc::Receiver<InboundEvent>), TransportError> {
    let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
    info!("Opening transport {}", config);

    match config.kind {
        TransportKind::Mqtt => {
            let transport = mqtt_handler::MqttTransport::spawn(config, inbound_tx, cancel)?;
            Ok((Box::new(transport), inbound_rx))
        }
        TransportKind::Loopback => {
            let (transport, mut outbound_rx) = LoopbackTransport::new();
            if inbound_tx.try_send(InboundEvent::Connected).is_err() {
                error!("Failed to signal loopback connection");
                return Err(TransportError::Closed);
            }
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        event = outbound_rx.recv() => match event {
                            Some(event) => info!(
                                "[loopback] {} {} pressed={} player={}",
                                message_manager::CONTROLLER_EVENT,
                                event.button,
                                event.pressed,
                                event.player_name
                            ),
                            None => break,
                        }
                    }
                }
                // keeps the inbound side open for as long as the loopback runs
                drop(inbound_tx);
            });
            Ok((Box::new(transport), inbound_rx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::LogicalControl;

    #[test]
    fn loopback_delivers_emitted_events_in_order() {
        let (transport, mut rx) = LoopbackTransport::new();
        for pressed in [true, false] {
            transport
                .emit(&ControllerEvent {
                    button: LogicalControl::YButton,
                    pressed,
                    player_name: String::new(),
                })
                .unwrap();
        }
        assert!(rx.try_recv().unwrap().pressed);
        assert!(!rx.try_recv().unwrap().pressed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn loopback_reports_closed_receiver() {
        let (transport, rx) = LoopbackTransport::new();
        drop(rx);
        let result = transport.emit(&ControllerEvent {
            button: LogicalControl::AButton,
            pressed: true,
            player_name: String::new(),
        });
        assert!(matches!(result, Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn loopback_connect_signals_connected() {
        let config = TransportConfig {
            kind: TransportKind::Loopback,
            ..TransportConfig::default()
        };
        let cancel = CancellationToken::new();
        let (transport, mut inbound) = connect(&config, cancel.clone()).unwrap();

        assert_eq!(inbound.recv().await, Some(InboundEvent::Connected));
        transport
            .emit(&ControllerEvent {
                button: LogicalControl::DpadDown,
                pressed: true,
                player_name: "ada".to_string(),
            })
            .unwrap();
        cancel.cancel();
    }
}
