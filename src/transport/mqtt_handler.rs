use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::message_manager::{self, ControllerEvent, RosterSnapshot};
use super::{InboundEvent, TransportChannel, TransportConfig, TransportError};

const REQUEST_CAPACITY: usize = 100;
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// MQTT backed transport.
///
/// Control events are published to `<prefix>/controller`, roster snapshots
/// are read from `<prefix>/players`.
pub struct MqttTransport {
    client: AsyncClient,
    controller_topic: String,
}

impl MqttTransport {
    /// Creates the client and spawns the event loop task
    pub fn spawn(
        config: &TransportConfig,
        inbound_tx: mpsc::Sender<InboundEvent>,
        cancel: CancellationToken,
    ) -> Result<Self, TransportError> {
        let (host, port) = config.broker_address()?;
        let mut mqtt_options = MqttOptions::new(config.client_id.clone(), host, port);
        mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive_secs.max(1)));
        if !config.user.is_empty() {
            mqtt_options.set_credentials(config.user.clone(), config.pw.clone());
        }

        let (client, eventloop) = AsyncClient::new(mqtt_options, REQUEST_CAPACITY);
        let players_topic =
            message_manager::topic(&config.topic_prefix, message_manager::PLAYERS_EVENT);
        let controller_topic =
            message_manager::topic(&config.topic_prefix, message_manager::CONTROLLER_EVENT);

        let handler = MqttHandler {
            state: ConnectionState::default(),
            client: client.clone(),
            players_topic,
            inbound_tx,
        };
        tokio::spawn(handler.run(eventloop, cancel));

        Ok(Self {
            client,
            controller_topic,
        })
    }
}

impl TransportChannel for MqttTransport {
    fn emit(&self, event: &ControllerEvent) -> Result<(), TransportError> {
        let payload = serde_json::to_vec(event)?;
        self.client
            .try_publish(
                self.controller_topic.clone(),
                QoS::AtMostOnce,
                false,
                payload,
            )
            .map_err(|e| TransportError::Publish(e.to_string()))
    }
}

struct MqttHandler {
    state: ConnectionState,
    client: AsyncClient,
    players_topic: String,
    inbound_tx: mpsc::Sender<InboundEvent>,
}

impl MqttHandler {
    async fn run(mut self, mut eventloop: EventLoop, cancel: CancellationToken) {
        info!("Starting MQTT event loop");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("MQTT event loop cancelled");
                    if let Err(e) = self.client.try_disconnect() {
                        debug!("Disconnect request failed: {}", e);
                    }
                    break;
                }
                notification = eventloop.poll() => match notification {
                    Ok(event) => self.handle_event(event),
                    Err(e) => {
                        error!("MQTT connection error: {}", e);
                        if self.state == ConnectionState::Connected {
                            self.state = ConnectionState::Disconnected;
                            self.forward(InboundEvent::Disconnected(e.to_string()));
                        }
                        tokio::time::sleep(RECONNECT_DELAY).await;
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Incoming(Packet::ConnAck(ack)) => {
                info!("Connected to broker: {:?}", ack.code);
                if let Err(e) = self
                    .client
                    .try_subscribe(self.players_topic.clone(), QoS::AtMostOnce)
                {
                    warn!("Failed to subscribe to {}: {}", self.players_topic, e);
                }
                self.state = ConnectionState::Connected;
                self.forward(InboundEvent::Connected);
            }
            Event::Incoming(Packet::Publish(publish)) => {
                if publish.topic != self.players_topic {
                    debug!("Ignoring message on {}", publish.topic);
                    return;
                }
                match decode_roster(&publish.payload) {
                    Ok(snapshot) => self.forward(InboundEvent::Players(snapshot)),
                    Err(e) => warn!("Dropping malformed roster snapshot: {}", e),
                }
            }
            other => debug!("MQTT event: {:?}", other),
        }
    }

    fn forward(&self, event: InboundEvent) {
        if let Err(e) = self.inbound_tx.try_send(event) {
            error!("Failed to forward inbound event: {}", e);
        }
    }
}

fn decode_roster(payload: &[u8]) -> Result<RosterSnapshot, serde_json::Error> {
    serde_json::from_slice(payload)
}
