use super::TransportError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Mqtt,
    Loopback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub kind: TransportKind,
    /// Broker address as `host:port`, the port defaults to 1883
    pub broker: String,
    pub user: String,
    pub pw: String,
    pub client_id: String,
    pub topic_prefix: String,
    pub keep_alive_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::Mqtt,
            broker: "localhost:1883".to_string(),
            user: String::new(),
            pw: String::new(),
            client_id: "remotepad".to_string(),
            topic_prefix: "remotepad".to_string(),
            keep_alive_secs: 5,
        }
    }
}

impl TransportConfig {
    pub fn broker_address(&self) -> Result<(String, u16), TransportError> {
        let mut parts = self.broker.splitn(2, ':');
        let host = parts.next().unwrap_or_default().trim();
        if host.is_empty() {
            return Err(TransportError::InvalidBroker(self.broker.clone()));
        }
        let port = match parts.next() {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| TransportError::InvalidBroker(self.broker.clone()))?,
            None => 1883,
        };
        Ok((host.to_string(), port))
    }
}

impl fmt::Display for TransportConfig {
    // Password left out on purpose, this ends up in logs
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TransportKind::Mqtt if self.user.is_empty() => write!(f, "mqtt://{}", self.broker),
            TransportKind::Mqtt => write!(f, "mqtt://{}@{}", self.user, self.broker),
            TransportKind::Loopback => write!(f, "loopback"),
        }
    }
}
