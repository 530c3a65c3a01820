//! Wire payloads exchanged with the remote peer

use crate::mapping::LogicalControl;
use serde::{Deserialize, Serialize};

/// Event name of outbound control events
pub const CONTROLLER_EVENT: &str = "controller";
/// Event name of inbound roster snapshots
pub const PLAYERS_EVENT: &str = "players";

/// One press or release of a logical control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerEvent {
    pub button: LogicalControl,
    pub pressed: bool,
    pub player_name: String,
}

/// Participant as reported by the remote peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_name: String,
    pub selection: u32,
    #[serde(default)]
    pub selection_name: String,
}

/// Full participant list; each snapshot replaces the previous one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub players: Vec<RosterEntry>,
}

/// Topic carrying `event` below `prefix`
pub fn topic(prefix: &str, event: &str) -> String {
    if prefix.is_empty() {
        event.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_event_uses_symbolic_button_name() {
        let event = ControllerEvent {
            button: LogicalControl::AButton,
            pressed: true,
            player_name: "ada".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"button": "A_BUTTON", "pressed": true, "player_name": "ada"})
        );
    }

    #[test]
    fn roster_snapshot_parses_server_payload() {
        let payload = r#"{"players":[
            {"player_name":"ada","selection":3,"selection_name":"Loader"},
            {"player_name":"bob","selection":0}
        ]}"#;
        let snapshot: RosterSnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0].selection_name, "Loader");
        assert_eq!(snapshot.players[1].player_name, "bob");
        assert!(snapshot.players[1].selection_name.is_empty());
    }

    #[test]
    fn topic_joins_prefix_and_event() {
        assert_eq!(topic("remotepad", CONTROLLER_EVENT), "remotepad/controller");
        assert_eq!(topic("remotepad/", PLAYERS_EVENT), "remotepad/players");
        assert_eq!(topic("", PLAYERS_EVENT), "players");
    }
}
