//! Rendering contract for participant rosters pushed by the remote peer

use crate::transport::{RosterEntry, RosterSnapshot};
use chrono::{DateTime, Local};
use tracing::debug;

pub trait RosterView {
    /// Replaces whatever is displayed with `snapshot`, in snapshot order
    fn render(&mut self, snapshot: RosterSnapshot);
}

/// Roster list backing the host's player panel
#[derive(Debug, Default, Clone)]
pub struct RosterPanel {
    entries: Vec<RosterEntry>,
    updated_at: Option<DateTime<Local>>,
}

impl RosterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }
}

impl RosterView for RosterPanel {
    fn render(&mut self, snapshot: RosterSnapshot) {
        debug!("Rendering roster with {} players", snapshot.players.len());
        self.entries = snapshot.players;
        self.updated_at = Some(Local::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, selection: u32) -> RosterEntry {
        RosterEntry {
            player_name: name.to_string(),
            selection,
            selection_name: format!("Vehicle {}", selection),
        }
    }

    #[test]
    fn snapshot_replaces_previous_list() {
        let mut panel = RosterPanel::new();
        panel.render(RosterSnapshot {
            players: vec![entry("ada", 1), entry("bob", 2), entry("cy", 3)],
        });
        assert_eq!(panel.entries().len(), 3);

        panel.render(RosterSnapshot {
            players: vec![entry("dee", 4), entry("ada", 1)],
        });
        let names: Vec<&str> = panel
            .entries()
            .iter()
            .map(|e| e.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["dee", "ada"]);
        assert!(panel.updated_at().is_some());
    }

    #[test]
    fn empty_snapshot_clears_the_list() {
        let mut panel = RosterPanel::new();
        panel.render(RosterSnapshot {
            players: vec![entry("ada", 1)],
        });
        panel.render(RosterSnapshot::default());
        assert!(panel.entries().is_empty());
    }
}
