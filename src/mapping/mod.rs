//! Translation of physical inputs into logical controls.
//!
//! Holds the fixed control set, the editable mapping table and the
//! configuration object that every pipeline entry point reads from.

pub mod control;
pub mod mapping_table;

pub use control::LogicalControl;
pub use mapping_table::{Binding, MappingTable};

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Input device whose signals are currently forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    #[default]
    Keyboard,
    Gamepad,
}

impl Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMode::Keyboard => write!(f, "Keyboard"),
            DeviceMode::Gamepad => write!(f, "Gamepad"),
        }
    }
}

/// User editable input configuration.
///
/// Passed by reference into every session entry point, so an edit made
/// between two events applies to the second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputConfig {
    pub mapping: MappingTable,
    pub mode: DeviceMode,
    pub player_name: String,
}
