//! Canonical control identifiers shared by the keyboard and gamepad paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device independent control forwarded to the remote peer.
///
/// The set is fixed; [`LogicalControl::ALL`] is also the scan order for
/// reverse lookups, so the first control in this order wins a binding collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalControl {
    AButton,
    BButton,
    XButton,
    YButton,
    LeftTrigger,
    RightTrigger,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    SelectUp,
    SelectDown,
}

impl LogicalControl {
    pub const ALL: [LogicalControl; 12] = [
        LogicalControl::AButton,
        LogicalControl::BButton,
        LogicalControl::XButton,
        LogicalControl::YButton,
        LogicalControl::LeftTrigger,
        LogicalControl::RightTrigger,
        LogicalControl::DpadUp,
        LogicalControl::DpadDown,
        LogicalControl::DpadLeft,
        LogicalControl::DpadRight,
        LogicalControl::SelectUp,
        LogicalControl::SelectDown,
    ];

    /// Wire name, identical to the serde representation
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalControl::AButton => "A_BUTTON",
            LogicalControl::BButton => "B_BUTTON",
            LogicalControl::XButton => "X_BUTTON",
            LogicalControl::YButton => "Y_BUTTON",
            LogicalControl::LeftTrigger => "LEFT_TRIGGER",
            LogicalControl::RightTrigger => "RIGHT_TRIGGER",
            LogicalControl::DpadUp => "DPAD_UP",
            LogicalControl::DpadDown => "DPAD_DOWN",
            LogicalControl::DpadLeft => "DPAD_LEFT",
            LogicalControl::DpadRight => "DPAD_RIGHT",
            LogicalControl::SelectUp => "SELECT_UP",
            LogicalControl::SelectDown => "SELECT_DOWN",
        }
    }

    /// Factory key code binding
    pub fn default_key(self) -> &'static str {
        match self {
            LogicalControl::AButton => "KeyF",
            LogicalControl::BButton => "KeyG",
            LogicalControl::XButton => "KeyR",
            LogicalControl::YButton => "KeyT",
            LogicalControl::LeftTrigger => "Digit1",
            LogicalControl::RightTrigger => "Digit3",
            LogicalControl::DpadUp => "KeyW",
            LogicalControl::DpadDown => "KeyS",
            LogicalControl::DpadLeft => "KeyA",
            LogicalControl::DpadRight => "KeyD",
            LogicalControl::SelectUp => "KeyE",
            LogicalControl::SelectDown => "KeyQ",
        }
    }

    /// Factory gamepad button binding, indices follow the standard gamepad layout
    pub fn default_button(self) -> usize {
        match self {
            LogicalControl::AButton => 0,
            LogicalControl::BButton => 1,
            LogicalControl::XButton => 2,
            LogicalControl::YButton => 3,
            LogicalControl::LeftTrigger => 4,
            LogicalControl::RightTrigger => 5,
            LogicalControl::DpadUp => 12,
            LogicalControl::DpadDown => 13,
            LogicalControl::DpadLeft => 14,
            LogicalControl::DpadRight => 15,
            LogicalControl::SelectUp => 9,
            LogicalControl::SelectDown => 8,
        }
    }
}

impl fmt::Display for LogicalControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown control: {0}")]
pub struct UnknownControl(pub String);

impl FromStr for LogicalControl {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicalControl::ALL
            .into_iter()
            .find(|control| control.as_str() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}
