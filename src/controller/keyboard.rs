//! Edge detector for keyboard key codes

use crate::mapping::{DeviceMode, InputConfig, LogicalControl};
use std::collections::HashMap;
use tracing::debug;

/// Raw key signal delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyTransition {
    Down(String),
    Up(String),
}

/// Detected edge for a bound key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEdge {
    pub control: LogicalControl,
    pub key_code: String,
    pub pressed: bool,
}

/// Held state per key code.
///
/// Entries are created on first press and only ever flipped afterwards.
#[derive(Debug, Default, Clone)]
pub struct KeyboardTracker {
    held: HashMap<String, bool>,
}

impl KeyboardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key_code: &str) -> bool {
        self.held.get(key_code).copied().unwrap_or(false)
    }

    /// Applies a key signal and returns the edge to dispatch, if any.
    ///
    /// Down is ignored outside keyboard mode and while the key is already
    /// held (OS key repeat). Up always releases the key but only reports
    /// an edge in keyboard mode and when the key was actually held.
    pub fn apply(&mut self, config: &InputConfig, transition: &KeyTransition) -> Option<KeyEdge> {
        match transition {
            KeyTransition::Down(code) => {
                if config.mode != DeviceMode::Keyboard {
                    return None;
                }
                if self.is_held(code) {
                    debug!("Key repeat ignored: {}", code);
                    return None;
                }
                self.held.insert(code.clone(), true);
                self.resolve(config, code, true)
            }
            KeyTransition::Up(code) => {
                let was_held = self.held.insert(code.clone(), false).unwrap_or(false);
                if config.mode != DeviceMode::Keyboard || !was_held {
                    return None;
                }
                self.resolve(config, code, false)
            }
        }
    }

    fn resolve(&self, config: &InputConfig, code: &str, pressed: bool) -> Option<KeyEdge> {
        let control = config.mapping.control_for_key(code)?;
        Some(KeyEdge {
            control,
            key_code: code.to_string(),
            pressed,
        })
    }
}
