//! Shared styling and key naming for the desktop host

use egui::{Color32, Event, Frame, Key, Stroke};

use crate::controller::KeyTransition;

/// Dark theme palette
pub struct UiColors;

impl UiColors {
    pub const INNER_BG: Color32 = Color32::from_rgb(25, 25, 25);

    pub const EXTREME_BG: Color32 = Color32::from_rgb(20, 20, 20);

    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 60);

    /// Connected / pressed
    pub const ACTIVE: Color32 = Color32::from_rgb(50, 200, 20);

    /// Disconnected / released
    pub const INACTIVE: Color32 = Color32::from_rgb(200, 50, 20);
}

pub fn create_frame(bg_color: Color32, border_color: Color32) -> Frame {
    Frame::new()
        .stroke(Stroke::new(1.0, border_color))
        .fill(bg_color)
        .inner_margin(4)
        .outer_margin(2)
}

/// Layout independent key code name, `KeyF`, `Digit1`, `ArrowUp`, ...
pub fn key_code(key: Key) -> String {
    match key {
        Key::ArrowUp => "ArrowUp".to_string(),
        Key::ArrowDown => "ArrowDown".to_string(),
        Key::ArrowLeft => "ArrowLeft".to_string(),
        Key::ArrowRight => "ArrowRight".to_string(),
        Key::Equals => "Equal".to_string(),
        Key::OpenBracket => "BracketLeft".to_string(),
        Key::CloseBracket => "BracketRight".to_string(),
        Key::Backtick => "Backquote".to_string(),
        _ => {
            let name = key.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => {
                    format!("Key{}", c.to_ascii_uppercase())
                }
                (Some(c), None) if c.is_ascii_digit() => format!("Digit{}", c),
                _ => name.to_string(),
            }
        }
    }
}

/// Key signals contained in one frame's input events.
///
/// The physical key is preferred so bindings survive keyboard layout changes.
pub fn key_transitions(events: &[Event]) -> Vec<KeyTransition> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key,
                physical_key,
                pressed,
                ..
            } => {
                let code = key_code(physical_key.unwrap_or(*key));
                Some(if *pressed {
                    KeyTransition::Down(code)
                } else {
                    KeyTransition::Up(code)
                })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{LogicalControl, MappingTable};
    use egui::Modifiers;

    fn key_event(key: Key, physical_key: Option<Key>, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key,
            pressed,
            repeat,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn key_codes_follow_dom_naming() {
        assert_eq!(key_code(Key::F), "KeyF");
        assert_eq!(key_code(Key::Num1), "Digit1");
        assert_eq!(key_code(Key::ArrowUp), "ArrowUp");
        assert_eq!(key_code(Key::Space), "Space");
        assert_eq!(key_code(Key::Equals), "Equal");
        assert_eq!(key_code(Key::OpenBracket), "BracketLeft");
        assert_eq!(key_code(Key::CloseBracket), "BracketRight");
        assert_eq!(key_code(Key::Backtick), "Backquote");
        assert_eq!(key_code(Key::Minus), "Minus");
        assert_eq!(key_code(Key::Semicolon), "Semicolon");
    }

    #[test]
    fn punctuation_bound_by_dom_name_resolves() {
        let mut table = MappingTable::default();
        table.set_key_binding(LogicalControl::XButton, "BracketLeft");
        table.set_key_binding(LogicalControl::YButton, "Equal");

        let events = vec![
            key_event(Key::OpenBracket, None, true, false),
            key_event(Key::Equals, None, true, false),
        ];
        let controls: Vec<Option<LogicalControl>> = key_transitions(&events)
            .iter()
            .map(|transition| match transition {
                KeyTransition::Down(code) | KeyTransition::Up(code) => {
                    table.control_for_key(code)
                }
            })
            .collect();
        assert_eq!(
            controls,
            vec![Some(LogicalControl::XButton), Some(LogicalControl::YButton)]
        );
    }

    #[test]
    fn transitions_prefer_physical_key() {
        let events = vec![
            key_event(Key::Z, Some(Key::Y), true, false),
            Event::Text("z".to_string()),
            key_event(Key::F, None, true, true),
            key_event(Key::F, None, false, false),
        ];
        assert_eq!(
            key_transitions(&events),
            vec![
                KeyTransition::Down("KeyY".to_string()),
                KeyTransition::Down("KeyF".to_string()),
                KeyTransition::Up("KeyF".to_string()),
            ]
        );
    }
}
