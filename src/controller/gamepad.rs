//! Edge detector for per-frame gamepad button samples

use crate::mapping::{InputConfig, LogicalControl};
use tracing::debug;

/// Pressed state of every button of one gamepad, in button index order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamepadFrame {
    pub buttons: Vec<bool>,
}

impl GamepadFrame {
    pub fn new(buttons: Vec<bool>) -> Self {
        Self { buttons }
    }

    /// Indices missing from the frame count as released
    pub fn is_pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
}

/// Detected edge for a bound button index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdge {
    pub control: LogicalControl,
    pub index: usize,
    pub pressed: bool,
}

/// Keeps exactly one previous frame; the initial previous frame is all released.
#[derive(Debug, Default, Clone)]
pub struct GamepadTracker {
    previous: GamepadFrame,
}

impl GamepadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> &GamepadFrame {
        &self.previous
    }

    /// Diffs `frame` against the previous sample and stores it as the new
    /// previous sample, whatever the number of edges produced.
    pub fn diff(&mut self, config: &InputConfig, frame: GamepadFrame) -> Vec<ButtonEdge> {
        let edges: Vec<ButtonEdge> = frame
            .buttons
            .iter()
            .enumerate()
            .filter(|(index, pressed)| **pressed != self.previous.is_pressed(*index))
            .filter_map(|(index, pressed)| {
                let control = config.mapping.control_for_button(index);
                if control.is_none() {
                    debug!("Unbound button {} changed to {}", index, pressed);
                }
                control.map(|control| ButtonEdge {
                    control,
                    index,
                    pressed: *pressed,
                })
            })
            .collect();

        self.previous = frame;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::DeviceMode;

    fn gamepad_config() -> InputConfig {
        InputConfig {
            mode: DeviceMode::Gamepad,
            ..InputConfig::default()
        }
    }

    fn frame(buttons: &[bool]) -> GamepadFrame {
        GamepadFrame::new(buttons.to_vec())
    }

    #[test]
    fn first_frame_compares_against_released() {
        let config = gamepad_config();
        let mut tracker = GamepadTracker::new();

        let edges = tracker.diff(&config, frame(&[false, true, false]));
        assert_eq!(
            edges,
            vec![ButtonEdge {
                control: LogicalControl::BButton,
                index: 1,
                pressed: true
            }]
        );
    }

    #[test]
    fn unchanged_frame_twice_yields_nothing_the_second_time() {
        let config = gamepad_config();
        let mut tracker = GamepadTracker::new();

        assert_eq!(tracker.diff(&config, frame(&[true, true])).len(), 2);
        assert!(tracker.diff(&config, frame(&[true, true])).is_empty());
    }

    #[test]
    fn only_bound_indices_produce_edges() {
        let mut config = gamepad_config();
        for control in LogicalControl::ALL {
            config.mapping.set_button_binding(control, "");
        }
        config
            .mapping
            .set_button_binding(LogicalControl::DpadUp, "0");
        let mut tracker = GamepadTracker::new();
        tracker.diff(&config, frame(&[false, false]));

        let edges = tracker.diff(&config, frame(&[true, true]));
        assert_eq!(
            edges,
            vec![ButtonEdge {
                control: LogicalControl::DpadUp,
                index: 0,
                pressed: true
            }]
        );
    }

    #[test]
    fn release_is_reported_with_pressed_false() {
        let config = gamepad_config();
        let mut tracker = GamepadTracker::new();
        tracker.diff(&config, frame(&[true]));

        let edges = tracker.diff(&config, frame(&[false]));
        assert_eq!(edges.len(), 1);
        assert!(!edges[0].pressed);
        assert_eq!(edges[0].control, LogicalControl::AButton);
    }

    #[test]
    fn previous_frame_is_replaced_even_without_edges() {
        let mut config = gamepad_config();
        for control in LogicalControl::ALL {
            config.mapping.set_button_binding(control, "x");
        }
        let mut tracker = GamepadTracker::new();

        assert!(tracker.diff(&config, frame(&[true, false, true])).is_empty());
        assert_eq!(tracker.previous(), &frame(&[true, false, true]));
    }

    #[test]
    fn shorter_previous_frame_pads_with_released() {
        let config = gamepad_config();
        let mut tracker = GamepadTracker::new();
        tracker.diff(&config, frame(&[false]));

        let mut buttons = vec![false; 13];
        buttons[12] = true;
        let edges = tracker.diff(&config, GamepadFrame::new(buttons));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].control, LogicalControl::DpadUp);
    }
}
