use crate::controller::gamepad::GamepadFrame;
use gilrs::{Button, Event, EventType, Gilrs};
use tracing::{error, info, trace, warn};

/// Button order of a sampled frame, following the standard gamepad layout
/// so that indices line up with the factory bindings.
pub const STANDARD_LAYOUT: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

// Collector errors
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to initialize collector: {0}")]
    InitializationError(String),
}

/// Anything that can hand out the current button frame of the gamepad in slot 0
pub trait GamepadSource {
    /// `None` when no gamepad is connected
    fn sample(&mut self) -> Option<GamepadFrame>;
}

/// gilrs backed gamepad source
pub struct GilrsSource {
    gilrs: Gilrs,
}

impl GilrsSource {
    pub fn create() -> Result<Self, CollectorError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(CollectorError::InitializationError(e.to_string()));
            }
        };

        let mut found = 0;
        for (idx, (id, gamepad)) in gilrs.gamepads().enumerate() {
            info!(
                "  [{}] ID: {}, Name: {}, UUID: {:?}",
                idx,
                id,
                gamepad.name(),
                gamepad.uuid()
            );
            found += 1;
        }
        if found == 0 {
            warn!("No gamepad connected, gamepad mode stays idle until one appears");
        }

        Ok(Self { gilrs })
    }

    // Drain queued events so the cached gamepad state is current
    fn pump_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("Gamepad connected: {}", self.gilrs.gamepad(id).name());
                }
                EventType::Disconnected => {
                    warn!("Gamepad disconnected: {}", id);
                }
                _ => {}
            }
        }
    }
}

impl GamepadSource for GilrsSource {
    fn sample(&mut self) -> Option<GamepadFrame> {
        self.pump_events();

        let (id, gamepad) = self.gilrs.gamepads().next()?;
        let buttons: Vec<bool> = STANDARD_LAYOUT
            .iter()
            .map(|button| gamepad.is_pressed(*button))
            .collect();
        trace!("Sampled gamepad {}: {:?}", id, buttons);
        Some(GamepadFrame::new(buttons))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_places_face_buttons_and_dpad_at_standard_indices() {
        assert_eq!(STANDARD_LAYOUT[0], Button::South);
        assert_eq!(STANDARD_LAYOUT[3], Button::North);
        assert_eq!(STANDARD_LAYOUT[8], Button::Select);
        assert_eq!(STANDARD_LAYOUT[9], Button::Start);
        assert_eq!(STANDARD_LAYOUT[12], Button::DPadUp);
        assert_eq!(STANDARD_LAYOUT[15], Button::DPadRight);
    }
}
