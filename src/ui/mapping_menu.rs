use egui::{ComboBox, Grid, ScrollArea, TextEdit, Ui};
use tracing::info;

use crate::mapping::{DeviceMode, InputConfig, LogicalControl};

/// Player name, device selection and the binding table.
///
/// Edits go straight into `config`; the session reads it on the next event.
pub fn render(ui: &mut Ui, config: &mut InputConfig) {
    ui.heading("Input");

    ui.horizontal(|ui| {
        ui.label("Player");
        ui.add(TextEdit::singleline(&mut config.player_name).hint_text("name"));
    });

    let previous_mode = config.mode;
    ComboBox::from_label("Device")
        .selected_text(config.mode.to_string())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut config.mode, DeviceMode::Keyboard, "Keyboard");
            ui.selectable_value(&mut config.mode, DeviceMode::Gamepad, "Gamepad");
        });
    if config.mode != previous_mode {
        info!("Input device switched to {}", config.mode);
    }

    ui.separator();

    ScrollArea::vertical().show(ui, |ui| {
        Grid::new("mapping_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Control");
                ui.strong("Key");
                ui.strong("Button");
                ui.end_row();

                for control in LogicalControl::ALL {
                    ui.label(control.as_str());

                    let binding = config.mapping.binding_mut(control);
                    let key = ui.add(TextEdit::singleline(&mut binding.key).desired_width(70.0));
                    if config.mapping.binding_for_key(control).is_empty() {
                        key.on_hover_text("No key bound");
                    }

                    let binding = config.mapping.binding_mut(control);
                    let button =
                        ui.add(TextEdit::singleline(&mut binding.button).desired_width(30.0));
                    if config.mapping.binding_for_button(control).is_none() {
                        button.on_hover_text("Not a button index, control is unbound");
                    }
                    ui.end_row();
                }
            });
    });

    if ui.button("Reset bindings").clicked() {
        info!("Resetting bindings to defaults");
        config.mapping.reset_to_defaults();
    }
}
