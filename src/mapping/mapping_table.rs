//! Live-editable bindings between logical controls and physical inputs

use super::control::LogicalControl;
use std::collections::HashMap;
use tracing::debug;

/// Physical bindings of a single control, stored as the user typed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub control: LogicalControl,
    pub key: String,
    pub button: String,
}

impl Binding {
    fn factory(control: LogicalControl) -> Self {
        Self {
            control,
            key: control.default_key().to_string(),
            button: control.default_button().to_string(),
        }
    }

    /// Button index held by the text field, if it is a number.
    ///
    /// An empty field is unbound, it does not fall back to button 0.
    pub fn button_index(&self) -> Option<usize> {
        parse_button(&self.button)
    }
}

/// Mapping table for all logical controls.
///
/// Lookups always read the current field values, there is no index to
/// invalidate. Reverse lookups walk [`LogicalControl::ALL`] and return the
/// first hit, which is fine for twelve entries polled a few times per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    bindings: Vec<Binding>,
}

impl Default for MappingTable {
    fn default() -> Self {
        Self {
            bindings: LogicalControl::ALL.into_iter().map(Binding::factory).collect(),
        }
    }
}

impl MappingTable {
    /// Factory defaults with individual fields replaced
    pub fn with_overrides(
        keys: &HashMap<LogicalControl, String>,
        buttons: &HashMap<LogicalControl, usize>,
    ) -> Self {
        let mut table = Self::default();
        for (control, key) in keys {
            table.set_key_binding(*control, key.clone());
        }
        for (control, button) in buttons {
            table.set_button_binding(*control, button.to_string());
        }
        table
    }

    pub fn binding_for_key(&self, control: LogicalControl) -> &str {
        &self.binding(control).key
    }

    /// Bound button index, `None` when the field does not hold a number
    pub fn binding_for_button(&self, control: LogicalControl) -> Option<usize> {
        self.binding(control).button_index()
    }

    pub fn control_for_key(&self, key_code: &str) -> Option<LogicalControl> {
        self.bindings
            .iter()
            .find(|binding| binding.key == key_code)
            .map(|binding| binding.control)
    }

    pub fn control_for_button(&self, index: usize) -> Option<LogicalControl> {
        self.bindings
            .iter()
            .find(|binding| binding.button_index() == Some(index))
            .map(|binding| binding.control)
    }

    pub fn set_key_binding(&mut self, control: LogicalControl, key_code: impl Into<String>) {
        let key_code = key_code.into();
        debug!("Binding {} to key {}", control, key_code);
        self.binding_mut(control).key = key_code;
    }

    /// Stores the raw text; it is only interpreted on lookup
    pub fn set_button_binding(&mut self, control: LogicalControl, button: impl Into<String>) {
        let button = button.into();
        debug!("Binding {} to button {}", control, button);
        self.binding_mut(control).button = button;
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    fn binding(&self, control: LogicalControl) -> &Binding {
        // bindings is built from ALL in order, so the position is the index
        &self.bindings[control_index(control)]
    }

    /// Row of `control`, edited in place by the binding editor
    pub fn binding_mut(&mut self, control: LogicalControl) -> &mut Binding {
        &mut self.bindings[control_index(control)]
    }
}

fn control_index(control: LogicalControl) -> usize {
    LogicalControl::ALL
        .iter()
        .position(|c| *c == control)
        .unwrap_or_default()
}

fn parse_button(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_bindings_resolve_both_ways() {
        let table = MappingTable::default();
        assert_eq!(table.binding_for_key(LogicalControl::AButton), "KeyF");
        assert_eq!(table.binding_for_button(LogicalControl::DpadUp), Some(12));
        assert_eq!(table.control_for_key("KeyQ"), Some(LogicalControl::SelectDown));
        assert_eq!(table.control_for_button(9), Some(LogicalControl::SelectUp));
        assert_eq!(table.control_for_key("KeyZ"), None);
        assert_eq!(table.control_for_button(16), None);
    }

    #[test]
    fn edits_are_visible_on_next_lookup() {
        let mut table = MappingTable::default();
        table.set_key_binding(LogicalControl::AButton, "Space");
        assert_eq!(table.control_for_key("Space"), Some(LogicalControl::AButton));
        assert_eq!(table.control_for_key("KeyF"), None);

        table.binding_mut(LogicalControl::BButton).button = "7".to_string();
        assert_eq!(table.control_for_button(7), Some(LogicalControl::BButton));
        assert_eq!(table.control_for_button(1), None);
    }

    #[test]
    fn non_numeric_button_field_matches_nothing() {
        let mut table = MappingTable::default();
        table.set_button_binding(LogicalControl::AButton, "abc");
        assert_eq!(table.binding_for_button(LogicalControl::AButton), None);
        assert_eq!(table.control_for_button(0), None);

        table.set_button_binding(LogicalControl::AButton, "");
        assert_eq!(table.control_for_button(0), None);

        table.set_button_binding(LogicalControl::AButton, " 0 ");
        assert_eq!(table.control_for_button(0), Some(LogicalControl::AButton));
    }

    #[test]
    fn collisions_resolve_to_first_control_in_order() {
        let mut table = MappingTable::default();
        table.set_key_binding(LogicalControl::SelectDown, "KeyF");
        assert_eq!(table.control_for_key("KeyF"), Some(LogicalControl::AButton));

        table.set_button_binding(LogicalControl::AButton, "13");
        assert_eq!(table.control_for_button(13), Some(LogicalControl::AButton));
    }

    #[test]
    fn overrides_replace_only_named_fields() {
        let keys = HashMap::from([(LogicalControl::DpadUp, "ArrowUp".to_string())]);
        let buttons = HashMap::from([(LogicalControl::BButton, 6)]);
        let table = MappingTable::with_overrides(&keys, &buttons);

        assert_eq!(table.binding_for_key(LogicalControl::DpadUp), "ArrowUp");
        assert_eq!(table.binding_for_button(LogicalControl::DpadUp), Some(12));
        assert_eq!(table.binding_for_button(LogicalControl::BButton), Some(6));
        assert_eq!(table.binding_for_key(LogicalControl::BButton), "KeyG");
    }

    #[test]
    fn reset_restores_factory_defaults() {
        let mut table = MappingTable::default();
        table.set_key_binding(LogicalControl::XButton, "KeyX");
        table.reset_to_defaults();
        assert_eq!(table, MappingTable::default());
    }
}
