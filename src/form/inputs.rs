//! Live input values of the rendered form

use std::collections::BTreeMap;

use super::medium::{MediumKind, MediumSelector, MEDIUM_FIELD, MEDIUM_VISUAL_FIELD};

/// Current values of every input, keyed by field name.
///
/// Plain fields live in a map; the contact medium inputs are answered by
/// the `MediumSelector` so their exclusivity cannot be bypassed.
#[derive(Debug, Clone, Default)]
pub struct FormInputs {
    values: BTreeMap<String, String>,
    medium: MediumSelector,
}

impl FormInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an input; unknown or empty inputs read as ""
    pub fn value(&self, name: &str) -> &str {
        if let Some(kind) = MediumKind::from_payload_field(name) {
            return self.medium.value(kind);
        }
        match name {
            MEDIUM_FIELD => self.medium.revealed().map_or("", |kind| kind.tag()),
            MEDIUM_VISUAL_FIELD => self.medium.visual().map_or("", |kind| kind.tag()),
            _ => self.values.get(name).map_or("", String::as_str),
        }
    }

    /// Set a plain input. Contact medium inputs go through `medium_mut`.
    pub fn set(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value.to_string());
        }
    }

    pub fn medium(&self) -> &MediumSelector {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut MediumSelector {
        &mut self.medium
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        MediumKind::from_payload_field(name).map_or(true, |kind| self.medium.is_enabled(kind))
    }

    /// Payload inputs stay hidden until their section is revealed
    pub fn is_hidden(&self, name: &str) -> bool {
        MediumKind::from_payload_field(name).is_some_and(|kind| self.medium.is_hidden(kind))
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.medium.clear();
    }
}
