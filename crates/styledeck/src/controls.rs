//! Read-only projection of panel widget values.
//!
//! The target document's computed style is the single source of truth.
//! Widgets only mirror it: `apply_state` refreshes the projection, and
//! `capture_state` consults it for the active font selections. The
//! projection is never an independent store.

use std::collections::BTreeMap;

use crate::template::FontRole;

pub trait ControlsProjection: Send {
    /// Refresh the displayed value of one color control.
    fn reflect_color(&mut self, variable: &str, value: &str);

    /// Refresh the displayed selection of one font control.
    fn reflect_font(&mut self, role: FontRole, family: &str);

    /// Currently displayed selection for `role`, when a widget exists.
    fn selected_font(&self, role: FontRole) -> Option<String>;
}

/// Projection for hosts without widgets.
#[derive(Debug, Default)]
pub struct NullProjection;

impl ControlsProjection for NullProjection {
    fn reflect_color(&mut self, _variable: &str, _value: &str) {}

    fn reflect_font(&mut self, _role: FontRole, _family: &str) {}

    fn selected_font(&self, _role: FontRole) -> Option<String> {
        None
    }
}

/// Stores mirrored values; the in-memory stand-in for a real panel.
#[derive(Debug, Default)]
pub struct MemoryProjection {
    colors: BTreeMap<String, String>,
    heading_font: Option<String>,
    body_font: Option<String>,
}

impl MemoryProjection {
    pub fn color(&self, variable: &str) -> Option<&str> {
        self.colors.get(variable).map(String::as_str)
    }
}

impl ControlsProjection for MemoryProjection {
    fn reflect_color(&mut self, variable: &str, value: &str) {
        self.colors.insert(variable.to_string(), value.to_string());
    }

    fn reflect_font(&mut self, role: FontRole, family: &str) {
        match role {
            FontRole::Heading => self.heading_font = Some(family.to_string()),
            FontRole::Body => self.body_font = Some(family.to_string()),
        }
    }

    fn selected_font(&self, role: FontRole) -> Option<String> {
        match role {
            FontRole::Heading => self.heading_font.clone(),
            FontRole::Body => self.body_font.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_projection_mirrors_values() {
        let mut projection = MemoryProjection::default();
        projection.reflect_color("--accent", "#1a5f7a");
        projection.reflect_font(FontRole::Heading, "Lora");

        assert_eq!(projection.color("--accent"), Some("#1a5f7a"));
        assert_eq!(
            projection.selected_font(FontRole::Heading).as_deref(),
            Some("Lora")
        );
        assert!(projection.selected_font(FontRole::Body).is_none());
    }

    #[test]
    fn null_projection_reports_no_selection() {
        let projection = NullProjection;
        assert!(projection.selected_font(FontRole::Heading).is_none());
    }
}
