//! A captured copy of the tracked visual state at one instant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::template::FontRole;

/// The full visual state at one point in time: every tracked root color
/// variable plus the active font selection per role. Immutable once pushed
/// onto a history stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub variables: BTreeMap<String, String>,
    pub heading_font: Option<String>,
    pub body_font: Option<String>,
}

impl StateSnapshot {
    pub fn font(&self, role: FontRole) -> Option<&str> {
        match role {
            FontRole::Heading => self.heading_font.as_deref(),
            FontRole::Body => self.body_font.as_deref(),
        }
    }
}
