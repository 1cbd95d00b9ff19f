use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};

/// Declarative description of what a document template exposes to the
/// editing panel: which custom properties, fonts, sliders, section toggles,
/// layout controls, and presets exist. Supplied by the hosting application
/// and never mutated by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMap {
    pub name: String,
    #[serde(default)]
    pub colors: Vec<ColorVar>,
    #[serde(default)]
    pub fonts: FontSlots,
    #[serde(default)]
    pub sliders: Vec<SliderSpec>,
    #[serde(default)]
    pub toggles: Vec<ToggleSpec>,
    #[serde(default)]
    pub layout: Vec<LayoutControl>,
    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl TemplateMap {
    /// Parse a template map from its JSON form.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|error| CoreError::InvalidInput(format!("malformed template map: {error}")))
    }

    pub fn color(&self, variable: &str) -> Option<&ColorVar> {
        self.colors.iter().find(|c| c.variable == variable)
    }

    pub fn slider(&self, id: &str) -> Option<&SliderSpec> {
        self.sliders.iter().find(|s| s.id == id)
    }

    pub fn toggle(&self, id: &str) -> Option<&ToggleSpec> {
        self.toggles.iter().find(|t| t.id == id)
    }

    pub fn layout(&self, id: &str) -> Option<&LayoutControl> {
        self.layout.iter().find(|l| l.id == id)
    }

    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }
}

/// A color control: one CSS custom property on the template's root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorVar {
    /// Custom property name, e.g. `--accent`.
    pub variable: String,
    pub label: String,
    pub default: String,
}

/// The two typographic roles a template distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Heading,
    Body,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<FontSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FontSlot>,
}

impl FontSlots {
    pub fn get(&self, role: FontRole) -> Option<&FontSlot> {
        match role {
            FontRole::Heading => self.heading.as_ref(),
            FontRole::Body => self.body.as_ref(),
        }
    }
}

/// One selectable font slot: the selectors it styles and the families offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontSlot {
    pub label: String,
    pub targets: Vec<String>,
    pub default: String,
    pub options: Vec<String>,
}

/// A numeric slider. Either writes `property` to each of `targets` (plus an
/// optional mirrored property), or in scale mode multiplies each declared
/// base size by the slider value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderSpec {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_property: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_scale: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scale_targets: BTreeMap<String, ScaleBase>,
}

/// Base size a scale slider multiplies for one selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleBase {
    pub base: f64,
    pub unit: String,
}

/// A show/hide switch for one template section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSpec {
    pub id: String,
    pub label: String,
    /// Selector (possibly comma-separated) for the elements to show or hide.
    pub selector: String,
    #[serde(default = "default_visible")]
    pub default: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutKind {
    ButtonGroup,
    Select,
}

/// A layout control driving one CSS property through a fixed option list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutControl {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    /// Selector (possibly comma-separated) the property is written to.
    pub target: String,
    pub property: String,
    pub options: Vec<LayoutOption>,
    /// Value of the option active before any edit.
    pub default: String,
}

impl LayoutControl {
    pub fn option_by_value(&self, value: &str) -> Option<&LayoutOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn default_option(&self) -> Option<&LayoutOption> {
        self.option_by_value(&self.default)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutOption {
    pub value: String,
    pub label: String,
}

/// A named bundle of color values and optional font choices applied in one
/// action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
}
