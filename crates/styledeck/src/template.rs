//! Declarative template contract: what a document template exposes to the
//! editing panel.

pub mod proposal;
pub mod schema;

pub use proposal::proposal;
pub use schema::{
    ColorVar, FontRole, FontSlot, FontSlots, LayoutControl, LayoutKind, LayoutOption, Preset,
    ScaleBase, SliderSpec, TemplateMap, ToggleSpec,
};
