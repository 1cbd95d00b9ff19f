//! styledeck: the headless core of a live design editor for HTML document
//! templates.
//!
//! A side panel lets a user tweak colors, fonts, spacing, and section
//! visibility of a rendered document. This crate owns the two stateful
//! subsystems behind that panel: the style-state engine (capture/apply of
//! the live visual state, linear undo/redo) and the change ledger (a
//! deduplicated, time-ordered record of edits that synthesizes a
//! paste-ready instruction prompt). The hosting application supplies the
//! document, the widgets, the clipboard, and the font pipeline through
//! small traits.

pub mod clipboard;
pub mod controls;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod history;
pub mod ledger;
pub mod notice;
pub mod session;
pub mod snapshot;
pub mod target;
pub mod template;

pub use crate::engine::StyleEngine;
pub use crate::error::{CoreError, CoreResult};
pub use crate::ledger::{
    ChangeDetails, ChangeEntry, ChangeKind, ChangeLedger, ChangeRecord, ToggleAction,
};
pub use crate::session::EditSession;
pub use crate::snapshot::StateSnapshot;
pub use crate::target::{await_target, PreviewState, TargetReadiness};
pub use crate::template::{FontRole, TemplateMap};
