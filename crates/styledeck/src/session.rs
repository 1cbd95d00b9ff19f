//! One live editing session: a style engine and a change ledger working
//! against a single template.
//!
//! The session is the seam the control surface calls into. Each semantic
//! operation mutates the live style state through the engine and records
//! its meaning in the ledger; the two subsystems share no mutable data.

use std::sync::Arc;

use tracing::info;

use crate::clipboard::{Clipboard, ClipboardStack, UnavailableClipboard};
use crate::controls::ControlsProjection;
use crate::engine::StyleEngine;
use crate::fonts::FontSource;
use crate::ledger::{ChangeDetails, ChangeEntry, ChangeKind, ChangeLedger, ToggleAction};
use crate::notice::{LogNotices, NoticeSink};
use crate::snapshot::StateSnapshot;
use crate::target::TargetResolver;
use crate::template::{FontRole, TemplateMap};

pub struct EditSession {
    session_id: String,
    map: Arc<TemplateMap>,
    engine: StyleEngine,
    ledger: ChangeLedger,
    clipboard: ClipboardStack,
    notices: Box<dyn NoticeSink>,
}

impl EditSession {
    /// Start a session for `map` against the documents reached through
    /// `resolver`. Widgets, fonts, clipboard, and notices default to
    /// headless implementations; use the `with_*` methods to wire real ones.
    pub fn new(map: TemplateMap, resolver: Box<dyn TargetResolver>) -> Self {
        let map = Arc::new(map);
        let session_id = uuid::Uuid::new_v4().to_string();
        info!(session_id = %session_id, template = %map.name, "edit session started");
        EditSession {
            engine: StyleEngine::new(Arc::clone(&map), resolver),
            ledger: ChangeLedger::new(map.name.clone()),
            clipboard: ClipboardStack::new(Box::new(UnavailableClipboard)),
            notices: Box::new(LogNotices),
            session_id,
            map,
        }
    }

    pub fn with_projection(mut self, projection: Box<dyn ControlsProjection>) -> Self {
        self.engine = self.engine.with_projection(projection);
        self
    }

    pub fn with_font_source(mut self, source: Box<dyn FontSource>) -> Self {
        self.engine = self.engine.with_font_source(source);
        self
    }

    pub fn with_clipboard(mut self, primary: Box<dyn Clipboard>) -> Self {
        self.clipboard = ClipboardStack::new(primary);
        self
    }

    pub fn with_fallback_clipboard(mut self, fallback: Box<dyn Clipboard>) -> Self {
        self.clipboard = self.clipboard.with_fallback(fallback);
        self
    }

    pub fn with_notices(mut self, notices: Box<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn template(&self) -> &TemplateMap {
        &self.map
    }

    pub fn ledger(&self) -> &ChangeLedger {
        &self.ledger
    }

    /// Register a pending-changes subscriber; see [`ChangeLedger::subscribe`].
    pub fn on_update(&mut self, subscriber: impl Fn(&[ChangeEntry]) + Send + 'static) {
        self.ledger.subscribe(subscriber);
    }

    /// Remove one pending change from the ledger by key.
    pub fn remove_change(&mut self, key: &str) {
        self.ledger.remove(key);
    }

    // --- Semantic edits ---

    /// Apply a color to one declared variable. The value must pass strict
    /// hex validation; anything else does not apply and returns `false`.
    pub fn set_color(&mut self, variable: &str, value: &str) -> bool {
        let value = value.trim();
        if !is_valid_hex(value) {
            return false;
        }
        let Some(color) = self.map.color(variable).cloned() else {
            return false;
        };
        self.engine.push_undo();
        self.engine.apply_color_choice(&color.variable, value);
        self.ledger.record(
            ChangeKind::Color,
            &color.label,
            ChangeDetails::swap(color.default, value),
        );
        true
    }

    /// Select a font for a role. The family must be one of the slot's
    /// offered options; unknown families do not apply.
    pub fn choose_font(&mut self, role: FontRole, family: &str) -> bool {
        let Some(slot) = self.map.fonts.get(role).cloned() else {
            return false;
        };
        if !slot.options.iter().any(|option| option == family) {
            return false;
        }
        // Capture before the widget selection changes so undo restores the
        // prior family.
        self.engine.push_undo();
        self.engine.apply_font_choice(role, family);
        self.ledger.record(
            ChangeKind::Font,
            &slot.label,
            ChangeDetails::swap(slot.default, family),
        );
        true
    }

    /// Move a slider. Values are clamped to the declared range; sliders do
    /// not create undo entries (snapshots track colors and fonts only).
    pub fn set_slider(&mut self, id: &str, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let Some(slider) = self.map.slider(id).cloned() else {
            return false;
        };
        let value = value.clamp(slider.min, slider.max);
        if slider.is_scale {
            for (selector, base) in &slider.scale_targets {
                let size = format!("{}{}", round2(base.base * value), base.unit);
                self.engine.apply_to_selectors(selector, "font-size", &size);
            }
        } else if let Some(property) = &slider.property {
            let formatted = format_value(value, &slider.unit);
            for selector in &slider.targets {
                self.engine.apply_to_selectors(selector, property, &formatted);
                if let Some(mirror) = &slider.mirror_property {
                    self.engine.apply_to_selectors(selector, mirror, &formatted);
                }
            }
        }
        self.ledger.record(
            ChangeKind::Size,
            &slider.label,
            ChangeDetails::swap(
                format_value(slider.default, &slider.unit),
                format_value(value, &slider.unit),
            ),
        );
        true
    }

    /// Show or hide a declared section. Hiding an already-hidden section
    /// still records; toggles are idempotent at the document level.
    pub fn toggle_section(&mut self, id: &str, visible: bool) -> bool {
        let Some(toggle) = self.map.toggle(id).cloned() else {
            return false;
        };
        let display = if visible { "" } else { "none" };
        self.engine
            .apply_to_selectors(&toggle.selector, "display", display);
        let action = if visible {
            ToggleAction::Show
        } else {
            ToggleAction::Hide
        };
        self.ledger.record(
            ChangeKind::Toggle,
            &toggle.label,
            ChangeDetails::toggle(action, toggle.selector.clone()),
        );
        true
    }

    /// Switch a layout control to one of its options by value.
    pub fn set_layout(&mut self, id: &str, value: &str) -> bool {
        let Some(control) = self.map.layout(id).cloned() else {
            return false;
        };
        let Some(option) = control.option_by_value(value).cloned() else {
            return false;
        };
        for selector in control.target.split(',') {
            self.engine
                .apply_to_selectors(selector.trim(), &control.property, &option.value);
        }
        let from = control
            .default_option()
            .map(|o| o.label.clone())
            .unwrap_or_else(|| control.default.clone());
        self.ledger.record(
            ChangeKind::Layout,
            &control.label,
            ChangeDetails::swap(from, option.label),
        );
        true
    }

    /// Apply a named preset: every color it carries plus its font choices,
    /// as one undoable step, each recorded individually.
    pub fn apply_preset(&mut self, id: &str) -> bool {
        let Some(preset) = self.map.preset(id).cloned() else {
            return false;
        };
        let map = Arc::clone(&self.map);
        self.engine.push_undo();
        for color in &map.colors {
            let Some(value) = preset.colors.get(&color.variable) else {
                continue;
            };
            self.engine.apply_color_choice(&color.variable, value);
            self.ledger.record(
                ChangeKind::Color,
                &color.label,
                ChangeDetails::swap(color.default.clone(), value.clone()),
            );
        }
        if let Some(family) = &preset.heading_font {
            self.apply_preset_font(FontRole::Heading, family);
        }
        if let Some(family) = &preset.body_font {
            self.apply_preset_font(FontRole::Body, family);
        }
        true
    }

    fn apply_preset_font(&mut self, role: FontRole, family: &str) {
        let Some(slot) = self.map.fonts.get(role).cloned() else {
            return;
        };
        self.engine.apply_font_choice(role, family);
        self.ledger.record(
            ChangeKind::Font,
            &slot.label,
            ChangeDetails::swap(slot.default, family),
        );
    }

    /// Warm the font pipeline: the template's default families plus every
    /// preset's choices. Call once the target document is ready.
    pub fn preload_fonts(&mut self) {
        self.engine.preload_fonts();
    }

    // --- History ---

    /// Remember the current state as an undo point before a custom edit
    /// made directly through the engine primitives.
    pub fn push_undo(&mut self) {
        self.engine.push_undo();
    }

    pub fn undo(&mut self) -> bool {
        self.engine.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.engine.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }

    pub fn capture_state(&mut self) -> StateSnapshot {
        self.engine.capture_state()
    }

    pub fn apply_state(&mut self, state: &StateSnapshot) {
        self.engine.apply_state(state);
    }

    // --- Ledger actions ---

    /// Copy the combined prompt to the clipboard and surface the outcome as
    /// a notice.
    pub async fn copy_changes(&mut self) {
        self.ledger
            .copy_to_clipboard(&self.clipboard, self.notices.as_mut())
            .await;
    }

    /// Discard all pending changes and history and restore the template's
    /// declared defaults.
    pub fn reset(&mut self) {
        self.ledger.clear_all();
        self.engine.clear_history();
        let defaults = default_snapshot(&self.map);
        self.engine.apply_state(&defaults);
        info!(session_id = %self.session_id, "session reset to template defaults");
    }

    /// End the session: release every registered subscriber and drop all
    /// history, so nothing leaks into a successor session.
    pub fn teardown(mut self) {
        self.ledger.release_subscribers();
        self.engine.clear_history();
        info!(session_id = %self.session_id, "edit session torn down");
    }
}

fn default_snapshot(map: &TemplateMap) -> StateSnapshot {
    StateSnapshot {
        variables: map
            .colors
            .iter()
            .map(|c| (c.variable.clone(), c.default.clone()))
            .collect(),
        heading_font: map.fonts.get(FontRole::Heading).map(|s| s.default.clone()),
        body_font: map.fonts.get(FontRole::Body).map(|s| s.default.clone()),
    }
}

/// Strict hex color check: `#` followed by 3 to 8 hex digits.
fn is_valid_hex(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (3..=8).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_value(value: f64, unit: &str) -> String {
    format!("{}{}", round2(value), unit)
}
