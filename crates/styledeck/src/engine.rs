//! Live style-state engine: reads and writes the visual state of the
//! target document and provides linear undo/redo over captured snapshots.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::controls::{ControlsProjection, NullProjection};
use crate::fonts::{self, FontLoader, FontSource, NullFontSource};
use crate::history::History;
use crate::snapshot::StateSnapshot;
use crate::target::{DocumentTarget, PreviewState, TargetResolver};
use crate::template::{FontRole, FontSlot, TemplateMap};

/// Reads and writes the live visual state of whichever document the
/// resolver currently designates, and owns the undo/redo history of
/// captured snapshots.
///
/// The engine holds no copy of the "current" state; it is derived on
/// demand by reading the target, so the document itself stays the single
/// source of truth.
pub struct StyleEngine {
    map: Arc<TemplateMap>,
    resolver: Box<dyn TargetResolver>,
    projection: Box<dyn ControlsProjection>,
    fonts: FontLoader,
    history: History,
}

impl StyleEngine {
    pub fn new(map: Arc<TemplateMap>, resolver: Box<dyn TargetResolver>) -> Self {
        StyleEngine {
            map,
            resolver,
            projection: Box::new(NullProjection),
            fonts: FontLoader::new(Box::new(NullFontSource)),
            history: History::new(),
        }
    }

    pub fn with_projection(mut self, projection: Box<dyn ControlsProjection>) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_font_source(mut self, source: Box<dyn FontSource>) -> Self {
        self.fonts = FontLoader::new(source);
        self
    }

    /// Resolve the target document for this one call. Resolution is never
    /// cached: a reloaded preview is picked up on the next operation, and a
    /// cross-origin preview degrades to the hosting document.
    fn target(&mut self) -> &mut dyn DocumentTarget {
        if self.resolver.preview_state() == PreviewState::CrossOrigin {
            debug!("preview denied access; using the hosting document");
        }
        self.resolver.resolve()
    }

    /// Write a style custom property on the target's root element.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.target().set_root_property(name, value);
    }

    /// Current value of a root custom property, trimmed; empty when unset.
    pub fn variable(&mut self, name: &str) -> String {
        self.target()
            .root_property(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    /// Write a style property onto every element matching `selector`.
    /// Returns the match count; zero matches is not an error.
    pub fn apply_to_selectors(&mut self, selector: &str, property: &str, value: &str) -> usize {
        self.target().style_matching(selector, property, value)
    }

    /// Capture the full tracked state: every declared color variable (map
    /// default when unreadable) and the active font selection per role
    /// (widget value when one exists, else the map default).
    pub fn capture_state(&mut self) -> StateSnapshot {
        let map = Arc::clone(&self.map);
        let mut variables = BTreeMap::new();
        for color in &map.colors {
            let current = self.variable(&color.variable);
            let value = if current.is_empty() {
                color.default.clone()
            } else {
                current
            };
            variables.insert(color.variable.clone(), value);
        }
        let heading_font = map.fonts.get(FontRole::Heading).map(|slot| {
            self.projection
                .selected_font(FontRole::Heading)
                .unwrap_or_else(|| slot.default.clone())
        });
        let body_font = map.fonts.get(FontRole::Body).map(|slot| {
            self.projection
                .selected_font(FontRole::Body)
                .unwrap_or_else(|| slot.default.clone())
        });
        StateSnapshot {
            variables,
            heading_font,
            body_font,
        }
    }

    /// Write a snapshot back: every variable, the widget projection, and
    /// each present font role across its declared selectors. The inverse of
    /// [`StyleEngine::capture_state`], and idempotent.
    pub fn apply_state(&mut self, state: &StateSnapshot) {
        for (name, value) in &state.variables {
            self.set_variable(name, value);
            self.projection.reflect_color(name, value);
        }
        let map = Arc::clone(&self.map);
        for role in [FontRole::Heading, FontRole::Body] {
            let (Some(family), Some(slot)) = (state.font(role), map.fonts.get(role)) else {
                continue;
            };
            self.apply_font(role, family, slot);
        }
    }

    /// Write one color variable and refresh its widget.
    pub fn apply_color_choice(&mut self, variable: &str, value: &str) {
        self.set_variable(variable, value);
        self.projection.reflect_color(variable, value);
    }

    /// Load `family` and apply its stack to every selector declared for
    /// `role`, refreshing the widget selection. `false` when the template
    /// has no such font slot.
    pub fn apply_font_choice(&mut self, role: FontRole, family: &str) -> bool {
        let map = Arc::clone(&self.map);
        let Some(slot) = map.fonts.get(role) else {
            return false;
        };
        self.apply_font(role, family, slot);
        true
    }

    fn apply_font(&mut self, role: FontRole, family: &str, slot: &FontSlot) {
        self.fonts.ensure_loaded(family);
        let stack = fonts::family_stack(role, family);
        for selector in &slot.targets {
            self.apply_to_selectors(selector, "font-family", &stack);
        }
        self.projection.reflect_font(role, family);
    }

    /// Request every font the template can need: the declared defaults plus
    /// each preset's choices. Meant for once the target is ready, so the
    /// assets are warm before the user opens a font menu.
    pub fn preload_fonts(&mut self) {
        let map = Arc::clone(&self.map);
        for role in [FontRole::Heading, FontRole::Body] {
            if let Some(slot) = map.fonts.get(role) {
                self.fonts.ensure_loaded(&slot.default);
            }
        }
        for preset in &map.presets {
            if let Some(family) = &preset.heading_font {
                self.fonts.ensure_loaded(family);
            }
            if let Some(family) = &preset.body_font {
                self.fonts.ensure_loaded(family);
            }
        }
    }

    /// Remember the current state as an undo point. Must be called before
    /// a discrete live edit; the edit itself supplies the new values.
    pub fn push_undo(&mut self) {
        let state = self.capture_state();
        self.history.push(state);
    }

    /// Step back one edit. No-op (returns `false`) when nothing is undoable.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = self.capture_state();
        match self.history.undo(current) {
            Some(restored) => {
                self.apply_state(&restored);
                true
            }
            None => false,
        }
    }

    /// Step forward again. No-op (returns `false`) when nothing is redoable.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = self.capture_state();
        match self.history.redo(current) {
            Some(restored) => {
                self.apply_state(&restored);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::MemoryProjection;
    use crate::target::MemoryDocument;
    use crate::template::{proposal, ColorVar, FontSlots};
    use std::sync::Mutex;

    /// Document handle shared between the engine and the test.
    struct SharedDocument(Arc<Mutex<MemoryDocument>>);

    impl DocumentTarget for SharedDocument {
        fn set_root_property(&mut self, name: &str, value: &str) {
            self.0.lock().unwrap().set_root_property(name, value);
        }

        fn root_property(&self, name: &str) -> Option<String> {
            self.0.lock().unwrap().root_property(name)
        }

        fn style_matching(&mut self, selector: &str, property: &str, value: &str) -> usize {
            self.0.lock().unwrap().style_matching(selector, property, value)
        }
    }

    /// Resolver with a scripted preview state shared with the test.
    struct SharedResolver {
        host: SharedDocument,
        preview: Option<SharedDocument>,
        state: Arc<Mutex<PreviewState>>,
    }

    impl TargetResolver for SharedResolver {
        fn preview_state(&self) -> PreviewState {
            *self.state.lock().unwrap()
        }

        fn resolve(&mut self) -> &mut dyn DocumentTarget {
            match (*self.state.lock().unwrap(), self.preview.as_mut()) {
                (PreviewState::Ready, Some(preview)) => preview,
                _ => &mut self.host,
            }
        }
    }

    struct Fixture {
        engine: StyleEngine,
        host: Arc<Mutex<MemoryDocument>>,
        preview: Arc<Mutex<MemoryDocument>>,
        state: Arc<Mutex<PreviewState>>,
        fonts: Arc<Mutex<Vec<String>>>,
    }

    /// Shared-handle font source so requests stay observable.
    struct SharedFontSource(Arc<Mutex<Vec<String>>>);

    impl FontSource for SharedFontSource {
        fn request(&mut self, family: &str) {
            self.0.lock().unwrap().push(family.to_string());
        }
    }

    fn seeded_document() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        for color in proposal().colors {
            doc.seed_root(&color.variable, &color.default);
        }
        doc.add_element(&["body"]);
        doc.add_element(&[".cover-title"]);
        doc.add_element(&[".section-title"]);
        doc
    }

    fn fixture(state: PreviewState) -> Fixture {
        let host = Arc::new(Mutex::new(seeded_document()));
        let preview = Arc::new(Mutex::new(seeded_document()));
        let shared_state = Arc::new(Mutex::new(state));
        let fonts = Arc::new(Mutex::new(Vec::new()));

        let resolver = SharedResolver {
            host: SharedDocument(Arc::clone(&host)),
            preview: Some(SharedDocument(Arc::clone(&preview))),
            state: Arc::clone(&shared_state),
        };
        let engine = StyleEngine::new(Arc::new(proposal()), Box::new(resolver))
            .with_projection(Box::<MemoryProjection>::default())
            .with_font_source(Box::new(SharedFontSource(Arc::clone(&fonts))));

        Fixture {
            engine,
            host,
            preview,
            state: shared_state,
            fonts,
        }
    }

    #[test]
    fn variables_round_trip_through_the_target() {
        let mut f = fixture(PreviewState::Missing);
        f.engine.set_variable("--red", "  #1a5f7a  ");
        assert_eq!(f.engine.variable("--red"), "#1a5f7a");
        assert_eq!(f.engine.variable("--undeclared"), "");
    }

    #[test]
    fn resolution_happens_per_call() {
        let mut f = fixture(PreviewState::Ready);

        f.engine.set_variable("--red", "#111111");
        assert_eq!(
            f.preview.lock().unwrap().root_property("--red").as_deref(),
            Some("#111111")
        );

        // The preview goes cross-origin between calls; the next write must
        // land in the host without an error.
        *f.state.lock().unwrap() = PreviewState::CrossOrigin;
        f.engine.set_variable("--red", "#222222");
        assert_eq!(
            f.host.lock().unwrap().root_property("--red").as_deref(),
            Some("#222222")
        );
        assert_eq!(
            f.preview.lock().unwrap().root_property("--red").as_deref(),
            Some("#111111")
        );
    }

    #[test]
    fn capture_reads_current_values_and_defaults() {
        let mut f = fixture(PreviewState::Missing);
        f.engine.set_variable("--red", "#2d8659");

        let state = f.engine.capture_state();
        assert_eq!(state.variables["--red"], "#2d8659");
        // Untouched variables fall back to their live (seeded) values.
        assert_eq!(state.variables["--black"], "#000000");
        // No widget selection yet, so map defaults win.
        assert_eq!(state.heading_font.as_deref(), Some("Playfair Display"));
        assert_eq!(state.body_font.as_deref(), Some("Source Sans 3"));
    }

    #[test]
    fn apply_after_capture_changes_nothing() {
        let mut f = fixture(PreviewState::Missing);
        f.engine.set_variable("--red", "#1a5f7a");
        f.engine.apply_font_choice(FontRole::Heading, "Lora");

        let before = f.engine.capture_state();
        f.engine.apply_state(&before);
        let after = f.engine.capture_state();

        assert_eq!(before, after);

        // Applying the same snapshot twice stays stable too.
        f.engine.apply_state(&before);
        assert_eq!(f.engine.capture_state(), before);
    }

    #[test]
    fn apply_font_choice_styles_declared_selectors() {
        let mut f = fixture(PreviewState::Missing);
        assert!(f.engine.apply_font_choice(FontRole::Heading, "Lora"));

        let host = f.host.lock().unwrap();
        // Elements 1 and 2 are .cover-title and .section-title.
        assert_eq!(
            host.element_style(1, "font-family"),
            Some("'Lora', Georgia, serif")
        );
        assert_eq!(
            host.element_style(2, "font-family"),
            Some("'Lora', Georgia, serif")
        );
        drop(host);

        assert_eq!(*f.fonts.lock().unwrap(), vec!["Lora".to_string()]);

        // Re-applying the same family must not request the asset again.
        f.engine.apply_font_choice(FontRole::Heading, "Lora");
        assert_eq!(f.fonts.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_font_slot_is_rejected() {
        let map = TemplateMap {
            name: "bare".to_string(),
            colors: vec![ColorVar {
                variable: "--accent".to_string(),
                label: "Accent".to_string(),
                default: "#123456".to_string(),
            }],
            fonts: FontSlots::default(),
            sliders: Vec::new(),
            toggles: Vec::new(),
            layout: Vec::new(),
            presets: Vec::new(),
        };
        let host = Arc::new(Mutex::new(MemoryDocument::new()));
        let resolver = SharedResolver {
            host: SharedDocument(Arc::clone(&host)),
            preview: None,
            state: Arc::new(Mutex::new(PreviewState::Missing)),
        };
        let mut engine = StyleEngine::new(Arc::new(map), Box::new(resolver));

        assert!(!engine.apply_font_choice(FontRole::Heading, "Lora"));
        let state = engine.capture_state();
        assert!(state.heading_font.is_none());
        assert!(state.body_font.is_none());
    }

    #[test]
    fn undo_restores_the_pre_edit_snapshot_exactly() {
        let mut f = fixture(PreviewState::Missing);

        let original = f.engine.capture_state();
        f.engine.push_undo();
        f.engine.apply_color_choice("--red", "#1a5f7a");
        let edited = f.engine.capture_state();

        assert!(f.engine.undo());
        assert_eq!(f.engine.capture_state(), original);

        assert!(f.engine.redo());
        assert_eq!(f.engine.capture_state(), edited);
    }

    #[test]
    fn undo_and_redo_are_noops_on_empty_stacks() {
        let mut f = fixture(PreviewState::Missing);
        assert!(!f.engine.undo());
        assert!(!f.engine.redo());
        assert!(!f.engine.can_undo());
        assert!(!f.engine.can_redo());
    }

    #[test]
    fn push_undo_invalidates_the_redo_branch() {
        let mut f = fixture(PreviewState::Missing);

        f.engine.push_undo();
        f.engine.apply_color_choice("--red", "#1a5f7a");
        assert!(f.engine.undo());
        assert!(f.engine.can_redo());

        f.engine.push_undo();
        f.engine.apply_color_choice("--red", "#2d8659");

        // The redo branch was discarded by the intervening push.
        assert!(!f.engine.can_redo());
        assert!(!f.engine.redo());
        assert_eq!(f.engine.variable("--red"), "#2d8659");
    }

    #[test]
    fn preload_requests_defaults_and_preset_fonts_once() {
        let mut f = fixture(PreviewState::Missing);
        f.engine.preload_fonts();
        f.engine.preload_fonts();

        let requested = f.fonts.lock().unwrap();
        assert!(requested.contains(&"Playfair Display".to_string()));
        assert!(requested.contains(&"Source Sans 3".to_string()));
        assert!(requested.contains(&"Merriweather".to_string()));
        assert!(requested.contains(&"IBM Plex Sans".to_string()));

        // Second preload added nothing.
        let unique: std::collections::HashSet<&String> = requested.iter().collect();
        assert_eq!(unique.len(), requested.len());
    }

    #[test]
    fn apply_state_refreshes_the_projection() {
        let mut f = fixture(PreviewState::Missing);

        f.engine.push_undo();
        f.engine.apply_color_choice("--red", "#1a5f7a");
        f.engine.apply_font_choice(FontRole::Body, "Nunito");

        f.engine.undo();

        // After undo the projection mirrors the restored state again.
        let state = f.engine.capture_state();
        assert_eq!(state.body_font.as_deref(), Some("Source Sans 3"));
        assert_eq!(state.variables["--red"], "#CA3553");
    }
}
