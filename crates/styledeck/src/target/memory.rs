//! In-memory document and resolver for headless hosts and tests.

use std::collections::BTreeMap;

use super::{DocumentTarget, PreviewState, TargetResolver};

#[derive(Debug, Default)]
struct Element {
    selectors: Vec<String>,
    styles: BTreeMap<String, String>,
}

impl Element {
    fn matches(&self, part: &str) -> bool {
        self.selectors.iter().any(|s| s == part)
    }
}

/// A document model that tracks root custom properties and per-element
/// inline styles. Elements are annotated with the selectors they match,
/// standing in for a real selector engine.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    root: BTreeMap<String, String>,
    elements: Vec<Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        MemoryDocument::default()
    }

    /// Set a root property before the document is handed to an engine.
    pub fn seed_root(&mut self, name: &str, value: &str) {
        self.set_root_property(name, value);
    }

    /// Add an element matching each of `selectors`; returns its index.
    pub fn add_element(&mut self, selectors: &[&str]) -> usize {
        self.elements.push(Element {
            selectors: selectors.iter().map(|s| (*s).to_string()).collect(),
            styles: BTreeMap::new(),
        });
        self.elements.len() - 1
    }

    /// Inline style of the element at `index`; `None` when the property is
    /// unset or the index is out of range.
    pub fn element_style(&self, index: usize, property: &str) -> Option<&str> {
        self.elements
            .get(index)?
            .styles
            .get(property)
            .map(String::as_str)
    }
}

impl DocumentTarget for MemoryDocument {
    fn set_root_property(&mut self, name: &str, value: &str) {
        self.root.insert(name.to_string(), value.to_string());
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.root.get(name).cloned()
    }

    fn style_matching(&mut self, selector: &str, property: &str, value: &str) -> usize {
        let parts: Vec<&str> = selector.split(',').map(str::trim).collect();
        let mut matched = 0;
        for element in &mut self.elements {
            if !parts.iter().any(|part| element.matches(part)) {
                continue;
            }
            matched += 1;
            if value.is_empty() {
                element.styles.remove(property);
            } else {
                element.styles.insert(property.to_string(), value.to_string());
            }
        }
        matched
    }
}

/// Resolver over in-memory documents with a scriptable preview state.
#[derive(Debug)]
pub struct MemoryResolver {
    host: MemoryDocument,
    preview: Option<MemoryDocument>,
    state: PreviewState,
}

impl MemoryResolver {
    /// A resolver with no preview surface; every edit lands in `host`.
    pub fn host_only(host: MemoryDocument) -> Self {
        MemoryResolver {
            host,
            preview: None,
            state: PreviewState::Missing,
        }
    }

    /// A resolver with a loaded, accessible preview.
    pub fn with_preview(host: MemoryDocument, preview: MemoryDocument) -> Self {
        MemoryResolver {
            host,
            preview: Some(preview),
            state: PreviewState::Ready,
        }
    }

    /// Script the preview's accessibility, e.g. to simulate a reload or a
    /// cross-origin denial between calls.
    pub fn set_preview_state(&mut self, state: PreviewState) {
        self.state = state;
    }

    pub fn host(&self) -> &MemoryDocument {
        &self.host
    }

    pub fn preview(&self) -> Option<&MemoryDocument> {
        self.preview.as_ref()
    }
}

impl TargetResolver for MemoryResolver {
    fn preview_state(&self) -> PreviewState {
        if self.preview.is_none() {
            PreviewState::Missing
        } else {
            self.state
        }
    }

    fn resolve(&mut self) -> &mut dyn DocumentTarget {
        match (self.state, self.preview.as_mut()) {
            (PreviewState::Ready, Some(preview)) => preview,
            _ => &mut self.host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_properties_overwrite_and_read_back() {
        let mut doc = MemoryDocument::new();
        assert_eq!(doc.root_property("--accent"), None);

        doc.set_root_property("--accent", "#123456");
        doc.set_root_property("--accent", "#654321");
        assert_eq!(doc.root_property("--accent").as_deref(), Some("#654321"));
    }

    #[test]
    fn styling_writes_only_matching_elements() {
        let mut doc = MemoryDocument::new();
        let title = doc.add_element(&[".title"]);
        let body = doc.add_element(&["body"]);

        assert_eq!(doc.style_matching(".title", "color", "#000"), 1);
        assert_eq!(doc.element_style(title, "color"), Some("#000"));
        assert_eq!(doc.element_style(body, "color"), None);

        assert_eq!(doc.style_matching(".missing", "color", "#000"), 0);
    }

    #[test]
    fn comma_selector_lists_match_each_part_once() {
        let mut doc = MemoryDocument::new();
        let table = doc.add_element(&[".table"]);
        let callout = doc.add_element(&[".callout"]);
        let both = doc.add_element(&[".table", ".callout"]);

        assert_eq!(doc.style_matching(".table, .callout", "display", "none"), 3);
        assert_eq!(doc.element_style(table, "display"), Some("none"));
        assert_eq!(doc.element_style(callout, "display"), Some("none"));
        assert_eq!(doc.element_style(both, "display"), Some("none"));
    }

    #[test]
    fn empty_value_clears_the_inline_property() {
        let mut doc = MemoryDocument::new();
        let section = doc.add_element(&[".section"]);

        doc.style_matching(".section", "display", "none");
        assert_eq!(doc.element_style(section, "display"), Some("none"));

        doc.style_matching(".section", "display", "");
        assert_eq!(doc.element_style(section, "display"), None);
    }

    #[test]
    fn resolver_routes_by_preview_state() {
        let mut resolver =
            MemoryResolver::with_preview(MemoryDocument::new(), MemoryDocument::new());

        resolver.resolve().set_root_property("--accent", "#111");
        assert_eq!(
            resolver.preview().unwrap().root_property("--accent").as_deref(),
            Some("#111")
        );
        assert_eq!(resolver.host().root_property("--accent"), None);

        resolver.set_preview_state(PreviewState::CrossOrigin);
        resolver.resolve().set_root_property("--accent", "#222");
        assert_eq!(
            resolver.host().root_property("--accent").as_deref(),
            Some("#222")
        );
        assert_eq!(
            resolver.preview().unwrap().root_property("--accent").as_deref(),
            Some("#111")
        );
    }

    #[test]
    fn host_only_resolver_reports_missing_preview() {
        let mut resolver = MemoryResolver::host_only(MemoryDocument::new());
        assert_eq!(resolver.preview_state(), PreviewState::Missing);

        resolver.set_preview_state(PreviewState::Ready);
        // Without a preview document the state stays missing.
        assert_eq!(resolver.preview_state(), PreviewState::Missing);
        resolver.resolve().set_root_property("--accent", "#333");
        assert_eq!(
            resolver.host().root_property("--accent").as_deref(),
            Some("#333")
        );
    }
}
