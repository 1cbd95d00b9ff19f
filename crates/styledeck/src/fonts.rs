//! Webfont loading seam with idempotent request dedup.

use std::collections::HashSet;

use crate::template::FontRole;

/// Fire-and-forget font asset requests. The engine never awaits completion;
/// applying `font-family` does not wait for the asset to arrive.
pub trait FontSource: Send {
    fn request(&mut self, family: &str);
}

/// Source for hosts that manage font assets themselves.
#[derive(Debug, Default)]
pub struct NullFontSource;

impl FontSource for NullFontSource {
    fn request(&mut self, _family: &str) {}
}

/// Records requested families in order; for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryFontSource {
    pub requested: Vec<String>,
}

impl FontSource for MemoryFontSource {
    fn request(&mut self, family: &str) {
        self.requested.push(family.to_string());
    }
}

/// Deduplicating front of a [`FontSource`]: each family is requested at
/// most once per session.
pub struct FontLoader {
    loaded: HashSet<String>,
    source: Box<dyn FontSource>,
}

impl FontLoader {
    pub fn new(source: Box<dyn FontSource>) -> Self {
        FontLoader {
            loaded: HashSet::new(),
            source,
        }
    }

    /// Request `family` once; repeated calls are no-ops.
    pub fn ensure_loaded(&mut self, family: &str) {
        if self.loaded.insert(family.to_string()) {
            self.source.request(family);
        }
    }

    pub fn is_loaded(&self, family: &str) -> bool {
        self.loaded.contains(family)
    }
}

/// The `font-family` stack written to the document for a role: the chosen
/// family quoted, ahead of the role's platform fallbacks.
pub fn family_stack(role: FontRole, family: &str) -> String {
    match role {
        FontRole::Heading => format!("'{family}', Georgia, serif"),
        FontRole::Body => format!("'{family}', -apple-system, BlinkMacSystemFont, sans-serif"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_requests_each_family_once() {
        let mut loader = FontLoader::new(Box::<MemoryFontSource>::default());
        loader.ensure_loaded("Lora");
        loader.ensure_loaded("Lora");
        loader.ensure_loaded("Inter");

        assert!(loader.is_loaded("Lora"));
        assert!(loader.is_loaded("Inter"));
        assert!(!loader.is_loaded("Roboto"));
    }

    #[test]
    fn stacks_quote_the_family_and_keep_role_fallbacks() {
        assert_eq!(
            family_stack(FontRole::Heading, "Playfair Display"),
            "'Playfair Display', Georgia, serif"
        );
        assert_eq!(
            family_stack(FontRole::Body, "Source Sans 3"),
            "'Source Sans 3', -apple-system, BlinkMacSystemFont, sans-serif"
        );
    }
}
