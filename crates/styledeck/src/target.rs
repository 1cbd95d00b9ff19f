//! Target-document seam: where live style edits land.
//!
//! The engine edits either an embedded preview surface or the hosting
//! document itself. Which one is decided per call through a
//! [`TargetResolver`], so a reloaded preview is picked up on the very next
//! operation and a cross-origin preview degrades to the host silently.

pub mod memory;
pub mod ready;

pub use memory::{MemoryDocument, MemoryResolver};
pub use ready::{await_target, TargetReadiness};

/// A document that can receive live style edits.
///
/// Implementations wrap whatever the host actually renders: a browser
/// document behind FFI, an in-memory model, a recording double in tests.
pub trait DocumentTarget: Send {
    /// Write a custom property on the document's root element.
    fn set_root_property(&mut self, name: &str, value: &str);

    /// Current value of a root custom property, untrimmed; `None` when the
    /// property was never set.
    fn root_property(&self, name: &str) -> Option<String>;

    /// Apply `property: value` to every element matching `selector`
    /// (comma-separated selector lists match any part). Returns how many
    /// elements matched; zero is not an error. An empty value clears the
    /// inline property.
    fn style_matching(&mut self, selector: &str, property: &str, value: &str) -> usize;
}

/// Accessibility of the embedded preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No preview surface exists; the hosting document is the target.
    Missing,
    /// A preview exists but its document has not finished loading.
    Loading,
    /// The preview document is loaded and same-origin-accessible.
    Ready,
    /// The preview exists but access is denied.
    CrossOrigin,
}

/// Resolves which document style writes land in.
///
/// `resolve` is called fresh for every engine operation; callers must not
/// cache the returned reference across turns, since the preview may reload
/// or lose accessibility between calls.
pub trait TargetResolver: Send {
    fn preview_state(&self) -> PreviewState;

    /// The current target: the preview when it is ready and accessible,
    /// otherwise the hosting document.
    fn resolve(&mut self) -> &mut dyn DocumentTarget;
}
