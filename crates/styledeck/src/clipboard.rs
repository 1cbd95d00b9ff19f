//! System clipboard seam with a legacy fallback tier.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::warn;

use crate::error::{CoreError, CoreResult};

/// A destination the combined prompt can be written to. The write is the
/// session's only asynchronous boundary; its outcome only chooses which
/// notice the user sees.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> CoreResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The primary clipboard accepted the write.
    Primary,
    /// The primary failed but the fallback mechanism succeeded.
    Fallback,
    /// Every tier failed; the user must copy manually.
    Failed,
}

/// Primary clipboard plus an optional legacy fallback, tried in order.
pub struct ClipboardStack {
    primary: Box<dyn Clipboard>,
    fallback: Option<Box<dyn Clipboard>>,
}

impl ClipboardStack {
    pub fn new(primary: Box<dyn Clipboard>) -> Self {
        ClipboardStack {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn Clipboard>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Attempt the primary write, then the fallback. Never errors; failure
    /// is an outcome, not an exception.
    pub async fn write(&self, text: &str) -> CopyOutcome {
        match self.primary.write_text(text).await {
            Ok(()) => CopyOutcome::Primary,
            Err(error) => {
                warn!("primary clipboard write failed: {error}");
                let Some(fallback) = &self.fallback else {
                    return CopyOutcome::Failed;
                };
                match fallback.write_text(text).await {
                    Ok(()) => CopyOutcome::Fallback,
                    Err(error) => {
                        warn!("fallback clipboard write failed: {error}");
                        CopyOutcome::Failed
                    }
                }
            }
        }
    }
}

/// In-memory clipboard for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    /// Shared handle to the stored contents, usable after the clipboard is
    /// boxed into a stack.
    pub fn handle(&self) -> Arc<Mutex<Option<String>>> {
        Arc::clone(&self.contents)
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> CoreResult<()> {
        *self.contents.lock().map_err(|_| {
            CoreError::Internal("memory clipboard poisoned".to_string())
        })? = Some(text.to_string());
        Ok(())
    }
}

/// A clipboard that always refuses; models a host denying clipboard access.
#[derive(Debug, Default)]
pub struct UnavailableClipboard;

#[async_trait]
impl Clipboard for UnavailableClipboard {
    async fn write_text(&self, _text: &str) -> CoreResult<()> {
        Err(CoreError::Clipboard("clipboard unavailable".to_string()))
    }
}
