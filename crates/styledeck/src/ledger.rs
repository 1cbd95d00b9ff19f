//! Deduplicated, time-ordered record of pending design edits.

pub mod prompt;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clipboard::{ClipboardStack, CopyOutcome};
use crate::notice::NoticeSink;

/// Category of a recorded edit. Prompt synthesis dispatches on this, so the
/// set is closed and every kind has a sentence form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Color,
    Font,
    Size,
    Toggle,
    Layout,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Color => "color",
            ChangeKind::Font => "font",
            ChangeKind::Size => "size",
            ChangeKind::Toggle => "toggle",
            ChangeKind::Layout => "layout",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Show,
    Hide,
}

/// What changed. Value edits carry `from`/`to`; section toggles carry
/// `action`/`target` instead and are never suppressed as no-ops.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChangeDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ToggleAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ChangeDetails {
    pub fn swap(from: impl Into<String>, to: impl Into<String>) -> Self {
        ChangeDetails {
            from: Some(from.into()),
            to: Some(to.into()),
            ..ChangeDetails::default()
        }
    }

    pub fn toggle(action: ToggleAction, target: impl Into<String>) -> Self {
        ChangeDetails {
            action: Some(action),
            target: Some(target.into()),
            ..ChangeDetails::default()
        }
    }

    /// A touched control whose effective value did not change, e.g.
    /// background `#ffffff` re-entered as `#FFFFFF`.
    fn is_noop(&self) -> bool {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => from.to_lowercase() == to.to_lowercase(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub label: String,
    pub details: ChangeDetails,
    pub time: DateTime<Utc>,
    /// Insertion sequence; breaks ties between records stamped in the same
    /// millisecond so display order is deterministic.
    pub seq: u64,
}

/// A ledger record annotated with its dedup key, as handed to subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEntry {
    pub key: String,
    #[serde(flatten)]
    pub record: ChangeRecord,
}

impl ChangeEntry {
    /// The instruction sentence for this single entry.
    pub fn sentence(&self) -> String {
        prompt::single_prompt(self.record.kind, &self.record.label, &self.record.details)
    }
}

type Subscriber = Box<dyn Fn(&[ChangeEntry]) + Send>;

/// The authoritative set of pending semantic edits for one session.
///
/// Records are keyed `{kind}::{label}`, so re-editing the same control
/// keeps only the latest value (and moves it to the end of the order).
/// Every mutation notifies all subscribers synchronously with the fresh,
/// time-sorted entry list.
pub struct ChangeLedger {
    template_name: String,
    pending: HashMap<String, ChangeRecord>,
    next_seq: u64,
    subscribers: Vec<Subscriber>,
}

impl ChangeLedger {
    pub fn new(template_name: impl Into<String>) -> Self {
        ChangeLedger {
            template_name: template_name.into(),
            pending: HashMap::new(),
            next_seq: 0,
            subscribers: Vec::new(),
        }
    }

    /// Record a single design change, deduplicating by kind + label.
    ///
    /// No-op edits (equal `from`/`to` under case-insensitive comparison)
    /// are dropped silently.
    pub fn record(&mut self, kind: ChangeKind, label: &str, details: ChangeDetails) {
        if details.is_noop() {
            return;
        }
        let key = format!("{}::{}", kind.as_str(), label);
        let record = ChangeRecord {
            kind,
            label: label.to_string(),
            details,
            time: Utc::now(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(key, record);
        self.notify();
    }

    /// Remove a pending change by its key. Absent keys are a harmless no-op.
    pub fn remove(&mut self, key: &str) {
        self.pending.remove(key);
        self.notify();
    }

    /// Drop every pending change.
    pub fn clear_all(&mut self) {
        self.pending.clear();
        self.notify();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// All pending changes, oldest first. Records stamped in the same
    /// millisecond keep their insertion order.
    pub fn entries(&self) -> Vec<ChangeEntry> {
        let mut entries: Vec<ChangeEntry> = self
            .pending
            .iter()
            .map(|(key, record)| ChangeEntry {
                key: key.clone(),
                record: record.clone(),
            })
            .collect();
        entries.sort_by_key(|entry| (entry.record.time, entry.record.seq));
        entries
    }

    /// The combined instruction prompt for everything pending.
    pub fn combined_prompt(&self) -> String {
        prompt::combined_prompt(&self.template_name, &self.entries())
    }

    /// Copy the combined prompt to the clipboard and report the outcome
    /// through `notices`. Clipboard state never affects ledger state.
    pub async fn copy_to_clipboard(&self, clipboard: &ClipboardStack, notices: &mut dyn NoticeSink) {
        let text = self.combined_prompt();
        if text.is_empty() {
            notices.notice("No changes to copy");
            return;
        }
        let count = self.pending.len();
        match clipboard.write(&text).await {
            CopyOutcome::Primary | CopyOutcome::Fallback => {
                notices.notice(&copied_message(count));
            }
            CopyOutcome::Failed => {
                notices.notice("Copy failed - select and copy manually");
            }
        }
    }

    /// Register a callback invoked with the sorted entry list after every
    /// mutating operation. Subscribers persist until the session tears the
    /// ledger down.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[ChangeEntry]) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Drop every registered subscriber. Called on session teardown so no
    /// callback leaks into a successor session.
    pub fn release_subscribers(&mut self) {
        self.subscribers.clear();
    }

    fn notify(&self) {
        let entries = self.entries();
        for subscriber in &self.subscribers {
            subscriber(&entries);
        }
    }
}

fn copied_message(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Copied {count} change{plural} to clipboard")
}
