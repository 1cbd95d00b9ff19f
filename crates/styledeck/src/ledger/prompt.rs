//! Natural-language synthesis of recorded changes.
//!
//! Sentences are meant to be pasted into a code-change request against the
//! template's HTML source, so they name controls by their human labels.

use super::{ChangeDetails, ChangeEntry, ChangeKind, ToggleAction};

/// One instruction sentence for a single change.
pub fn single_prompt(kind: ChangeKind, label: &str, details: &ChangeDetails) -> String {
    let label = label.to_lowercase();
    let from = details.from.as_deref().unwrap_or_default();
    let to = details.to.as_deref().unwrap_or_default();
    match kind {
        ChangeKind::Color => format!("Change the {label} from {from} to {to}"),
        ChangeKind::Font => format!("Switch the {label} to {to}"),
        ChangeKind::Size => format!("Set the {label} to {to}"),
        ChangeKind::Toggle => match details.action {
            Some(ToggleAction::Hide) => format!("Remove the {label} section"),
            _ => format!("Add back the {label} section"),
        },
        ChangeKind::Layout => format!("Change the {label} to {to}"),
    }
}

/// The combined prompt for every pending change, ready to paste.
///
/// Empty input yields an empty string. A single entry becomes one sentence
/// with a trailing clause naming the template; several become a header line
/// followed by a numbered list in recording order.
pub fn combined_prompt(template_name: &str, entries: &[ChangeEntry]) -> String {
    match entries {
        [] => String::new(),
        [entry] => format!("{} in the {template_name}", entry.sentence()),
        _ => {
            let mut lines = vec![format!(
                "Apply the following changes to the {template_name}:"
            )];
            for (i, entry) in entries.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, entry.sentence()));
            }
            lines.join("\n")
        }
    }
}
