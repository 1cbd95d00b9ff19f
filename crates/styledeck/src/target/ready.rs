//! Bounded wait for the preview document to become editable.
//!
//! Hosts that embed a preview surface call [`await_target`] once at session
//! start, before warming fonts or reading initial state. The future resolves
//! exactly once: either the preview loaded, or edits belong to the hosting
//! document (no preview, access denied, or the load never finished in time).

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::PreviewState;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Where edits land once the session may begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetReadiness {
    /// The embedded preview finished loading and is accessible.
    Preview,
    /// The hosting document is the target.
    HostFallback,
}

/// Poll `probe` until the preview is ready or known unreachable, giving up
/// after `timeout`. A cross-origin preview resolves to the host immediately;
/// one still loading at the deadline degrades to the host with a warning.
pub async fn await_target<F>(mut probe: F, timeout: Duration) -> TargetReadiness
where
    F: FnMut() -> PreviewState + Send,
{
    let started = Instant::now();
    loop {
        match probe() {
            PreviewState::Ready => return TargetReadiness::Preview,
            PreviewState::Missing => return TargetReadiness::HostFallback,
            PreviewState::CrossOrigin => {
                debug!("preview denied access; editing the hosting document");
                return TargetReadiness::HostFallback;
            }
            PreviewState::Loading => {}
        }
        if started.elapsed() >= timeout {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "preview not ready in time; editing the hosting document"
            );
            return TargetReadiness::HostFallback;
        }
        sleep(POLL_INTERVAL).await;
    }
}
