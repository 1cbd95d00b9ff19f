//! Transient user notices. The hosting application renders them (as toasts
//! in the original panel); the core only decides their text.

use tracing::info;

pub trait NoticeSink: Send {
    fn notice(&mut self, message: &str);
}

/// Routes notices to the log; the default for headless hosts.
#[derive(Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn notice(&mut self, message: &str) {
        info!("{message}");
    }
}

/// Collects notices in order; the test stand-in for a toast surface.
#[derive(Debug, Default)]
pub struct MemoryNotices {
    pub messages: Vec<String>,
}

impl NoticeSink for MemoryNotices {
    fn notice(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notices_keep_order() {
        let mut notices = MemoryNotices::default();
        notices.notice("first");
        notices.notice("second");
        assert_eq!(notices.messages, ["first", "second"]);
    }
}
