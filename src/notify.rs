#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A user-facing status message (toast in the TUI, a stderr line headless).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Fire-and-forget notification sink.
pub trait Notify: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr for headless commands.
pub struct StderrNotifier;

impl Notify for StderrNotifier {
    fn notify(&self, n: Notification) {
        let mark = match n.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        eprintln!("[{mark}] {}: {}", n.title, n.description);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Collects notifications for assertions.
    #[derive(Default)]
    pub struct Recorder {
        pub seen: Mutex<Vec<Notification>>,
    }

    impl Recorder {
        pub fn take(&self) -> Vec<Notification> {
            std::mem::take(&mut *self.seen.lock().unwrap())
        }
    }

    impl Notify for Recorder {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }
}
