use parking_lot::Mutex;
use std::sync::Arc;

/// Shared call log that listeners append to.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener recording `label:payload` on every call.
    pub fn recorder(&self, label: &str) -> impl Fn(&String) + Send + Sync + 'static {
        let log = self.clone();
        let label = label.to_owned();
        move |payload: &String| log.push(format!("{label}:{payload}"))
    }

    pub fn push(&self, line: impl Into<String>) {
        self.0.lock().push(line.into());
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }
}
