use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::OutputHook;

/// An output hook for testing that stores every line it receives.
///
/// Unlike [`CollectOutput`][crate::CollectOutput] it does not install itself, and it keeps lines
/// separate so tests can check how output was split into lines.
///
/// # Examples
///
/// ```rust
/// use linelog::OutputHook;
/// use linelog::test_helpers::RecordingOutput;
///
/// let output = RecordingOutput::new();
/// output.append_log_line("a\n");
/// output.append_log_line("b\n");
///
/// assert_eq!(output.take(), ["a\n", "b\n"]);
/// assert!(output.lines().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingOutput {
    lines: Mutex<Vec<String>>,
}

impl RecordingOutput {
    /// Creates an empty recording hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Returns all recorded lines and forgets them.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputHook for RecordingOutput {
    fn append_log_line(&self, line: &str) {
        self.lock().push(line.to_owned());
    }
}
