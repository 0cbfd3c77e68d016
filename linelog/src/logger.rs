//! Line builders: one object per log statement.
//!
//! A builder takes the prefix from the registry's prefix hook when it is created, collects values
//! while it lives and hands the finished line to the registry's output hook when it is dropped.
//!
//! # Line Lifecycle
//!
//! 1. **Creation**: the prefix hook (if any) writes into the empty buffer
//! 2. **Appending**: values are formatted into the buffer with [`Display`]
//! 3. **Drop**: a single `\n` is appended and the whole buffer goes to the output hook that is
//!    active at that moment
//!
//! Drop runs on every exit path, including early returns and panics unwinding through the
//! enclosing scope, so every builder emits exactly one line.
//!
//! # Examples
//!
//! ```rust
//! use core::fmt::Write;
//!
//! use linelog::{Logger, SpacingLogger};
//!
//! Logger::new().append("answer=").append(42);
//! SpacingLogger::new().append("answer").append('=').append(42);
//!
//! let mut logger = Logger::new();
//! write!(logger, "{:>6.2}", 3.14159).unwrap();
//! ```

use core::fmt::{self, Display, Write};

use crate::HookRegistry;
use crate::registry;

/// Builds one log line by concatenating values.
///
/// The line is emitted when the builder is dropped.
#[derive(Debug)]
#[must_use = "a line is emitted when the logger is dropped, append to it first"]
pub struct Logger<'r> {
    registry: &'r HookRegistry,
    buffer: String,
}

impl Logger<'static> {
    /// Creates a builder for the global registry.
    pub fn new() -> Self {
        Self::with_registry(registry::global())
    }
}

impl Default for Logger<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Logger<'r> {
    /// Creates a builder for `registry`.
    pub fn with_registry(registry: &'r HookRegistry) -> Self {
        let mut buffer = String::new();
        registry.add_log_prefix(&mut buffer);
        Self { registry, buffer }
    }

    /// Appends `value` to the line.
    pub fn append(&mut self, value: impl Display) -> &mut Self {
        // Writing into a `String` only fails if `value`'s `Display` impl does.
        let _ = write!(self.buffer, "{value}");
        self
    }

    /// Returns the text collected so far, including the prefix.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Write for Logger<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Drop for Logger<'_> {
    fn drop(&mut self) {
        emit(self.registry, &mut self.buffer);
    }
}

/// Builds one log line, separating appended values with a single space.
///
/// No space is inserted between the prefix and the first value or after the last value.
/// The line is emitted when the builder is dropped.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use linelog::HookRegistry;
/// use linelog::test_helpers::RecordingOutput;
///
/// let output = Arc::new(RecordingOutput::new());
/// let registry = HookRegistry::new();
/// registry.set_output_hook(output.clone());
///
/// registry.spacing_logger().append("retry").append(3).append("of").append(5);
///
/// assert_eq!(output.lines(), ["retry 3 of 5\n"]);
/// ```
#[derive(Debug)]
#[must_use = "a line is emitted when the logger is dropped, append to it first"]
pub struct SpacingLogger<'r> {
    registry: &'r HookRegistry,
    buffer: String,
    first: bool,
}

impl SpacingLogger<'static> {
    /// Creates a builder for the global registry.
    pub fn new() -> Self {
        Self::with_registry(registry::global())
    }
}

impl Default for SpacingLogger<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SpacingLogger<'r> {
    /// Creates a builder for `registry`.
    pub fn with_registry(registry: &'r HookRegistry) -> Self {
        let mut buffer = String::new();
        registry.add_log_prefix(&mut buffer);
        Self {
            registry,
            buffer,
            first: true,
        }
    }

    /// Appends `value` to the line, preceded by a space unless it is the first value.
    pub fn append(&mut self, value: impl Display) -> &mut Self {
        self.separate();
        let _ = write!(self.buffer, "{value}");
        self
    }

    /// Returns the text collected so far, including the prefix.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn separate(&mut self) {
        if self.first {
            self.first = false;
        } else {
            self.buffer.push(' ');
        }
    }
}

/// Each `write!` call is one value: `write_fmt` inserts the separator once, then formats all
/// pieces without further spaces.
impl Write for SpacingLogger<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.separate();
        self.buffer.push_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.separate();
        self.buffer.write_fmt(args)
    }
}

impl Drop for SpacingLogger<'_> {
    fn drop(&mut self) {
        emit(self.registry, &mut self.buffer);
    }
}

fn emit(registry: &HookRegistry, buffer: &mut String) {
    buffer.push('\n');
    registry.append_log_line(buffer);
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;

    use test_case::test_case;

    use crate::HookRegistry;
    use crate::test_helpers::RecordingOutput;

    fn recording_registry() -> (HookRegistry, Arc<RecordingOutput>) {
        let registry = HookRegistry::new();
        let output = Arc::new(RecordingOutput::new());
        registry.set_output_hook(output.clone());
        (registry, output)
    }

    fn with_prefix(registry: &HookRegistry, prefix: &'static str) {
        registry.set_prefix_hook(Some(Arc::new(move |buffer: &mut String| {
            buffer.push_str(prefix);
        })));
    }

    #[test_case(&[] => "\n" ; "empty line")]
    #[test_case(&["a"] => "a\n" ; "single value")]
    #[test_case(&["a", "b", "c"] => "abc\n" ; "concatenated")]
    #[test_case(&["a ", " b"] => "a  b\n" ; "spaces kept verbatim")]
    fn plain_logger_concatenates(values: &[&str]) -> String {
        let (registry, output) = recording_registry();
        {
            let mut logger = registry.logger();
            for value in values {
                logger.append(value);
            }
        }
        output.take().concat()
    }

    #[test_case(&[] => "\n" ; "empty line")]
    #[test_case(&["a"] => "a\n" ; "single value")]
    #[test_case(&["a", "b", "c"] => "a b c\n" ; "separated")]
    fn spacing_logger_separates(values: &[&str]) -> String {
        let (registry, output) = recording_registry();
        {
            let mut logger = registry.spacing_logger();
            for value in values {
                logger.append(value);
            }
        }
        output.take().concat()
    }

    #[test]
    fn mixed_value_types() {
        let (registry, output) = recording_registry();

        registry.logger().append("x=").append(1.5).append(',').append(-3);
        registry.spacing_logger().append("y").append(true).append(7u64);

        assert_eq!(output.lines(), ["x=1.5,-3\n", "y true 7\n"]);
    }

    #[test]
    fn prefix_is_written_once_before_content() {
        let (registry, output) = recording_registry();
        with_prefix(&registry, "[p] ");

        registry.logger().append("plain");
        registry.spacing_logger().append("spaced").append("out");

        assert_eq!(output.lines(), ["[p] plain\n", "[p] spaced out\n"]);
    }

    #[test]
    fn prefix_is_taken_at_creation() {
        let (registry, output) = recording_registry();
        with_prefix(&registry, "old ");

        let mut logger = registry.logger();
        with_prefix(&registry, "new ");
        logger.append("line");
        drop(logger);

        assert_eq!(output.lines(), ["old line\n"]);
    }

    #[test]
    fn output_is_taken_at_drop() {
        let (registry, before) = recording_registry();

        let mut logger = registry.logger();
        logger.append("late");
        let after = Arc::new(RecordingOutput::new());
        registry.set_output_hook(after.clone());
        drop(logger);

        assert!(before.lines().is_empty());
        assert_eq!(after.lines(), ["late\n"]);
    }

    #[test]
    fn write_macro_formats_into_line() {
        let (registry, output) = recording_registry();

        {
            let mut logger = registry.logger();
            write!(logger, "{}-{:03}", "id", 7).unwrap();
            write!(logger, "!").unwrap();
        }
        {
            let mut logger = registry.spacing_logger();
            write!(logger, "{}-{}", "a", "b").unwrap();
            write!(logger, "{}", "c").unwrap();
        }

        assert_eq!(output.lines(), ["id-007!\n", "a-b c\n"]);
    }

    #[test]
    fn as_str_shows_pending_text() {
        let registry = HookRegistry::new();
        with_prefix(&registry, "> ");
        registry.set_output_hook(Arc::new(RecordingOutput::new()));

        let mut logger = registry.logger();
        logger.append("pending");
        assert_eq!(logger.as_str(), "> pending");

        let mut spacing = registry.spacing_logger();
        spacing.append("a").append("b");
        assert_eq!(spacing.as_str(), "> a b");
    }

    #[test]
    fn line_is_emitted_while_unwinding() {
        let (registry, output) = recording_registry();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut logger = registry.logger();
            logger.append("before panic");
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(output.lines(), ["before panic\n"]);
    }

    #[test]
    fn line_is_emitted_on_early_return() {
        fn work(registry: &HookRegistry, bail: bool) -> Option<()> {
            let mut logger = registry.logger();
            logger.append("working");
            if bail {
                return None;
            }
            logger.append(" done");
            Some(())
        }

        let (registry, output) = recording_registry();
        work(&registry, true);
        work(&registry, false);

        assert_eq!(output.lines(), ["working\n", "working done\n"]);
    }
}
