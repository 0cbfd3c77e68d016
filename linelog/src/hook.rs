//! Hook traits for redirecting log output and decorating log lines.
//!
//! An [`OutputHook`] receives every finished log line, a [`PrefixHook`] gets a chance to write into
//! each line before its content.
//! Both are installed into a [`HookRegistry`][crate::HookRegistry] and can be swapped at runtime.
//!
//! Closures implement both traits, which is usually the quickest way to install a custom hook:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use linelog::HookRegistry;
//!
//! let registry = HookRegistry::new();
//! registry.set_prefix_hook(Some(Arc::new(|buffer: &mut String| buffer.push_str("[worker] "))));
//! registry.set_output_hook(Arc::new(|line: &str| eprint!("{line}")));
//!
//! registry.logger().append("started");
//! ```

/// Receiver of complete log lines.
///
/// Implementors decide where lines end up: the console, a file, a test buffer, another hook.
///
/// # Examples
///
/// ```rust
/// use std::sync::Mutex;
///
/// use linelog::OutputHook;
///
/// #[derive(Debug, Default)]
/// struct LineCounter {
///     lines: Mutex<usize>,
/// }
///
/// impl OutputHook for LineCounter {
///     fn append_log_line(&self, _line: &str) {
///         *self.lines.lock().unwrap() += 1;
///     }
/// }
/// ```
pub trait OutputHook: Send + Sync {
    /// Receives one log line.
    ///
    /// `line` is already terminated by a single `\n`.
    /// Implementations must pass it on as one unit and must not add or strip line terminators.
    fn append_log_line(&self, line: &str);
}

/// Writes a prefix into every log line.
///
/// The hook runs once per line builder, when the builder is created, before any content is
/// appended.
///
/// # Examples
///
/// ```rust
/// use linelog::PrefixHook;
///
/// #[derive(Debug)]
/// struct ThreadName;
///
/// impl PrefixHook for ThreadName {
///     fn add_log_prefix(&self, buffer: &mut String) {
///         let thread = std::thread::current();
///         buffer.push('[');
///         buffer.push_str(thread.name().unwrap_or("unnamed"));
///         buffer.push_str("] ");
///     }
/// }
/// ```
pub trait PrefixHook: Send + Sync {
    /// Appends zero or more characters to `buffer`.
    fn add_log_prefix(&self, buffer: &mut String);
}

impl<F> OutputHook for F
where
    F: Fn(&str) + Send + Sync,
{
    fn append_log_line(&self, line: &str) {
        self(line)
    }
}

impl<F> PrefixHook for F
where
    F: Fn(&mut String) + Send + Sync,
{
    fn add_log_prefix(&self, buffer: &mut String) {
        self(buffer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::{OutputHook, PrefixHook};

    #[test]
    fn closures_are_output_hooks() {
        let seen = Mutex::new(String::new());
        let hook = |line: &str| seen.lock().unwrap().push_str(line);

        hook.append_log_line("one\n");
        hook.append_log_line("two\n");

        assert_eq!(*seen.lock().unwrap(), "one\ntwo\n");
    }

    #[test]
    fn closures_are_prefix_hooks() {
        let hook = |buffer: &mut String| buffer.push_str("> ");

        let mut buffer = String::new();
        hook.add_log_prefix(&mut buffer);
        hook.add_log_prefix(&mut buffer);

        assert_eq!(buffer, "> > ");
    }
}
