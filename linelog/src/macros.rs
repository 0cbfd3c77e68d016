//! Macros for one-statement logging through the global registry.
//!
//! - `log!`: concatenates its arguments into one line
//! - `slog!`: separates its arguments with single spaces
//! - `log_if!` / `slog_if!`: the same, but only when a condition holds
//!
//! Every argument is formatted with [`Display`][core::fmt::Display] and borrowed, never moved.

/// Logs one line made of its arguments, concatenated.
///
/// # Examples
///
/// ```rust
/// use linelog::{CollectOutput, log};
///
/// let collector = CollectOutput::new(false);
/// let port = 8080;
/// log!("listening on port ", port, '.');
/// log!();
///
/// assert_eq!(collector.get(), "listening on port 8080.\n\n");
/// ```
#[macro_export]
macro_rules! log {
    () => {
        ::core::mem::drop($crate::Logger::new())
    };
    ($($value:expr),+ $(,)?) => {{
        let mut logger = $crate::Logger::new();
        $( logger.append(&$value); )+
    }};
}

/// Logs one line made of its arguments, separated by single spaces.
///
/// # Examples
///
/// ```rust
/// use linelog::{CollectOutput, slog};
///
/// let collector = CollectOutput::new(false);
/// let attempt = 2;
/// slog!("attempt", attempt, "of", 5, "failed");
///
/// assert_eq!(collector.get(), "attempt 2 of 5 failed\n");
/// ```
#[macro_export]
macro_rules! slog {
    () => {
        ::core::mem::drop($crate::SpacingLogger::new())
    };
    ($($value:expr),+ $(,)?) => {{
        let mut logger = $crate::SpacingLogger::new();
        $( logger.append(&$value); )+
    }};
}

/// Logs like [`log!`] if the condition before the `;` is true.
///
/// The arguments are not evaluated and the prefix hook is not called when the condition is false.
///
/// # Examples
///
/// ```rust
/// use linelog::{CollectOutput, log_if};
///
/// const VERBOSE: bool = false;
///
/// let collector = CollectOutput::new(false);
/// log_if!(VERBOSE; "hidden");
/// log_if!(!VERBOSE; "shown");
///
/// assert_eq!(collector.get(), "shown\n");
/// ```
#[macro_export]
macro_rules! log_if {
    ($condition:expr; $($value:expr),* $(,)?) => {
        if $condition {
            $crate::log!($($value),*);
        }
    };
}

/// Logs like [`slog!`] if the condition before the `;` is true.
///
/// The arguments are not evaluated and the prefix hook is not called when the condition is false.
#[macro_export]
macro_rules! slog_if {
    ($condition:expr; $($value:expr),* $(,)?) => {
        if $condition {
            $crate::slog!($($value),*);
        }
    };
}
