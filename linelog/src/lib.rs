//! # `linelog`
//!
//! Line-oriented logging with swappable output and prefix hooks.
//!
//! A log statement builds one line of text and hands it, newline-terminated, to the active
//! output hook when the statement ends.
//! Where lines go and what precedes them is decided at runtime by the hooks installed in a
//! [`HookRegistry`].
//!
//! ## Features
//!
//! - **Line builders**: [`Logger`] and [`SpacingLogger`] collect values and emit exactly one line
//!   when dropped, also when unwinding
//! - **Swappable hooks**: [`set_logger_output_hook`] and [`set_logger_prefix_hook`] atomically
//!   replace the active hooks and return the previous ones
//! - **Console output**: [`ConsoleOutput`] writes whole lines to stdout under a lock, the default
//!   output hook
//! - **Capturing**: [`CollectOutput`] intercepts all lines for as long as it lives, optionally
//!   echoing them to the hook it displaced
//!
//! There are no log levels, no structured fields and no asynchronous delivery: every line is
//! delivered synchronously by the thread that logged it.
//!
//! ## Basic Usage
//!
//! ```rust
//! use linelog::{log, slog};
//!
//! let user = "ada";
//! log!("user ", user, " logged in");
//! slog!("open sessions:", 3);
//! ```
//!
//! ## Redirecting Output
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use linelog::{CollectOutput, log};
//!
//! let previous = linelog::set_logger_prefix_hook(Some(Arc::new(|buffer: &mut String| {
//!     buffer.push_str("[app] ");
//! })));
//!
//! let collector = CollectOutput::new(false);
//! log!("captured");
//! assert_eq!(collector.get(), "[app] captured\n");
//! drop(collector);
//!
//! linelog::set_logger_prefix_hook(previous);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod collect;
mod console;
mod hook;
mod logger;
mod macros;
pub mod registry;
#[doc(hidden)]
pub mod test_helpers;

pub use collect::CollectOutput;
pub use console::{ConsoleOutput, ConsoleStream, WriterOutput};
pub use hook::{OutputHook, PrefixHook};
pub use logger::{Logger, SpacingLogger};
pub use registry::{
    HookRegistry, OutputHookRef, PrefixHookRef, global, output_hook, prefix_hook, same_hook,
    set_logger_output_hook, set_logger_prefix_hook,
};
