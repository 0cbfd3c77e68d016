//! Capturing log output in memory.
//!
//! [`CollectOutput`] installs itself as the output hook for as long as it lives and records every
//! line it receives.
//! With `echo` enabled the lines are also passed on to the hook that was active before, so output
//! stays visible while it is captured.
//!
//! # Nesting
//!
//! Collectors nest like a stack: each one restores the hook it displaced when it is dropped.
//! Dropping them in reverse order of creation restores the original hook; dropping them out of order
//! leaves whatever the last dropped collector displaced installed, and is reported with a
//! `tracing` warning.
//!
//! ```rust
//! use linelog::{CollectOutput, log};
//!
//! let outer = CollectOutput::new(false);
//! log!("outer");
//! {
//!     let inner = CollectOutput::new(true);
//!     log!("inner");
//!     assert_eq!(inner.get(), "inner\n");
//! }
//! log!("outer again");
//!
//! assert_eq!(outer.get(), "outer\ninner\nouter again\n");
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::registry::{self, OutputHookRef, same_hook};
use crate::{HookRegistry, OutputHook};

/// Scoped output hook that captures log lines.
///
/// Created with [`CollectOutput::new`] for the global registry or [`CollectOutput::install`] for
/// an explicit one.
/// Dropping the collector reinstalls the output hook it displaced.
///
/// # Examples
///
/// ```rust
/// use linelog::{CollectOutput, log, slog};
///
/// let collector = CollectOutput::new(false);
/// log!("x");
/// slog!("y", 1);
/// assert_eq!(collector.get(), "x\ny 1\n");
///
/// collector.clear();
/// log!("z");
/// assert_eq!(collector.get(), "z\n");
/// ```
#[derive(Debug)]
#[must_use = "the collector uninstalls itself when dropped"]
pub struct CollectOutput<'r> {
    registry: &'r HookRegistry,
    sink: Arc<CollectSink>,
}

/// The hook installed into the registry on behalf of a [`CollectOutput`].
struct CollectSink {
    buffer: Mutex<String>,
    echo: bool,
    previous: OutputHookRef,
}

impl CollectOutput<'static> {
    /// Installs a collector into the global registry.
    ///
    /// With `echo` set every captured line is also passed to the previously active hook.
    pub fn new(echo: bool) -> Self {
        Self::install(registry::global(), echo)
    }
}

impl<'r> CollectOutput<'r> {
    /// Installs a collector into `registry`.
    ///
    /// With `echo` set every captured line is also passed to the previously active hook.
    pub fn install(registry: &'r HookRegistry, echo: bool) -> Self {
        let sink = registry.chain_output_hook(|previous| {
            Arc::new(CollectSink {
                buffer: Mutex::new(String::new()),
                echo,
                previous,
            })
        });
        Self { registry, sink }
    }

    /// Returns everything collected so far.
    pub fn get(&self) -> String {
        self.sink.buffer().clone()
    }

    /// Discards everything collected so far.
    ///
    /// The collector stays installed.
    pub fn clear(&self) {
        self.sink.buffer().clear();
    }

    /// Returns whether captured lines are passed on to the previous hook.
    pub fn echo(&self) -> bool {
        self.sink.echo
    }

    /// Returns the hook that was active when this collector was installed.
    pub fn previous(&self) -> &OutputHookRef {
        &self.sink.previous
    }
}

impl Drop for CollectOutput<'_> {
    fn drop(&mut self) {
        let displaced = self
            .registry
            .set_output_hook(OutputHookRef::clone(&self.sink.previous));
        if !same_hook(&displaced, &self.sink) {
            tracing::warn!(
                "log collector dropped while another output hook was installed, collectors must be dropped in reverse order of creation"
            );
        }
    }
}

impl CollectSink {
    fn buffer(&self) -> MutexGuard<'_, String> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputHook for CollectSink {
    fn append_log_line(&self, line: &str) {
        self.buffer().push_str(line);
        if self.echo {
            self.previous.append_log_line(line);
        }
    }
}

impl core::fmt::Debug for CollectSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollectSink")
            .field("buffer", &*self.buffer())
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}
