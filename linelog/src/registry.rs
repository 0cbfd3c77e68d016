//! Hook registries holding the active output and prefix hooks.
//!
//! A [`HookRegistry`] owns two cells: the output hook, which is never empty, and the optional
//! prefix hook.
//! Both are swapped atomically and every setter returns the previous hook, so installing a hook is
//! always reversible by installing the returned value again.
//!
//! # Global Registry
//!
//! The process-wide registry used by [`Logger::new`], [`log!`][crate::log] and friends is returned
//! by [`global`].
//! It starts out with [`ConsoleOutput::shared`] and no prefix hook.
//! The free functions [`set_logger_output_hook`] and [`set_logger_prefix_hook`] operate on it.
//!
//! # Explicit Registries
//!
//! Independent registries are created with [`HookRegistry::new`] or [`build`] and are useful to
//! keep tests isolated from each other or to give a subsystem its own output:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use linelog::registry;
//! use linelog::test_helpers::RecordingOutput;
//!
//! let output = Arc::new(RecordingOutput::new());
//! let registry = registry::build()
//!     .output(output.clone())
//!     .prefix(Arc::new(|buffer: &mut String| buffer.push_str("db: ")))
//!     .finish();
//!
//! registry.logger().append("connected");
//!
//! assert_eq!(output.lines(), ["db: connected\n"]);
//! ```

use core::fmt;
use core::ptr;
use std::sync::{Arc, LazyLock};

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::{ConsoleOutput, Logger, OutputHook, PrefixHook, SpacingLogger};

/// Shared handle to an output hook.
pub type OutputHookRef = Arc<dyn OutputHook>;

/// Shared handle to a prefix hook.
pub type PrefixHookRef = Arc<dyn PrefixHook>;

/// The pair of swappable hooks consulted by line builders.
///
/// Line builders take the prefix hook when they are created and the output hook when they are
/// dropped, each with a single atomic load.
/// A hook that is swapped out while a line is being delivered to it stays alive until that
/// delivery returns.
pub struct HookRegistry {
    // `ArcSwap` needs a sized target, hence the extra `Arc` layer around the trait objects.
    output: ArcSwap<OutputHookRef>,
    prefix: ArcSwapOption<PrefixHookRef>,
}

static GLOBAL_REGISTRY: LazyLock<HookRegistry> = LazyLock::new(HookRegistry::new);

/// Returns the process-wide registry.
pub fn global() -> &'static HookRegistry {
    &GLOBAL_REGISTRY
}

/// Installs `hook` as the output hook of the global registry and returns the previous one.
///
/// See [`HookRegistry::set_output_hook`].
pub fn set_logger_output_hook(hook: OutputHookRef) -> OutputHookRef {
    global().set_output_hook(hook)
}

/// Installs `hook` as the prefix hook of the global registry and returns the previous one.
///
/// See [`HookRegistry::set_prefix_hook`].
pub fn set_logger_prefix_hook(hook: Option<PrefixHookRef>) -> Option<PrefixHookRef> {
    global().set_prefix_hook(hook)
}

/// Returns the output hook of the global registry.
pub fn output_hook() -> OutputHookRef {
    global().output_hook()
}

/// Returns the prefix hook of the global registry.
pub fn prefix_hook() -> Option<PrefixHookRef> {
    global().prefix_hook()
}

/// Returns whether `a` and `b` are the same hook instance.
///
/// Only the data address is compared, the same instance seen through different vtables is still
/// the same hook.
pub fn same_hook<A, B>(a: &Arc<A>, b: &Arc<B>) -> bool
where
    A: ?Sized,
    B: ?Sized,
{
    ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl HookRegistry {
    /// Creates a registry writing to [`ConsoleOutput::shared`] without a prefix hook.
    pub fn new() -> Self {
        Self::with_hooks(ConsoleOutput::shared(), None)
    }

    fn with_hooks(output: OutputHookRef, prefix: Option<PrefixHookRef>) -> Self {
        Self {
            output: ArcSwap::from_pointee(output),
            prefix: ArcSwapOption::new(prefix.map(Arc::new)),
        }
    }

    /// Installs `hook` as the output hook and returns the hook that was active before.
    ///
    /// The swap is atomic.
    /// Lines finalized concurrently on other threads are delivered either to the previous hook or
    /// to `hook`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use linelog::test_helpers::RecordingOutput;
    /// use linelog::{HookRegistry, OutputHookRef, same_hook};
    ///
    /// let registry = HookRegistry::new();
    /// let a: OutputHookRef = Arc::new(RecordingOutput::new());
    /// let b: OutputHookRef = Arc::new(RecordingOutput::new());
    ///
    /// let console = registry.set_output_hook(a.clone());
    /// assert!(same_hook(&registry.set_output_hook(b.clone()), &a));
    /// assert!(same_hook(&registry.set_output_hook(console), &b));
    /// ```
    pub fn set_output_hook(&self, hook: OutputHookRef) -> OutputHookRef {
        tracing::trace!("swapping output hook");
        Arc::unwrap_or_clone(self.output.swap(Arc::new(hook)))
    }

    /// Installs `hook` as the prefix hook and returns the hook that was active before.
    ///
    /// Passing `None` removes the prefix hook.
    pub fn set_prefix_hook(&self, hook: Option<PrefixHookRef>) -> Option<PrefixHookRef> {
        tracing::trace!(installed = hook.is_some(), "swapping prefix hook");
        self.prefix.swap(hook.map(Arc::new)).map(Arc::unwrap_or_clone)
    }

    /// Returns the active output hook.
    pub fn output_hook(&self) -> OutputHookRef {
        OutputHookRef::clone(&self.output.load())
    }

    /// Returns the active prefix hook, if any.
    pub fn prefix_hook(&self) -> Option<PrefixHookRef> {
        self.prefix.load().as_deref().cloned()
    }

    /// Atomically installs the hook created by `make` from the active output hook.
    ///
    /// `make` receives the hook that will be displaced and may run more than once if other threads
    /// swap the output hook concurrently; only the hook from the final run is installed and
    /// returned.
    pub(crate) fn chain_output_hook<H, F>(&self, mut make: F) -> Arc<H>
    where
        H: OutputHook + 'static,
        F: FnMut(OutputHookRef) -> Arc<H>,
    {
        let mut installed = None;
        self.output.rcu(|current| {
            let hook = make(OutputHookRef::clone(current));
            installed = Some(Arc::clone(&hook));
            hook as OutputHookRef
        });
        tracing::trace!("chained output hook");
        installed.unwrap_or_else(|| unreachable!("`rcu` runs its closure at least once"))
    }

    /// Creates a [`Logger`] bound to this registry.
    pub fn logger(&self) -> Logger<'_> {
        Logger::with_registry(self)
    }

    /// Creates a [`SpacingLogger`] bound to this registry.
    pub fn spacing_logger(&self) -> SpacingLogger<'_> {
        SpacingLogger::with_registry(self)
    }

    pub(crate) fn add_log_prefix(&self, buffer: &mut String) {
        if let Some(prefix) = self.prefix.load_full() {
            prefix.add_log_prefix(buffer);
        }
    }

    pub(crate) fn append_log_line(&self, line: &str) {
        self.output.load_full().append_log_line(line);
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("prefix", &self.prefix.load().is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`HookRegistry`] with chosen initial hooks.
///
/// Created via [`build()`] and finalized with [`finish()`](Builder::finish).
#[derive(Default)]
#[must_use]
pub struct Builder {
    output: Option<OutputHookRef>,
    prefix: Option<PrefixHookRef>,
}

/// Creates a new registry builder.
///
/// Without further configuration the registry writes to [`ConsoleOutput::shared`] and has no
/// prefix hook.
pub fn build() -> Builder {
    Builder::default()
}

impl Builder {
    /// Sets the initial output hook.
    pub fn output(self, output: OutputHookRef) -> Self {
        Self {
            output: Some(output),
            ..self
        }
    }

    /// Sets the initial output hook to a console hook writing to standard error.
    pub fn stderr(self) -> Self {
        self.output(Arc::new(ConsoleOutput::stderr()))
    }

    /// Sets the initial prefix hook.
    pub fn prefix(self, prefix: PrefixHookRef) -> Self {
        Self {
            prefix: Some(prefix),
            ..self
        }
    }

    /// Creates the registry.
    pub fn finish(self) -> HookRegistry {
        let output: OutputHookRef = match self.output {
            Some(output) => output,
            None => ConsoleOutput::shared(),
        };
        HookRegistry::with_hooks(output, self.prefix)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("output", &self.output.is_some())
            .field("prefix", &self.prefix.is_some())
            .finish()
    }
}
