//! Output hooks that write lines to the console or any other [`io::Write`] implementation.

use std::io::{self, Write};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use crate::OutputHook;

/// The console stream a [`ConsoleOutput`] writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

/// Output hook that writes log lines to the console.
///
/// Every line is written and flushed while holding a lock owned by this hook, so lines logged
/// concurrently from several threads never interleave.
/// Write errors are ignored.
///
/// The default output hook of every [`HookRegistry`][crate::HookRegistry] is the process-wide
/// instance returned by [`ConsoleOutput::shared`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use linelog::ConsoleOutput;
///
/// let previous = linelog::set_logger_output_hook(Arc::new(ConsoleOutput::stderr()));
/// linelog::log!("goes to stderr");
/// linelog::set_logger_output_hook(previous);
/// ```
#[derive(Debug, Default)]
pub struct ConsoleOutput {
    stream: ConsoleStream,
    lock: Mutex<()>,
}

static SHARED_CONSOLE: LazyLock<Arc<ConsoleOutput>> =
    LazyLock::new(|| Arc::new(ConsoleOutput::stdout()));

impl ConsoleOutput {
    /// Creates a console hook writing to standard output.
    pub const fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    /// Creates a console hook writing to standard error.
    pub const fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    /// Creates a console hook writing to `stream`.
    pub const fn new(stream: ConsoleStream) -> Self {
        Self {
            stream,
            lock: Mutex::new(()),
        }
    }

    /// Returns the process-wide standard output hook.
    ///
    /// Every call returns a handle to the same instance, which lives until the process exits.
    pub fn shared() -> Arc<ConsoleOutput> {
        Arc::clone(&SHARED_CONSOLE)
    }

    /// Returns the stream this hook writes to.
    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    /// Writes and flushes `line` to the writer returned by `open` while holding this hook's lock.
    ///
    /// The writer is opened after the lock is taken.
    fn write_locked<W, F>(&self, open: F, line: &str) -> io::Result<()>
    where
        W: Write,
        F: FnOnce() -> W,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        write_line(open(), line)
    }
}

impl OutputHook for ConsoleOutput {
    fn append_log_line(&self, line: &str) {
        let result = match self.stream {
            ConsoleStream::Stdout => self.write_locked(|| io::stdout().lock(), line),
            ConsoleStream::Stderr => self.write_locked(|| io::stderr().lock(), line),
        };
        if let Err(error) = result {
            tracing::debug!(stream = ?self.stream, %error, "dropped console log line");
        }
    }
}

/// Output hook that writes log lines to an arbitrary writer.
///
/// The writer is behind a mutex, so a line is always written and flushed as a whole.
/// Write errors are ignored.
///
/// # Examples
///
/// ```rust
/// use linelog::{OutputHook, WriterOutput};
///
/// let output = WriterOutput::new(Vec::new());
/// output.append_log_line("hello\n");
///
/// assert_eq!(output.into_inner(), b"hello\n");
/// ```
#[derive(Debug, Default)]
pub struct WriterOutput<W> {
    writer: Mutex<W>,
}

impl<W> WriterOutput<W> {
    /// Creates a hook writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the hook and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> OutputHook for WriterOutput<W>
where
    W: Write + Send,
{
    fn append_log_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = write_line(&mut *writer, line) {
            tracing::debug!(%error, "dropped log line");
        }
    }
}

fn write_line(mut output: impl Write, line: &str) -> io::Result<()> {
    output.write_all(line.as_bytes())?;
    output.flush()
}
