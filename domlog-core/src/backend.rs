use crate::error::Error;
use crate::level::Level;
use std::fmt;
use std::path::Path;

/// A named sink that accepts formatted log records (component C3).
///
/// Implementations own their coalescing state (§4.7) and must serialize
/// concurrent callers so that two writers never interleave a line; the
/// [`Registry`](crate) only ever calls through this trait and never
/// reaches into a concrete implementation's internals.
pub trait Backend: fmt::Debug + Send + Sync {
    /// Unique name this backend was registered under.
    fn name(&self) -> &str;

    /// The backend's target (e.g. a file path), if any. Two backends may
    /// never share a non-empty target.
    fn target(&self) -> Option<&Path>;

    /// Acquire the underlying sink. Calling `open` on an already-open
    /// backend is a programmer error (`Error::AlreadyOpen`).
    fn open(&self) -> Result<(), Error>;

    /// Release the underlying sink. Idempotent: closing an already-closed
    /// backend succeeds silently, so `reopen` can be `close` then `open`
    /// without racing the filesystem.
    fn close(&self) -> Result<(), Error>;

    /// The rotation primitive: close then open. On failure the backend is
    /// left closed, never half-open.
    fn reopen(&self) -> Result<(), Error> {
        self.close()?;
        self.open()
    }

    /// Run an incoming `(level, text, domain_label)` through this
    /// backend's coalescing state and, unless it was swallowed as a
    /// repeat, write it (and any summary that the run's end produced).
    /// Transparently reopens a closed backend on demand.
    fn dispatch(&self, level: Level, text: &str, domain_label: &str) -> Result<(), Error>;

    /// Broadcast write used by `force_log_all`: flushes any pending
    /// coalescing summary first, then writes `text` at [`Level::Message`]
    /// verbatim. Does not itself seed coalescing state.
    fn force_log(&self, text: &str) -> Result<(), Error>;

    /// Flush this backend's pending coalescing summary, if any, without
    /// writing a new record. Called by the registry at teardown.
    fn flush_pending(&self) -> Result<(), Error>;
}
