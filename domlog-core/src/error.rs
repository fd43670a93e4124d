use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced on the administrative paths (register, open, reopen,
/// teardown). `log(...)` itself is infallible by contract; I/O failures
/// encountered while writing a record never reach the caller of `log` and
/// are instead reported through a backend's configured error hook.
#[derive(Debug, Error)]
pub enum Error {
    /// A registration call received absent or malformed input.
    #[error("invalid {argument}")]
    Invalid {
        /// What was invalid, e.g. `"backend name"` or `"domain name"`.
        argument: String,
    },

    /// A backend with the same name is already registered.
    #[error("a backend named {0:?} is already registered")]
    DuplicateName(String),

    /// A backend targeting the same path is already registered.
    #[error("a backend targeting {0:?} is already registered")]
    DuplicatePath(PathBuf),

    /// An explicit domain was re-registered with conflicting fields.
    #[error("domain {0:?} is already registered with different settings")]
    AmbiguousRedefinition(String),

    /// A filesystem operation on a backend failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// The backend's target path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// `open` was called on a backend that is already open.
    #[error("backend {0:?} is already open")]
    AlreadyOpen(String),

    /// Reserved for symmetry with `AlreadyOpen`. `close` is specified as
    /// idempotent (spec §4.3), so nothing in this crate raises it today.
    #[error("backend {0:?} is already closed")]
    AlreadyClosed(String),
}

impl Error {
    pub fn invalid(argument: impl Into<String>) -> Self {
        Error::Invalid {
            argument: argument.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
