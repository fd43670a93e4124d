//! File-backed [`Backend`](domlog_core::Backend) implementation for
//! `domlog`.
//!
//! [`FileBackend`] opens its target for append on first use, serializes
//! writers behind a single lock (so concurrent callers never interleave a
//! line), and exposes `close`/`reopen` as the primitive an external SIGHUP
//! handler uses to rotate logs: rename the target out from under the
//! process, then call `reopen` to recreate a fresh file at the original
//! path.
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod file_backend;
mod format;

pub use file_backend::FileBackend;
