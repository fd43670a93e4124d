//! Shared types for the `domlog` hierarchical logging subsystem: severity
//! levels, dotted domain-name decomposition, the [`Backend`] trait a sink
//! implements, the per-backend [`Coalescer`] state machine, and the crate's
//! [`Error`] type.
//!
//! This crate has no I/O of its own — [`domlog-appender`](../domlog_appender)
//! provides the file-backed [`Backend`] implementation, and the `domlog`
//! root crate provides the domain registry and dispatcher that use these
//! types.
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod backend;
pub mod coalesce;
pub mod error;
pub mod level;
pub mod name;

pub use backend::Backend;
pub use coalesce::{Coalescer, Outcome, Summary};
pub use error::Error;
pub use level::Level;
