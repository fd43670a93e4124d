//! A hierarchical, multi-backend logging subsystem.
//!
//! [`Registry`] routes log records from dotted-name *domains* (e.g.
//! `chassis.network.backend`) to pluggable [`Backend`]s while honoring
//! per-domain severity filters that are inherited along the dotted
//! hierarchy, coalescing immediately-repeated identical messages on a
//! per-backend basis, and supporting safe live log rotation.
//!
//! ```
//! use domlog::{Level, Registry};
//! use domlog_appender::FileBackend;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = tempfile::tempdir()?;
//! # let path = dir.path().join("app.log");
//! let registry = Registry::new();
//! let backend = Arc::new(FileBackend::new("app", &path));
//! registry.register_backend(backend.clone())?;
//! registry.register_domain("", Level::Message, backend)?;
//!
//! registry.log(Some("chassis.network"), Level::Warning, "link flapping");
//! # Ok(())
//! # }
//! ```
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod domain;
mod registry;

pub use domain::Domain;
pub use domlog_core::{Backend, Error, Level};
pub use registry::Registry;
