use domlog_core::{Backend, Level};
use std::sync::Arc;

/// A node in the dotted-name hierarchy (component C4).
///
/// Holds no pointers to its parent or children — every traversal goes
/// through the [`Registry`](crate::Registry), which owns the name→domain
/// map and keeps the hierarchy a tree rather than a graph of back-pointers
/// (see SPEC_FULL.md §9 / spec.md's design notes).
#[derive(Clone, Debug)]
pub struct Domain {
    pub(crate) name: String,
    pub(crate) is_explicit: bool,
    pub(crate) min_level: Level,
    pub(crate) effective_level: Level,
    pub(crate) backend: Arc<dyn Backend>,
}

impl Domain {
    /// This domain's dotted name (`""` for root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Was this domain created by an explicit registration, as opposed to
    /// being materialized on demand to anchor a descendant's lookup?
    pub fn is_explicit(&self) -> bool {
        self.is_explicit
    }

    /// The threshold configured on this domain. Meaningful only when
    /// [`is_explicit`](Self::is_explicit) is true; implicit domains carry
    /// their nearest explicit ancestor's value here too, for convenience.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// The threshold actually applied when dispatching through this
    /// domain: its own `min_level` if explicit, otherwise its nearest
    /// explicit ancestor's.
    pub fn effective_level(&self) -> Level {
        self.effective_level
    }

    /// The backend records routed through this domain are written to.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }
}
