use crate::domain::Domain;
use domlog_appender::FileBackend;
use domlog_core::{name, Backend, Error, Level};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Owns every backend and every domain (component C5): the only part of
/// this crate with mutable global structure.
///
/// The domain and backend maps share a single reader-writer lock: lookups
/// (the hot path) take the read side, while registration, promotion, and
/// effective-level/backend propagation take the write side. No dispatch
/// ever observes a half-updated hierarchy (spec.md §5).
pub struct Registry {
    inner: RwLock<Inner>,
    on_error: Box<dyn Fn(&Error) + Send + Sync>,
    /// The implicit root's bootstrap backend. It is never inserted into
    /// `inner.backends` (it was never `register_backend`-ed, so it must
    /// never be visible to a lookup by name or targeted by an explicit
    /// rotation), but it can still accumulate its own pending coalescing
    /// summary and so must still be visited by `reopen_all`,
    /// `force_log_all`, and `teardown`.
    default_backend: Arc<dyn Backend>,
}

struct Inner {
    backends: HashMap<String, Arc<dyn Backend>>,
    backend_targets: HashMap<PathBuf, String>,
    domains: HashMap<String, Domain>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Registry")
            .field("backends", &inner.backends.keys().collect::<Vec<_>>())
            .field("domains", &inner.domains.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// Create a registry with an implicit root domain anchored to a
    /// permissive stderr backend, satisfying the invariant that the root
    /// is always present and lookups can never fail. Once a caller
    /// explicitly registers the root (`register_domain("", ...)`), it is
    /// promoted to explicit like any other domain.
    pub fn new() -> Self {
        Self::with_error_hook(|e| eprintln!("domlog: {}", e))
    }

    /// Like [`new`](Self::new), but with a custom hook for I/O errors that
    /// occur on the dispatch path, which is otherwise infallible by
    /// contract (spec.md §7). Administrative calls (register/reopen) still
    /// return their errors directly and do not go through this hook.
    pub fn with_error_hook(on_error: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        let default_backend: Arc<dyn Backend> = Arc::new(FileBackend::stderr("<default-root>"));
        let root = Domain {
            name: String::new(),
            is_explicit: false,
            min_level: Level::Debug,
            effective_level: Level::Debug,
            backend: default_backend.clone(),
        };
        let mut domains = HashMap::new();
        domains.insert(String::new(), root);
        Registry {
            inner: RwLock::new(Inner {
                backends: HashMap::new(),
                backend_targets: HashMap::new(),
                domains,
            }),
            on_error: Box::new(on_error),
            default_backend,
        }
    }

    fn report_error(&self, err: &Error) {
        (self.on_error)(err);
    }

    /// Register a backend. Rejects an absent (empty) name, a name already
    /// in use, or a non-empty target already in use by another backend.
    pub fn register_backend(&self, backend: Arc<dyn Backend>) -> Result<(), Error> {
        let backend_name = backend.name().to_string();
        if backend_name.is_empty() {
            return Err(Error::invalid("backend name"));
        }
        let mut inner = self.inner.write();
        if inner.backends.contains_key(&backend_name) {
            return Err(Error::DuplicateName(backend_name));
        }
        if let Some(target) = backend.target() {
            let target = target.to_path_buf();
            if inner.backend_targets.contains_key(&target) {
                return Err(Error::DuplicatePath(target));
            }
            inner.backend_targets.insert(target, backend_name.clone());
        }
        inner.backends.insert(backend_name, backend);
        Ok(())
    }

    /// Register an explicit domain at `name`, with `min_level` and
    /// `backend`. Promotes a same-named implicit domain in place;
    /// re-registering an identical explicit domain is a no-op; a
    /// conflicting re-registration is `Error::AmbiguousRedefinition`.
    pub fn register_domain(
        &self,
        name: &str,
        min_level: Level,
        backend: Arc<dyn Backend>,
    ) -> Result<(), Error> {
        if !name::is_well_formed(name) {
            return Err(Error::invalid("domain name"));
        }

        let mut inner = self.inner.write();
        materialize_ancestors(&mut inner, name);

        match inner.domains.get(name) {
            Some(existing) if existing.is_explicit => {
                if existing.min_level == min_level && Arc::ptr_eq(&existing.backend, &backend) {
                    return Ok(());
                }
                return Err(Error::AmbiguousRedefinition(name.to_string()));
            }
            _ => {}
        }

        inner.domains.insert(
            name.to_string(),
            Domain {
                name: name.to_string(),
                is_explicit: true,
                min_level,
                effective_level: min_level,
                backend,
            },
        );
        propagate(&mut inner, name);
        Ok(())
    }

    /// Return the domain at `name`, materializing it and any missing
    /// ancestors as implicit domains inheriting from the nearest explicit
    /// ancestor. This can never fail.
    pub fn lookup(&self, name: &str) -> Domain {
        {
            let inner = self.inner.read();
            if let Some(domain) = inner.domains.get(name) {
                return domain.clone();
            }
        }
        let mut inner = self.inner.write();
        materialize_ancestors(&mut inner, name);
        inner
            .domains
            .get(name)
            .cloned()
            .expect("materialize_ancestors always inserts `name` itself")
    }

    /// Equivalent to `self.lookup(name).effective_level()`.
    pub fn get_effective_level(&self, name: &str) -> Level {
        self.lookup(name).effective_level
    }

    /// Entry point for a log record (component C6, `Dispatcher`).
    ///
    /// Resolves `domain_name` (substituting the root `""` if absent),
    /// drops the record if it is too quiet for the domain's effective
    /// level, and otherwise routes it through the domain's backend, which
    /// owns the coalescing decision. Infallible: I/O failures go to the
    /// registry's error hook instead of the caller.
    pub fn log(&self, domain_name: Option<&str>, level: Level, message: &str) {
        let name = domain_name.unwrap_or("");
        let domain = self.lookup(name);
        if !level.passes(domain.effective_level) {
            return;
        }
        if let Err(err) = domain.backend.dispatch(level, message, &domain.name) {
            self.report_error(&err);
        }
    }

    /// Every backend this registry is responsible for visiting on a
    /// registry-wide sweep: the explicitly registered ones plus the
    /// implicit root's bootstrap backend, which never appears in
    /// `inner.backends` but can still accumulate its own pending
    /// coalescing state.
    fn all_backends(&self) -> Vec<Arc<dyn Backend>> {
        let mut backends: Vec<Arc<dyn Backend>> =
            self.inner.read().backends.values().cloned().collect();
        backends.push(self.default_backend.clone());
        backends
    }

    /// Reopen every registered backend (the rotation primitive an external
    /// SIGHUP handler drives). Partial failures are collected, not fatal;
    /// backends that succeeded are left reopened.
    pub fn reopen_all(&self) -> Result<(), Vec<(String, Error)>> {
        let mut failures = Vec::new();
        for backend in self.all_backends() {
            if let Err(err) = backend.reopen() {
                failures.push((backend.name().to_string(), err));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }

    /// Write `message` at [`Level::Message`] to every registered backend,
    /// bypassing domain filters and coalescing. Each backend flushes its
    /// own pending summary first and does not treat the broadcast as the
    /// new "last message" for future coalescing.
    pub fn force_log_all(&self, message: &str) {
        for backend in self.all_backends() {
            if let Err(err) = backend.force_log(message) {
                self.report_error(&err);
            }
        }
    }

    /// Flush every backend's pending coalescing summary and close it.
    /// Called automatically on `Drop`; safe to call more than once.
    pub fn teardown(&self) {
        for backend in self.all_backends() {
            if let Err(err) = backend.flush_pending() {
                self.report_error(&err);
            }
            if let Err(err) = backend.close() {
                self.report_error(&err);
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Insert implicit domains for every ancestor of `name` (and `name` itself
/// if missing) that isn't already known, each inheriting effective
/// level/backend from its immediate parent — which, by induction, already
/// carries the correct resolved value.
fn materialize_ancestors(inner: &mut Inner, name: &str) {
    let chain = name::ancestors(Some(name));
    for window in chain.windows(2) {
        let parent_name = &window[0];
        let child_name = &window[1];
        if inner.domains.contains_key(child_name) {
            continue;
        }
        let parent = inner
            .domains
            .get(parent_name)
            .expect("root is always present, so every earlier ancestor was just inserted");
        let child = Domain {
            name: child_name.clone(),
            is_explicit: false,
            min_level: parent.effective_level,
            effective_level: parent.effective_level,
            backend: parent.backend.clone(),
        };
        inner.domains.insert(child_name.clone(), child);
    }
}

/// After `new_explicit_name` becomes explicit, update every currently
/// known strict descendant whose nearest explicit ancestor is now it,
/// stopping at any other explicit domain found along the way up.
fn propagate(inner: &mut Inner, new_explicit_name: &str) {
    let (new_level, new_backend) = {
        let e = inner
            .domains
            .get(new_explicit_name)
            .expect("just inserted");
        (e.effective_level, e.backend.clone())
    };

    let descendants: Vec<String> = inner
        .domains
        .keys()
        .filter(|candidate| name::is_strict_ancestor(new_explicit_name, candidate))
        .cloned()
        .collect();

    for descendant in descendants {
        if inner.domains[&descendant].is_explicit {
            continue;
        }
        if anchored_beyond(inner, &descendant, new_explicit_name) {
            continue;
        }
        let d = inner.domains.get_mut(&descendant).unwrap();
        d.effective_level = new_level;
        d.backend = new_backend.clone();
    }
}

/// Does an explicit domain sit strictly between `descendant` and `root`
/// (exclusive of both endpoints)? If so, `descendant` is already anchored
/// there and unaffected by `root` becoming explicit.
fn anchored_beyond(inner: &Inner, descendant: &str, root: &str) -> bool {
    let mut cur = name::parent(descendant);
    while let Some(p) = cur {
        if p == root {
            return false;
        }
        match inner.domains.get(&p) {
            Some(d) if d.is_explicit => return true,
            _ => {}
        }
        cur = name::parent(&p);
    }
    false
}
