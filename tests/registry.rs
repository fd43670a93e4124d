use domlog::{Level, Registry};
use domlog_appender::FileBackend;
use std::fs;
use std::sync::Arc;

fn backend(name: &str, dir: &tempfile::TempDir) -> (Arc<FileBackend>, std::path::PathBuf) {
    let path = dir.path().join(name);
    (Arc::new(FileBackend::new(name, &path)), path)
}

// S2 — implicit inheritance, S3 — mid-path promotion.
#[test]
fn implicit_ancestors_inherit_then_get_promoted() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::new();

    let (root_backend, _root_path) = backend("root.log", &dir);
    registry.register_backend(root_backend.clone()).unwrap();
    registry
        .register_domain("", Level::Critical, root_backend.clone())
        .unwrap();

    let (abcd_backend, _abcd_path) = backend("abcd.log", &dir);
    registry.register_backend(abcd_backend.clone()).unwrap();
    registry
        .register_domain("a.b.c.d", Level::Debug, abcd_backend.clone())
        .unwrap();

    for name in ["a", "a.b", "a.b.c"] {
        let d = registry.lookup(name);
        assert!(!d.is_explicit(), "{name} should still be implicit");
        assert_eq!(d.effective_level(), Level::Critical);
        assert!(Arc::ptr_eq(
            &(d.backend().clone() as Arc<dyn domlog::Backend>),
            &(root_backend.clone() as Arc<dyn domlog::Backend>)
        ));
    }

    // S3: register "a" explicitly at WARNING -> a.log.
    let (a_backend, _a_path) = backend("a.log", &dir);
    registry.register_backend(a_backend.clone()).unwrap();
    registry
        .register_domain("a", Level::Warning, a_backend.clone())
        .unwrap();

    for name in ["a.b", "a.b.c"] {
        let d = registry.lookup(name);
        assert_eq!(d.effective_level(), Level::Warning);
        assert!(Arc::ptr_eq(
            &(d.backend().clone() as Arc<dyn domlog::Backend>),
            &(a_backend.clone() as Arc<dyn domlog::Backend>)
        ));
    }

    // a.b.c.d is unaffected: it's explicit, anchored to its own backend.
    let d = registry.lookup("a.b.c.d");
    assert_eq!(d.effective_level(), Level::Debug);
    assert!(Arc::ptr_eq(
        &(d.backend().clone() as Arc<dyn domlog::Backend>),
        &(abcd_backend.clone() as Arc<dyn domlog::Backend>)
    ));

    let a = registry.lookup("a");
    assert!(a.is_explicit());
}

// S4 — filtering.
#[test]
fn dispatch_filters_by_effective_level() {
    let dir = tempfile::tempdir().unwrap();
    let (root_backend, path) = backend("f", &dir);
    let registry = Registry::new();
    registry.register_backend(root_backend.clone()).unwrap();
    registry
        .register_domain("", Level::Message, root_backend)
        .unwrap();

    registry.log(Some("x.y"), Level::Debug, "hidden");
    registry.log(Some("x.y"), Level::Critical, "seen");
    drop(registry);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("hidden"));
    assert!(contents.contains("seen"));
    assert!(contents.contains("x.y"));
}

// S5 — coalescing across domains sharing a backend.
#[test]
fn coalescing_collapses_repeats_from_multiple_domains() {
    let dir = tempfile::tempdir().unwrap();
    let (shared_backend, path) = backend("f", &dir);
    let registry = Registry::new();
    registry.register_backend(shared_backend.clone()).unwrap();
    for name in ["", "a.a", "a.b"] {
        registry
            .register_domain(name, Level::Message, shared_backend.clone())
            .unwrap();
    }

    registry.log(None, Level::Message, "repeat");
    registry.log(Some("a.a"), Level::Message, "repeat");
    registry.log(Some("a.a"), Level::Message, "repeat");
    registry.log(Some("a.b"), Level::Message, "repeat");
    registry.log(Some("unrelated"), Level::Message, "no-repeat");
    drop(registry);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("repeat"));
    assert!(contents.contains("no-repeat"));
    assert!(contents.contains("last message repeated 3 times"));
    assert!(
        contents.contains("[a.a, a.b] last message repeated 3 times")
            || contents.contains("[a.b, a.a] last message repeated 3 times")
    );
}

// S6 — rotation via the registry's reopen_all.
#[test]
fn reopen_all_rotates_every_backend() {
    let dir = tempfile::tempdir().unwrap();
    let (backend_handle, path) = backend("x", &dir);
    let rotated = path.with_file_name("x.old");

    let registry = Registry::new();
    registry.register_backend(backend_handle.clone()).unwrap();
    registry
        .register_domain("", Level::Message, backend_handle)
        .unwrap();

    registry.log(None, Level::Message, "A");
    fs::rename(&path, &rotated).unwrap();
    registry.log(None, Level::Message, "B");
    registry.reopen_all().unwrap();
    registry.log(None, Level::Message, "C");
    drop(registry);

    let old_contents = fs::read_to_string(&rotated).unwrap();
    assert!(old_contents.contains('A'));
    assert!(old_contents.contains('B'));
    let new_contents = fs::read_to_string(&path).unwrap();
    assert!(new_contents.contains('C'));
    assert!(!new_contents.contains('A'));
}

// Ambiguous re-registration and duplicate backend names/targets are rejected.
#[test]
fn duplicate_registrations_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (b1, _) = backend("dup", &dir);
    let registry = Registry::new();
    registry.register_backend(b1.clone()).unwrap();

    let (b2, _) = backend("dup", &dir); // same name
    assert!(registry.register_backend(b2).is_err());

    let path2 = dir.path().join("dup"); // same target, different name
    let b3 = Arc::new(FileBackend::new("dup-2", &path2));
    assert!(registry.register_backend(b3).is_err());

    registry
        .register_domain("svc", Level::Info, b1.clone())
        .unwrap();
    // Conflicting re-registration at the same name.
    let (other, _) = backend("other", &dir);
    assert!(registry
        .register_domain("svc", Level::Debug, other)
        .is_err());
    // Identical re-registration is a no-op.
    assert!(registry
        .register_domain("svc", Level::Info, b1)
        .is_ok());
}

// Teardown flushes a pending coalescing summary even if the process never
// logs a differing message afterwards.
#[test]
fn teardown_flushes_pending_summary() {
    let dir = tempfile::tempdir().unwrap();
    let (backend_handle, path) = backend("f", &dir);
    let registry = Registry::new();
    registry.register_backend(backend_handle.clone()).unwrap();
    registry
        .register_domain("", Level::Message, backend_handle)
        .unwrap();

    registry.log(None, Level::Message, "repeat");
    registry.log(None, Level::Message, "repeat");
    drop(registry);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("last message repeated 1 times"));
}
