//! Dotted domain name decomposition.
//!
//! A domain name is a `.`-separated path rooted at the empty string, e.g.
//! `chassis.network.backend`. [`ancestors`] turns such a name into the
//! ordered sequence of prefixes a [`Registry`](crate) walks when it
//! materializes implicit ancestors or propagates an explicit domain's
//! effective level/backend to its descendants.

/// Returns `name`'s ancestor chain, root first and `name` itself last.
///
/// `ancestors(None)` returns an empty vector, signalling invalid input (an
/// absent domain name can never be looked up or registered).
///
/// ```
/// use domlog_core::name::ancestors;
///
/// assert_eq!(ancestors(Some("")), vec![""]);
/// assert_eq!(ancestors(Some("a")), vec!["", "a"]);
/// assert_eq!(ancestors(Some("a.b.c")), vec!["", "a", "a.b", "a.b.c"]);
/// assert!(ancestors(None).is_empty());
/// ```
pub fn ancestors(name: Option<&str>) -> Vec<String> {
    let name = match name {
        Some(n) => n,
        None => return Vec::new(),
    };

    if name.is_empty() {
        return vec![String::new()];
    }

    let mut out = Vec::with_capacity(name.matches('.').count() + 2);
    out.push(String::new());
    for (i, _) in name.match_indices('.') {
        out.push(name[..i].to_string());
    }
    out.push(name.to_string());
    out
}

/// Is `candidate` a strict dotted-prefix ancestor of `name`? Used by
/// [`Registry`](crate)'s effective-level propagation to find every
/// currently-known descendant of a newly-explicit domain.
pub fn is_strict_ancestor(candidate: &str, name: &str) -> bool {
    if candidate.is_empty() {
        return !name.is_empty();
    }
    name.len() > candidate.len()
        && name.starts_with(candidate)
        && name.as_bytes()[candidate.len()] == b'.'
}

/// The dotted-prefix parent of `name` (the longest proper prefix ending
/// before a `.`), or `None` for the root.
pub fn parent(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    match name.rfind('.') {
        Some(i) => Some(name[..i].to_string()),
        None => Some(String::new()),
    }
}

/// Are all segments of `name` non-empty (root itself is always valid)?
pub fn is_well_formed(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    !name.split('.').any(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_root() {
        assert_eq!(ancestors(Some("")), vec![String::new()]);
    }

    #[test]
    fn ancestors_single_segment() {
        assert_eq!(ancestors(Some("chassis")), vec!["", "chassis"]);
    }

    #[test]
    fn ancestors_three_segments() {
        assert_eq!(
            ancestors(Some("chassis.network.backend")),
            vec!["", "chassis", "chassis.network", "chassis.network.backend"]
        );
    }

    #[test]
    fn ancestors_absent_is_empty() {
        assert!(ancestors(None).is_empty());
    }

    #[test]
    fn ancestors_length_invariant() {
        for name in ["a", "a.b", "a.b.c.d"] {
            let chain = ancestors(Some(name));
            assert_eq!(chain.len(), 1 + name.matches('.').count() + 1);
            assert_eq!(chain[0], "");
            assert_eq!(chain.last().unwrap(), name);
        }
    }

    #[test]
    fn strict_ancestor_checks() {
        assert!(is_strict_ancestor("", "a"));
        assert!(is_strict_ancestor("a", "a.b"));
        assert!(is_strict_ancestor("a.b", "a.b.c"));
        assert!(!is_strict_ancestor("a.b", "a.bc"));
        assert!(!is_strict_ancestor("a", "a"));
        assert!(!is_strict_ancestor("a.b", "a"));
    }

    #[test]
    fn parent_of_root_is_none() {
        assert_eq!(parent(""), None);
    }

    #[test]
    fn parent_of_dotted_name() {
        assert_eq!(parent("a.b.c").as_deref(), Some("a.b"));
        assert_eq!(parent("a").as_deref(), Some(""));
    }

    #[test]
    fn well_formed_rejects_empty_segments() {
        assert!(is_well_formed(""));
        assert!(is_well_formed("a.b"));
        assert!(!is_well_formed("a..b"));
        assert!(!is_well_formed(".a"));
    }
}
