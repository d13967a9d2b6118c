// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # Dependency resolution
//!
//! Breadth-first closure over `Pre-Depends`/`Depends` with first-alternative
//! preference. The `installed` set is insertion-ordered (a `Vec` guarded
//! by a `HashSet` for O(1) membership, rather than pulling in an
//! `indexmap` dependency) and the `pending` queue is a plain `VecDeque`.

use std::collections::{HashSet, VecDeque};

use crate::dependency::DependencyExpr;
use crate::packages::{Field, PackagesIndex};

/// Compute the dependency closure of `seeds` against `index`.
///
/// Returns an ordered, duplicate-free list of package names: every
/// non-virtual dependency clause of every returned package is satisfied
/// by some member of the returned set. Names that only ever appear in a
/// `Provides` field (virtual packages) are silently dropped from the
/// result rather than substituted, per spec.md's documented policy.
pub fn resolve<I>(seeds: I, index: &PackagesIndex) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut installed: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut pending: VecDeque<String> = VecDeque::new();

    for seed in seeds {
        if seen.insert(seed.clone()) {
            pending.push_back(seed);
        }
    }

    while let Some(name) = pending.pop_front() {
        if installed.iter().any(|p| *p == name) {
            continue;
        }
        installed.push(name.clone());

        let pre_depends = index.field(&name, Field::PreDepends).unwrap_or("");
        let depends = index.field(&name, Field::Depends).unwrap_or("");

        for clause in DependencyExpr::parse(pre_depends)
            .clauses()
            .iter()
            .chain(DependencyExpr::parse(depends).clauses())
        {
            let in_flight = clause.alternatives().iter().any(|alt| seen.contains(alt));
            if in_flight {
                continue;
            }
            if let Some(first) = clause.first() {
                if seen.insert(first.clone()) {
                    pending.push_back(first.clone());
                }
            }
        }
    }

    installed.retain(|name| index.exists(name));
    installed
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "Package: base\n\
Priority: required\n\
Depends: libc\n\
\n\
Package: libc\n\
Priority: required\n\
\n\
Package: tool\n\
Depends: awk | mawk | gawk\n\
\n\
Package: mawk\n\
Provides: awk\n\
\n\
Package: gawk\n\
Provides: awk\n\
\n\
Package: needs-virtual\n\
Depends: awk\n\
\n\
Package: self-referential\n\
Depends: self-referential, libc\n\
\n\
Package: choosy\n\
Depends: real-x | real-y\n\
\n\
Package: real-x\n\
\n\
Package: real-y\n";

    fn index() -> PackagesIndex {
        PackagesIndex::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn minimal_install_follows_depends() {
        let resolved = resolve(["base".to_owned()], &index());
        assert_eq!(resolved, vec!["base".to_owned(), "libc".to_owned()]);
    }

    #[test]
    fn first_alternative_wins() {
        let resolved = resolve(["choosy".to_owned()], &index());
        assert_eq!(resolved, vec!["choosy".to_owned(), "real-x".to_owned()]);
        assert!(!resolved.contains(&"real-y".to_owned()));
    }

    #[test]
    fn virtual_only_dependency_is_dropped_without_substitute() {
        let resolved = resolve(["needs-virtual".to_owned()], &index());
        assert_eq!(resolved, vec!["needs-virtual".to_owned()]);
    }

    #[test]
    fn alternative_group_with_virtual_only_first_name_is_dropped() {
        // `tool` depends on `awk | mawk | gawk`; `awk` is only ever
        // `Provides`-d by `mawk`/`gawk`, never a stanza of its own. The
        // resolver always enqueues the first-listed alternative, so `awk`
        // is what gets enqueued here, and it is then dropped by the final
        // `exists()` filter — no substitute (`mawk`/`gawk`) is chosen.
        let resolved = resolve(["tool".to_owned()], &index());
        assert_eq!(resolved, vec!["tool".to_owned()]);
    }

    #[test]
    fn self_cycle_terminates() {
        let resolved = resolve(["self-referential".to_owned()], &index());
        assert_eq!(
            resolved,
            vec!["self-referential".to_owned(), "libc".to_owned()]
        );
    }

    #[test]
    fn output_is_duplicate_free_and_preserves_seed_order() {
        let resolved = resolve(["base".to_owned(), "libc".to_owned(), "tool".to_owned()], &index());
        assert_eq!(
            resolved,
            vec!["base".to_owned(), "libc".to_owned(), "tool".to_owned()],
        );
    }
}
