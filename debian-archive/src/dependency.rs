// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # Dependency expressions
//!
//! A `Depends`/`Pre-Depends`/`Provides` field value is a comma-separated
//! list of clauses; each clause is a `|`-separated list of alternatives;
//! each alternative is a package name optionally decorated with a
//! parenthesized version constraint and/or bracketed architecture
//! qualifiers. This tool ignores version constraints entirely, so
//! parsing only needs to strip them, not interpret them.

/// A single alternative within a clause: just the package name, with any
/// version constraint or architecture qualifier discarded.
pub type Alternative = String;

/// A clause: satisfied if any of its alternatives is satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clause(pub Vec<Alternative>);

impl Clause {
    /// The alternatives of this clause, in declared order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.0
    }

    /// The first-listed alternative, per the resolver's stable
    /// first-alternative-wins policy.
    pub fn first(&self) -> Option<&Alternative> {
        self.0.first()
    }
}

/// A parsed dependency expression: all clauses must be satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyExpr(pub Vec<Clause>);

impl DependencyExpr {
    /// Parse a raw `Depends`-style field value into clauses of
    /// alternatives. Whitespace between tokens is insignificant; empty
    /// input parses to no clauses at all.
    pub fn parse(raw: &str) -> Self {
        let clauses = raw
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(|clause| {
                let alternatives = clause
                    .split('|')
                    .map(str::trim)
                    .filter(|alt| !alt.is_empty())
                    .map(strip_decorations)
                    .collect();
                Clause(alternatives)
            })
            .collect();
        DependencyExpr(clauses)
    }

    /// The clauses of this expression, in declared order.
    pub fn clauses(&self) -> &[Clause] {
        &self.0
    }
}

/// Strip a trailing `(constraint)` version constraint and any `[arch ...]`
/// architecture qualifiers from a single alternative, leaving just the
/// package name.
fn strip_decorations(alternative: &str) -> String {
    let mut name = alternative.to_owned();
    // architecture qualifiers (`[amd64 !i386]`) may appear after the name,
    // and after a version constraint; strip them first.
    while let Some(open) = name.find('[') {
        let Some(close) = name[open..].find(']') else {
            break;
        };
        name.replace_range(open..open + close + 1, "");
    }
    let name = name.trim();
    let name = match name.find('(') {
        Some(open) => name[..open].trim(),
        None => name,
    };
    name.to_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_alternative() {
        let expr = DependencyExpr::parse("libc6");
        assert_eq!(expr.clauses().len(), 1);
        assert_eq!(expr.clauses()[0].alternatives(), ["libc6"]);
    }

    #[test]
    fn multiple_clauses() {
        let expr = DependencyExpr::parse("libc6, libgcc-s1");
        assert_eq!(expr.clauses().len(), 2);
        assert_eq!(expr.clauses()[0].alternatives(), ["libc6"]);
        assert_eq!(expr.clauses()[1].alternatives(), ["libgcc-s1"]);
    }

    #[test]
    fn alternatives_in_a_clause() {
        let expr = DependencyExpr::parse("awk | mawk | gawk");
        assert_eq!(expr.clauses().len(), 1);
        assert_eq!(expr.clauses()[0].alternatives(), ["awk", "mawk", "gawk"]);
        assert_eq!(expr.clauses()[0].first(), Some(&"awk".to_owned()));
    }

    #[test]
    fn version_constraint_is_stripped() {
        let expr = DependencyExpr::parse("libc6 (>= 2.34)");
        assert_eq!(expr.clauses()[0].alternatives(), ["libc6"]);
    }

    #[test]
    fn architecture_qualifier_is_stripped() {
        let expr = DependencyExpr::parse("libfoo:amd64 [amd64 arm64] (>= 1.0)");
        assert_eq!(expr.clauses()[0].alternatives(), ["libfoo:amd64"]);
    }

    #[test]
    fn empty_input() {
        let expr = DependencyExpr::parse("");
        assert!(expr.clauses().is_empty());
    }

    #[test]
    fn whitespace_insignificant() {
        let expr = DependencyExpr::parse("  libc6   (>=   2.34)  |  libc6.1  ");
        assert_eq!(expr.clauses()[0].alternatives(), ["libc6", "libc6.1"]);
    }
}
