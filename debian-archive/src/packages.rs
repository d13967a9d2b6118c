// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # The `Packages` index
//!
//! Parses a `Packages` catalog (a stanza-oriented control file, one
//! stanza per binary package) into a name-indexed map once, so repeated
//! lookups are `HashMap` gets rather than a fresh line scan each time.
//! Stanzas deserialize via `rfc822-like`, the same crate used elsewhere
//! in this workspace for control-file parsing.

use std::collections::HashMap;
use std::io::BufRead;

use serde::Deserialize;

use crate::Error;

/// Which field of a package stanza to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Repo-relative path of the `.deb`.
    Filename,
    /// SHA-256 digest of the `.deb`, as hex.
    Sha256,
    /// The `Depends` field.
    Depends,
    /// The `Pre-Depends` field.
    PreDepends,
    /// The `Provides` field.
    Provides,
}

/// One stanza of a `Packages` file.
///
/// Dependency fields are kept as raw strings rather than eagerly parsed
/// into [`crate::dependency::DependencyExpr`] — not every caller needs the
/// parsed form, and parsing is cheap enough to do lazily in the resolver.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PackageStanza {
    /// The package name; unique within a `Packages` file.
    pub package: String,
    /// `Priority: required` marks a package as part of the base set.
    pub priority: Option<String>,
    /// Raw `Pre-Depends` field value.
    #[serde(rename = "Pre-Depends")]
    pub pre_depends: Option<String>,
    /// Raw `Depends` field value.
    pub depends: Option<String>,
    /// Raw `Provides` field value.
    pub provides: Option<String>,
    /// Repo-relative path to the `.deb`.
    pub filename: Option<String>,
    /// Hex SHA-256 digest of the `.deb`.
    #[serde(rename = "SHA256")]
    pub sha256: Option<String>,
}

impl PackageStanza {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Filename => self.filename.as_deref(),
            Field::Sha256 => self.sha256.as_deref(),
            Field::Depends => self.depends.as_deref(),
            Field::PreDepends => self.pre_depends.as_deref(),
            Field::Provides => self.provides.as_deref(),
        }
    }

    /// Whether this stanza's `Priority` is `required`.
    pub fn is_required(&self) -> bool {
        self.priority.as_deref() == Some("required")
    }
}

/// A `Packages` catalog, indexed by package name.
#[derive(Debug, Default)]
pub struct PackagesIndex {
    by_name: HashMap<String, PackageStanza>,
}

impl PackagesIndex {
    /// Parse a `Packages` document from a reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, Error> {
        let stanzas: Vec<PackageStanza> =
            rfc822_like::from_reader(reader).map_err(|source| Error::Rfc822 {
                artifact: "Packages".to_owned(),
                source,
            })?;
        Ok(Self::from_stanzas(stanzas))
    }

    /// Parse a `Packages` document from a string.
    pub fn from_str(data: &str) -> Result<Self, Error> {
        let stanzas: Vec<PackageStanza> =
            rfc822_like::from_str(data).map_err(|source| Error::Rfc822 {
                artifact: "Packages".to_owned(),
                source,
            })?;
        Ok(Self::from_stanzas(stanzas))
    }

    fn from_stanzas(stanzas: Vec<PackageStanza>) -> Self {
        let by_name = stanzas
            .into_iter()
            .map(|stanza| (stanza.package.clone(), stanza))
            .collect();
        Self { by_name }
    }

    /// Whether a stanza named `name` exists. A name that only ever
    /// appears in some stanza's `Provides` is virtual and `exists`
    /// returns `false` for it.
    pub fn exists(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Names of all stanzas with `Priority: required`.
    pub fn priority_required(&self) -> impl Iterator<Item = &str> {
        self.by_name
            .values()
            .filter(|stanza| stanza.is_required())
            .map(|stanza| stanza.package.as_str())
    }

    /// Read a single field of the named stanza, or `None` if either the
    /// stanza or the field is absent.
    pub fn field(&self, name: &str, field: Field) -> Option<&str> {
        self.by_name.get(name)?.field(field)
    }

    /// The full stanza for a package, if it exists.
    pub fn stanza(&self, name: &str) -> Option<&PackageStanza> {
        self.by_name.get(name)
    }

    /// Number of stanzas in this index.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether this index has no stanzas at all.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "Package: base-files\n\
Priority: required\n\
Depends: awk\n\
Filename: pool/main/b/base-files/base-files_12ubuntu4_amd64.deb\n\
SHA256: abc123\n\
\n\
Package: bash\n\
Priority: required\n\
Pre-Depends: libc6 (>= 2.34)\n\
Filename: pool/main/b/bash/bash_5.1-6ubuntu1_amd64.deb\n\
SHA256: def456\n\
\n\
Package: mawk\n\
Priority: optional\n\
Provides: awk\n\
Filename: pool/main/m/mawk/mawk_1.3.4.20200120-3_amd64.deb\n\
SHA256: 789abc\n";

    #[test]
    fn parses_stanzas() {
        let index = PackagesIndex::from_str(SAMPLE).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.exists("base-files"));
        assert!(!index.exists("awk"));
    }

    #[test]
    fn required_priority() {
        let index = PackagesIndex::from_str(SAMPLE).unwrap();
        let mut required: Vec<_> = index.priority_required().collect();
        required.sort_unstable();
        assert_eq!(required, ["bash", "base-files"]);
    }

    #[test]
    fn field_lookup_does_not_bleed_across_stanzas() {
        let index = PackagesIndex::from_str(SAMPLE).unwrap();
        assert_eq!(index.field("base-files", Field::Depends), Some("awk"));
        assert_eq!(index.field("bash", Field::Depends), None);
        assert_eq!(
            index.field("bash", Field::PreDepends),
            Some("libc6 (>= 2.34)")
        );
    }

    #[test]
    fn missing_field_and_stanza() {
        let index = PackagesIndex::from_str(SAMPLE).unwrap();
        assert_eq!(index.field("base-files", Field::Provides), None);
        assert_eq!(index.field("nonexistent", Field::Filename), None);
    }
}
