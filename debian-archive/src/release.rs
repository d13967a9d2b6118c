// Copyright 2024 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # The `Release` index
//!
//! `Release` is the signed manifest naming each sub-index's expected
//! SHA-256 digest. It is parsed once into a `HashMap` keyed by relative
//! path, turning "locate the `SHA256:` section, then scan for the
//! matching line" into an O(1) lookup via a custom
//! [`serde::de::Visitor`] over the `SHA256:` section.

use std::collections::HashMap;
use std::fmt::Formatter;
use std::io::{BufRead, Cursor};

use serde::Deserialize;

use crate::architecture::Architecture;
use crate::Error;

/// Size and digest of one file referenced by a `Release` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Size of the file, in bytes.
    pub file_size: u64,
    /// Lowercase hex SHA-256 digest of the file.
    pub sha256: String,
}

#[derive(Debug)]
struct Sha256SectionVisitor;

impl<'de> serde::de::Visitor<'de> for Sha256SectionVisitor {
    type Value = HashMap<String, FileInfo>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(formatter, "a list of \"<hex> <size> <path>\" lines")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let mut files = HashMap::new();
        for line in Cursor::new(s).lines() {
            let Ok(line) = line else { break };
            let fields: Vec<_> = line.split_ascii_whitespace().collect();
            if fields.len() != 3 {
                return Err(E::invalid_value(serde::de::Unexpected::Str(&line), &self));
            }
            let file_size = fields[1]
                .parse()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(fields[1]), &self))?;
            files.insert(
                fields[2].to_owned(),
                FileInfo {
                    file_size,
                    sha256: fields[0].to_ascii_lowercase(),
                },
            );
        }
        Ok(files)
    }
}

fn deserialize_sha256<'de, D>(deserializer: D) -> Result<HashMap<String, FileInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_str(Sha256SectionVisitor)
}

struct WhitespaceListVisitor;

impl<'de> serde::de::Visitor<'de> for WhitespaceListVisitor {
    type Value = Vec<String>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(formatter, "a whitespace-separated list")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(s.split_whitespace().map(str::to_owned).collect())
    }
}

fn deserialize_whitespace_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_str(WhitespaceListVisitor)
}

/// A parsed `Release` document.
///
/// Only the fields this tool actually consumes are modeled.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Release {
    /// Origin of the release, e.g. "Ubuntu".
    pub origin: String,
    /// Suite name, e.g. "jammy".
    pub suite: Option<String>,
    /// Codename, e.g. "jammy".
    pub codename: Option<String>,
    /// Architectures this release covers.
    #[serde(default, deserialize_with = "deserialize_whitespace_list")]
    pub architectures: Vec<String>,
    /// Referenced sub-indices and their expected SHA-256 digests, keyed
    /// by repo-relative path.
    #[serde(rename = "SHA256", deserialize_with = "deserialize_sha256")]
    pub files: HashMap<String, FileInfo>,
}

impl Release {
    /// Parse a `Release` document from a reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, Error> {
        rfc822_like::from_reader(reader).map_err(|source| Error::Rfc822 {
            artifact: "Release".to_owned(),
            source,
        })
    }

    /// Parse a `Release` document from a string.
    pub fn from_str(data: &str) -> Result<Self, Error> {
        rfc822_like::from_str(data).map_err(|source| Error::Rfc822 {
            artifact: "Release".to_owned(),
            source,
        })
    }

    /// The expected SHA-256 of a sub-index named by its repo-relative
    /// path, or `None` if the `SHA256:` section has no entry for it (the
    /// caller treats this as fatal).
    pub fn expected_sha256(&self, relative_path: &str) -> Option<&str> {
        self.files.get(relative_path).map(|info| info.sha256.as_str())
    }

    /// Whether this release covers the given architecture.
    pub fn covers(&self, arch: Architecture) -> bool {
        self.architectures.iter().any(|a| a == arch.to_string().as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "Origin: Ubuntu\n\
Label: Ubuntu\n\
Suite: jammy\n\
Codename: jammy\n\
Architectures: amd64 arm64\n\
Components: main universe\n\
SHA256:\n\
 efe2dafdf6a50f376af1dfc574d6bd3360558fde917555671b13832c89604d9 26187 main/binary-amd64/Packages\n\
 ba66d22607be572323b72ca152d6e635fab075d92a2265bbfe319337c35ccd1 7777 main/binary-amd64/Packages.gz\n";

    #[test]
    fn parses_sha256_section() {
        let release = Release::from_str(SAMPLE).unwrap();
        assert_eq!(release.architectures, ["amd64", "arm64"]);
        assert_eq!(
            release.expected_sha256("main/binary-amd64/Packages.gz"),
            Some("ba66d22607be572323b72ca152d6e635fab075d92a2265bbfe319337c35ccd1")
        );
    }

    #[test]
    fn missing_entry_is_none() {
        let release = Release::from_str(SAMPLE).unwrap();
        assert_eq!(release.expected_sha256("main/binary-amd64/Release"), None);
    }

    #[test]
    fn field_lookup_is_case_insensitive_hex() {
        let release = Release::from_str(SAMPLE).unwrap();
        let found = release.expected_sha256("main/binary-amd64/Packages").unwrap();
        assert_eq!(found.to_ascii_uppercase(), found.to_uppercase());
    }

    #[test]
    fn covers_listed_architecture() {
        let release = Release::from_str(SAMPLE).unwrap();
        assert!(release.covers(Architecture::Amd64));
        assert!(release.covers(Architecture::Arm64));
    }

    #[test]
    fn does_not_cover_unlisted_architecture() {
        let release = Release::from_str(SAMPLE).unwrap();
        assert!(!release.covers(Architecture::S390x));
    }
}
