// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # Suites and the keyring trust-anchor table
//!
//! A [`Suite`] is just a validated identifier (`jammy`, `bookworm`, ...)
//! rather than a closed enum of known release names: this tool has to
//! accept whatever suite the caller points it at, so the type is a
//! validated newtype, and the suite-specific knowledge (which keyring
//! backs it) lives in a small lookup table next to it instead of in the
//! type itself.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::Error;

/// A distribution release identifier, e.g. `jammy` or `bookworm`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Suite(String);

impl Suite {
    fn validate(value: &str) -> Result<(), Error> {
        if value.is_empty()
            || !value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(Error::InvalidSuite(value.to_owned()));
        }
        Ok(())
    }
}

impl TryFrom<&str> for Suite {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::validate(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Suite {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl FromStr for Suite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suite::try_from(s)
    }
}

impl AsRef<str> for Suite {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Suite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where to obtain the trust-anchor keyring for a suite: an archive URL
/// (itself outside the repository being verified, so a compromised
/// mirror can't also supply its own trust anchor) and the path of the
/// keyring file within that archive's unpacked data tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyringSource {
    /// URL of the `.deb` (or similar archive) carrying the keyring.
    pub archive_url: &'static str,
    /// Path of the keyring file inside that archive's data tree.
    pub member_path: &'static str,
}

/// Built-in table mapping known suites to their keyring source.
///
/// This is intentionally small and explicit: suites missing from this
/// table are a fatal input error, not a thing this tool tries to guess
/// at.
pub const KEYRING_TABLE: &[(&str, KeyringSource)] = &[
    (
        "jammy",
        KeyringSource {
            archive_url:
                "http://archive.ubuntu.com/ubuntu/pool/main/u/ubuntu-keyring/ubuntu-keyring_2021.03.26_all.deb",
            member_path: "usr/share/keyrings/ubuntu-archive-keyring.gpg",
        },
    ),
    (
        "noble",
        KeyringSource {
            archive_url:
                "http://archive.ubuntu.com/ubuntu/pool/main/u/ubuntu-keyring/ubuntu-keyring_2023.11.28.1_all.deb",
            member_path: "usr/share/keyrings/ubuntu-archive-keyring.gpg",
        },
    ),
    (
        "focal",
        KeyringSource {
            archive_url:
                "http://archive.ubuntu.com/ubuntu/pool/main/u/ubuntu-keyring/ubuntu-keyring_2020.02.11.2_all.deb",
            member_path: "usr/share/keyrings/ubuntu-archive-keyring.gpg",
        },
    ),
    (
        "bookworm",
        KeyringSource {
            archive_url:
                "http://deb.debian.org/debian/pool/main/d/debian-archive-keyring/debian-archive-keyring_2023.3_all.deb",
            member_path: "usr/share/keyrings/debian-archive-keyring.gpg",
        },
    ),
    (
        "bullseye",
        KeyringSource {
            archive_url:
                "http://deb.debian.org/debian/pool/main/d/debian-archive-keyring/debian-archive-keyring_2021.1.1_all.deb",
            member_path: "usr/share/keyrings/debian-archive-keyring.gpg",
        },
    ),
];

/// Look up the keyring source for a suite.
pub fn keyring_source_for(suite: &Suite) -> Result<KeyringSource, Error> {
    KEYRING_TABLE
        .iter()
        .find(|(name, _)| *name == suite.as_ref())
        .map(|(_, source)| *source)
        .ok_or_else(|| Error::UnknownSuite(suite.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_suite() {
        assert_eq!(Suite::try_from("jammy").unwrap().as_ref(), "jammy");
    }

    #[test]
    fn invalid_suite() {
        assert!(Suite::try_from("").is_err());
        assert!(Suite::try_from("Jammy!").is_err());
    }

    #[test]
    fn known_suite_has_keyring() {
        let suite = Suite::try_from("jammy").unwrap();
        assert!(keyring_source_for(&suite).is_ok());
    }

    #[test]
    fn unknown_suite_is_fatal() {
        let suite = Suite::try_from("nonesuch").unwrap();
        assert!(matches!(
            keyring_source_for(&suite),
            Err(Error::UnknownSuite(_))
        ));
    }
}
