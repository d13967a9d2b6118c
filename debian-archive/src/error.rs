// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # Parsing errors for the `debian-archive` data model

use thiserror::Error;

/// Errors raised while parsing archive identifiers and index documents.
///
/// Each variant names the offending artifact, per the user-visible
/// message contract this crate's consumers are held to.
#[derive(Debug, Error)]
pub enum Error {
    /// The given string is not a known architecture identifier.
    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),
    /// The given string is not a valid suite identifier.
    #[error("invalid suite: {0}")]
    InvalidSuite(String),
    /// The suite is not present in the built-in keyring table.
    #[error("unknown suite: {0}")]
    UnknownSuite(String),
    /// Failed to parse a `Release` or `Packages` document.
    #[error("failed to parse {artifact}: {source}")]
    Rfc822 {
        /// Name of the document being parsed (`Release`, `Packages`, ...).
        artifact: String,
        /// Underlying parser error.
        #[source]
        source: rfc822_like::de::Error,
    },
}
