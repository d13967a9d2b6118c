// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Errors raised while bootstrapping a sysroot

use thiserror::Error;

/// Errors the orchestrator can fail with. Each variant names the
/// offending artifact so the `[!]`-prefixed message printed to stderr is
/// immediately actionable.
#[derive(Debug, Error)]
pub enum Error {
    /// A downloaded file's SHA-256 did not match the expected digest.
    #[error("checksum mismatch for {artifact}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Name of the file that failed verification.
        artifact: String,
        /// Digest recorded in the index.
        expected: String,
        /// Digest actually computed.
        actual: String,
    },
    /// The `Release` index's detached signature did not verify against
    /// the provisioned keyring.
    #[error("signature verification failed for {0}")]
    InvalidSignature(String),
    /// The `Release` index has no `SHA256:` entry for the named path.
    #[error("{0} is not listed in the Release index")]
    MissingFromRelease(String),
    /// The `Release` index does not list the requested architecture.
    #[error("{suite}'s Release index does not list architecture {architecture}")]
    UnsupportedArchitecture {
        /// Suite whose `Release` was consulted.
        suite: String,
        /// Architecture that was requested.
        architecture: String,
    },
    /// A package stanza in the `Packages` index is missing a `Filename`
    /// or `SHA256` field required to fetch and verify it.
    #[error("{package}: missing {field} field in Packages index")]
    MissingPackageField {
        /// Name of the package whose stanza is incomplete.
        package: String,
        /// Name of the missing field (`Filename` or `SHA256`).
        field: &'static str,
    },
    /// An archive member used an unsupported compression extension.
    #[error("unsupported compression extension: {0}")]
    UnsupportedCompression(String),
    /// A `.deb` did not contain exactly one `data.tar.*` member.
    #[error("no data.tar.* member found in {0}")]
    MissingDataTar(String),
    /// A URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Fetching a URL failed.
    #[error("failed to fetch {url}")]
    Fetch {
        /// URL that failed.
        url: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// An I/O error occurred while reading or writing the scratch
    /// directory, the sysroot, or an archive member.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Parsing a `Release`/`Packages` document, a suite, or an
    /// architecture failed.
    #[error(transparent)]
    Archive(#[from] debian_archive::Error),
}
