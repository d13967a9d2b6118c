// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Verifier
//!
//! SHA-256 file verification and detached OpenPGP signature verification,
//! adapted from `paultag-deb-rs`'s `control::openpgp::OpenPgpValidator` for
//! the detached-signature case (a `Release`/`Release.gpg` pair, rather than
//! the clearsigned `InRelease` that crate targets).

use std::collections::HashMap;
use std::path::Path;

use sequoia_openpgp::cert::CertParser;
use sequoia_openpgp::parse::stream::{
    DetachedVerifierBuilder, MessageLayer, MessageStructure, VerificationHelper,
};
use sequoia_openpgp::parse::Parse;
use sequoia_openpgp::policy::StandardPolicy;
use sequoia_openpgp::{Cert, Fingerprint, KeyHandle};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Compute the SHA-256 of `path` and compare it (case-insensitively) to
/// `expected_hex`. Fails loud on mismatch rather than returning a bool;
/// there is no recovery path for a corrupted download.
pub fn verify_sha256(path: &Path, expected_hex: &str) -> Result<(), Error> {
    let bytes = crate::archive::read_whole(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let actual = hex_encode(&hasher.finalize());

    if actual.eq_ignore_ascii_case(expected_hex) {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            artifact: path.display().to_string(),
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

struct Helper {
    keys: HashMap<Fingerprint, Cert>,
    matched: bool,
}

impl VerificationHelper for &mut Helper {
    fn get_certs(&mut self, _ids: &[KeyHandle]) -> sequoia_openpgp::Result<Vec<Cert>> {
        Ok(self.keys.values().cloned().collect())
    }

    fn check(&mut self, structure: MessageStructure) -> sequoia_openpgp::Result<()> {
        for layer in structure.into_iter() {
            let MessageLayer::SignatureGroup { results } = layer else {
                continue;
            };
            for result in results {
                let Ok(result) = result else { continue };
                if result
                    .sig
                    .issuer_fingerprints()
                    .any(|fp| self.keys.contains_key(fp))
                {
                    self.matched = true;
                }
            }
        }
        Ok(())
    }
}

/// Verify a detached OpenPGP signature over `data_path` against
/// `sig_path`, trusting only certificates found in `keyring`. Fails loud
/// on any verification failure; there is no recovery path for an
/// untrusted `Release`.
pub fn verify_signature(data_path: &Path, sig_path: &Path, keyring: &Path) -> Result<(), Error> {
    let mut keys = HashMap::new();
    for cert in CertParser::from_file(keyring)
        .map_err(|_| Error::InvalidSignature(keyring.display().to_string()))?
    {
        let cert = cert.map_err(|_| Error::InvalidSignature(keyring.display().to_string()))?;
        keys.insert(cert.fingerprint(), cert.clone());
        for key in cert.keys() {
            keys.insert(key.key().fingerprint(), cert.clone());
        }
    }

    let mut helper = Helper {
        keys,
        matched: false,
    };

    let policy = StandardPolicy::new();
    let mut verifier = DetachedVerifierBuilder::from_file(sig_path)
        .map_err(|_| Error::InvalidSignature(data_path.display().to_string()))?
        .with_policy(&policy, None, &mut helper)
        .map_err(|_| Error::InvalidSignature(data_path.display().to_string()))?;

    verifier
        .verify_file(data_path)
        .map_err(|_| Error::InvalidSignature(data_path.display().to_string()))?;

    let Helper { matched, .. } = helper;
    if matched {
        Ok(())
    } else {
        Err(Error::InvalidSignature(data_path.display().to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matching_digest_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Packages");
        std::fs::write(&path, b"hello world").unwrap();
        // sha256("hello world")
        let expected = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde";
        assert!(verify_sha256(&path, expected).is_ok());
    }

    #[test]
    fn mismatched_digest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Packages");
        std::fs::write(&path, b"hello world").unwrap();
        let err = verify_sha256(&path, "0000000000000000000000000000000000000000000000000000000000000000").unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn digest_comparison_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Packages");
        std::fs::write(&path, b"hello world").unwrap();
        let expected = "B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE";
        assert!(verify_sha256(&path, expected).is_ok());
    }
}
