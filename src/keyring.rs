// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Keyring provisioner (§4.D)
//!
//! Obtains the trust anchor for a suite's `Release` signature from a
//! known, out-of-band-trusted source (the archive's own keyring package),
//! never from the repository being verified itself.

use std::path::{Path, PathBuf};

use debian_archive::suite::{keyring_source_for, Suite};

use crate::archive::{extract_ar, extract_tar};
use crate::error::Error;
use crate::fetch::Fetcher;

/// Fetch and extract the keyring for `suite` into `scratch`, returning
/// the path to the extracted keyring file.
pub async fn provision(suite: &Suite, fetcher: &Fetcher, scratch: &Path) -> Result<PathBuf, Error> {
    let source = keyring_source_for(suite)?;

    let deb_path = fetcher.fetch(source.archive_url).await?;
    let ar_dest = scratch.join("keyring-ar");
    let members = extract_ar(&deb_path, &ar_dest)?;

    let data_tar = crate::archive::find_data_tar(&members)
        .ok_or_else(|| Error::MissingDataTar(deb_path.display().to_string()))?;
    let data_tar = crate::archive::decompress(data_tar)?;

    let extracted = scratch.join("keyring-data");
    extract_tar(&data_tar, &extracted)?;

    let keyring_path = extracted.join(source.member_path);
    if !keyring_path.exists() {
        return Err(Error::MissingDataTar(source.member_path.to_owned()));
    }
    Ok(keyring_path)
}
