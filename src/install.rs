// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Installer
//!
//! For each resolved package name: fetch `<mirror>/<Filename>`, verify
//! its SHA-256, `ar`-extract into a per-package scratch subdirectory,
//! locate the single `data.tar.*` member, decompress it, and `tar`-extract
//! into the sysroot root. Packages install sequentially in resolver
//! output order.
//!
//! Installation runs single-threaded; a concurrent implementation is
//! permitted provided tar extraction is serialized per file path so a
//! later package's files win over an earlier one's, matching resolver
//! order.

use std::path::Path;

use debian_archive::packages::{Field, PackagesIndex};
use log::debug;

use crate::archive::{decompress, extract_ar, extract_tar, find_data_tar};
use crate::error::Error;
use crate::fetch::Fetcher;
use crate::verify::verify_sha256;

/// Install `names`, in order, into `sysroot`.
pub async fn install_all(
    names: &[String],
    index: &PackagesIndex,
    mirror: &str,
    fetcher: &Fetcher,
    scratch: &Path,
    sysroot: &Path,
) -> Result<(), Error> {
    for name in names {
        println!("[+] installing {name}");
        install_one(name, index, mirror, fetcher, scratch, sysroot).await?;
    }
    Ok(())
}

async fn install_one(
    name: &str,
    index: &PackagesIndex,
    mirror: &str,
    fetcher: &Fetcher,
    scratch: &Path,
    sysroot: &Path,
) -> Result<(), Error> {
    let filename = index.field(name, Field::Filename).ok_or_else(|| {
        Error::MissingPackageField {
            package: name.to_owned(),
            field: "Filename",
        }
    })?;
    let expected_sha256 = index.field(name, Field::Sha256).ok_or_else(|| {
        Error::MissingPackageField {
            package: name.to_owned(),
            field: "SHA256",
        }
    })?;

    let url = format!("{}/{}", mirror.trim_end_matches('/'), filename);
    let deb_path = fetcher.fetch(&url).await?;
    verify_sha256(&deb_path, expected_sha256)?;
    debug!("{name}: sha256 verified, unpacking {}", deb_path.display());

    let ar_dest = scratch.join("pkgs").join(name);
    let members = extract_ar(&deb_path, &ar_dest)?;

    let data_tar = find_data_tar(&members)
        .ok_or_else(|| Error::MissingDataTar(deb_path.display().to_string()))?;
    let data_tar = decompress(data_tar)?;

    extract_tar(&data_tar, sysroot)?;
    Ok(())
}
