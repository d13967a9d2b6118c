// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Orchestrator
//!
//! Ties the components together into the full bootstrap pipeline:
//!
//! 1. keyring provisioning → fetch → signature verify on `Release`;
//! 2. fetch `Packages.gz` → decompress → parse → sha256 verify against
//!    the `Release`'s recorded digest;
//! 3. compute install set from `priority_required()` (unless
//!    `--exclude-required`) plus `--include`;
//! 4. install each resolved package;
//! 5. relocate.

use debian_archive::packages::PackagesIndex;
use debian_archive::release::Release;
use debian_archive::resolver;
use log::debug;

use crate::archive::decompress;
use crate::error::Error;
use crate::fetch::Fetcher;
use crate::install::install_all;
use crate::keyring;
use crate::relocate::relocate;
use crate::request::BootstrapRequest;
use crate::verify::{verify_sha256, verify_signature};

/// Run the full bootstrap pipeline for `request`.
pub async fn bootstrap(request: &BootstrapRequest) -> Result<(), Error> {
    std::fs::create_dir_all(&request.target)?;
    std::fs::create_dir_all(&request.scratch)?;

    let fetcher = Fetcher::new(&request.scratch);
    let mirror = request.mirror_base().to_owned();

    println!("[+] provisioning keyring for {}", request.suite);
    let keyring_path = keyring::provision(&request.suite, &fetcher, &request.scratch).await?;

    println!("[+] fetching Release for {}", request.suite);
    let release_url = format!("{mirror}/dists/{}/Release", request.suite);
    let release_sig_url = format!("{mirror}/dists/{}/Release.gpg", request.suite);
    let release_path = fetcher.fetch(&release_url).await?;
    let release_sig_path = fetcher.fetch(&release_sig_url).await?;

    println!("[+] verifying Release signature");
    verify_signature(&release_path, &release_sig_path, &keyring_path)?;

    let release_bytes = crate::archive::read_whole(&release_path)?;
    let release = Release::from_str(&String::from_utf8_lossy(&release_bytes))?;

    if !release.covers(request.architecture) {
        return Err(Error::UnsupportedArchitecture {
            suite: request.suite.to_string(),
            architecture: request.architecture.to_string(),
        });
    }

    let packages_relative = format!("main/binary-{}/Packages.gz", request.architecture);
    let expected_sha256 = release
        .expected_sha256(&packages_relative)
        .ok_or_else(|| Error::MissingFromRelease(packages_relative.clone()))?
        .to_owned();

    println!("[+] fetching {packages_relative}");
    let packages_url = format!("{mirror}/dists/{}/{packages_relative}", request.suite);
    let packages_gz_path = fetcher.fetch(&packages_url).await?;
    verify_sha256(&packages_gz_path, &expected_sha256)?;

    let packages_path = decompress(&packages_gz_path)?;
    let packages_bytes = crate::archive::read_whole(&packages_path)?;
    let index = PackagesIndex::from_str(&String::from_utf8_lossy(&packages_bytes))?;

    let mut seeds: Vec<String> = Vec::new();
    if !request.exclude_required {
        seeds.extend(index.priority_required().map(str::to_owned));
    }
    seeds.extend(request.include.iter().cloned());

    println!("[+] resolving dependency closure ({} seeds)", seeds.len());
    let resolved = resolver::resolve(seeds, &index);
    debug!("resolved packages: {resolved:?}");
    println!("[+] resolved {} packages", resolved.len());

    if resolved.is_empty() {
        println!("[+] Nothing to install");
        std::fs::remove_dir_all(&request.scratch).ok();
        return Ok(());
    }

    install_all(
        &resolved,
        &index,
        &mirror,
        &fetcher,
        &request.scratch,
        &request.target,
    )
    .await?;

    println!("[+] relocating absolute symlinks");
    relocate(&request.target)?;

    std::fs::remove_dir_all(&request.scratch).ok();

    Ok(())
}
