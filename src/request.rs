// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # The bootstrap request
//!
//! A single immutable value assembled once in `main` from parsed CLI
//! options and threaded through the orchestrator, rather than having
//! each component reach into ambient globals for its configuration.

use std::path::PathBuf;

use debian_archive::architecture::Architecture;
use debian_archive::suite::Suite;

/// Everything the orchestrator needs to bootstrap one sysroot.
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    /// Distribution release to bootstrap.
    pub suite: Suite,
    /// Target architecture.
    pub architecture: Architecture,
    /// Directory the unpacked tree is written to.
    pub target: PathBuf,
    /// Scratch directory for downloads and intermediate extraction.
    /// Removed on success.
    pub scratch: PathBuf,
    /// Extra seed package names beyond the `Priority: required` base set.
    pub include: Vec<String>,
    /// Omit the `Priority: required` base set from the seeds.
    pub exclude_required: bool,
    /// Override for the mirror base URL; when unset, the primary or
    /// ports archive is selected from the architecture.
    pub mirror: Option<String>,
}

/// Default primary-archive mirror (serves `amd64`/`i386`).
const PRIMARY_MIRROR: &str = "http://archive.ubuntu.com/ubuntu";
/// Default ports-archive mirror (serves every other architecture).
const PORTS_MIRROR: &str = "http://ports.ubuntu.com/ubuntu-ports";

impl BootstrapRequest {
    /// The mirror base URL this request fetches from: the explicit
    /// `--mirror` override if given, otherwise the primary or ports
    /// archive selected by architecture.
    pub fn mirror_base(&self) -> &str {
        if let Some(mirror) = &self.mirror {
            return mirror;
        }
        if self.architecture.is_primary() {
            PRIMARY_MIRROR
        } else {
            PORTS_MIRROR
        }
    }
}
