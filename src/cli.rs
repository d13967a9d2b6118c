// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Command-line surface
//!
//! A single `clap::Parser` derive struct for the full option set,
//! assembled once in `main` and never consulted again by name from
//! inside the orchestrator (`BootstrapRequest` is what actually flows
//! downstream — see `request.rs`).

use std::path::PathBuf;

use clap::Parser;

use debian_archive::architecture::Architecture;

/// Build a minimal, usable sysroot from a Debian/Ubuntu-style binary
/// package archive.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Distribution release to bootstrap, e.g. `jammy` or `bookworm`.
    pub suite: String,
    /// Directory the unpacked sysroot tree is written to.
    pub target: PathBuf,
    /// Target architecture.
    ///
    /// Defaults to the host architecture as reported by the OS. Selects
    /// both the per-arch `Packages` sub-index and, via the primary/ports
    /// split, the mirror host.
    #[clap(long)]
    pub arch: Option<Architecture>,
    /// Additional seed package names beyond the `Priority: required` base
    /// set, comma-separated.
    #[clap(long, value_delimiter = ',')]
    pub include: Vec<String>,
    /// Omit the `Priority: required` base set from the seed packages;
    /// only `--include` packages (and their dependency closure) are
    /// installed.
    #[clap(long)]
    pub exclude_required: bool,
    /// Override the mirror base URL instead of selecting the primary or
    /// ports archive from the architecture. Mainly useful for pointing at
    /// a local mirror or test fixture.
    #[clap(long)]
    pub mirror: Option<String>,
    /// Scratch directory for downloads and intermediate extraction.
    ///
    /// Removed on success. Defaults to a `.sysroot-builder-scratch`
    /// directory next to the target.
    #[clap(long)]
    pub scratch: Option<PathBuf>,
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}
