// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # `sysroot-builder`
//!
//! Fetches and unpacks a Debian/Ubuntu-style binary package archive into a
//! relocatable sysroot tree. The binary crate owns every component that
//! touches the network or the filesystem directly; the pure data
//! modeling and parsing (architectures, suites, dependency expressions,
//! the `Release`/`Packages` indices, and the resolver) lives in the
//! sibling `debian-archive` library crate.
//!
//! Module map, in pipeline order:
//! * [cli]: the `clap` command-line surface
//! * [request]: the immutable [`request::BootstrapRequest`] assembled
//!   once from parsed options
//! * [config]: shared presentation helpers (progress bar styling)
//! * [keyring]: trust-anchor provisioning
//! * [fetch]: the URL → local-path downloader
//! * [verify]: SHA-256 and detached OpenPGP signature verification
//! * [archive]: compression dispatch and `ar`/`tar` extraction
//! * [install]: per-package fetch/verify/unpack orchestration
//! * [relocate]: absolute-to-relative symlink rewriting
//! * [orchestrator]: ties the above into the full bootstrap pipeline

pub mod archive;
pub mod cli;
pub mod config;
mod error;
pub mod fetch;
pub mod install;
pub mod keyring;
pub mod orchestrator;
pub mod relocate;
pub mod request;
pub mod verify;

pub use error::Error;
