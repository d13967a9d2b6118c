// Copyright 2021 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # Parsing and resolution for Debian-style binary package archives
//!
//! This crate consists of the following modules:
//! * [architecture]: Debian architecture identifiers
//! * [suite]: suite identifiers and the keyring trust-anchor table
//! * [dependency]: `Depends`/`Pre-Depends`/`Provides` expression parsing
//! * [packages]: the `Packages` stanza index
//! * [release]: the `Release` index
//! * [resolver]: breadth-first dependency closure

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod architecture;
pub mod dependency;
mod error;
pub mod packages;
pub mod release;
pub mod resolver;
pub mod suite;

pub use error::Error;
