// Copyright 2021 Sebastian Ramacher
// SPDX-License-Identifier: LGPL-3.0-or-later

//! # Helpers to handle Debian architectures
//!
//! This module provides an enum for the architecture identifiers used
//! throughout a binary package archive (`Packages` stanzas, `Release`
//! files, `--arch` on the command line) together with the mirror
//! selection rule: `amd64`/`i386` are served from the primary archive,
//! every other architecture from the ports archive.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

/// A target architecture.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "&str")]
pub enum Architecture {
    /// The `all` architecture, for architecture-independent packages.
    All,
    /// The `amd64` architecture.
    Amd64,
    /// The `arm64` architecture.
    Arm64,
    /// The `armel` architecture.
    Armel,
    /// The `armhf` architecture.
    Armhf,
    /// The `i386` architecture.
    I386,
    /// The `mips64el` architecture.
    Mips64el,
    /// The `mipsel` architecture.
    Mipsel,
    /// The `ppc64el` architecture.
    Ppc64el,
    /// The `riscv64` architecture.
    Riscv64,
    /// The `s390x` architecture.
    S390x,
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Architecture::All => "all",
                Architecture::Amd64 => "amd64",
                Architecture::Arm64 => "arm64",
                Architecture::Armel => "armel",
                Architecture::Armhf => "armhf",
                Architecture::I386 => "i386",
                Architecture::Mips64el => "mips64el",
                Architecture::Mipsel => "mipsel",
                Architecture::Ppc64el => "ppc64el",
                Architecture::Riscv64 => "riscv64",
                Architecture::S390x => "s390x",
            }
        )
    }
}

impl TryFrom<&str> for Architecture {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "all" => Ok(Architecture::All),
            "amd64" => Ok(Architecture::Amd64),
            "arm64" => Ok(Architecture::Arm64),
            "armel" => Ok(Architecture::Armel),
            "armhf" => Ok(Architecture::Armhf),
            "i386" => Ok(Architecture::I386),
            "mips64el" => Ok(Architecture::Mips64el),
            "mipsel" => Ok(Architecture::Mipsel),
            "ppc64el" => Ok(Architecture::Ppc64el),
            "riscv64" => Ok(Architecture::Riscv64),
            "s390x" => Ok(Architecture::S390x),
            _ => Err(Error::InvalidArchitecture(value.to_owned())),
        }
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Architecture::try_from(s)
    }
}

impl Architecture {
    /// The architecture of the host running this process, as reported by
    /// `std::env::consts::ARCH`. Used as the CLI's `--arch` default.
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Architecture::Amd64),
            "aarch64" => Some(Architecture::Arm64),
            "arm" => Some(Architecture::Armhf),
            "x86" => Some(Architecture::I386),
            "mips64" => Some(Architecture::Mips64el),
            "mips" => Some(Architecture::Mipsel),
            "powerpc64" => Some(Architecture::Ppc64el),
            "riscv64" => Some(Architecture::Riscv64),
            "s390x" => Some(Architecture::S390x),
            _ => None,
        }
    }

    /// Whether packages for this architecture are served from the primary
    /// archive (`amd64`, `i386`) or from the ports archive (everything
    /// else).
    pub fn is_primary(&self) -> bool {
        matches!(self, Architecture::Amd64 | Architecture::I386)
    }
}

#[cfg(test)]
mod test {
    use super::Architecture;

    #[test]
    fn round_trip() {
        for arch in [
            Architecture::All,
            Architecture::Amd64,
            Architecture::Arm64,
            Architecture::Armel,
            Architecture::Armhf,
            Architecture::I386,
            Architecture::Mips64el,
            Architecture::Mipsel,
            Architecture::Ppc64el,
            Architecture::Riscv64,
            Architecture::S390x,
        ] {
            assert_eq!(Architecture::try_from(arch.to_string().as_str()).unwrap(), arch);
        }
    }

    #[test]
    fn primary_vs_ports() {
        assert!(Architecture::Amd64.is_primary());
        assert!(Architecture::I386.is_primary());
        assert!(!Architecture::Arm64.is_primary());
        assert!(!Architecture::Armhf.is_primary());
    }

    #[test]
    fn invalid() {
        assert!(Architecture::try_from("bogus").is_err());
    }
}
