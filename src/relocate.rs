// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Relocator
//!
//! After all packages are unpacked, rewrites every absolute symlink in the
//! sysroot to an equivalent relative one, so the tree stays usable when
//! mounted or referenced at an arbitrary prefix. Traversal is hand-rolled
//! recursion over `std::fs::read_dir` rather than a `walkdir` dependency,
//! since the only use is this single directory walk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Rewrite every absolute symlink under `sysroot` to a relative one.
pub fn relocate(sysroot: &Path) -> Result<(), Error> {
    walk(sysroot, sysroot)
}

fn walk(sysroot: &Path, dir: &Path) -> Result<(), Error> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            relocate_one(sysroot, &path)?;
        } else if file_type.is_dir() {
            walk(sysroot, &path)?;
        }
    }
    Ok(())
}

fn relocate_one(sysroot: &Path, link: &Path) -> Result<(), Error> {
    let target = fs::read_link(link)?;
    if !target.is_absolute() {
        return Ok(());
    }

    let link_dir = link.parent().unwrap_or(sysroot);
    let depth = link_dir
        .strip_prefix(sysroot)
        .unwrap_or(Path::new(""))
        .components()
        .count();

    let mut relative = PathBuf::new();
    for _ in 0..depth {
        relative.push("..");
    }
    relative.push(target.strip_prefix("/").unwrap_or(&target));

    fs::remove_file(link)?;
    #[cfg(unix)]
    std::os::unix::fs::symlink(&relative, link)?;
    #[cfg(not(unix))]
    std::os::windows::fs::symlink_file(&relative, link)?;

    Ok(())
}

#[cfg(all(test, unix))]
mod test {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn absolute_symlink_becomes_relative() {
        let tmp = tempfile::tempdir().unwrap();
        let sysroot = tmp.path();

        fs::create_dir_all(sysroot.join("bin")).unwrap();
        fs::create_dir_all(sysroot.join("usr/bin")).unwrap();
        fs::write(sysroot.join("bin/foo"), b"binary").unwrap();
        symlink("/bin/foo", sysroot.join("usr/bin/foo")).unwrap();

        relocate(sysroot).unwrap();

        let target = fs::read_link(sysroot.join("usr/bin/foo")).unwrap();
        assert_eq!(target, PathBuf::from("../../bin/foo"));
        // the relative link still resolves to the same file.
        assert!(sysroot.join("usr/bin/foo").exists());
    }

    #[test]
    fn already_relative_symlink_is_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let sysroot = tmp.path();

        fs::create_dir_all(sysroot.join("usr/bin")).unwrap();
        symlink("../../bin/foo", sysroot.join("usr/bin/foo")).unwrap();

        relocate(sysroot).unwrap();

        let target = fs::read_link(sysroot.join("usr/bin/foo")).unwrap();
        assert_eq!(target, PathBuf::from("../../bin/foo"));
    }

    #[test]
    fn non_symlinks_are_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let sysroot = tmp.path();

        fs::create_dir_all(sysroot.join("etc")).unwrap();
        fs::write(sysroot.join("etc/os-release"), b"NAME=test\n").unwrap();

        relocate(sysroot).unwrap();

        assert_eq!(
            fs::read_to_string(sysroot.join("etc/os-release")).unwrap(),
            "NAME=test\n"
        );
    }
}
