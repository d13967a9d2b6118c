// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Archive codec
//!
//! Compression dispatch by filename extension, `ar` extraction (dpkg's
//! `.deb` outer container) and `tar` extraction (its `data.tar.*` and
//! `control.tar.*` members).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Decompress `path` in place into a sibling file with the compression
/// suffix removed, dispatching on the suffix: `.zst` zstd, `.xz` xz,
/// `.bz2` bzip2, `.gz` gzip. Returns the path of the decompressed file.
/// An unrecognized suffix is a fatal error.
pub fn decompress(path: &Path) -> Result<PathBuf, Error> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    let dest = path.with_extension("");
    let input = File::open(path)?;
    let mut output = File::create(&dest)?;

    match extension {
        "zst" => {
            let mut decoder = zstd::Decoder::new(input)?;
            std::io::copy(&mut decoder, &mut output)?;
        }
        "xz" => {
            let mut decoder = xz2::read::XzDecoder::new(BufReader::new(input));
            std::io::copy(&mut decoder, &mut output)?;
        }
        "bz2" => {
            let mut decoder = bzip2::read::BzDecoder::new(BufReader::new(input));
            std::io::copy(&mut decoder, &mut output)?;
        }
        "gz" => {
            let mut decoder = flate2::read::GzDecoder::new(BufReader::new(input));
            std::io::copy(&mut decoder, &mut output)?;
        }
        other => return Err(Error::UnsupportedCompression(other.to_owned())),
    }

    Ok(dest)
}

/// Extract an `ar` archive (a `.deb`'s outer container) into `dest`,
/// creating it if needed. Tolerates the trailing-slash member names dpkg
/// writes (the `ar` crate normalizes both the System V and BSD variants).
pub fn extract_ar(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, Error> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut reader = ar::Archive::new(file);
    let mut members = Vec::new();

    while let Some(entry) = reader.next_entry() {
        let mut entry = entry?;
        let name = String::from_utf8_lossy(entry.header().identifier())
            .trim_end_matches('/')
            .to_owned();
        let member_path = dest.join(&name);
        let mut out = File::create(&member_path)?;
        std::io::copy(&mut entry, &mut out)?;
        members.push(member_path);
    }

    Ok(members)
}

/// Extract a tar stream into `dest`, preserving file modes and symbolic
/// links verbatim (relocation is a separate, later pass — see
/// `relocate`). Unpacked entry-by-entry rather than via the single-shot
/// `Archive::unpack`, so that a failure to restore an entry's recorded
/// owner/group — the expected outcome when running unprivileged, since
/// `.deb` data tarballs are almost always owned by `root:root` — is
/// downgraded to best-effort instead of aborting the whole extraction.
pub fn extract_tar(archive: &Path, dest: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut archive = tar::Archive::new(file);
    archive.set_preserve_permissions(true);
    archive.set_preserve_ownerships(true);
    archive.set_unpack_xattrs(false);

    for entry in archive.entries()? {
        let mut entry = entry?;
        if let Err(err) = entry.unpack_in(dest) {
            if err.kind() != std::io::ErrorKind::PermissionDenied {
                return Err(err.into());
            }
        }
    }
    Ok(())
}

/// Find the single `data.tar.*` member among `members`: exactly one
/// such member is expected inside a well-formed `.deb`.
pub fn find_data_tar<'a>(members: &'a [PathBuf]) -> Option<&'a Path> {
    members.iter().find_map(|member| {
        let name = member.file_name()?.to_str()?;
        name.starts_with("data.tar").then_some(member.as_path())
    })
}

/// Read an entire file into memory. Used by the verifier, which needs
/// the whole byte stream to compute a digest or check a signature.
pub fn read_whole(path: &Path) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    File::open(path)?.read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn unknown_extension_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Packages.lz4");
        std::fs::write(&path, b"irrelevant").unwrap();
        assert!(matches!(
            decompress(&path),
            Err(Error::UnsupportedCompression(ext)) if ext == "lz4"
        ));
    }

    #[test]
    fn find_data_tar_picks_the_data_member() {
        let members = vec![
            PathBuf::from("/tmp/debian-binary"),
            PathBuf::from("/tmp/control.tar.xz"),
            PathBuf::from("/tmp/data.tar.zst"),
        ];
        assert_eq!(
            find_data_tar(&members),
            Some(Path::new("/tmp/data.tar.zst"))
        );
    }

    #[test]
    fn find_data_tar_none_when_absent() {
        let members = vec![PathBuf::from("/tmp/debian-binary")];
        assert_eq!(find_data_tar(&members), None);
    }

    /// Builds a `.deb`-shaped `ar` archive with a single gzip-compressed
    /// `data.tar.gz` member, round-trips it through `extract_ar` →
    /// `find_data_tar` → `decompress` → `extract_tar`, and checks the
    /// extracted file lands at the same relative path with the same
    /// content. Exercises the full §4.A pipeline end to end rather than
    /// each step in isolation.
    #[test]
    fn deb_shaped_archive_round_trips_into_a_tree() {
        let mut tar_bytes = Vec::new();
        {
            let mut builder = tar::Builder::new(&mut tar_bytes);
            let mut header = tar::Header::new_gnu();
            let content = b"#!/bin/sh\necho hi\n";
            header.set_path("usr/bin/hello").unwrap();
            header.set_size(content.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append(&header, &content[..]).unwrap();
            builder.finish().unwrap();
        }

        let mut gz_bytes = Vec::new();
        {
            let mut encoder =
                flate2::write::GzEncoder::new(&mut gz_bytes, flate2::Compression::default());
            encoder.write_all(&tar_bytes).unwrap();
            encoder.finish().unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let deb_path = dir.path().join("hello_1.0_amd64.deb");
        {
            let mut ar_builder = ar::Builder::new(File::create(&deb_path).unwrap());
            let header = ar::Header::new(b"data.tar.gz".to_vec(), gz_bytes.len() as u64);
            ar_builder.append(&header, gz_bytes.as_slice()).unwrap();
        }

        let ar_dest = dir.path().join("ar-out");
        let members = extract_ar(&deb_path, &ar_dest).unwrap();
        let data_tar = find_data_tar(&members).unwrap();
        let data_tar = decompress(data_tar).unwrap();

        let tree = dir.path().join("tree");
        extract_tar(&data_tar, &tree).unwrap();

        let extracted = std::fs::read_to_string(tree.join("usr/bin/hello")).unwrap();
        assert_eq!(extracted, "#!/bin/sh\necho hi\n");
    }
}
