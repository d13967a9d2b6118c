// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

//! # Fetcher
//!
//! Downloads a URL into the scratch directory, preserving host and path
//! layout. No conditional-GET caching: every run re-fetches and
//! re-verifies from scratch.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::ProgressBar;
use log::debug;
use reqwest::{Client, Url};
use tokio::io::AsyncWriteExt;

use crate::config::default_progress_style;
use crate::error::Error;

const PROGRESS_TEMPLATE: &str =
    "{msg}: [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})";

/// Thin wrapper around a [`reqwest::Client`] that lands downloads under a
/// scratch root, mirroring `host/path` so repeated fetches from the same
/// mirror don't collide.
pub struct Fetcher {
    client: Client,
    scratch_root: PathBuf,
}

impl Fetcher {
    /// Create a fetcher rooted at `scratch_root`.
    pub fn new(scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            scratch_root: scratch_root.into(),
        }
    }

    /// Download `url`, following redirects, failing on any non-success
    /// HTTP status. Parent directories under the scratch root are
    /// created on demand. Returns the local path the file was written to.
    pub async fn fetch(&self, url: &str) -> Result<PathBuf, Error> {
        let parsed = Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_owned()))?;
        let host = parsed.host_str().unwrap_or("unknown-host").to_owned();
        let local_path = self
            .scratch_root
            .join(&host)
            .join(parsed.path().trim_start_matches('/'));
        debug!("fetching {url} -> {}", local_path.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_owned(),
                source,
            })?
            .error_for_status()
            .map_err(|source| Error::Fetch {
                url: url.to_owned(),
                source,
            })?;

        let total_size = response.content_length().unwrap_or(0);
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            default_progress_style()
                .template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| default_progress_style()),
        );
        pb.set_message(format!("fetching {url}"));

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::File::create(&local_path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| Error::Fetch {
                url: url.to_owned(),
                source,
            })?;
            file.write_all(&chunk).await?;
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        Ok(local_path)
    }

    /// Root directory fetched files are written under.
    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }
}
