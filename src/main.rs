// Copyright 2025 Sebastian Ramacher
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use debian_archive::architecture::Architecture;
use debian_archive::suite::Suite;

use sysroot_builder::cli::Cli;
use sysroot_builder::orchestrator;
use sysroot_builder::request::BootstrapRequest;

fn build_request(cli: Cli) -> Result<BootstrapRequest> {
    let suite = Suite::try_from(cli.suite).context("invalid suite")?;
    let architecture = match cli.arch {
        Some(arch) => arch,
        None => Architecture::host().with_context(|| {
            format!(
                "could not determine host architecture '{}'; pass --arch explicitly",
                std::env::consts::ARCH
            )
        })?,
    };
    let scratch = cli.scratch.unwrap_or_else(|| scratch_default(&cli.target));

    Ok(BootstrapRequest {
        suite,
        architecture,
        target: cli.target,
        scratch,
        include: cli.include,
        exclude_required: cli.exclude_required,
        mirror: cli.mirror,
    })
}

/// Default scratch directory: a dotfile sibling of the target, e.g.
/// `target/../.target-scratch`.
fn scratch_default(target: &std::path::Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| format!(".{}-scratch", name.to_string_lossy()))
        .unwrap_or_else(|| ".sysroot-builder-scratch".to_owned());
    target
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .join(name)
}

async fn run(cli: Cli) -> Result<()> {
    let request = build_request(cli)?;

    if request.exclude_required && request.include.is_empty() {
        println!("[+] Nothing to install");
        return Ok(());
    }

    orchestrator::bootstrap(&request)
        .await
        .with_context(|| format!("bootstrapping {} failed", request.suite))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .verbosity(cli.verbose.log_level_filter() as usize)
        .init()
        .ok();

    if let Err(err) = run(cli).await {
        eprintln!("[!] {err:#}");
        std::process::exit(1);
    }
}
