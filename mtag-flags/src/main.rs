// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Prints the build configuration pkg-config reports for libmtag.
//!
//! ```text
//! $ mtag-flags --format cargo
//! cargo:rustc-link-search=native=/usr/lib
//! cargo:rustc-link-lib=mtag
//! cargo:include=/usr/include/mtag
//! ```
//!
//! Logs go to stderr and are filtered through `RUST_LOG`.

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, ValueEnum};
use mtag_build::{BuildConfig, DEFAULT_TOOL, PKG_CONFIG_ENV, Probe, UnrecognizedTokens};
use tracing::error;

/// How the discovered configuration is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON object with `include_dirs`, `library_dirs` and `libraries`.
    Json,
    /// Cargo build-script directives.
    Cargo,
    /// A single compiler/linker flag line.
    Flags,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Libraries to query.
    #[arg(default_value = "libmtag")]
    libraries: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Fail on flags other than -I, -L and -l instead of dropping them.
    #[arg(long)]
    strict: bool,

    /// Ask for the flags needed to link statically.
    #[arg(long = "static")]
    statik: bool,

    /// The pkg-config program to run.
    #[arg(long = "pkg-config", env = PKG_CONFIG_ENV, default_value = DEFAULT_TOOL)]
    pkg_config: PathBuf,

    /// Seconds to wait for pkg-config before giving up.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

fn render(config: &BuildConfig, format: Format) -> mtag_build::Result<String> {
    Ok(match format {
        Format::Json => config.to_json_pretty()?,
        Format::Cargo => config.cargo_directives().join("\n"),
        Format::Flags => config.to_string(),
    })
}

fn run(opts: &Opts) -> mtag_build::Result<String> {
    let policy = if opts.strict {
        UnrecognizedTokens::Reject
    } else {
        UnrecognizedTokens::Ignore
    };
    let libraries: Vec<&str> = opts.libraries.iter().map(String::as_str).collect();

    let config = Probe::new()
        .tool(&opts.pkg_config)
        .timeout(Duration::from_secs(opts.timeout))
        .unrecognized_tokens(policy)
        .statik(opts.statik)
        .probe(&libraries)?;
    render(&config, opts.format)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    match run(&opts) {
        Ok(rendered) => {
            if !rendered.is_empty() {
                println!("{rendered}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
