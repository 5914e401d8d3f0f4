// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Querying pkg-config for a set of libraries.

use std::{ffi::OsString, path::PathBuf, time::Duration};

use tracing::{info, warn};

use crate::{
    BuildConfig, Error, Result, UnrecognizedTokens,
    query::{CommandRunner, QueryRunner},
    translate,
};

/// Environment variable that overrides the pkg-config program.
pub const PKG_CONFIG_ENV: &str = "PKG_CONFIG";

/// Program used when [`PKG_CONFIG_ENV`] is not set.
pub const DEFAULT_TOOL: &str = "pkg-config";

/// Upper bound on how long a query may run before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for discovering build flags through pkg-config.
///
/// # Examples
///
/// Typical use from a `build.rs`:
///
/// ```no_run
/// use mtag_build::Probe;
///
/// # fn main() -> Result<(), mtag_build::Error> {
/// Probe::new().cargo_metadata(true).probe(&["libmtag"])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Probe {
    tool: PathBuf,
    timeout: Duration,
    unrecognized: UnrecognizedTokens,
    statik: bool,
    cargo_metadata: bool,
    base: BuildConfig,
}

impl Default for Probe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe {
    /// Creates a probe using `$PKG_CONFIG` (or `pkg-config`), a 30 second
    /// timeout, and [`UnrecognizedTokens::Ignore`].
    pub fn new() -> Self {
        let tool = std::env::var_os(PKG_CONFIG_ENV)
            .filter(|tool| !tool.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL));
        Self {
            tool,
            timeout: DEFAULT_TIMEOUT,
            unrecognized: UnrecognizedTokens::default(),
            statik: false,
            cargo_metadata: false,
            base: BuildConfig::new(),
        }
    }

    /// Sets the pkg-config program to invoke.
    pub fn tool(&mut self, tool: impl Into<PathBuf>) -> &mut Self {
        self.tool = tool.into();
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Sets the policy for tokens that are not `-I`, `-L` or `-l` flags.
    pub fn unrecognized_tokens(&mut self, policy: UnrecognizedTokens) -> &mut Self {
        self.unrecognized = policy;
        self
    }

    /// Requests the flags for static linking (`--static`).
    pub fn statik(&mut self, statik: bool) -> &mut Self {
        self.statik = statik;
        self
    }

    /// Prints Cargo build-script directives after a successful probe.
    pub fn cargo_metadata(&mut self, cargo_metadata: bool) -> &mut Self {
        self.cargo_metadata = cargo_metadata;
        self
    }

    /// Starts every probe from `base`; discovered values are appended after
    /// the ones already in it.
    pub fn base(&mut self, base: BuildConfig) -> &mut Self {
        self.base = base;
        self
    }

    /// Arguments passed to the tool for `libraries`.
    pub fn query_args(&self, libraries: &[&str]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--libs".into(), "--cflags".into()];
        if self.statik {
            args.push("--static".into());
        }
        args.extend(libraries.iter().map(|library| OsString::from(*library)));
        args
    }

    /// Queries pkg-config for `libraries` and translates the answer.
    ///
    /// # Errors
    ///
    /// - [`Error::NoLibraries`] if `libraries` is empty.
    /// - [`Error::ToolingUnavailable`] if the tool cannot be run.
    /// - [`Error::UnknownLibrary`] if the tool rejects the query.
    /// - [`Error::MalformedToken`] under [`UnrecognizedTokens::Reject`].
    pub fn probe(&self, libraries: &[&str]) -> Result<BuildConfig> {
        self.probe_with(&CommandRunner, libraries)
    }

    /// Like [`Probe::probe`], running the query through `runner`.
    pub fn probe_with(&self, runner: &impl QueryRunner, libraries: &[&str]) -> Result<BuildConfig> {
        if libraries.is_empty() {
            return Err(Error::NoLibraries);
        }
        let joined = libraries.join(" ");

        let output = runner.run(&self.tool, &self.query_args(libraries), self.timeout)?;
        if output.code.is_none() {
            return Err(Error::tooling_unavailable(
                self.tool.display().to_string(),
                "terminated by a signal",
            ));
        }
        if !output.success {
            return Err(Error::UnknownLibrary {
                libraries: joined,
                message: output.stderr.trim().to_string(),
            });
        }
        if !output.stderr.trim().is_empty() {
            warn!("pkg-config reported for {joined}: {}", output.stderr.trim());
        }

        let discovered = translate(&output.stdout, self.unrecognized)?;
        info!(
            "Found {joined}: {} include dir(s), {} library dir(s), {} library name(s)",
            discovered.include_dirs().len(),
            discovered.library_dirs().len(),
            discovered.libraries().len()
        );
        let mut config = self.base.clone();
        config.merge(discovered);
        if self.cargo_metadata {
            config.emit_cargo_metadata();
        }
        Ok(config)
    }
}

/// Probes `libraries` with the default [`Probe`] configuration.
///
/// # Errors
///
/// See [`Probe::probe`].
pub fn pkgconfig(libraries: &[&str]) -> Result<BuildConfig> {
    Probe::new().probe(libraries)
}
