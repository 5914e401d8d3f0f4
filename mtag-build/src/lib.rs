// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! # mtag-build
//!
//! Build-time discovery of the compiler and linker flags needed to build
//! against the native `libmtag` library.
//!
//! ## Overview
//!
//! The crate asks the system's pkg-config registry for
//! `--libs --cflags <libraries>` and sorts the answer into a [`BuildConfig`]:
//!
//! - `-I<dir>` → include directories
//! - `-L<dir>` → library search directories
//! - `-l<name>` → libraries to link
//!
//! Anything else is handled according to [`UnrecognizedTokens`]. Value order
//! within each list follows the tool's output and duplicates are kept.
//!
//! ```text
//! Probe ──► QueryRunner ──► pkg-config
//!   │            │
//!   │       QueryOutput (status, stdout, stderr)
//!   │            │
//!   └──────► translate ──► BuildConfig ──► cargo directives / JSON / flags
//! ```
//!
//! ## Examples
//!
//! ### From a build script
//!
//! ```no_run
//! fn main() -> Result<(), mtag_build::Error> {
//!     mtag_build::Probe::new()
//!         .cargo_metadata(true)
//!         .probe(&["libmtag"])?;
//!     Ok(())
//! }
//! ```
//!
//! ### Translating captured output
//!
//! ```
//! use mtag_build::{UnrecognizedTokens, translate};
//!
//! let config = translate("-lmtag -lmtag", UnrecognizedTokens::Ignore)?;
//! assert_eq!(config.libraries(), ["mtag", "mtag"]);
//! # Ok::<(), mtag_build::Error>(())
//! ```
//!
//! ## Failure handling
//!
//! Every failure is returned as an [`Error`] and is meant to abort the build.
//! A missing or hung tool is [`Error::ToolingUnavailable`]; a query the tool
//! refuses (usually an unregistered library) is [`Error::UnknownLibrary`],
//! carrying the tool's own diagnostic rather than parsing it as flags.

mod build_config;
mod category;
mod error;
mod probe;
mod translate;

pub mod query;

pub use build_config::BuildConfig;
pub use category::FlagCategory;
pub use error::{Error, Result};
pub use probe::{DEFAULT_TIMEOUT, DEFAULT_TOOL, PKG_CONFIG_ENV, Probe, pkgconfig};
pub use query::{CommandRunner, QueryOutput, QueryRunner};
pub use translate::{UnrecognizedTokens, translate, translate_tokens};
