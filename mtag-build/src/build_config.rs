// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! The categorized build settings produced by a probe.
//!
//! A [`BuildConfig`] is the hand-off point to whatever compiles and links the
//! native extension: a Cargo build script ([`BuildConfig::emit_cargo_metadata`]),
//! an external packaging tool reading a JSON descriptor
//! ([`BuildConfig::to_json_pretty`]), or a compiler command line
//! (the [`Display`](std::fmt::Display) impl).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{FlagCategory, Result};

/// Include directories, library directories and libraries discovered for a
/// set of native libraries.
///
/// A category is only present once a value has been pushed to it, so an
/// empty configuration has no categories at all. Within a category, values
/// keep the order they were pushed in and duplicates are kept: link order
/// is significant to most linkers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildConfig {
    entries: BTreeMap<FlagCategory, Vec<String>>,
}

impl BuildConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to `category`, creating the category on first use.
    pub fn push(&mut self, category: FlagCategory, value: impl Into<String>) {
        self.entries.entry(category).or_default().push(value.into());
    }

    /// Values recorded for `category`, or `None` if nothing was pushed to it.
    pub fn get(&self, category: FlagCategory) -> Option<&[String]> {
        self.entries.get(&category).map(Vec::as_slice)
    }

    pub fn include_dirs(&self) -> &[String] {
        self.get(FlagCategory::IncludeDirs).unwrap_or_default()
    }

    pub fn library_dirs(&self) -> &[String] {
        self.get(FlagCategory::LibraryDirs).unwrap_or_default()
    }

    pub fn libraries(&self) -> &[String] {
        self.get(FlagCategory::Libraries).unwrap_or_default()
    }

    /// Returns `true` if no category is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the present categories in [`FlagCategory`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FlagCategory, &[String])> {
        self.entries
            .iter()
            .map(|(category, values)| (*category, values.as_slice()))
    }

    /// Appends every value of `other` after the values already present.
    pub fn merge(&mut self, other: BuildConfig) {
        for (category, values) in other.entries {
            self.entries.entry(category).or_default().extend(values);
        }
    }

    /// Renders the configuration as Cargo build-script directives.
    ///
    /// Link search paths come first, then the libraries, then the include
    /// directories (exported as `cargo:include=` so dependent crates can find
    /// the headers through `DEP_<name>_INCLUDE`).
    pub fn cargo_directives(&self) -> Vec<String> {
        let search = self
            .library_dirs()
            .iter()
            .map(|dir| format!("cargo:rustc-link-search=native={dir}"));
        let libs = self
            .libraries()
            .iter()
            .map(|lib| format!("cargo:rustc-link-lib={lib}"));
        let includes = self
            .include_dirs()
            .iter()
            .map(|dir| format!("cargo:include={dir}"));
        search.chain(libs).chain(includes).collect()
    }

    /// Prints [`Self::cargo_directives`] to stdout, for use from `build.rs`.
    pub fn emit_cargo_metadata(&self) {
        for directive in self.cargo_directives() {
            println!("{directive}");
        }
    }

    /// Serializes the configuration as a JSON build descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Formats the configuration back into a flag line such as
/// `-I/usr/include/mtag -L/usr/lib -lmtag`.
///
/// Values are not quoted, so values containing whitespace do not survive a
/// trip back through [`crate::translate`].
impl std::fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (category, values) in self.iter() {
            for value in values {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{}{}", category.prefix(), value)?;
            }
        }
        Ok(())
    }
}
