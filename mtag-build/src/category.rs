// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Flag categories and the prefix table that maps tokens onto them.

use serde::Serialize;

/// The kind of build setting a pkg-config token contributes to.
///
/// The declaration order is the order categories are iterated and
/// serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    /// Header search path, from `-I<dir>`.
    IncludeDirs,
    /// Linker search path, from `-L<dir>`.
    LibraryDirs,
    /// Library to link, from `-l<name>`.
    Libraries,
}

impl FlagCategory {
    /// Maps a two-character flag prefix to its category.
    ///
    /// Returns `None` for every other string, including prefixes of the
    /// wrong length. Matching is case-sensitive: `-l` and `-L` differ.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "-I" => Some(FlagCategory::IncludeDirs),
            "-L" => Some(FlagCategory::LibraryDirs),
            "-l" => Some(FlagCategory::Libraries),
            _ => None,
        }
    }

    /// Splits a token into its category and the value following the prefix.
    ///
    /// The value may be empty (a bare `-I` yields `""`). Tokens shorter than
    /// two bytes, or whose first two bytes do not form a known prefix, give
    /// `None`.
    pub fn split_token(token: &str) -> Option<(Self, &str)> {
        // Known prefixes are ASCII, so a non-boundary at 2 can never match.
        let prefix = token.get(..2)?;
        let category = Self::from_prefix(prefix)?;
        Some((category, &token[2..]))
    }

    /// The flag prefix this category is parsed from.
    pub fn prefix(self) -> &'static str {
        match self {
            FlagCategory::IncludeDirs => "-I",
            FlagCategory::LibraryDirs => "-L",
            FlagCategory::Libraries => "-l",
        }
    }

    /// The descriptor key for this category (`include_dirs`, `library_dirs`,
    /// `libraries`).
    pub fn as_str(self) -> &'static str {
        match self {
            FlagCategory::IncludeDirs => "include_dirs",
            FlagCategory::LibraryDirs => "library_dirs",
            FlagCategory::Libraries => "libraries",
        }
    }
}

impl std::fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
