// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for flag discovery.
//!
//! Every failure aborts the probe. There is no degraded mode: a build either
//! gets a complete [`crate::BuildConfig`] or one of these errors.

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while discovering build flags.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The package-config tool could not be started, timed out, or was
    /// terminated before reporting an exit status.
    #[error("Package-config tool \"{tool}\" is unavailable: {reason}")]
    ToolingUnavailable {
        /// Program that was invoked.
        tool: String,
        /// What went wrong while invoking it.
        reason: String,
    },

    /// A token in the tool output has no recognized prefix and the probe was
    /// configured to reject such tokens.
    #[error("Malformed token \"{token}\": expected an -I, -L or -l flag")]
    MalformedToken {
        /// The offending token, verbatim.
        token: String,
    },

    /// The tool ran but refused the query, typically because one of the
    /// libraries is not registered.
    ///
    /// `message` carries the diagnostic text the tool wrote to stderr.
    #[error("Unknown library {libraries}: {message}")]
    UnknownLibrary {
        /// The space-joined library names that were queried.
        libraries: String,
        message: String,
    },

    /// A probe was requested for an empty set of libraries.
    #[error("No libraries given to probe")]
    NoLibraries,

    /// Failed to render a build configuration as JSON.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn tooling_unavailable(tool: impl Into<String>, reason: impl ToString) -> Self {
        Error::ToolingUnavailable {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}
