// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Translation of a pkg-config token stream into a [`BuildConfig`].

use tracing::debug;

use crate::{BuildConfig, Error, FlagCategory, Result};

/// What to do with a token whose prefix is not `-I`, `-L` or `-l`.
///
/// pkg-config routinely reports flags such as `-DMTAG_STATIC`, `-pthread` or
/// `-Wl,--as-needed` that have no slot in a [`BuildConfig`]; the default is
/// to drop them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedTokens {
    /// Drop the token and carry on.
    #[default]
    Ignore,
    /// Fail with [`Error::MalformedToken`].
    Reject,
}

/// Splits `output` on whitespace and translates the resulting tokens.
///
/// # Errors
///
/// Returns [`Error::MalformedToken`] for the first unrecognized token when
/// `policy` is [`UnrecognizedTokens::Reject`].
///
/// # Examples
///
/// ```
/// use mtag_build::{UnrecognizedTokens, translate};
///
/// let config = translate("-I/usr/include/mtag -L/usr/lib -lmtag", UnrecognizedTokens::Ignore)?;
/// assert_eq!(config.include_dirs(), ["/usr/include/mtag"]);
/// assert_eq!(config.library_dirs(), ["/usr/lib"]);
/// assert_eq!(config.libraries(), ["mtag"]);
/// # Ok::<(), mtag_build::Error>(())
/// ```
pub fn translate(output: &str, policy: UnrecognizedTokens) -> Result<BuildConfig> {
    translate_tokens(output.split_whitespace(), policy)
}

/// Translates already-split tokens.
///
/// Each recognized token contributes the text after its two-character prefix
/// to the matching category, in token order.
///
/// # Errors
///
/// See [`translate`].
pub fn translate_tokens<I, S>(tokens: I, policy: UnrecognizedTokens) -> Result<BuildConfig>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = BuildConfig::new();
    for token in tokens {
        let token = token.as_ref();
        match FlagCategory::split_token(token) {
            Some((category, value)) => config.push(category, value),
            None => match policy {
                UnrecognizedTokens::Ignore => debug!("Ignoring pkg-config token {token:?}"),
                UnrecognizedTokens::Reject => {
                    return Err(Error::MalformedToken {
                        token: token.to_string(),
                    });
                }
            },
        }
    }
    Ok(config)
}
