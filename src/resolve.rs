//! Free-form color resolution.
//!
//! Turns raw user text into a single color, a disambiguation list, or an
//! unknown-color outcome. Hex codes take a strict fast path that bypasses
//! the name service entirely, even when the text collides with a
//! dictionary name.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::color::{Color, ColorError};
use crate::names::{NameService, NameServiceError};

/// How many candidates an ambiguous resolution surfaces to the user.
pub const SUGGESTION_LIMIT: usize = 10;

#[expect(
    clippy::expect_used,
    reason = "regex literals are compile-time constants and cannot fail"
)]
static HEX_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex literal")
});

#[expect(
    clippy::expect_used,
    reason = "regex literals are compile-time constants and cannot fail"
)]
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[*_`]").expect("valid regex literal"));

#[expect(
    clippy::expect_used,
    reason = "regex literals are compile-time constants and cannot fail"
)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\n]+").expect("valid regex literal"));

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Names(#[from] NameServiceError),
}

/// Outcome of resolving one color description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        color: Color,
        canonical: Option<String>,
    },
    Ambiguous {
        candidates: Vec<String>,
    },
    Unknown,
}

/// Strip message-formatting artifacts from user input.
///
/// Removes emphasis punctuation (`*`, `_`, backtick) and collapses
/// whitespace runs to single spaces. Nothing else is altered.
pub fn sanitize(input: &str) -> String {
    let stripped = MARKUP.replace_all(input, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").into_owned()
}

/// The suggestion shortlist for an ambiguous resolution: up to `limit`
/// candidates sorted by `(length, lexical)`, plus the count left over.
pub fn suggestions(candidates: &[String], limit: usize) -> (Vec<String>, usize) {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    let remaining = sorted.len().saturating_sub(limit);
    sorted.truncate(limit);
    (sorted, remaining)
}

/// Resolves color descriptions against the hex codec and a name service.
pub struct ColorResolver {
    names: Arc<dyn NameService>,
}

impl ColorResolver {
    pub fn new(names: Arc<dyn NameService>) -> Self {
        Self { names }
    }

    /// Resolve `input` to a color, a candidate list, or unknown.
    ///
    /// Lookup order: strict hex gate, exact name, then fuzzy candidates
    /// (a single candidate is promoted to an exact match). Callers are
    /// expected to pass [`sanitize`]d input.
    pub async fn resolve(&self, input: &str) -> Result<Resolution, ResolveError> {
        if HEX_INPUT.is_match(input) {
            return Ok(Resolution::Resolved {
                color: Color::parse_hex(input)?,
                canonical: None,
            });
        }

        if let Some(hit) = self.names.find_exact(input).await? {
            debug!(name = %hit.canonical, code = %hit.code, "exact name match");
            return Ok(Resolution::Resolved {
                color: Color::parse_hex(&hit.code)?,
                canonical: Some(hit.canonical),
            });
        }

        let candidates = self.names.disambiguate(input).await?;
        match candidates.as_slice() {
            [] => Ok(Resolution::Unknown),
            [only] => {
                let hit = self
                    .names
                    .find_exact(only)
                    .await?
                    .ok_or_else(|| NameServiceError::MissingEntry(only.clone()))?;
                debug!(name = %hit.canonical, "single fuzzy candidate promoted");
                Ok(Resolution::Resolved {
                    color: Color::parse_hex(&hit.code)?,
                    canonical: Some(hit.canonical),
                })
            }
            _ => Ok(Resolution::Ambiguous { candidates }),
        }
    }
}
