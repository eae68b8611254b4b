//! Tag and member types, and the reserved color-tag label pattern.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;

/// Display priority for freshly created color tags, kept low so they never
/// visually dominate a member's other tags.
pub const LOW_PRIORITY: i32 = 1;

/// The group/server scope tags and members live in. Tags are never shared
/// across namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u64);

/// Store-assigned tag identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagId(pub Uuid);

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shared, namespace-scoped tag.
///
/// Color tags are the reserved subset whose label matches
/// [`ColorTagPattern`]; within one namespace at most one tag exists per
/// distinct hex code. Reference counts are never stored; the reaper
/// computes them from live membership on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub namespace: NamespaceId,
    /// Human-visible label, `<prefix><#rrggbb>` for color tags.
    pub label: String,
    pub color: Color,
    /// Display priority; color tags are created with [`LOW_PRIORITY`].
    pub priority: i32,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

/// A member's tag holdings as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub namespace: NamespaceId,
    pub tags: HashSet<TagId>,
}

/// The reserved color-tag naming pattern: an optional fixed prefix
/// followed by a 6-digit hex code.
#[derive(Debug, Clone)]
pub struct ColorTagPattern {
    prefix: String,
    regex: Arc<Regex>,
}

impl ColorTagPattern {
    #[expect(
        clippy::expect_used,
        reason = "the prefix is escaped, so the assembled pattern always compiles"
    )]
    pub fn new(prefix: &str) -> Self {
        let pattern = format!("^{}(#[0-9A-Fa-f]{{6}})$", regex::escape(prefix));
        let regex = Regex::new(&pattern).expect("escaped label pattern compiles");
        Self {
            prefix: prefix.to_string(),
            regex: Arc::new(regex),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The label a color tag carries for `color`.
    pub fn label_for(&self, color: Color) -> String {
        format!("{}{}", self.prefix, color)
    }

    /// Whether `label` names a color tag.
    pub fn matches(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }

    /// The lowercase hex code a color-tag label encodes, if any.
    pub fn key_for(&self, label: &str) -> Option<String> {
        self.regex
            .captures(label)
            .and_then(|caps| caps.get(1))
            .map(|code| code.as_str().to_ascii_lowercase())
    }
}

impl Default for ColorTagPattern {
    fn default() -> Self {
        Self::new("")
    }
}
