//! Request and response payloads for the dispatch-host handlers.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::swatch::SwatchRef;
use crate::tag::{MemberId, NamespaceId, Tag};

/// Resolve a color and render a preview; no state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// The resolved color as requested, before any normalization.
    pub color: Color,
    pub canonical_name: Option<String>,
    pub swatch: SwatchRef,
}

/// Resolve a color and assign it to the member as their exclusive
/// color tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetColorRequest {
    pub namespace: NamespaceId,
    pub member: MemberId,
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetColorResponse {
    /// What the member asked for.
    pub requested: Color,
    /// What they actually got after palette and luminance normalization.
    pub effective: Color,
    /// Whether normalization changed the color; hosts use this for the
    /// "closest color I can give you" phrasing.
    pub adjusted: bool,
    pub canonical_name: Option<String>,
    pub tag: Tag,
    /// Preview of the effective color.
    pub swatch: SwatchRef,
}

/// Remove the member's color tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequest {
    pub namespace: NamespaceId,
    pub member: MemberId,
}

/// Admin-only sweep of unreferenced color tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeRequest {
    pub namespace: NamespaceId,
    /// Whether the requesting member holds the administrator permission;
    /// the host evaluates this against its own permission model.
    pub requester_is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub deleted: usize,
}
