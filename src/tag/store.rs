//! Tag persistence seam.
//!
//! Durable storage of tags, membership, and permissions belongs to an
//! external store; the engine drives it through this trait. Implementors
//! must make `replace_member_tags` a single atomic membership update — no
//! observer may catch a member holding zero or two color tags mid-swap.

use async_trait::async_trait;
use thiserror::Error;

use crate::color::Color;

use super::types::{Member, MemberId, NamespaceId, Tag, TagId};

#[derive(Debug, Error)]
pub enum TagStoreError {
    #[error("namespace {0} not found")]
    NamespaceNotFound(NamespaceId),

    #[error("member {member} not found in namespace {namespace}")]
    MemberNotFound {
        namespace: NamespaceId,
        member: MemberId,
    },

    #[error("tag {0} not found")]
    TagNotFound(TagId),

    #[error("tag store backend failure: {0}")]
    Backend(String),
}

/// Namespace-scoped tag storage and membership.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Look up the namespace tag encoding the canonical lowercase hex
    /// `code`, if one exists.
    async fn get_tag_by_code(
        &self,
        namespace: NamespaceId,
        code: &str,
    ) -> Result<Option<Tag>, TagStoreError>;

    /// Create a tag. Callers serialize concurrent creations per code; a
    /// store with native create-if-absent semantics may additionally
    /// return the existing tag instead of duplicating it.
    async fn create_tag(
        &self,
        namespace: NamespaceId,
        label: &str,
        color: Color,
        priority: i32,
    ) -> Result<Tag, TagStoreError>;

    /// Atomically update one member's tag set: drop every id in `remove`,
    /// then add every id in `add`. Ids absent from the member's set are
    /// ignored on removal.
    async fn replace_member_tags(
        &self,
        namespace: NamespaceId,
        member: MemberId,
        remove: &[TagId],
        add: &[TagId],
    ) -> Result<(), TagStoreError>;

    /// Delete a tag from the namespace (and from any members still
    /// holding it).
    async fn delete_tag(&self, namespace: NamespaceId, tag: TagId) -> Result<(), TagStoreError>;

    /// Every tag in the namespace.
    async fn list_tags(&self, namespace: NamespaceId) -> Result<Vec<Tag>, TagStoreError>;

    /// Every current member with their tag sets.
    async fn list_members(&self, namespace: NamespaceId) -> Result<Vec<Member>, TagStoreError>;

    /// The tag objects one member currently holds.
    async fn member_tags(
        &self,
        namespace: NamespaceId,
        member: MemberId,
    ) -> Result<Vec<Tag>, TagStoreError>;
}
