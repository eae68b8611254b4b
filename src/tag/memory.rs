//! In-memory tag store.
//!
//! Reference backend for hosts without durable storage and for the test
//! suites. All namespace state sits behind one `RwLock`, which makes
//! `replace_member_tags` trivially atomic; creation is keyed by canonical
//! hex code, so a concurrent duplicate create converges on the existing
//! tag instead of forking the inventory.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::color::Color;
use crate::utils::now_iso;

use super::store::{TagStore, TagStoreError};
use super::types::{Member, MemberId, NamespaceId, Tag, TagId};

#[derive(Debug, Default)]
struct NamespaceState {
    tags: HashMap<TagId, Tag>,
    by_code: HashMap<String, TagId>,
    members: HashMap<MemberId, HashSet<TagId>>,
}

/// Tag store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    namespaces: RwLock<HashMap<NamespaceId, NamespaceState>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member with an empty tag set, creating the namespace on
    /// first use.
    pub async fn add_member(&self, namespace: NamespaceId, member: MemberId) {
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .entry(namespace)
            .or_default()
            .members
            .entry(member)
            .or_default();
    }

    /// Seed a non-color tag directly onto a member, bypassing the
    /// synchronizer. Test setup helper.
    pub async fn seed_tag(
        &self,
        namespace: NamespaceId,
        member: MemberId,
        label: &str,
        color: Color,
    ) -> Tag {
        let tag = Tag {
            id: TagId(Uuid::new_v4()),
            namespace,
            label: label.to_string(),
            color,
            priority: 0,
            created_at: now_iso(),
        };
        let mut namespaces = self.namespaces.write().await;
        let state = namespaces.entry(namespace).or_default();
        state.tags.insert(tag.id, tag.clone());
        state.members.entry(member).or_default().insert(tag.id);
        tag
    }
}

#[async_trait]
impl TagStore for MemoryTagStore {
    async fn get_tag_by_code(
        &self,
        namespace: NamespaceId,
        code: &str,
    ) -> Result<Option<Tag>, TagStoreError> {
        let namespaces = self.namespaces.read().await;
        let state = namespaces
            .get(&namespace)
            .ok_or(TagStoreError::NamespaceNotFound(namespace))?;
        Ok(state
            .by_code
            .get(&code.to_ascii_lowercase())
            .and_then(|id| state.tags.get(id))
            .cloned())
    }

    async fn create_tag(
        &self,
        namespace: NamespaceId,
        label: &str,
        color: Color,
        priority: i32,
    ) -> Result<Tag, TagStoreError> {
        let code = color.hex();
        let mut namespaces = self.namespaces.write().await;
        let state = namespaces.entry(namespace).or_default();

        // Create-if-absent: a duplicate create yields the existing tag.
        if let Some(existing) = state.by_code.get(&code).and_then(|id| state.tags.get(id)) {
            return Ok(existing.clone());
        }

        let tag = Tag {
            id: TagId(Uuid::new_v4()),
            namespace,
            label: label.to_string(),
            color,
            priority,
            created_at: now_iso(),
        };
        state.by_code.insert(code, tag.id);
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn replace_member_tags(
        &self,
        namespace: NamespaceId,
        member: MemberId,
        remove: &[TagId],
        add: &[TagId],
    ) -> Result<(), TagStoreError> {
        let mut namespaces = self.namespaces.write().await;
        let state = namespaces
            .get_mut(&namespace)
            .ok_or(TagStoreError::NamespaceNotFound(namespace))?;

        for id in add {
            if !state.tags.contains_key(id) {
                return Err(TagStoreError::TagNotFound(*id));
            }
        }

        let tags = state
            .members
            .get_mut(&member)
            .ok_or(TagStoreError::MemberNotFound { namespace, member })?;

        for id in remove {
            tags.remove(id);
        }
        for id in add {
            tags.insert(*id);
        }
        Ok(())
    }

    async fn delete_tag(&self, namespace: NamespaceId, tag: TagId) -> Result<(), TagStoreError> {
        let mut namespaces = self.namespaces.write().await;
        let state = namespaces
            .get_mut(&namespace)
            .ok_or(TagStoreError::NamespaceNotFound(namespace))?;

        state
            .tags
            .remove(&tag)
            .ok_or(TagStoreError::TagNotFound(tag))?;
        state.by_code.retain(|_, id| *id != tag);
        for tags in state.members.values_mut() {
            tags.remove(&tag);
        }
        Ok(())
    }

    async fn list_tags(&self, namespace: NamespaceId) -> Result<Vec<Tag>, TagStoreError> {
        let namespaces = self.namespaces.read().await;
        let state = namespaces
            .get(&namespace)
            .ok_or(TagStoreError::NamespaceNotFound(namespace))?;
        Ok(state.tags.values().cloned().collect())
    }

    async fn list_members(&self, namespace: NamespaceId) -> Result<Vec<Member>, TagStoreError> {
        let namespaces = self.namespaces.read().await;
        let state = namespaces
            .get(&namespace)
            .ok_or(TagStoreError::NamespaceNotFound(namespace))?;
        Ok(state
            .members
            .iter()
            .map(|(id, tags)| Member {
                id: *id,
                namespace,
                tags: tags.clone(),
            })
            .collect())
    }

    async fn member_tags(
        &self,
        namespace: NamespaceId,
        member: MemberId,
    ) -> Result<Vec<Tag>, TagStoreError> {
        let namespaces = self.namespaces.read().await;
        let state = namespaces
            .get(&namespace)
            .ok_or(TagStoreError::NamespaceNotFound(namespace))?;
        let tags = state
            .members
            .get(&member)
            .ok_or(TagStoreError::MemberNotFound { namespace, member })?;
        Ok(tags
            .iter()
            .filter_map(|id| state.tags.get(id))
            .cloned()
            .collect())
    }
}
