//! Garbage collection of unreferenced color tags.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::store::TagStore;
use super::sync::SyncError;
use super::types::{ColorTagPattern, NamespaceId, TagId};

/// Sweeps a namespace for color tags no member holds.
///
/// The sweep is best-effort, not transactional: it snapshots membership,
/// then deletes. A tag created by a concurrent assignment after the
/// snapshot may be swept too; the synchronizer recreates it lazily on the
/// next request, so no member-visible invariant breaks.
pub struct TagReaper {
    store: Arc<dyn TagStore>,
    pattern: ColorTagPattern,
}

impl TagReaper {
    pub fn new(store: Arc<dyn TagStore>, pattern: ColorTagPattern) -> Self {
        Self { store, pattern }
    }

    /// Delete every color tag held by no current member; returns how many
    /// were removed.
    pub async fn purge(&self, namespace: NamespaceId) -> Result<usize, SyncError> {
        let tags = self.store.list_tags(namespace).await?;
        let members = self.store.list_members(namespace).await?;
        let held: HashSet<TagId> = members.into_iter().flat_map(|m| m.tags).collect();

        let mut deleted = 0;
        for tag in tags {
            if !self.pattern.matches(&tag.label) || held.contains(&tag.id) {
                continue;
            }
            self.store.delete_tag(namespace, tag.id).await?;
            debug!(%namespace, label = %tag.label, "reaped unused color tag");
            deleted += 1;
        }

        if deleted > 0 {
            info!(%namespace, deleted, "purged unused color tags");
        }
        Ok(deleted)
    }
}
