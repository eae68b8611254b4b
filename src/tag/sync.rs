//! Exclusive color-tag assignment.
//!
//! `assign` keeps the invariant that a member holds at most one color tag.
//! Two keyed lock maps carry the concurrency guarantees:
//! - a per-`(namespace, member)` lock serializes same-member assignments
//!   (last committed wins; different members never contend), and
//! - a per-`(namespace, code)` lock makes check-then-create race-free, so
//!   concurrent requests for the same new color converge on one tag.
//!
//! Lock entries are pruned once uncontended, keeping the maps bounded by
//! the number of in-flight operations.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::color::Color;

use super::store::{TagStore, TagStoreError};
use super::types::{ColorTagPattern, MemberId, NamespaceId, Tag, TagId, LOW_PRIORITY};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] TagStoreError),
}

struct KeyedLocks<K> {
    entries: StdMutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    fn new() -> Self {
        Self {
            entries: StdMutex::new(HashMap::new()),
        }
    }

    fn acquire(&self, key: &K) -> Arc<Mutex<()>> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the map entry once no task holds a handle to it. The caller's
    /// own handle must already be gone, so the map's clone is the last.
    fn prune(&self, key: &K) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            entries.remove(key);
        }
    }
}

/// Maintains each member's exclusive color tag within a namespace.
pub struct TagSynchronizer {
    store: Arc<dyn TagStore>,
    pattern: ColorTagPattern,
    member_locks: KeyedLocks<(NamespaceId, MemberId)>,
    creation_locks: KeyedLocks<(NamespaceId, String)>,
}

impl TagSynchronizer {
    pub fn new(store: Arc<dyn TagStore>, pattern: ColorTagPattern) -> Self {
        Self {
            store,
            pattern,
            member_locks: KeyedLocks::new(),
            creation_locks: KeyedLocks::new(),
        }
    }

    /// Ensure `member` holds exactly the tag for `color`, or no color tag
    /// at all when `color` is `None`.
    ///
    /// The target tag is looked up or created lazily; prior color tags are
    /// removed and the membership change lands as one atomic store update.
    /// Non-color tags are never touched, and a reset never deletes the tag
    /// from the namespace — other members may still hold it.
    ///
    /// Returns the effective tag, or `None` on reset. On error the
    /// member's state is unmodified; the membership write is the only
    /// mutating call.
    pub async fn assign(
        &self,
        namespace: NamespaceId,
        member: MemberId,
        color: Option<Color>,
    ) -> Result<Option<Tag>, SyncError> {
        let member_key = (namespace, member);
        let member_lock = self.member_locks.acquire(&member_key);
        let result = {
            let _serialized = member_lock.lock().await;
            self.assign_locked(namespace, member, color).await
        };
        drop(member_lock);
        self.member_locks.prune(&member_key);
        result
    }

    async fn assign_locked(
        &self,
        namespace: NamespaceId,
        member: MemberId,
        color: Option<Color>,
    ) -> Result<Option<Tag>, SyncError> {
        let held = self.store.member_tags(namespace, member).await?;
        let old: Vec<TagId> = held
            .iter()
            .filter(|tag| self.pattern.matches(&tag.label))
            .map(|tag| tag.id)
            .collect();

        let Some(color) = color else {
            if !old.is_empty() {
                self.store
                    .replace_member_tags(namespace, member, &old, &[])
                    .await?;
                info!(%namespace, %member, "removed color tags");
            }
            return Ok(None);
        };

        let target = self.tag_for_color(namespace, color).await?;

        if old.len() == 1 && old.first() == Some(&target.id) {
            debug!(%namespace, %member, label = %target.label, "already holds target tag");
            return Ok(Some(target));
        }

        let remove: Vec<TagId> = old.into_iter().filter(|id| *id != target.id).collect();
        self.store
            .replace_member_tags(namespace, member, &remove, &[target.id])
            .await?;
        info!(%namespace, %member, label = %target.label, "assigned color tag");
        Ok(Some(target))
    }

    /// Look up or create the namespace tag for `color`, serialized per
    /// `(namespace, code)` so concurrent callers cannot create duplicates.
    async fn tag_for_color(&self, namespace: NamespaceId, color: Color) -> Result<Tag, SyncError> {
        let code = color.hex();
        let key = (namespace, code.clone());
        let creation_lock = self.creation_locks.acquire(&key);
        let tag = {
            let _guard = creation_lock.lock().await;
            match self.store.get_tag_by_code(namespace, &code).await? {
                Some(existing) => existing,
                None => {
                    let label = self.pattern.label_for(color);
                    let created = self
                        .store
                        .create_tag(namespace, &label, color, LOW_PRIORITY)
                        .await?;
                    info!(%namespace, label = %created.label, "created color tag");
                    created
                }
            }
        };
        drop(creation_lock);
        self.creation_locks.prune(&key);
        Ok(tag)
    }
}
