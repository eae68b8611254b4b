//! Color-tag inventory management.
//!
//! Tags are shared, namespace-scoped labels encoding a hex color; a member
//! holds at most one of them at a time. This module provides:
//! - the tag and member types plus the reserved label pattern ([`types`])
//! - the persistence seam ([`store`]) and an in-memory backend ([`memory`])
//! - exclusive assignment with lazy tag creation ([`sync`])
//! - garbage collection of unreferenced tags ([`reaper`])

mod memory;
mod reaper;
mod store;
mod sync;
mod types;

pub use memory::MemoryTagStore;
pub use reaper::TagReaper;
pub use store::{TagStore, TagStoreError};
pub use sync::{SyncError, TagSynchronizer};
pub use types::{ColorTagPattern, Member, MemberId, NamespaceId, Tag, TagId, LOW_PRIORITY};
