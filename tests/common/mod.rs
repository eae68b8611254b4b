//! Common test utilities

use std::sync::Arc;

use huetag::{
    ColorService, EngineConfig, KeyedSwatchRenderer, MemberId, MemoryTagStore, NamespaceId,
    StaticNameService,
};

pub const NS: NamespaceId = NamespaceId(1);

/// A small dictionary with enough shape for exact, fuzzy, and ambiguous
/// lookups.
#[allow(dead_code)] // Not every test binary exercises the dictionary
pub fn test_dictionary() -> StaticNameService {
    StaticNameService::new(&[
        ("violet", "#8f00ff"),
        ("red violet", "#c71585"),
        ("dark violet", "#9400d3"),
        ("tangerine yellow", "#ffcc00"),
        ("sea green", "#2e8b57"),
    ])
}

/// Build a service over a fresh in-memory store with the given members
/// registered.
#[allow(dead_code)] // Not every test binary exercises the service
pub async fn service_with_members(
    config: EngineConfig,
    members: &[MemberId],
) -> (ColorService, Arc<MemoryTagStore>) {
    let store = Arc::new(MemoryTagStore::new());
    for member in members {
        store.add_member(NS, *member).await;
    }
    let service = ColorService::new(
        store.clone(),
        Arc::new(test_dictionary()),
        Arc::new(KeyedSwatchRenderer),
        &config,
    );
    (service, store)
}
