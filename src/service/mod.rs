//! Request handlers exposed to the command-dispatch host.
//!
//! Four operations: preview (read-only), set-color (the primary flow),
//! reset, and the admin-only purge; plus a census of the color-tag
//! inventory. Handlers are synchronous request→response calls — retries,
//! timeouts, and user-facing phrasing belong to the host.

mod error;
mod types;

pub use error::{ServiceError, StructuredFailure};
pub use types::{
    PreviewRequest, PreviewResponse, PurgeRequest, PurgeResponse, ResetRequest, SetColorRequest,
    SetColorResponse,
};

use std::sync::Arc;

use tracing::{debug, info};

use crate::color::{clamp_luminance, quantize, Color, LuminanceBand};
use crate::config::EngineConfig;
use crate::names::NameService;
use crate::resolve::{sanitize, ColorResolver, Resolution};
use crate::swatch::SwatchRenderer;
use crate::tag::{
    ColorTagPattern, NamespaceId, TagReaper, TagStore, TagStoreError, TagSynchronizer,
};

/// The engine facade the dispatch host drives.
pub struct ColorService {
    resolver: ColorResolver,
    synchronizer: TagSynchronizer,
    reaper: TagReaper,
    store: Arc<dyn TagStore>,
    renderer: Arc<dyn SwatchRenderer>,
    band: LuminanceBand,
    limit_palette: bool,
    pattern: ColorTagPattern,
}

impl ColorService {
    pub fn new(
        store: Arc<dyn TagStore>,
        names: Arc<dyn NameService>,
        renderer: Arc<dyn SwatchRenderer>,
        config: &EngineConfig,
    ) -> Self {
        let pattern = config.color_tag_pattern();
        Self {
            resolver: ColorResolver::new(names),
            synchronizer: TagSynchronizer::new(store.clone(), pattern.clone()),
            reaper: TagReaper::new(store.clone(), pattern.clone()),
            store,
            renderer,
            band: config.luminance_band(),
            limit_palette: config.limit_palette,
            pattern,
        }
    }

    /// Sanitize and resolve `input`, mapping the non-resolved outcomes to
    /// their structured failures.
    async fn resolve_one(&self, input: &str) -> Result<(Color, Option<String>), ServiceError> {
        let cleaned = sanitize(input);
        match self.resolver.resolve(&cleaned).await? {
            Resolution::Resolved { color, canonical } => Ok((color, canonical)),
            Resolution::Ambiguous { candidates } => Err(ServiceError::Ambiguous {
                input: cleaned,
                candidates,
            }),
            Resolution::Unknown => Err(ServiceError::Unknown(cleaned)),
        }
    }

    /// Normalize a resolved color for display: optional palette reduction
    /// first, then the luminance band clamp.
    fn normalize(&self, color: Color) -> Color {
        let reduced = if self.limit_palette {
            quantize(color)
        } else {
            color
        };
        clamp_luminance(reduced, self.band)
    }

    /// Resolve a color and render its swatch. No state change; the
    /// preview shows the color as requested, not as it would be
    /// normalized on assignment.
    pub async fn preview(&self, req: PreviewRequest) -> Result<PreviewResponse, ServiceError> {
        let (color, canonical_name) = self.resolve_one(&req.input).await?;
        debug!(%color, "previewing color");
        Ok(PreviewResponse {
            color,
            canonical_name,
            swatch: self.renderer.request_swatch(color),
        })
    }

    /// Resolve a color, normalize it, and make it the member's exclusive
    /// color tag.
    pub async fn set_color(&self, req: SetColorRequest) -> Result<SetColorResponse, ServiceError> {
        let (requested, canonical_name) = self.resolve_one(&req.input).await?;
        let effective = self.normalize(requested);

        let assigned = self
            .synchronizer
            .assign(req.namespace, req.member, Some(effective))
            .await?;
        let tag = assigned.ok_or_else(|| {
            TagStoreError::Backend("assignment of a concrete color returned no tag".to_string())
        })?;

        info!(
            namespace = %req.namespace,
            member = %req.member,
            %requested,
            %effective,
            "color set"
        );

        Ok(SetColorResponse {
            requested,
            effective,
            adjusted: effective != requested,
            canonical_name,
            tag,
            swatch: self.renderer.request_swatch(effective),
        })
    }

    /// Remove the member's color tag, leaving the tag itself in the
    /// namespace for other holders.
    pub async fn reset(&self, req: ResetRequest) -> Result<(), ServiceError> {
        self.synchronizer
            .assign(req.namespace, req.member, None)
            .await?;
        Ok(())
    }

    /// Sweep unreferenced color tags. Admin-only; denied requests change
    /// no state.
    pub async fn purge(&self, req: PurgeRequest) -> Result<PurgeResponse, ServiceError> {
        if !req.requester_is_admin {
            return Err(ServiceError::PermissionDenied);
        }
        let deleted = self.reaper.purge(req.namespace).await?;
        Ok(PurgeResponse { deleted })
    }

    /// How many color tags currently exist in the namespace.
    pub async fn census(&self, namespace: NamespaceId) -> Result<usize, ServiceError> {
        let tags = self.store.list_tags(namespace).await?;
        Ok(tags
            .iter()
            .filter(|tag| self.pattern.matches(&tag.label))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::StaticNameService;
    use crate::swatch::KeyedSwatchRenderer;
    use crate::tag::{MemberId, MemoryTagStore};

    const NS: NamespaceId = NamespaceId(1);
    const ALICE: MemberId = MemberId(10);

    async fn service_with(config: EngineConfig) -> (ColorService, Arc<MemoryTagStore>) {
        let store = Arc::new(MemoryTagStore::new());
        store.add_member(NS, ALICE).await;
        let names = Arc::new(StaticNameService::new(&[
            ("violet", "#8f00ff"),
            ("red violet", "#c71585"),
            ("tangerine yellow", "#ffcc00"),
        ]));
        let service = ColorService::new(
            store.clone(),
            names,
            Arc::new(KeyedSwatchRenderer),
            &config,
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_preview_shows_requested_color_without_state_change() {
        let (service, store) = service_with(EngineConfig::default()).await;

        let response = service
            .preview(PreviewRequest {
                input: "**#000**".to_string(),
            })
            .await
            .unwrap();

        // The preview is the raw requested color, not the clamped one.
        assert_eq!(response.color, Color::new(0, 0, 0));
        assert_eq!(response.swatch.key, "000000.png");
        assert!(store.list_tags(NS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_color_normalizes_and_assigns() {
        let (service, store) = service_with(EngineConfig::default()).await;

        let response = service
            .set_color(SetColorRequest {
                namespace: NS,
                member: ALICE,
                input: "#000000".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.requested, Color::new(0, 0, 0));
        assert_ne!(response.effective, response.requested);
        assert!(response.adjusted);

        let held = store.member_tags(NS, ALICE).await.unwrap();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].id, response.tag.id);
        assert_eq!(held[0].label, response.effective.hex());
    }

    #[tokio::test]
    async fn test_set_color_by_name_reports_canonical() {
        let (service, _) = service_with(EngineConfig::default()).await;

        let response = service
            .set_color(SetColorRequest {
                namespace: NS,
                member: ALICE,
                input: "Violet".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.canonical_name.as_deref(), Some("violet"));
        assert_eq!(response.requested, Color::parse_hex("#8f00ff").unwrap());
    }

    #[tokio::test]
    async fn test_set_color_with_limited_palette_quantizes_first() {
        let config = EngineConfig {
            limit_palette: true,
            ..EngineConfig::default()
        };
        let (service, _) = service_with(config).await;

        let response = service
            .set_color(SetColorRequest {
                namespace: NS,
                member: ALICE,
                input: "#cc11ee".to_string(),
            })
            .await
            .unwrap();

        // Quantization runs before the clamp; this color needs no clamp,
        // so the result is exactly the palette-reduced value.
        assert_eq!(
            response.effective,
            quantize(Color::parse_hex("#cc11ee").unwrap())
        );
    }

    #[tokio::test]
    async fn test_ambiguous_input_surfaces_candidates() {
        let (service, _) = service_with(EngineConfig::default()).await;

        let err = service
            .preview(PreviewRequest {
                input: "iolet".to_string(),
            })
            .await
            .unwrap_err();
        let (code, _) = err.error_code_and_tip();
        assert_eq!(code, "AMBIGUOUS_COLOR");
        let (best, remaining) = err.ambiguity_suggestions().unwrap();
        assert_eq!(best, vec!["violet", "red violet"]);
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_unknown_input_keeps_sanitized_text() {
        let (service, _) = service_with(EngineConfig::default()).await;

        let err = service
            .preview(PreviewRequest {
                input: "*blurple*".to_string(),
            })
            .await
            .unwrap_err();
        match err {
            ServiceError::Unknown(input) => assert_eq!(input, "blurple"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reset_clears_color_tag() {
        let (service, store) = service_with(EngineConfig::default()).await;

        service
            .set_color(SetColorRequest {
                namespace: NS,
                member: ALICE,
                input: "violet".to_string(),
            })
            .await
            .unwrap();
        service
            .reset(ResetRequest {
                namespace: NS,
                member: ALICE,
            })
            .await
            .unwrap();
        assert!(store.member_tags(NS, ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purge_requires_admin() {
        let (service, store) = service_with(EngineConfig::default()).await;

        service
            .set_color(SetColorRequest {
                namespace: NS,
                member: ALICE,
                input: "violet".to_string(),
            })
            .await
            .unwrap();
        service
            .reset(ResetRequest {
                namespace: NS,
                member: ALICE,
            })
            .await
            .unwrap();

        let err = service
            .purge(PurgeRequest {
                namespace: NS,
                requester_is_admin: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied));
        // Denied purge must not have swept anything.
        assert_eq!(store.list_tags(NS).await.unwrap().len(), 1);

        let response = service
            .purge(PurgeRequest {
                namespace: NS,
                requester_is_admin: true,
            })
            .await
            .unwrap();
        assert_eq!(response.deleted, 1);
    }

    #[tokio::test]
    async fn test_census_counts_only_color_tags() {
        let (service, store) = service_with(EngineConfig::default()).await;
        store
            .seed_tag(NS, ALICE, "moderator", Color::new(0, 0, 0))
            .await;

        assert_eq!(service.census(NS).await.unwrap(), 0);
        service
            .set_color(SetColorRequest {
                namespace: NS,
                member: ALICE,
                input: "#888888".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(service.census(NS).await.unwrap(), 1);
    }
}
