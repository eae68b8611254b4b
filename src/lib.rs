//! Color resolution and exclusive color-tag synchronization.
//!
//! `huetag` turns free-form color descriptions (hex codes, exact names,
//! fuzzy names) into a single normalized color, and keeps that color as a
//! member's one-and-only color tag inside a shared group namespace. The
//! tag inventory is shared between members, created lazily, and garbage
//! collected when unreferenced.
//!
//! The dispatch host, the durable tag store, the name dictionary, and the
//! swatch renderer are external collaborators consumed through the
//! [`tag::TagStore`], [`names::NameService`], and
//! [`swatch::SwatchRenderer`] seams; [`service::ColorService`] is the
//! facade the host drives.

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result
    )
)]

pub mod color;
pub mod config;
pub mod logging;
pub mod names;
pub mod resolve;
pub mod service;
pub mod swatch;
pub mod tag;
pub mod utils;

// Re-export commonly used types
pub use color::{
    clamp_luminance, quantize, relative_luminance, srgb_fractions, Color, ColorError,
    LuminanceBand,
};
pub use config::{config_home, ConfigError, EngineConfig};
pub use logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
pub use names::{NameMatch, NameService, NameServiceError, StaticNameService};
pub use resolve::{sanitize, ColorResolver, Resolution, ResolveError};
pub use service::{
    ColorService, PreviewRequest, PreviewResponse, PurgeRequest, PurgeResponse, ResetRequest,
    ServiceError, SetColorRequest, SetColorResponse, StructuredFailure,
};
pub use swatch::{KeyedSwatchRenderer, SwatchRef, SwatchRenderer};
pub use tag::{
    ColorTagPattern, Member, MemberId, MemoryTagStore, NamespaceId, SyncError, Tag, TagId,
    TagReaper, TagStore, TagStoreError, TagSynchronizer,
};
