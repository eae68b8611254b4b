//! Swatch preview seam.
//!
//! The engine never encodes images; it asks a renderer for an opaque
//! handle the dispatch host can attach to its reply. Rendering must be a
//! pure function of the color value.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Opaque reference to a rendered color preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchRef {
    pub key: String,
}

pub trait SwatchRenderer: Send + Sync {
    fn request_swatch(&self, color: Color) -> SwatchRef;
}

/// Renderer that derives attachment keys of the form `rrggbb.png` without
/// producing pixels; hosts that render real previews implement
/// [`SwatchRenderer`] themselves.
#[derive(Debug, Default)]
pub struct KeyedSwatchRenderer;

impl SwatchRenderer for KeyedSwatchRenderer {
    fn request_swatch(&self, color: Color) -> SwatchRef {
        let code = color.hex();
        SwatchRef {
            key: format!("{}.png", code.trim_start_matches('#')),
        }
    }
}
