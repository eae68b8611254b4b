//! Color value type and the pure color math.
//!
//! Everything in this module is synchronous, allocation-free past parsing,
//! and safe to call from any thread:
//! - hex parsing and canonical formatting ([`codec`])
//! - relative luminance and the band clamp ([`luminance`])
//! - 3-bit palette reduction ([`quantize`])

mod codec;
mod luminance;
mod quantize;

pub use codec::{Color, ColorError};
pub use luminance::{
    clamp_luminance, relative_luminance, srgb_fractions, LuminanceBand,
    DEFAULT_MAX_LUMINANCE, DEFAULT_MIN_LUMINANCE,
};
pub use quantize::{quantize, quantize_channel};
