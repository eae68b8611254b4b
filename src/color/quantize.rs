//! Optional 3-bit-per-channel palette reduction.

use super::Color;

/// Quantize one channel to one of 8 evenly spaced levels.
///
/// The top three bits are kept and replicated downward to fill the low
/// bits, so 0 stays 0 and 255 stays 255.
pub fn quantize_channel(v: u8) -> u8 {
    let top = v & 0b1110_0000;
    top | top >> 3 | top >> 6
}

/// Reduce a color to the 512-color palette (8 levels per channel).
///
/// Deterministic, lossy, and idempotent.
pub fn quantize(color: Color) -> Color {
    Color::new(
        quantize_channel(color.r),
        quantize_channel(color.g),
        quantize_channel(color.b),
    )
}
