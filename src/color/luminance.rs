//! Relative luminance and the display-band clamp.
//!
//! Colors are measured with the standard sRGB transfer function and, when
//! outside the configured band, rescaled toward it with a fixed-iteration
//! bisection over a single brightness factor. The search approximates the
//! band boundary rather than solving it exactly; ten iterations leave the
//! result within ~2^-10 of the exact scale factor, which is visually
//! indistinguishable.

use super::Color;

pub const DEFAULT_MIN_LUMINANCE: f64 = 0.15;
pub const DEFAULT_MAX_LUMINANCE: f64 = 0.75;

const BISECTION_ITERATIONS: u32 = 10;

/// The acceptable relative-luminance band for displayed colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceBand {
    pub min: f64,
    pub max: f64,
}

impl Default for LuminanceBand {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LUMINANCE,
            max: DEFAULT_MAX_LUMINANCE,
        }
    }
}

/// Normalized sRGB channel fractions of a color.
///
/// Each channel is floored at 0.5 before normalizing; a true zero channel
/// can never be brightened by scaling and would pin the search.
pub fn srgb_fractions(color: Color) -> [f64; 3] {
    [color.r, color.g, color.b].map(|v| f64::from(v).max(0.5) / 255.0)
}

fn linearize(s: f64) -> f64 {
    if s < 0.03928 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of normalized sRGB fractions, per the sRGB
/// linearization and the Rec. 709 channel weights.
pub fn relative_luminance(srgb: [f64; 3]) -> f64 {
    let [r, g, b] = srgb.map(linearize);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn scale_clamped(a: f64, srgb: [f64; 3]) -> [f64; 3] {
    srgb.map(|x| (a * x).min(1.0))
}

/// Bisection over a monotone boolean predicate on `[lo, hi]`.
///
/// Runs a fixed iteration count; each midpoint replaces the bound whose
/// truth value it matches. Returns the endpoint at which the predicate
/// holds. The loop is deliberately iterative and bounded so identical
/// inputs reproduce bit-identical results.
fn bisect(predicate: impl Fn(f64) -> bool, mut lo: f64, mut hi: f64) -> f64 {
    let truth_lo = predicate(lo);
    for _ in 0..BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if predicate(mid) == truth_lo {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    if truth_lo {
        lo
    } else {
        hi
    }
}

fn rescaled(a: f64, srgb: [f64; 3]) -> Color {
    let [r, g, b] = scale_clamped(a, srgb).map(|x| x * 255.0);
    Color::from_channels(r, g, b)
}

/// Constrain a color's relative luminance into `band`.
///
/// Dark colors are brightened to at least `band.min`, bright colors dimmed
/// to at most `band.max`; anything already inside the band is returned
/// unchanged. Scaling happens in fraction space with each channel capped
/// at 1.0, so saturated channels stop contributing and the remaining
/// channels keep rising until the band is reached.
pub fn clamp_luminance(color: Color, band: LuminanceBand) -> Color {
    let srgb = srgb_fractions(color);
    let luminance = relative_luminance(srgb);

    if luminance < band.min {
        let bright_enough = |a: f64| relative_luminance(scale_clamped(a, srgb)) >= band.min;
        rescaled(bisect(bright_enough, 1.0, 255.0), srgb)
    } else if luminance > band.max {
        let dim_enough = |a: f64| relative_luminance(scale_clamped(a, srgb)) <= band.max;
        rescaled(bisect(dim_enough, 0.0, 1.0), srgb)
    } else {
        color
    }
}
