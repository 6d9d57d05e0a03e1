//! Clock helpers shared by the timeline and the sync controller.
//!
//! All positions are fractional seconds. Media time and data time live on
//! different origins; the conversion between them is owned by the sync
//! engine, these helpers only cover the arithmetic both sides need:
//! - Clamping a position into a (possibly inverted) range without panicking
//! - Frame-step sizes from a frame rate
//! - Human-readable time labels

/// Clamp `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics: when `hi < lo` the lower bound
/// wins, and a NaN `value` collapses to `lo`.
pub fn clamp_position(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.min(hi).max(lo)
}

/// Duration of one frame in seconds at `fps`.
pub fn frame_interval_secs(fps: f64) -> f64 {
    1.0 / fps
}

/// Format seconds as a short label, e.g. `12.35s`.
pub fn format_secs(secs: f64) -> String {
    format!("{secs:.2}s")
}

/// Replace unusable rate-like inputs (NaN, infinite, zero) with `default`.
///
/// Mirrors how the numeric inputs of the viewer behave: an empty or zero
/// field means "use the default", anything else is taken as-is.
pub fn rate_or_default(value: f64, default: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_position_regular_range() {
        assert_eq!(clamp_position(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_position(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_position(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_position_inverted_range_prefers_lower_bound() {
        assert_eq!(clamp_position(3.0, 0.0, -2.0), 0.0);
    }

    #[test]
    fn test_clamp_position_nan_collapses_to_lower_bound() {
        assert_eq!(clamp_position(f64::NAN, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_clamp_position_unbounded_above() {
        assert_eq!(clamp_position(1e12, 0.0, f64::INFINITY), 1e12);
        assert_eq!(clamp_position(f64::NAN, 0.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_frame_interval() {
        assert!((frame_interval_secs(30.0) - 1.0 / 30.0).abs() < 1e-12);
        assert!((frame_interval_secs(25.0) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(0.0), "0.00s");
        assert_eq!(format_secs(12.345_6), "12.35s");
    }

    #[test]
    fn test_rate_or_default() {
        assert_eq!(rate_or_default(60.0, 30.0), 60.0);
        assert_eq!(rate_or_default(0.0, 30.0), 30.0);
        assert_eq!(rate_or_default(f64::NAN, 30.0), 30.0);
        assert_eq!(rate_or_default(f64::INFINITY, 1.0), 1.0);
    }
}
