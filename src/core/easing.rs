//! Easing curves for programmatic scrolling.

/// Quartic ease-out: starts fast, decelerates gently.
///
/// `t` is normalised progress; values outside `[0, 1]` are clamped so the
/// result always stays in `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}
