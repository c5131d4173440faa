//! Tick placement for visible axes.

/// Upper bound on ticks per axis.
const MAX_TICKS: usize = 9;

/// Multipliers tried for each power of ten, smallest first.
const STEP_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 2.5, 5.0];

/// Pick a "nice" step (1, 2, 2.5 or 5 times a power of ten) that yields at
/// most [`MAX_TICKS`] ticks across `span`.
pub(crate) fn nice_step(span: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / (MAX_TICKS - 1) as f64;
    let mut magnitude = 10f64.powf(raw.log10().floor());
    loop {
        for m in STEP_MULTIPLIERS {
            let step = m * magnitude;
            if step >= raw {
                return step;
            }
        }
        magnitude *= 10.0;
    }
}

/// Tick positions within `[min, max]` on multiples of a nice step.
pub(crate) fn ticks(min: f64, max: f64) -> Vec<f64> {
    let step = nice_step(max - min);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|i| i as f64 * step)
        .map(|v| if v == 0.0 { 0.0 } else { v })
        .collect()
}

/// Format a tick value with the decimals needed to show `step` exactly,
/// so every label on an axis has the same precision.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..=6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(6) as usize;
    format!("{value:.decimals$}")
}
