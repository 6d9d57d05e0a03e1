//! Display transform: selected columns to renderer-ready sequences.
//!
//! Order is fixed: raw values, then optional `[0, 1]` normalization, then
//! causal smoothing. Normalizing first keeps overlaid traces on the same
//! scale when both options are on.

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnSet, Selection};
use crate::stats::{moving_average, normalize01};
use crate::timeline::Timeline;

/// User-facing transform options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    /// Scale each trace to `[0, 1]` before smoothing.
    pub normalize: bool,
    /// Smoothing time constant in seconds; 0 disables smoothing.
    pub smoothing_secs: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            normalize: false,
            smoothing_secs: 0.0,
        }
    }
}

impl TransformParams {
    /// Window length in samples for a timeline sampled every `dt` seconds.
    pub fn window_len(&self, dt: f64) -> usize {
        smoothing_window(self.smoothing_secs, dt)
    }
}

/// One transformed trace, aligned sample-for-sample with the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySequence {
    pub key: String,
    pub timestamps: Vec<f64>,
    pub values: Vec<f64>,
}

/// `round(smoothing_secs / dt)`, at least 1.
///
/// Negative or non-finite durations count as 0 (no smoothing).
pub fn smoothing_window(smoothing_secs: f64, dt: f64) -> usize {
    let secs = if smoothing_secs.is_finite() {
        smoothing_secs.max(0.0)
    } else {
        0.0
    };
    let samples = (secs / dt).round();
    if samples.is_finite() && samples >= 1.0 {
        samples as usize
    } else {
        1
    }
}

/// Apply normalization (if enabled) and then smoothing to one column.
pub fn transform_values(values: &[f64], params: &TransformParams, dt: f64) -> Vec<f64> {
    let scaled = if params.normalize {
        normalize01(values)
    } else {
        values.to_vec()
    };
    moving_average(&scaled, params.window_len(dt))
}

/// Build one display sequence per column to draw.
///
/// Returns nothing when the timeline has no usable timestamp, so callers
/// can skip rendering instead of drawing an empty plot.
pub fn display_sequences(
    columns: &ColumnSet,
    selection: &Selection,
    timeline: &Timeline,
    params: &TransformParams,
) -> Vec<DisplaySequence> {
    if !timeline.has_data() {
        return Vec::new();
    }

    let dt = timeline.dt();
    selection
        .resolve(columns)
        .into_iter()
        .map(|column| {
            debug_assert_eq!(column.values.len(), timeline.len());
            DisplaySequence {
                key: column.key.clone(),
                timestamps: timeline.timestamps().to_vec(),
                values: transform_values(&column.values, params, dt),
            }
        })
        .collect()
}
