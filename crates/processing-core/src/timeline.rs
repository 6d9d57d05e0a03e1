//! Canonical per-row timeline and sampling-interval estimation.
//!
//! Tracking exports reference time in one of two ways: an explicit
//! `time_sec` column, or a `frame` index that needs a frame rate. The
//! builder prefers the explicit field whenever it covers enough rows, and
//! remembers which source it used so a later frame-rate change only
//! affects frame-indexed tables.

use serde::{Deserialize, Serialize};
use tracksync_data_model::row::{FRAME_FIELD, TIME_FIELD};
use tracksync_data_model::table::DataTable;

use crate::stats::median;

/// Sampling interval assumed when the timeline has no positive step.
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0 / 30.0;

/// Minimum share of rows with a finite `time_sec` for it to be trusted.
pub const TIME_FIELD_COVERAGE: f64 = 0.6;

/// Where the timestamps of a timeline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// The explicit per-row time field.
    TimeField,
    /// `frame / fps` fallback.
    FrameIndex,
}

/// One timestamp (seconds) per row plus the estimated sampling interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    timestamps: Vec<f64>,
    source: TimeSource,
    dt: f64,
}

impl Timeline {
    /// Build the timeline for `table`, using `fps` only for the frame fallback.
    pub fn build(table: &DataTable, fps: f64) -> Self {
        let explicit = table.numbers(TIME_FIELD);
        let finite = explicit.iter().filter(|t| t.is_finite()).count();

        let (timestamps, source) =
            if finite as f64 >= table.len() as f64 * TIME_FIELD_COVERAGE {
                (explicit, TimeSource::TimeField)
            } else {
                (frame_timestamps(table, fps), TimeSource::FrameIndex)
            };

        Self::from_timestamps(timestamps, source)
    }

    /// Wrap precomputed timestamps, estimating dt from them.
    pub fn from_timestamps(timestamps: Vec<f64>, source: TimeSource) -> Self {
        let dt = estimate_interval(&timestamps);
        tracing::debug!(
            rows = timestamps.len(),
            source = ?source,
            dt,
            "Built timeline"
        );
        Self {
            timestamps,
            source,
            dt,
        }
    }

    /// Rebuild after a frame-rate change.
    ///
    /// Returns `true` when the timeline changed. Timelines taken from the
    /// explicit time field are left alone.
    pub fn apply_frame_rate(&mut self, table: &DataTable, fps: f64) -> bool {
        if self.source != TimeSource::FrameIndex {
            return false;
        }
        *self = Self::from_timestamps(frame_timestamps(table, fps), TimeSource::FrameIndex);
        true
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn source(&self) -> TimeSource {
        self.source
    }

    /// Estimated sampling interval in seconds; always positive.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Whether any timestamp is usable. An all-gap timeline means "no data".
    pub fn has_data(&self) -> bool {
        self.timestamps.iter().any(|t| t.is_finite())
    }

    /// `(min, max)` over finite timestamps.
    pub fn extent(&self) -> Option<(f64, f64)> {
        crate::stats::finite_range(&self.timestamps)
    }

    /// Bounds for a data-time scrub control: `[max(0, min), max]`.
    pub fn scrub_bounds(&self) -> Option<(f64, f64)> {
        self.extent().map(|(lo, hi)| (lo.max(0.0), hi))
    }

    /// First and last finite timestamps, or `(0, 1)` without data.
    pub fn fit_range(&self) -> (f64, f64) {
        let first = self.timestamps.iter().copied().find(|t| t.is_finite());
        let last = self.timestamps.iter().rev().copied().find(|t| t.is_finite());
        (first.unwrap_or(0.0), last.unwrap_or(1.0))
    }
}

fn frame_timestamps(table: &DataTable, fps: f64) -> Vec<f64> {
    table
        .numbers(FRAME_FIELD)
        .into_iter()
        .map(|frame| if frame.is_finite() { frame / fps } else { f64::NAN })
        .collect()
}

/// Median of the strictly positive, finite consecutive differences.
///
/// Falls back to [`DEFAULT_INTERVAL_SECS`] when there is no such difference.
pub fn estimate_interval(timestamps: &[f64]) -> f64 {
    let diffs: Vec<f64> = timestamps
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| d.is_finite() && *d > 0.0)
        .collect();

    if diffs.is_empty() {
        DEFAULT_INTERVAL_SECS
    } else {
        median(&diffs)
    }
}
