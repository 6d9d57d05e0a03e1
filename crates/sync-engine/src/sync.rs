//! Media ↔ data position mapping.
//!
//! The relation is affine: `data = media - offset`, clamped at 0. The data
//! position is never stored; it is always derived from the current media
//! position and offset. Each direction applies the offset exactly once:
//! scrubbing adds it to a data position to get a seek target, and the
//! following media update subtracts it again.

use serde::{Deserialize, Serialize};
use tracksync_common::clock::{clamp_position, format_secs, frame_interval_secs};

/// Data-timeline position for a media position: `max(media - offset, 0)`.
///
/// No upper clamp is applied against the timeline extent or media duration.
pub fn data_position(media_position: f64, offset: f64) -> f64 {
    (media_position - offset).max(0.0)
}

/// Media seek target for a data-timeline position.
///
/// Clamped into `[0, duration]`; when the duration is unknown the upper
/// bound is the target itself.
pub fn seek_target(data_position: f64, offset: f64, duration: Option<f64>) -> f64 {
    let target = data_position + offset;
    let upper = known_duration(duration).unwrap_or(target);
    clamp_position(target, 0.0, upper)
}

/// Media position one frame away from `media_position`.
///
/// Clamped into `[0, duration]`, unbounded above when the duration is unknown.
pub fn step_target(
    media_position: f64,
    fps: f64,
    direction: StepDirection,
    duration: Option<f64>,
) -> f64 {
    let delta = frame_interval_secs(fps) * direction.sign();
    let upper = known_duration(duration).unwrap_or(f64::INFINITY);
    clamp_position(media_position + delta, 0.0, upper)
}

fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Direction of a single-frame step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Backward,
    Forward,
}

impl StepDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }
}

/// Cursor state published to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorUpdate {
    /// Cursor position on the data timeline (seconds).
    pub position: f64,
    /// Short text label for the position, e.g. `3.25s`.
    pub label: String,
    /// New value for the data-timeline scrub control, when it should move.
    pub scrub_value: Option<f64>,
}

/// Holds the sync offset and performs all offset-dependent conversions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SyncController {
    offset: f64,
}

impl SyncController {
    pub fn new(offset: f64) -> Self {
        let mut controller = Self::default();
        controller.set_offset(offset);
        controller
    }

    /// Sync offset in seconds (media time minus data time).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Replace the offset. Non-finite values reset it to 0.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = if offset.is_finite() { offset } else { 0.0 };
    }

    pub fn data_position(&self, media_position: f64) -> f64 {
        data_position(media_position, self.offset)
    }

    pub fn seek_target(&self, data_position: f64, duration: Option<f64>) -> f64 {
        seek_target(data_position, self.offset, duration)
    }

    /// Cursor for a media position update: moves the cursor, label and scrub control.
    pub fn on_media_position(&self, media_position: f64) -> CursorUpdate {
        let position = self.data_position(media_position);
        CursorUpdate {
            position,
            label: format_secs(position),
            scrub_value: Some(position),
        }
    }

    /// Cursor after an offset change: a re-projection that leaves the scrub
    /// control where it is.
    pub fn reproject(&self, media_position: f64) -> CursorUpdate {
        let position = self.data_position(media_position);
        CursorUpdate {
            position,
            label: format_secs(position),
            scrub_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_data_position_subtracts_offset() {
        assert_eq!(data_position(5.0, 2.0), 3.0);
        assert_eq!(data_position(5.0, -1.5), 6.5);
    }

    #[test]
    fn test_data_position_clamps_at_zero() {
        assert_eq!(data_position(1.0, 5.0), 0.0);
    }

    #[test]
    fn test_seek_target_respects_duration() {
        assert_eq!(seek_target(3.0, 2.0, Some(10.0)), 5.0);
        assert_eq!(seek_target(9.0, 2.0, Some(10.0)), 10.0);
        assert_eq!(seek_target(1.0, -3.0, Some(10.0)), 0.0);
    }

    #[test]
    fn test_seek_target_without_duration() {
        assert_eq!(seek_target(100.0, 2.0, None), 102.0);
        assert_eq!(seek_target(100.0, 2.0, Some(f64::NAN)), 102.0);
        assert_eq!(seek_target(1.0, -3.0, None), 0.0);
    }

    #[test]
    fn test_step_target() {
        let fwd = step_target(1.0, 25.0, StepDirection::Forward, Some(10.0));
        assert!((fwd - 1.04).abs() < 1e-12);

        let back = step_target(1.0, 25.0, StepDirection::Backward, Some(10.0));
        assert!((back - 0.96).abs() < 1e-12);

        assert_eq!(step_target(0.01, 25.0, StepDirection::Backward, None), 0.0);
        assert_eq!(step_target(10.0, 25.0, StepDirection::Forward, Some(10.0)), 10.0);

        let open = step_target(1e6, 25.0, StepDirection::Forward, None);
        assert!(open > 1e6);
    }

    #[test]
    fn test_step_from_unknown_position_lands_at_start() {
        assert_eq!(step_target(f64::NAN, 25.0, StepDirection::Forward, Some(10.0)), 0.0);
        assert_eq!(step_target(f64::NAN, 25.0, StepDirection::Forward, None), 0.0);
        assert_eq!(seek_target(f64::NAN, 2.0, Some(10.0)), 0.0);
    }

    #[test]
    fn test_controller_cursor_updates() {
        let mut sync = SyncController::new(2.0);
        let update = sync.on_media_position(5.5);
        assert_eq!(update.position, 3.5);
        assert_eq!(update.label, "3.50s");
        assert_eq!(update.scrub_value, Some(3.5));

        sync.set_offset(-1.0);
        let update = sync.reproject(5.5);
        assert_eq!(update.position, 6.5);
        assert_eq!(update.scrub_value, None);

        sync.set_offset(f64::NAN);
        assert_eq!(sync.offset(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_scrub_round_trip_applies_offset_once(
            data in 0.0..1000.0f64,
            offset in -50.0..50.0f64,
        ) {
            let sync = SyncController::new(offset);
            let target = sync.seek_target(data, None);
            let back = sync.data_position(target);

            if data + offset >= 0.0 {
                prop_assert!((back - data).abs() < 1e-9);
            } else {
                prop_assert_eq!(target, 0.0);
            }
        }

        #[test]
        fn prop_data_position_never_negative(media in -10.0..1000.0f64, offset in -100.0..100.0f64) {
            prop_assert!(data_position(media, offset) >= 0.0);
        }
    }
}
