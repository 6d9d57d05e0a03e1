//! Media playback capability.

use tracksync_common::clock::clamp_position;

/// A seekable media player driven by the session.
///
/// Implementations report position changes back to the session by having
/// their owner dispatch `SessionCommand::MediaTimeUpdate`; `seek` itself
/// must not call back into the session.
pub trait MediaSource {
    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Total duration in seconds, when known.
    fn duration(&self) -> Option<f64>;

    /// Jump to `position` seconds.
    fn seek(&mut self, position: f64);

    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    fn is_paused(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);
}

/// In-memory player used by the CLI and tests.
///
/// Time only moves through [`SimulatedMedia::advance`] or `seek`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedMedia {
    position: f64,
    duration: Option<f64>,
    rate: f64,
    paused: bool,
}

impl SimulatedMedia {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            position: 0.0,
            duration,
            rate: 1.0,
            paused: true,
        }
    }

    /// Let `wall_secs` of real time pass. Returns the new position.
    pub fn advance(&mut self, wall_secs: f64) -> f64 {
        if !self.paused {
            let upper = self.duration.unwrap_or(f64::INFINITY);
            self.position = clamp_position(self.position + wall_secs * self.rate, 0.0, upper);
            if self.duration.is_some_and(|d| self.position >= d) {
                self.paused = true;
            }
        }
        self.position
    }
}

impl MediaSource for SimulatedMedia {
    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn seek(&mut self, position: f64) {
        self.position = position;
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_only_while_playing() {
        let mut media = SimulatedMedia::new(Some(10.0));
        assert_eq!(media.advance(1.0), 0.0);

        media.play();
        media.set_playback_rate(2.0);
        assert_eq!(media.advance(1.5), 3.0);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut media = SimulatedMedia::new(Some(2.0));
        media.play();
        assert_eq!(media.advance(5.0), 2.0);
        assert!(media.is_paused());
    }

    #[test]
    fn test_seek_sets_position() {
        let mut media = SimulatedMedia::new(None);
        media.seek(42.5);
        assert_eq!(media.position(), 42.5);
        assert_eq!(media.duration(), None);
    }
}
