//! Rendering capability and the data handed to it.
//!
//! The engine never draws. It publishes plot frames, cursor moves, status
//! lines, and axis ranges to a [`Renderer`], which owns presentation.

use serde::Serialize;
use tracksync_processing_core::transform::DisplaySequence;

use crate::sync::CursorUpdate;

/// Everything needed to draw the metrics plot once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFrame {
    /// One named, timestamped trace per drawn column.
    pub traces: Vec<DisplaySequence>,
    /// Cursor position on the data timeline (seconds).
    pub cursor: f64,
    /// Y-axis title.
    pub y_label: String,
}

/// Category of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Info,
    /// Media could not be loaded or played. Data-side state is unaffected.
    MediaError,
}

/// A user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn media_error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::MediaError,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::MediaError
    }
}

/// Presentation side of a session.
pub trait Renderer {
    /// Redraw the plot from scratch.
    fn draw(&mut self, frame: &PlotFrame);

    /// Move the cursor without redrawing traces.
    fn move_cursor(&mut self, cursor: &CursorUpdate);

    fn show_status(&mut self, status: &StatusMessage);

    /// Range of the data-timeline scrub control.
    fn set_scrub_range(&mut self, _start: f64, _end: f64) {}

    /// Zoom the time axis to `[start, end]`.
    fn fit_view(&mut self, _start: f64, _end: f64) {}
}

/// Renderer that keeps everything it is given. Useful for tests and for
/// headless front-ends that read the latest frame back.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<PlotFrame>,
    pub cursors: Vec<CursorUpdate>,
    pub statuses: Vec<StatusMessage>,
    pub scrub_range: Option<(f64, f64)>,
    pub view_range: Option<(f64, f64)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&PlotFrame> {
        self.frames.last()
    }

    pub fn last_cursor(&self) -> Option<&CursorUpdate> {
        self.cursors.last()
    }

    pub fn last_status(&self) -> Option<&StatusMessage> {
        self.statuses.last()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, frame: &PlotFrame) {
        self.frames.push(frame.clone());
    }

    fn move_cursor(&mut self, cursor: &CursorUpdate) {
        self.cursors.push(cursor.clone());
    }

    fn show_status(&mut self, status: &StatusMessage) {
        self.statuses.push(status.clone());
    }

    fn set_scrub_range(&mut self, start: f64, end: f64) {
        self.scrub_range = Some((start, end));
    }

    fn fit_view(&mut self, start: f64, end: f64) {
        self.view_range = Some((start, end));
    }
}
