//! Session context: the single owner of all viewer state.
//!
//! A session holds the loaded table and everything derived from it
//! (timeline, eligible columns), the column selection, the live settings,
//! the sync offset, and the attached media. Front-ends feed it
//! [`SessionCommand`]s; it answers by calling its [`Renderer`] and, for
//! transport commands, its [`MediaSource`].
//!
//! Media position updates only ever move the cursor. Seeks are issued by
//! scrubs, plot clicks, and frame steps, and the resulting position change
//! comes back as a later `MediaTimeUpdate`.

use tracksync_common::clock::rate_or_default;
use tracksync_common::config::{ViewDefaults, DEFAULT_FPS, DEFAULT_PLAYBACK_RATE};
use tracksync_data_model::media::{MediaErrorKind, MediaInfo};
use tracksync_data_model::table::DataTable;
use tracksync_processing_core::columns::{ColumnSet, Selection};
use tracksync_processing_core::timeline::Timeline;
use tracksync_processing_core::transform::{display_sequences, TransformParams};

use crate::media::MediaSource;
use crate::render::{PlotFrame, Renderer, StatusMessage};
use crate::sync::{step_target, CursorUpdate, StepDirection, SyncController};

/// Live settings of a session. Changing any of them regenerates derived
/// state without reloading the table.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Fallback frame rate for frame-indexed tables and frame stepping.
    pub fps: f64,
    pub transform: TransformParams,
    pub playback_rate: f64,
    /// Columns selected right after a table is loaded, when eligible.
    pub default_columns: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&ViewDefaults::default())
    }
}

impl From<&ViewDefaults> for SessionSettings {
    fn from(view: &ViewDefaults) -> Self {
        Self {
            fps: rate_or_default(view.fps, DEFAULT_FPS),
            transform: TransformParams {
                normalize: view.normalize,
                smoothing_secs: sanitize_smoothing(view.smoothing_secs),
            },
            playback_rate: rate_or_default(view.playback_rate, DEFAULT_PLAYBACK_RATE),
            default_columns: view.default_columns.clone(),
        }
    }
}

/// A key press forwarded from the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Key name, e.g. `ArrowLeft`, `ArrowRight`, or `" "` for space.
    pub key: String,
    /// Whether focus is inside a text field, select, or other editable control.
    pub in_editable: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            in_editable: false,
        }
    }

    pub fn in_editable(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            in_editable: true,
        }
    }
}

/// Everything a front-end can ask a session to do.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Replace the table and everything derived from it.
    LoadTable(DataTable),

    /// The media reported a new playback position.
    MediaTimeUpdate,
    /// The media finished reading its metadata (duration is now known).
    MediaMetadataLoaded,
    MediaCanPlay,
    MediaPlaying,
    MediaStalled,
    MediaFailed {
        kind: MediaErrorKind,
        detail: String,
    },

    /// The data-timeline scrub control was moved to this data position.
    Scrub(f64),
    /// The plot was clicked at this data time.
    PlotClick(f64),
    StepFrame(StepDirection),
    TogglePlayback,
    FitView,
    Key(KeyInput),

    SetOffset(f64),
    SetFrameRate(f64),
    SetSmoothing(f64),
    SetNormalize(bool),
    SetPlaybackRate(f64),

    /// Replace the selection. Keys that are not eligible are dropped.
    SetSelection(Vec<String>),
    ToggleColumn(String),
    ClearSelection,
}

#[derive(Debug, Clone)]
struct LoadedData {
    table: DataTable,
    timeline: Timeline,
    columns: ColumnSet,
}

/// The viewer's state and its event handlers.
pub struct Session<R: Renderer> {
    settings: SessionSettings,
    sync: SyncController,
    data: Option<LoadedData>,
    selection: Selection,
    media: Option<Box<dyn MediaSource>>,
    media_info: Option<MediaInfo>,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    /// Create an empty session with default settings.
    pub fn new(renderer: R) -> Self {
        Self::with_defaults(&ViewDefaults::default(), renderer)
    }

    /// Create an empty session seeded from configured view defaults.
    pub fn with_defaults(view: &ViewDefaults, renderer: R) -> Self {
        Self {
            settings: SessionSettings::from(view),
            sync: SyncController::new(view.offset_secs),
            data: None,
            selection: Selection::new(),
            media: None,
            media_info: None,
            renderer,
        }
    }

    /// Attach a media player, replacing any previous one.
    pub fn attach_media(&mut self, mut media: Box<dyn MediaSource>, info: Option<MediaInfo>) {
        media.set_playback_rate(self.settings.playback_rate);

        let text = match &info {
            Some(info) => format!(
                "Video: {} ({:.1} MB, {}) / playable={}",
                info.file_name(),
                info.size_mb(),
                info.mime.as_deref().unwrap_or("(unknown)"),
                info.playability
            ),
            None => "Video attached".to_string(),
        };
        tracing::info!(media = ?info.as_ref().map(|i| &i.path), "Media attached");

        self.media = Some(media);
        self.media_info = info;
        self.renderer.show_status(&StatusMessage::info(text));
    }

    /// Handle one command to completion.
    pub fn dispatch(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::LoadTable(table) => self.load_table(table),

            SessionCommand::MediaTimeUpdate => self.on_media_time_update(),
            SessionCommand::MediaMetadataLoaded => self.on_media_metadata(),
            SessionCommand::MediaCanPlay => {
                self.renderer
                    .show_status(&StatusMessage::info("Ready to play"));
            }
            SessionCommand::MediaPlaying => {
                self.renderer.show_status(&StatusMessage::info("Playing"));
            }
            SessionCommand::MediaStalled => {
                tracing::warn!("Media loading stalled");
                self.renderer.show_status(&StatusMessage::media_error(
                    "Loading stalled (a local file may be damaged)",
                ));
            }
            SessionCommand::MediaFailed { kind, detail } => {
                tracing::warn!(kind = %kind, detail = %detail, "Media playback failed");
                self.renderer.show_status(&StatusMessage::media_error(format!(
                    "Playback error: {kind} ({detail})"
                )));
            }

            SessionCommand::Scrub(data_position) | SessionCommand::PlotClick(data_position) => {
                self.seek_to_data_position(data_position)
            }
            SessionCommand::StepFrame(direction) => self.step_frame(direction),
            SessionCommand::TogglePlayback => self.toggle_playback(),
            SessionCommand::FitView => self.fit_view(),
            SessionCommand::Key(input) => self.on_key(input),

            SessionCommand::SetOffset(offset) => self.set_offset(offset),
            SessionCommand::SetFrameRate(fps) => self.set_frame_rate(fps),
            SessionCommand::SetSmoothing(secs) => {
                self.settings.transform.smoothing_secs = sanitize_smoothing(secs);
                self.redraw();
            }
            SessionCommand::SetNormalize(normalize) => {
                self.settings.transform.normalize = normalize;
                self.redraw();
            }
            SessionCommand::SetPlaybackRate(rate) => {
                self.settings.playback_rate = rate_or_default(rate, DEFAULT_PLAYBACK_RATE);
                if let Some(media) = self.media.as_mut() {
                    media.set_playback_rate(self.settings.playback_rate);
                }
            }

            SessionCommand::SetSelection(keys) => {
                let columns = self.data.as_ref().map(|d| &d.columns);
                let eligible: Vec<String> = keys
                    .into_iter()
                    .filter(|k| columns.is_some_and(|c| c.contains(k)))
                    .collect();
                self.selection.set(eligible);
                self.redraw();
            }
            SessionCommand::ToggleColumn(key) => {
                let eligible = self
                    .data
                    .as_ref()
                    .is_some_and(|d| d.columns.contains(&key));
                if eligible {
                    self.selection.toggle(&key);
                    self.redraw();
                }
            }
            SessionCommand::ClearSelection => {
                self.selection.clear();
                self.redraw();
            }
        }
    }

    fn load_table(&mut self, table: DataTable) {
        let timeline = Timeline::build(&table, self.settings.fps);
        let columns = ColumnSet::scan(&table);
        self.selection = Selection::preferred(&columns, &self.settings.default_columns);

        tracing::info!(
            rows = table.len(),
            columns = columns.len(),
            source = ?timeline.source(),
            dt = timeline.dt(),
            "Table loaded into session"
        );

        let mut text = format!(
            "CSV: {} rows / {} numeric columns / dt≈{:.3}s",
            table.len(),
            columns.len(),
            timeline.dt()
        );
        if !table.is_empty() && !timeline.has_data() {
            text.push_str(" / no usable time_sec or frame column");
        }

        if let Some((start, end)) = timeline.scrub_bounds() {
            self.renderer.set_scrub_range(start, end);
        }

        self.data = Some(LoadedData {
            table,
            timeline,
            columns,
        });
        self.renderer.show_status(&StatusMessage::info(text));
        self.redraw();
    }

    /// Build the plot frame for the current state, `None` when there is
    /// nothing to draw.
    pub fn current_frame(&self) -> Option<PlotFrame> {
        let data = self.data.as_ref()?;
        let traces = display_sequences(
            &data.columns,
            &self.selection,
            &data.timeline,
            &self.settings.transform,
        );
        if traces.is_empty() {
            return None;
        }

        let y_label = if self.settings.transform.normalize {
            "value (normalized)"
        } else {
            "value"
        };
        Some(PlotFrame {
            traces,
            cursor: self.data_position(),
            y_label: y_label.to_string(),
        })
    }

    fn redraw(&mut self) {
        match self.current_frame() {
            Some(frame) => self.renderer.draw(&frame),
            None => tracing::debug!("Nothing to draw"),
        }
    }

    fn on_media_time_update(&mut self) {
        let cursor = self.sync.on_media_position(self.media_position());
        self.renderer.move_cursor(&cursor);
    }

    fn on_media_metadata(&mut self) {
        let Some(duration) = self.media.as_ref().and_then(|m| m.duration()) else {
            self.renderer
                .show_status(&StatusMessage::info("Loaded / duration unknown"));
            return;
        };

        self.renderer.set_scrub_range(self.scrub_start(), duration);
        let mime = self
            .media_info
            .as_ref()
            .and_then(|i| i.mime.clone())
            .unwrap_or_else(|| "(unknown)".to_string());
        self.renderer.show_status(&StatusMessage::info(format!(
            "Loaded / duration={duration:.3}s / {mime}"
        )));
    }

    fn seek_to_data_position(&mut self, data_position: f64) {
        let Some(media) = self.media.as_mut() else {
            tracing::debug!(data_position, "Seek ignored: no media attached");
            return;
        };
        if !data_position.is_finite() {
            return;
        }

        let target = self.sync.seek_target(data_position, media.duration());
        tracing::debug!(data_position, target, offset = self.sync.offset(), "Seek");
        media.seek(target);
    }

    fn step_frame(&mut self, direction: StepDirection) {
        let Some(media) = self.media.as_mut() else {
            tracing::debug!(?direction, "Step ignored: no media attached");
            return;
        };
        let target = step_target(
            media.position(),
            self.settings.fps,
            direction,
            media.duration(),
        );
        media.seek(target);
    }

    fn toggle_playback(&mut self) {
        let Some(media) = self.media.as_mut() else {
            tracing::debug!("Playback toggle ignored: no media attached");
            return;
        };
        if media.is_paused() {
            media.play();
        } else {
            media.pause();
        }
    }

    fn fit_view(&mut self) {
        if let Some(data) = &self.data {
            let (start, end) = data.timeline.fit_range();
            self.renderer.fit_view(start, end);
        }
    }

    fn on_key(&mut self, input: KeyInput) {
        if input.in_editable {
            return;
        }
        match input.key.as_str() {
            "ArrowLeft" => self.step_frame(StepDirection::Backward),
            "ArrowRight" => self.step_frame(StepDirection::Forward),
            " " | "Space" => self.toggle_playback(),
            _ => {}
        }
    }

    fn set_offset(&mut self, offset: f64) {
        self.sync.set_offset(offset);
        tracing::debug!(offset = self.sync.offset(), "Offset changed");
        let cursor = self.sync.reproject(self.media_position());
        self.renderer.move_cursor(&cursor);
    }

    fn set_frame_rate(&mut self, fps: f64) {
        self.settings.fps = rate_or_default(fps, DEFAULT_FPS);
        let Some(data) = self.data.as_mut() else {
            return;
        };
        if data.timeline.apply_frame_rate(&data.table, self.settings.fps) {
            if let Some((start, end)) = data.timeline.scrub_bounds() {
                self.renderer.set_scrub_range(start, end);
            }
            self.redraw();
        }
    }

    fn media_position(&self) -> f64 {
        self.media.as_ref().map_or(0.0, |m| m.position())
    }

    fn scrub_start(&self) -> f64 {
        self.data
            .as_ref()
            .and_then(|d| d.timeline.scrub_bounds())
            .map_or(0.0, |(start, _)| start)
    }

    /// Current cursor position on the data timeline.
    pub fn data_position(&self) -> f64 {
        self.sync.data_position(self.media_position())
    }

    /// Cursor as it would be published for the current media position.
    pub fn cursor(&self) -> CursorUpdate {
        self.sync.on_media_position(self.media_position())
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn offset(&self) -> f64 {
        self.sync.offset()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn table(&self) -> Option<&DataTable> {
        self.data.as_ref().map(|d| &d.table)
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.data.as_ref().map(|d| &d.timeline)
    }

    pub fn columns(&self) -> Option<&ColumnSet> {
        self.data.as_ref().map(|d| &d.columns)
    }

    pub fn media(&self) -> Option<&dyn MediaSource> {
        self.media.as_deref()
    }

    pub fn media_info(&self) -> Option<&MediaInfo> {
        self.media_info.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

fn sanitize_smoothing(secs: f64) -> f64 {
    if secs.is_finite() {
        secs.max(0.0)
    } else {
        0.0
    }
}
