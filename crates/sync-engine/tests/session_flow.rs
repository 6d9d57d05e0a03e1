//! Session behavior against the sample session fixture and a simulated player.

use std::path::PathBuf;

use tracksync_common::config::ViewDefaults;
use tracksync_data_model::media::{MediaErrorKind, MediaInfo};
use tracksync_data_model::table::DataTable;
use tracksync_sync_engine::{
    KeyInput, MediaSource, RecordingRenderer, Session, SessionCommand, SimulatedMedia,
    StatusKind, StepDirection,
};

fn fixture() -> DataTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/sample-session/metrics.csv");
    DataTable::load(&path).unwrap()
}

fn loaded_session(offset: f64, duration: Option<f64>) -> Session<RecordingRenderer> {
    let view = ViewDefaults {
        offset_secs: offset,
        ..ViewDefaults::default()
    };
    let mut session = Session::with_defaults(&view, RecordingRenderer::new());
    session.dispatch(SessionCommand::LoadTable(fixture()));
    session.attach_media(
        Box::new(SimulatedMedia::new(duration)),
        Some(MediaInfo::describe(
            &PathBuf::from("/videos/session.mp4"),
            5 * 1024 * 1024,
        )),
    );
    session
}

#[test]
fn load_reports_table_summary_and_default_selection() {
    let session = loaded_session(0.0, Some(2.0));

    assert_eq!(
        session.selection().keys(),
        ["pfgi", "tui", "tfe_peak_rate", "com_velocity"]
    );

    let statuses = &session.renderer().statuses;
    assert!(statuses
        .iter()
        .any(|s| s.text == "CSV: 20 rows / 4 numeric columns / dt≈0.050s"));
    assert!(statuses
        .iter()
        .any(|s| s.text.starts_with("Video: session.mp4 (5.0 MB, video/mp4)")));

    let frame = session.renderer().last_frame().unwrap();
    assert_eq!(frame.traces.len(), 4);
    assert_eq!(frame.cursor, 0.0);
    assert_eq!(session.renderer().scrub_range, Some((0.0, 0.95)));
}

#[test]
fn scrub_then_time_update_keeps_cursor_consistent() {
    let mut session = loaded_session(1.5, Some(10.0));

    session.dispatch(SessionCommand::Scrub(0.5));
    assert_eq!(session.media().unwrap().position(), 2.0);

    session.dispatch(SessionCommand::MediaTimeUpdate);
    let cursor = session.renderer().last_cursor().unwrap();
    assert_eq!(cursor.position, 0.5);
    assert_eq!(cursor.scrub_value, Some(0.5));
    assert_eq!(cursor.label, "0.50s");
    assert_eq!(session.data_position(), 0.5);
}

#[test]
fn plot_click_behaves_like_scrub() {
    let mut a = loaded_session(0.25, Some(10.0));
    let mut b = loaded_session(0.25, Some(10.0));

    a.dispatch(SessionCommand::Scrub(0.7));
    b.dispatch(SessionCommand::PlotClick(0.7));
    assert_eq!(a.media().unwrap().position(), b.media().unwrap().position());
}

#[test]
fn offset_change_moves_cursor_only() {
    let mut session = loaded_session(0.0, Some(10.0));
    session.dispatch(SessionCommand::Scrub(0.8));
    session.dispatch(SessionCommand::MediaTimeUpdate);
    let draws = session.renderer().frames.len();

    session.dispatch(SessionCommand::SetOffset(0.3));
    let cursor = session.renderer().last_cursor().unwrap();
    assert!((cursor.position - 0.5).abs() < 1e-12);
    assert_eq!(cursor.scrub_value, None);
    assert_eq!(session.media().unwrap().position(), 0.8);
    assert_eq!(session.renderer().frames.len(), draws);
}

#[test]
fn frame_rate_change_leaves_time_field_timeline_alone() {
    let mut session = loaded_session(0.0, None);
    let before = session.timeline().unwrap().clone();

    session.dispatch(SessionCommand::SetFrameRate(120.0));
    assert_eq!(session.timeline().unwrap(), &before);

    // stepping still uses the new rate
    session.dispatch(SessionCommand::StepFrame(StepDirection::Forward));
    assert!((session.media().unwrap().position() - 1.0 / 120.0).abs() < 1e-12);
}

#[test]
fn media_error_keeps_data_side_intact() {
    let mut session = loaded_session(0.0, Some(10.0));
    let frames = session.renderer().frames.len();

    session.dispatch(SessionCommand::MediaFailed {
        kind: MediaErrorKind::from_code(3),
        detail: "corrupt stream".into(),
    });
    session.dispatch(SessionCommand::MediaStalled);

    let errors: Vec<_> = session
        .renderer()
        .statuses
        .iter()
        .filter(|s| s.kind == StatusKind::MediaError)
        .collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].text, "Playback error: DECODE (corrupt stream)");

    assert_eq!(session.renderer().frames.len(), frames);
    assert_eq!(session.columns().unwrap().len(), 4);

    session.dispatch(SessionCommand::SetNormalize(true));
    assert_eq!(session.renderer().frames.len(), frames + 1);
}

#[test]
fn keyboard_controls_transport_outside_editable_fields() {
    let mut session = loaded_session(0.0, Some(1.0));

    session.dispatch(SessionCommand::Key(KeyInput::new("ArrowRight")));
    session.dispatch(SessionCommand::Key(KeyInput::new("ArrowRight")));
    let two_frames = session.media().unwrap().position();
    assert!((two_frames - 2.0 / 30.0).abs() < 1e-12);

    session.dispatch(SessionCommand::Key(KeyInput::in_editable("ArrowRight")));
    session.dispatch(SessionCommand::Key(KeyInput::in_editable(" ")));
    assert_eq!(session.media().unwrap().position(), two_frames);
    assert!(session.media().unwrap().is_paused());

    session.dispatch(SessionCommand::Key(KeyInput::new(" ")));
    assert!(!session.media().unwrap().is_paused());

    session.dispatch(SessionCommand::Key(KeyInput::new("x")));
    assert_eq!(session.media().unwrap().position(), two_frames);
}

#[test]
fn metadata_widens_scrub_range_to_media_duration() {
    let mut session = loaded_session(0.0, Some(4.5));
    session.dispatch(SessionCommand::MediaMetadataLoaded);
    assert_eq!(session.renderer().scrub_range, Some((0.0, 4.5)));

    session.dispatch(SessionCommand::FitView);
    assert_eq!(session.renderer().view_range, Some((0.0, 0.95)));
}
