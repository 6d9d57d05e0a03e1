//! Drive a session against a simulated player.

use std::path::PathBuf;

use anyhow::Context;
use tracksync_common::clock::format_secs;
use tracksync_common::config::ViewDefaults;
use tracksync_data_model::table::DataTable;
use tracksync_sync_engine::{
    CursorUpdate, MediaSource, PlotFrame, Renderer, Session, SessionCommand, SimulatedMedia,
    StatusKind, StatusMessage, StepDirection,
};

/// Transport actions to replay, in order: position, scrub, steps.
pub struct SyncRequest {
    pub media_position: f64,
    pub duration: Option<f64>,
    pub scrub: Option<f64>,
    pub step: i64,
}

/// Most frames a single `--step` request walks through.
const MAX_STEP_FRAMES: u64 = 10_000;

/// Direction and clamped frame count for a signed step request.
fn step_plan(step: i64) -> Option<(StepDirection, u64)> {
    let direction = match step.signum() {
        1 => StepDirection::Forward,
        -1 => StepDirection::Backward,
        _ => return None,
    };
    Some((direction, step.unsigned_abs().min(MAX_STEP_FRAMES)))
}

/// Prints every renderer call as one line.
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, frame: &PlotFrame) {
        let keys: Vec<&str> = frame.traces.iter().map(|t| t.key.as_str()).collect();
        println!(
            "[plot]   {} trace(s): {} ({})",
            keys.len(),
            keys.join(", "),
            frame.y_label
        );
    }

    fn move_cursor(&mut self, cursor: &CursorUpdate) {
        match cursor.scrub_value {
            Some(_) => println!("[cursor] {}", cursor.label),
            None => println!("[cursor] {} (scrub unchanged)", cursor.label),
        }
    }

    fn show_status(&mut self, status: &StatusMessage) {
        match status.kind {
            StatusKind::Info => println!("[status] {}", status.text),
            StatusKind::MediaError => eprintln!("[media]  {}", status.text),
        }
    }

    fn set_scrub_range(&mut self, start: f64, end: f64) {
        println!("[scrub]  {} .. {}", format_secs(start), format_secs(end));
    }
}

pub fn run(path: PathBuf, view: &ViewDefaults, request: SyncRequest) -> anyhow::Result<()> {
    let table = DataTable::load(&path)
        .with_context(|| format!("Failed to load table: {}", path.display()))?;

    let mut session = Session::with_defaults(view, ConsoleRenderer);
    session.dispatch(SessionCommand::LoadTable(table));

    let mut media = SimulatedMedia::new(request.duration);
    media.seek(request.media_position.max(0.0));
    session.attach_media(Box::new(media), None);
    if request.duration.is_some() {
        session.dispatch(SessionCommand::MediaMetadataLoaded);
    }
    session.dispatch(SessionCommand::MediaTimeUpdate);

    if let Some(data_position) = request.scrub {
        session.dispatch(SessionCommand::Scrub(data_position));
        session.dispatch(SessionCommand::MediaTimeUpdate);
    }

    if let Some((direction, count)) = step_plan(request.step) {
        if count < request.step.unsigned_abs() {
            tracing::warn!(
                requested = request.step,
                limit = MAX_STEP_FRAMES,
                "Step count clamped"
            );
        }
        for _ in 0..count {
            session.dispatch(SessionCommand::StepFrame(direction));
        }
        session.dispatch(SessionCommand::MediaTimeUpdate);
    }

    let media_position = session.media().map_or(0.0, |m| m.position());
    let data_position = session.data_position();
    println!();
    println!("Offset: {:+.3}s", session.offset());
    println!("Media position: {media_position:.3}s");
    println!("Data position: {data_position:.3}s");

    if let Some(timeline) = session.timeline() {
        let nearest = timeline
            .timestamps()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_finite())
            .min_by(|(_, a), (_, b)| {
                (*a - data_position)
                    .abs()
                    .total_cmp(&(*b - data_position).abs())
            });
        if let Some((row, t)) = nearest {
            println!("Nearest row: {row} (t={})", format_secs(*t));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_plan_is_signed_and_bounded() {
        assert_eq!(step_plan(0), None);
        assert_eq!(step_plan(3), Some((StepDirection::Forward, 3)));
        assert_eq!(step_plan(-2), Some((StepDirection::Backward, 2)));
        assert_eq!(
            step_plan(i64::MAX),
            Some((StepDirection::Forward, MAX_STEP_FRAMES))
        );
        assert_eq!(
            step_plan(i64::MIN),
            Some((StepDirection::Backward, MAX_STEP_FRAMES))
        );
    }
}
