//! Write display-ready traces.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use tracksync_common::config::ViewDefaults;
use tracksync_data_model::row::TIME_FIELD;
use tracksync_data_model::table::DataTable;
use tracksync_sync_engine::{PlotFrame, RecordingRenderer, Session, SessionCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full plot frame as JSON
    Json,
    /// One row per timestamp, one column per trace
    Csv,
}

pub fn run(
    path: PathBuf,
    view: &ViewDefaults,
    columns: &[String],
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let table = DataTable::load(&path)
        .with_context(|| format!("Failed to load table: {}", path.display()))?;

    let mut session = Session::with_defaults(view, RecordingRenderer::new());
    session.dispatch(SessionCommand::LoadTable(table));
    if !columns.is_empty() {
        session.dispatch(SessionCommand::SetSelection(columns.to_vec()));
        for key in columns {
            if !session.selection().contains(key) {
                tracing::warn!(column = %key, "Column is not plottable, skipping");
            }
        }
    }

    let Some(frame) = session.current_frame() else {
        eprintln!("Nothing to plot: no usable timestamps or numeric columns.");
        return Ok(());
    };

    let writer: Box<dyn Write> = match &output {
        Some(out) => Box::new(BufWriter::new(File::create(out).with_context(|| {
            format!("Failed to create output file: {}", out.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Json => write_json(writer, &frame)?,
        OutputFormat::Csv => write_csv(writer, &frame)?,
    }

    if let Some(out) = output {
        eprintln!(
            "Wrote {} trace(s) to {}",
            frame.traces.len(),
            out.display()
        );
    }
    Ok(())
}

fn write_json(mut writer: impl Write, frame: &PlotFrame) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, frame)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn write_csv(writer: impl Write, frame: &PlotFrame) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![TIME_FIELD.to_string()];
    header.extend(frame.traces.iter().map(|t| t.key.clone()));
    csv.write_record(&header)?;

    let timestamps = frame
        .traces
        .first()
        .map(|t| t.timestamps.as_slice())
        .unwrap_or_default();
    for (i, &t) in timestamps.iter().enumerate() {
        let mut record = vec![cell(t)];
        record.extend(frame.traces.iter().map(|trace| cell(trace.values[i])));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Gaps are written as empty cells.
fn cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
