//! Show table, timeline, and column information.

use std::path::PathBuf;

use anyhow::Context;
use tracksync_common::clock::{format_secs, rate_or_default};
use tracksync_common::config::{ViewDefaults, DEFAULT_FPS};
use tracksync_data_model::table::DataTable;
use tracksync_processing_core::{ColumnSet, Selection, TimeSource, Timeline};

pub fn run(path: PathBuf, view: &ViewDefaults) -> anyhow::Result<()> {
    let table = DataTable::load(&path)
        .with_context(|| format!("Failed to load table: {}", path.display()))?;

    let fps = rate_or_default(view.fps, DEFAULT_FPS);
    let timeline = Timeline::build(&table, fps);
    let columns = ColumnSet::scan(&table);
    let selection = Selection::preferred(&columns, &view.default_columns);

    println!("Table: {}", path.display());
    println!("  Rows: {}", table.len());
    println!("  Fields: {}", table.headers().join(", "));
    println!("  Loaded: {}", table.loaded_at());
    println!();

    println!("Timeline:");
    match timeline.source() {
        TimeSource::TimeField => println!("  Source: time_sec"),
        TimeSource::FrameIndex => println!("  Source: frame / {fps} fps"),
    }
    println!("  dt: {:.4}s", timeline.dt());
    match timeline.extent() {
        Some((start, end)) => println!("  Extent: {} .. {}", format_secs(start), format_secs(end)),
        None => println!("  Extent: (no usable timestamps)"),
    }
    println!();

    println!("Columns ({} numeric):", columns.len());
    for key in columns.keys() {
        let marker = if selection.contains(key) { "*" } else { " " };
        println!("  {marker} {key}");
    }
    if selection.is_empty() {
        if let Some(first) = columns.first() {
            println!("  (no default columns present; {} is drawn)", first.key);
        }
    }

    Ok(())
}
