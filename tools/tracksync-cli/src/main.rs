//! Tracksync CLI: inspect metric tables, export traces, and drive media/data sync.
//!
//! Usage:
//!   tracksync info <CSV>        Show table, timeline, and column information
//!   tracksync plot <CSV>        Write display-ready traces as JSON or CSV
//!   tracksync sync <CSV>        Drive a session against a simulated player
//!   tracksync check <VIDEO>     Probe a media file
//!   tracksync config [--init]   Show or create the configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracksync_common::config::AppConfig;

mod commands;

use commands::plot::OutputFormat;

#[derive(Parser)]
#[command(
    name = "tracksync",
    about = "Review behavioral metrics in sync with a video recording",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show table, timeline, and column information
    Info {
        /// Path to the metrics table
        path: PathBuf,

        /// Fallback FPS for frame-indexed tables
        #[arg(long)]
        fps: Option<f64>,
    },

    /// Write display-ready traces
    Plot {
        /// Path to the metrics table
        path: PathBuf,

        /// Columns to draw (comma-separated); defaults come from config
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Smoothing window in seconds (0 disables)
        #[arg(long)]
        smooth: Option<f64>,

        /// Scale each trace to [0, 1]
        #[arg(long)]
        normalize: bool,

        /// Fallback FPS for frame-indexed tables
        #[arg(long)]
        fps: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Drive a session with a simulated player and report cursor positions
    Sync {
        /// Path to the metrics table
        path: PathBuf,

        /// Starting media position (seconds)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        media_position: f64,

        /// Sync offset in seconds (media time minus data time)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,

        /// Media duration in seconds (unknown when omitted)
        #[arg(long)]
        duration: Option<f64>,

        /// Scrub to this data-timeline position
        #[arg(long, allow_hyphen_values = true)]
        scrub: Option<f64>,

        /// Step this many frames (negative steps backward, at most 10000)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        step: i64,

        /// Frame rate for stepping and frame-indexed tables
        #[arg(long)]
        fps: Option<f64>,
    },

    /// Probe a media file
    Check {
        /// Path to the video file
        path: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    tracksync_common::logging::init_logging(&logging);

    let mut view = config.view;
    match cli.command {
        Commands::Info { path, fps } => {
            if let Some(fps) = fps {
                view.fps = fps;
            }
            commands::info::run(path, &view)
        }
        Commands::Plot {
            path,
            columns,
            smooth,
            normalize,
            fps,
            format,
            output,
        } => {
            if let Some(secs) = smooth {
                view.smoothing_secs = secs;
            }
            if let Some(fps) = fps {
                view.fps = fps;
            }
            view.normalize |= normalize;
            commands::plot::run(path, &view, &columns, format, output)
        }
        Commands::Sync {
            path,
            media_position,
            offset,
            duration,
            scrub,
            step,
            fps,
        } => {
            if let Some(offset) = offset {
                view.offset_secs = offset;
            }
            if let Some(fps) = fps {
                view.fps = fps;
            }
            commands::sync::run(
                path,
                &view,
                commands::sync::SyncRequest {
                    media_position,
                    duration,
                    scrub,
                    step,
                },
            )
        }
        Commands::Check { path } => commands::check::run(path),
        Commands::Config { init, force } => commands::config::run(init, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_accepts_negative_positions() {
        let cli = Cli::try_parse_from([
            "tracksync",
            "sync",
            "metrics.csv",
            "--media-position",
            "-2.5",
            "--offset",
            "-1",
            "--scrub",
            "-0.5",
            "--step",
            "-3",
        ])
        .unwrap();

        match cli.command {
            Commands::Sync {
                media_position,
                offset,
                scrub,
                step,
                ..
            } => {
                assert_eq!(media_position, -2.5);
                assert_eq!(offset, Some(-1.0));
                assert_eq!(scrub, Some(-0.5));
                assert_eq!(step, -3);
            }
            _ => panic!("expected sync command"),
        }
    }

    #[test]
    fn config_force_requires_init() {
        assert!(Cli::try_parse_from(["tracksync", "config", "--force"]).is_err());
        assert!(Cli::try_parse_from(["tracksync", "config", "--init", "--force"]).is_ok());
    }
}
