//! Probe a media file.

use std::path::PathBuf;

use anyhow::Context;
use tracksync_data_model::media::{MediaInfo, Playability};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let info = MediaInfo::probe(&path)
        .with_context(|| format!("Failed to probe media: {}", path.display()))?;

    println!("Tracksync Media Check");
    println!("{}", "=".repeat(50));
    println!("File: {}", info.file_name());
    println!("Size: {:.1} MB", info.size_mb());
    println!("Type: {}", info.mime.as_deref().unwrap_or("(unknown)"));
    println!();

    match info.playability {
        Playability::Probably => println!("[OK] Container is widely supported."),
        Playability::Maybe => {
            println!("[WARN] Container support depends on the player and codec.")
        }
        Playability::No => {
            println!("[FAIL] Container is unlikely to play. Re-encode to MP4 (H.264) or WebM.")
        }
    }

    Ok(())
}
