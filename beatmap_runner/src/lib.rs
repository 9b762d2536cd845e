use std::{fs, path::Path};

use anyhow::{ensure, Context};
use beatmap_schema::BeatMap;

pub mod headless;

pub use self::headless::{run_headless, HeadlessOptions, HeadlessRun, ScriptedPlayer};

pub fn load_beatmap_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<BeatMap> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read beat map: {}", path.display()))?;
    let map: BeatMap = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse beat map json: {}", path.display()))?;
    check_beatmap(&map).with_context(|| format!("invalid beat map: {}", path.display()))?;
    Ok(map)
}

pub fn load_beatmap_json_from_str(json: &str) -> anyhow::Result<BeatMap> {
    let map: BeatMap = serde_json::from_str(json).context("failed to parse beat map json")?;
    check_beatmap(&map).context("invalid beat map")?;
    Ok(map)
}

pub fn save_beatmap_json(path: impl AsRef<Path>, map: &BeatMap) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(map).context("failed to serialize beat map")?;
    fs::write(path, json).with_context(|| format!("failed to write: {}", path.display()))?;
    Ok(())
}

/// Structural checks a hand-edited file might break: a usable song and
/// events in strictly increasing time inside the song.
pub fn check_beatmap(map: &BeatMap) -> anyhow::Result<()> {
    let song = &map.song;
    ensure!(
        song.tempo_bpm.is_finite() && song.tempo_bpm > 0.0,
        "tempo must be positive, got {}",
        song.tempo_bpm
    );
    ensure!(
        song.duration_seconds.is_finite() && song.duration_seconds > 0.0,
        "duration must be positive, got {}",
        song.duration_seconds
    );

    for (index, event) in map.events.iter().enumerate() {
        ensure!(
            (0.0..=song.duration_seconds).contains(&event.time_seconds),
            "event {index} at {}s lies outside the song",
            event.time_seconds
        );
    }
    for (index, pair) in map.events.windows(2).enumerate() {
        ensure!(
            pair[1].time_seconds > pair[0].time_seconds,
            "event {} at {}s is not after event {index} at {}s",
            index + 1,
            pair[1].time_seconds,
            pair[0].time_seconds
        );
    }
    Ok(())
}
