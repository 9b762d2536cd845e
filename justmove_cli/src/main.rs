mod logging;
mod simulate;

use std::path::PathBuf;

use anyhow::Context;
use beatmap_runner::HeadlessOptions;
use beatmap_schema::{Difficulty, Song, Style};
use clap::{Args, Parser, Subcommand};
use justmove_core::beatmap::catalog::{preset, PRESETS};
use justmove_core::beatmap::generate_with_rng;
use justmove_core::config::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Parser)]
#[command(name = "justmove")]
#[command(about = "Pose rhythm game tools", long_about = None)]
struct Cli {
    /// Show debug logs.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in songs.
    Songs,
    /// Generate a beat map and write it as JSON.
    Generate {
        #[command(flatten)]
        song: SongArgs,
        #[arg(long)]
        seed: Option<u64>,
        /// Output file; prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the timeline of a beat map file.
    Simulate { input: PathBuf },
    /// Play a song headless with a scripted player and print the summary.
    Play {
        #[command(flatten)]
        song: SongArgs,
        /// Chance that the player strikes each target.
        #[arg(long, default_value_t = 0.9)]
        accuracy: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Game config JSON (judge windows, rating thresholds, countdown).
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 16)]
        tick_ms: u32,
        /// Also write the judged beat map to this file.
        #[arg(long)]
        replay: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct SongArgs {
    /// Built-in song key, see `songs`.
    #[arg(long, conflicts_with_all = ["bpm", "duration", "difficulty", "style"])]
    song: Option<String>,
    #[arg(long, default_value_t = 120.0)]
    bpm: f64,
    /// Length in seconds.
    #[arg(long, default_value_t = 60.0)]
    duration: f64,
    #[arg(long, default_value = "medium")]
    difficulty: String,
    #[arg(long, default_value = "pop")]
    style: String,
}

impl SongArgs {
    fn resolve(&self) -> anyhow::Result<Song> {
        if let Some(key) = &self.song {
            return Ok(preset(key)?.song);
        }
        let difficulty: Difficulty = self.difficulty.parse()?;
        let style: Style = self.style.parse()?;
        Ok(Song::new(self.bpm, self.duration, difficulty, style)?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Command::Songs => {
            for p in &PRESETS {
                println!(
                    "{:<16} {:<16} {:>5.0} BPM {:>4.0}s {:<6} {}",
                    p.key,
                    p.title,
                    p.song.tempo_bpm,
                    p.song.duration_seconds,
                    p.song.difficulty.to_string(),
                    p.song.style
                );
            }
        }
        Command::Generate { song, seed, output } => {
            let song = song.resolve().context("invalid song")?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let map = generate_with_rng(&song, &mut rng);
            match output {
                Some(path) => {
                    beatmap_runner::save_beatmap_json(&path, &map)?;
                    tracing::info!(path = %path.display(), events = map.events.len(), "wrote beat map");
                }
                None => {
                    let json = serde_json::to_string_pretty(&map).context("failed to serialize beat map")?;
                    println!("{json}");
                }
            }
        }
        Command::Simulate { input } => {
            let map = beatmap_runner::load_beatmap_json_from_path(&input)?;
            simulate::run_simulation(&map)?;
        }
        Command::Play {
            song,
            accuracy,
            seed,
            config,
            tick_ms,
            replay,
        } => {
            let song = song.resolve().context("invalid song")?;
            let config = match config {
                Some(path) => GameConfig::from_json_path(&path)?,
                None => GameConfig::default(),
            };
            let options = HeadlessOptions {
                config,
                tick_seconds: f64::from(tick_ms) / 1000.0,
                accuracy,
                seed,
                ..HeadlessOptions::default()
            };
            let run = beatmap_runner::run_headless(song, &options).context("play failed")?;
            if let Some(path) = replay {
                beatmap_runner::save_beatmap_json(&path, &run.beat_map)?;
            }
            let json = serde_json::to_string_pretty(&run.summary).context("failed to serialize summary")?;
            println!("{json}");
        }
    }

    Ok(())
}
