//! Plays a whole session without camera or speakers: a scripted player
//! publishes synthetic landmark frames while a fixed-step loop ticks the
//! session.

use anyhow::{bail, Context};
use beatmap_schema::{BeatMap, PoseId, SessionSummary, Song};
use justmove_core::audio::NullAudio;
use justmove_core::config::GameConfig;
use justmove_core::input::FramePublisher;
use justmove_core::pose::{canonical_frame, neutral_frame};
use justmove_core::presentation::events::GameEvent;
use justmove_core::session::GameSession;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Upper bound on the ticks of one run, so a broken clock cannot spin forever.
const MAX_TICKS: u64 = 10_000_000;

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub config: GameConfig,
    /// Fixed step between ticks, in seconds.
    pub tick_seconds: f64,
    /// Chance that the scripted player strikes each target.
    pub accuracy: f64,
    /// Largest distance between the player's strike and the beat, in seconds.
    pub timing_spread: f64,
    pub seed: u64,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            tick_seconds: 1.0 / 60.0,
            accuracy: 0.9,
            timing_spread: 0.2,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub summary: SessionSummary,
    /// The generated map with every event resolved.
    pub beat_map: BeatMap,
    pub ticks: u64,
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    beat_index: usize,
    pose: PoseId,
    /// Song time at which the pose is struck; `None` means the player sits
    /// this one out.
    strike_at: Option<f64>,
}

/// Bot that reads each new target off the timeline and holds the requested
/// pose from its planned strike time until the beat is judged. Targets that
/// were superseded before the bot saw them are planned too.
pub struct ScriptedPlayer {
    publisher: FramePublisher,
    rng: StdRng,
    accuracy: f64,
    timing_spread: f64,
    plans: Vec<Plan>,
    /// First beat index not planned yet.
    next_unplanned: usize,
}

impl ScriptedPlayer {
    pub fn new(publisher: FramePublisher, accuracy: f64, timing_spread: f64, seed: u64) -> Self {
        Self {
            publisher,
            rng: StdRng::seed_from_u64(seed),
            accuracy: if accuracy.is_nan() { 0.0 } else { accuracy.clamp(0.0, 1.0) },
            timing_spread: if timing_spread.is_finite() { timing_spread.abs() } else { 0.0 },
            plans: Vec::new(),
            next_unplanned: 0,
        }
    }

    pub fn observe(&mut self, event: &GameEvent, beat_map: Option<&BeatMap>) {
        match *event {
            GameEvent::TargetChanged { beat_index, .. } => {
                let Some(map) = beat_map else {
                    return;
                };
                let last = beat_index.min(map.events.len().saturating_sub(1));
                for index in self.next_unplanned..=last {
                    let Some(beat) = map.events.get(index) else {
                        break;
                    };
                    if beat.scored {
                        continue;
                    }
                    let strike_at = if self.rng.gen_bool(self.accuracy) {
                        Some(beat.time_seconds + self.rng.gen_range(-self.timing_spread..=self.timing_spread))
                    } else {
                        None
                    };
                    self.plans.push(Plan {
                        beat_index: index,
                        pose: beat.pose,
                        strike_at,
                    });
                }
                self.next_unplanned = self.next_unplanned.max(last + 1);
            }
            GameEvent::Judged { beat_index, .. } => {
                self.plans.retain(|p| p.beat_index != beat_index);
            }
            _ => {}
        }
    }

    /// Publishes the body the player shows at song time `elapsed`: the pose
    /// of the earliest open beat whose strike time has come, else standing.
    pub fn act(&mut self, elapsed: f64) {
        let striking = self
            .plans
            .iter()
            .filter(|p| p.strike_at.is_some_and(|at| elapsed >= at))
            .min_by_key(|p| p.beat_index);
        let frame = match striking {
            Some(plan) => canonical_frame(plan.pose),
            None => neutral_frame(),
        };
        self.publisher.publish(Some(frame));
    }
}

pub fn run_headless(song: Song, options: &HeadlessOptions) -> anyhow::Result<HeadlessRun> {
    if !(options.tick_seconds.is_finite() && options.tick_seconds > 0.0) {
        bail!("tick length must be positive, got {}", options.tick_seconds);
    }

    let mut session = GameSession::with_config(song, NullAudio, options.config).with_seed(options.seed);
    let mut player = ScriptedPlayer::new(
        session.frame_publisher(),
        options.accuracy,
        options.timing_spread,
        options.seed.wrapping_add(1),
    );

    let token = session.start(0.0).context("failed to start session")?;
    let mut ticks = 0u64;
    while !token.is_cancelled() {
        if ticks >= MAX_TICKS {
            bail!("session did not finish after {MAX_TICKS} ticks");
        }
        let now = ticks as f64 * options.tick_seconds;
        session.tick(now);
        for event in session.events().drain() {
            if let GameEvent::Judged { beat_index, rating, timing } = &event {
                debug!(beat_index, %rating, ?timing, "judged");
            }
            player.observe(&event, session.beat_map());
        }
        player.act(session.elapsed() + options.tick_seconds);
        ticks += 1;
    }

    let summary = session.summary().cloned().context("session ended without a summary")?;
    let beat_map = session.beat_map().cloned().context("session ended without a beat map")?;
    info!(ticks, score = summary.score, grade = %summary.grade, "headless run complete");
    Ok(HeadlessRun {
        summary,
        beat_map,
        ticks,
    })
}
