//! The game session: one struct owning every piece of mutable play state,
//! advanced by the host once per rendered frame.
//!
//! Phases run `Menu -> Countdown -> Playing -> Results`. `retry` goes from
//! `Results` back through the countdown and `return_to_menu` works from
//! anywhere.

pub mod cancel;
pub mod countdown;

use std::sync::Arc;

use atomic_float::AtomicF64;
use beatmap_schema::{BeatMap, SessionSummary, Song};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::audio::AudioBackend;
use crate::beatmap::generate_with_rng;
use crate::config::GameConfig;
use crate::error::SessionError;
use crate::gameplay::{visible_markers, BeatMarker, JudgeMachine, ScoreState, TickReport};
use crate::input::{FrameMailbox, FramePublisher};
use crate::pose::LandmarkFrame;
use crate::presentation::events::GameEvent;
use crate::presentation::EventQueue;
use crate::time::SessionClock;

pub use self::cancel::CancelToken;
pub use self::countdown::{Countdown, CountdownStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Menu,
    Countdown,
    Playing,
    Results,
}

pub struct GameSession<A: AudioBackend> {
    config: GameConfig,
    audio: A,
    song: Song,
    phase: Phase,
    countdown: Option<Countdown>,
    clock: SessionClock,
    judge: JudgeMachine,
    score: ScoreState,
    beat_map: Option<BeatMap>,
    summary: Option<SessionSummary>,
    frames: FrameMailbox,
    events: EventQueue,
    token: CancelToken,
    rng: StdRng,
    /// Last meter value sent, so unchanged readings are not re-queued.
    last_meter: Option<f64>,
}

impl<A: AudioBackend> GameSession<A> {
    pub fn new(song: Song, audio: A) -> Self {
        Self::with_config(song, audio, GameConfig::default())
    }

    pub fn with_config(song: Song, audio: A, config: GameConfig) -> Self {
        Self {
            config,
            audio,
            song,
            phase: Phase::Menu,
            countdown: None,
            clock: SessionClock::new(),
            judge: JudgeMachine::with_config(&config),
            score: ScoreState::new(),
            beat_map: None,
            summary: None,
            frames: FrameMailbox::new(),
            events: EventQueue::new(),
            token: CancelToken::new(),
            rng: StdRng::from_entropy(),
            last_meter: None,
        }
    }

    /// Makes pose assignment of generated beat maps reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn frame_publisher(&self) -> FramePublisher {
        self.frames.publisher()
    }

    /// Most recent body the estimator delivered, for drawing the skeleton
    /// overlay. Cleared whenever a run begins.
    pub fn latest_frame(&self) -> Option<LandmarkFrame> {
        self.frames.latest()
    }

    /// Outbound events. The host drains this once per frame; a queue left
    /// undrained keeps only the newest events.
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Beat map of the current run; generated when play begins.
    pub fn beat_map(&self) -> Option<&BeatMap> {
        self.beat_map.as_ref()
    }

    /// Result of the last finished run, held while in `Results`.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Seconds into the song as of the last tick.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn playhead(&self) -> Arc<AtomicF64> {
        self.clock.playhead()
    }

    /// Beats currently on the timeline strip.
    pub fn markers(&self) -> Vec<BeatMarker> {
        match &self.beat_map {
            Some(map) if self.phase == Phase::Playing => visible_markers(&map.events, self.clock.elapsed()),
            _ => Vec::new(),
        }
    }

    pub fn select_song(&mut self, song: Song) -> Result<(), SessionError> {
        match self.phase {
            Phase::Menu | Phase::Results => {
                self.song = song;
                Ok(())
            }
            from => Err(SessionError::InvalidTransition {
                from,
                action: "select a song",
            }),
        }
    }

    /// Leaves the menu and starts the countdown. The returned token is
    /// cancelled once the host can stop ticking.
    pub fn start(&mut self, now: f64) -> Result<CancelToken, SessionError> {
        if self.phase != Phase::Menu {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "start",
            });
        }
        Ok(self.begin_countdown(now))
    }

    /// Plays the same song again from the results screen.
    pub fn retry(&mut self, now: f64) -> Result<CancelToken, SessionError> {
        if self.phase != Phase::Results {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "retry",
            });
        }
        Ok(self.begin_countdown(now))
    }

    /// Abandons whatever is running. Safe to call repeatedly.
    pub fn return_to_menu(&mut self) {
        if self.phase == Phase::Menu {
            return;
        }
        self.token.cancel();
        if self.phase == Phase::Playing {
            self.audio.stop();
        }
        self.countdown = None;
        self.clock.stop();
        self.discard_run();
        self.summary = None;
        self.set_phase(Phase::Menu);
    }

    /// Advances the session to host time `now`. Does nothing outside the
    /// countdown and playing phases.
    pub fn tick(&mut self, now: f64) {
        if self.phase == Phase::Countdown {
            self.tick_countdown(now);
        }
        if self.phase == Phase::Playing {
            self.tick_playing(now);
        }
    }

    fn begin_countdown(&mut self, now: f64) -> CancelToken {
        self.token.cancel();
        self.token = CancelToken::new();
        self.discard_run();
        self.summary = None;
        self.countdown = Some(Countdown::new(&self.config.countdown, now));
        self.set_phase(Phase::Countdown);
        self.token.clone()
    }

    fn discard_run(&mut self) {
        self.beat_map = None;
        self.score.reset();
        self.judge.reset();
        self.frames.clear();
        self.last_meter = None;
    }

    fn tick_countdown(&mut self, now: f64) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        for step in countdown.advance(now) {
            match step {
                CountdownStep::Number(n) => self.events.push(GameEvent::CountdownTick(n)),
                CountdownStep::Go => self.events.push(GameEvent::CountdownGo),
                CountdownStep::Done => {
                    self.countdown = None;
                    self.enter_playing(now);
                    break;
                }
            }
        }
    }

    fn enter_playing(&mut self, started_at: f64) {
        let map = generate_with_rng(&self.song, &mut self.rng);
        info!(
            tempo = self.song.tempo_bpm,
            duration = self.song.duration_seconds,
            difficulty = %self.song.difficulty,
            style = %self.song.style,
            beats = map.events.len(),
            "starting play"
        );
        self.beat_map = Some(map);
        self.clock.start(started_at);
        self.audio
            .play(self.song.tempo_bpm, self.song.duration_seconds, self.song.style);
        self.set_phase(Phase::Playing);
        self.events.push(GameEvent::Hud(self.score.snapshot()));
    }

    fn tick_playing(&mut self, now: f64) {
        let Some(map) = self.beat_map.as_mut() else {
            return;
        };
        let elapsed = self.clock.update(now);
        let frame = self.frames.latest();
        let report = self
            .judge
            .tick(elapsed, frame.as_ref(), &mut map.events, &mut self.score);
        self.publish(report);

        if elapsed >= self.song.duration_seconds {
            self.finish();
        }
    }

    fn publish(&mut self, report: TickReport) {
        if let Some(target) = report.target_changed {
            debug!(beat_index = target.beat_index, pose = %target.pose, "new target");
            self.events.push(GameEvent::TargetChanged {
                beat_index: target.beat_index,
                pose: target.pose,
            });
        }
        if let Some(value) = report.match_meter {
            if self.last_meter != Some(value) {
                self.last_meter = Some(value);
                self.events.push(GameEvent::MatchMeter(value));
            }
        }
        let judged = !report.judgments.is_empty();
        for result in report.judgments {
            self.events.push(GameEvent::Judged {
                beat_index: result.beat_index,
                rating: result.rating,
                timing: result.timing,
            });
            if let Some(combo) = result.update.milestone {
                self.events.push(GameEvent::ComboMilestone(combo));
            }
        }
        if judged {
            self.events.push(GameEvent::Hud(self.score.snapshot()));
        }
    }

    fn finish(&mut self) {
        self.audio.stop();
        self.clock.stop();
        self.token.cancel();

        let beat_count = self.beat_map.as_ref().map_or(0, |m| m.events.len());
        let summary = self.score.summary(beat_count);
        info!(
            score = summary.score,
            grade = %summary.grade,
            max_combo = summary.max_combo,
            percentage = summary.percentage,
            "session finished"
        );
        self.summary = Some(summary.clone());
        self.set_phase(Phase::Results);
        self.events.push(GameEvent::Finished(summary));
    }

    fn set_phase(&mut self, phase: Phase) {
        info!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }
}
