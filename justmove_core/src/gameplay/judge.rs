use beatmap_schema::{BeatEvent, PoseId, Rating, TimingHint};

use crate::config::{GameConfig, JudgeWindows, RatingThresholds};
use crate::gameplay::score::{ScoreState, ScoreUpdate};
use crate::pose::{match_pose, LandmarkFrame};

#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentResult {
    pub beat_index: usize,
    pub rating: Rating,
    pub timing: Option<TimingHint>,
    /// `elapsed - beat time` when the rating was decided.
    pub delta: f64,
    pub update: ScoreUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTarget {
    pub beat_index: usize,
    pub pose: PoseId,
}

/// Everything that happened during one tick, in the order the presentation
/// layer should show it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub target_changed: Option<ActiveTarget>,
    /// Latest match value computed this tick, if any beat was being evaluated.
    pub match_meter: Option<f64>,
    pub judgments: Vec<JudgmentResult>,
}

pub struct JudgeMachine {
    /// Index of the first beat that is not scored yet.
    pub next_beat_index: usize,
    active: Option<ActiveTarget>,
    match_value: f64,
    windows: JudgeWindows,
    thresholds: RatingThresholds,
}

impl Default for JudgeMachine {
    fn default() -> Self {
        Self::with_config(&GameConfig::default())
    }
}

impl JudgeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            next_beat_index: 0,
            active: None,
            match_value: 0.0,
            windows: config.judge,
            thresholds: config.ratings,
        }
    }

    pub fn active_target(&self) -> Option<ActiveTarget> {
        self.active
    }

    /// Last match value shown on the meter.
    pub fn match_value(&self) -> f64 {
        self.match_value
    }

    /// Advances judgment to `elapsed` seconds into the song.
    ///
    /// `frame` is the latest pose the estimator delivered, if any. Each beat
    /// that becomes scored here is passed to `score` exactly once.
    pub fn tick(
        &mut self,
        elapsed: f64,
        frame: Option<&LandmarkFrame>,
        beats: &mut [BeatEvent],
        score: &mut ScoreState,
    ) -> TickReport {
        let w = self.windows;
        let mut report = TickReport::default();
        let mut latest_ready = None;

        for index in self.next_beat_index..beats.len() {
            let beat = &mut beats[index];
            let until = beat.time_seconds - elapsed;
            if until > w.lookahead_cutoff {
                break;
            }
            if beat.scored {
                continue;
            }

            let delta = elapsed - beat.time_seconds;
            if delta >= -w.evaluation_early && delta <= w.evaluation_late {
                if let Some(frame) = frame {
                    let value = match_pose(beat.pose, frame);
                    self.match_value = value;
                    report.match_meter = Some(value);

                    let rating = if delta <= w.scoring_late {
                        self.thresholds.rate(value)
                    } else {
                        None
                    };
                    if let Some(rating) = rating {
                        let timing = timing_hint(rating, delta, w.timing_hint_threshold);
                        report.judgments.extend(resolve(index, beat, rating, timing, delta, score));
                        continue;
                    }
                }
            } else if delta > w.evaluation_late {
                report.judgments.extend(resolve(index, beat, Rating::Miss, None, delta, score));
                continue;
            }

            // Later beats inside the lead supersede earlier ones; a beat past
            // its scoring window no longer qualifies.
            if until < w.activation_lead && delta <= w.scoring_late {
                latest_ready = Some((index, beat.pose));
            }
        }

        if let Some((beat_index, pose)) = latest_ready {
            if self.active.map(|a| a.beat_index) != Some(beat_index) {
                let target = ActiveTarget { beat_index, pose };
                self.active = Some(target);
                report.target_changed = Some(target);
            }
        }

        while beats.get(self.next_beat_index).is_some_and(|b| b.scored) {
            self.next_beat_index += 1;
        }

        report
    }

    pub fn reset(&mut self) {
        self.next_beat_index = 0;
        self.active = None;
        self.match_value = 0.0;
    }
}

fn timing_hint(rating: Rating, delta: f64, threshold: f64) -> Option<TimingHint> {
    if rating == Rating::Perfect || delta.abs() <= threshold {
        None
    } else if delta < 0.0 {
        Some(TimingHint::Early)
    } else {
        Some(TimingHint::Late)
    }
}

fn resolve(
    beat_index: usize,
    beat: &mut BeatEvent,
    rating: Rating,
    timing: Option<TimingHint>,
    delta: f64,
    score: &mut ScoreState,
) -> Option<JudgmentResult> {
    if !beat.resolve(rating, timing) {
        return None;
    }
    let update = score.apply_rating(rating);
    tracing::debug!(beat_index, %rating, delta, ?timing, "beat judged");
    Some(JudgmentResult {
        beat_index,
        rating,
        timing,
        delta,
        update,
    })
}
