use beatmap_schema::{Grade, Rating, RatingCounts, SessionSummary};
use serde::{Deserialize, Serialize};

pub const MAX_MULTIPLIER: u32 = 8;
/// Consecutive hits needed to raise the multiplier by one step.
pub const COMBO_PER_STEP: u32 = 5;
pub const COMBO_MILESTONES: [u32; 5] = [10, 25, 50, 100, 200];

pub fn multiplier_for(combo: u32) -> u32 {
    (1 + combo / COMBO_PER_STEP).min(MAX_MULTIPLIER)
}

/// Running score of one session. Created fresh per session and mutated only
/// through [`ScoreState::apply_rating`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub multiplier: u32,
    pub rating_counts: RatingCounts,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            multiplier: 1,
            rating_counts: RatingCounts::default(),
        }
    }
}

/// What a single rating did to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub rating: Rating,
    pub points: u64,
    /// Set when the combo after this rating is one of [`COMBO_MILESTONES`].
    pub milestone: Option<u32>,
}

/// HUD view of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub multiplier: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_rating(&mut self, rating: Rating) -> ScoreUpdate {
        self.rating_counts.increment(rating);

        if rating == Rating::Miss {
            self.combo = 0;
            self.multiplier = 1;
            return ScoreUpdate {
                rating,
                points: 0,
                milestone: None,
            };
        }

        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.multiplier = multiplier_for(self.combo);
        let points = rating.points() * u64::from(self.multiplier);
        self.score += points;

        ScoreUpdate {
            rating,
            points,
            milestone: COMBO_MILESTONES.contains(&self.combo).then_some(self.combo),
        }
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            multiplier: self.multiplier,
        }
    }

    pub fn summary(&self, beat_count: usize) -> SessionSummary {
        let percentage = percentage(self.score, beat_count);
        SessionSummary {
            score: self.score,
            grade: grade_for(percentage),
            max_combo: self.max_combo,
            rating_counts: self.rating_counts,
            percentage,
            beat_count,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Score of an unbroken all-Perfect run over `beat_count` events, including
/// the multiplier ramp-up.
pub fn max_score(beat_count: usize) -> u64 {
    let mut best = ScoreState::new();
    for _ in 0..beat_count {
        best.apply_rating(Rating::Perfect);
    }
    best.score
}

/// Share of the maximum score reached, in `[0, 1]`. Zero events give 0.
pub fn percentage(score: u64, beat_count: usize) -> f64 {
    let max = max_score(beat_count);
    if max == 0 {
        return 0.0;
    }
    (score as f64 / max as f64).min(1.0)
}

pub fn grade_for(percentage: f64) -> Grade {
    if percentage >= 0.95 {
        Grade::S
    } else if percentage >= 0.85 {
        Grade::A
    } else if percentage >= 0.70 {
        Grade::B
    } else if percentage >= 0.50 {
        Grade::C
    } else {
        Grade::D
    }
}
