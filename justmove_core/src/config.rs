use std::{fs, path::Path};

use beatmap_schema::Rating;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing windows of the judgment engine, in seconds relative to each beat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeWindows {
    /// A pending beat becomes the displayed target this long before its time.
    pub activation_lead: f64,
    /// Evaluation and scoring both open this long before the beat.
    pub evaluation_early: f64,
    /// Live match feedback continues until this long after the beat; past it
    /// an unscored beat is a miss.
    pub evaluation_late: f64,
    /// Scoring closes this long after the beat.
    pub scoring_late: f64,
    /// Non-perfect hits further than this from the beat carry an early/late hint.
    pub timing_hint_threshold: f64,
    /// Beats further ahead than this are not looked at.
    pub lookahead_cutoff: f64,
}

impl Default for JudgeWindows {
    fn default() -> Self {
        Self {
            activation_lead: 2.0,
            evaluation_early: 0.5,
            evaluation_late: 0.8,
            scoring_late: 0.5,
            timing_hint_threshold: 0.15,
            lookahead_cutoff: 3.0,
        }
    }
}

/// Minimum match value for each rating tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingThresholds {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            perfect: 0.8,
            great: 0.6,
            good: 0.4,
        }
    }
}

impl RatingThresholds {
    /// Best tier reached by `match_value`, checked from the top down. `None`
    /// means the player has not matched well enough yet.
    pub fn rate(&self, match_value: f64) -> Option<Rating> {
        if match_value >= self.perfect {
            Some(Rating::Perfect)
        } else if match_value >= self.great {
            Some(Rating::Great)
        } else if match_value >= self.good {
            Some(Rating::Good)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// First number shown; the countdown shows `from..=1`, then "GO!".
    pub from: u32,
    pub step_seconds: f64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            from: 3,
            step_seconds: 1.0,
        }
    }
}

impl CountdownConfig {
    pub fn total_seconds(&self) -> f64 {
        f64::from(self.from + 1) * self.step_seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub judge: JudgeWindows,
    pub ratings: RatingThresholds,
    pub countdown: CountdownConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let j = &self.judge;
        let windows = [
            ("activation_lead", j.activation_lead),
            ("evaluation_early", j.evaluation_early),
            ("evaluation_late", j.evaluation_late),
            ("scoring_late", j.scoring_late),
            ("timing_hint_threshold", j.timing_hint_threshold),
            ("lookahead_cutoff", j.lookahead_cutoff),
        ];
        if let Some((name, value)) = windows.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "judge.{name} must be a non-negative number, got {value}"
            )));
        }
        if j.scoring_late > j.evaluation_late {
            return Err(ConfigError::Invalid(
                "judge.scoring_late must not exceed judge.evaluation_late".to_string(),
            ));
        }

        let r = &self.ratings;
        if !(r.perfect <= 1.0 && r.perfect >= r.great && r.great >= r.good && r.good > 0.0) {
            return Err(ConfigError::Invalid(
                "ratings must satisfy 1 >= perfect >= great >= good > 0".to_string(),
            ));
        }

        let c = &self.countdown;
        if !(c.step_seconds.is_finite() && c.step_seconds >= 0.0) {
            return Err(ConfigError::Invalid(
                "countdown.step_seconds must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
