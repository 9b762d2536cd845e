use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type Seconds = f64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SongError {
    #[error("tempo must be a positive number of BPM, got {0}")]
    InvalidTempo(f64),
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("unknown {kind}: {value:?}")]
    UnknownName { kind: &'static str, value: String },
}

impl SongError {
    fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownName {
            kind,
            value: value.to_string(),
        }
    }
}

/// Target poses the player is asked to strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoseId {
    ArmsUp,
    TPose,
    LeftArmUp,
    RightArmUp,
    HandsOnHips,
    Squat,
    LeanLeft,
    LeanRight,
    DabLeft,
    DabRight,
}

impl PoseId {
    pub const ALL: [PoseId; 10] = [
        PoseId::ArmsUp,
        PoseId::TPose,
        PoseId::LeftArmUp,
        PoseId::RightArmUp,
        PoseId::HandsOnHips,
        PoseId::Squat,
        PoseId::LeanLeft,
        PoseId::LeanRight,
        PoseId::DabLeft,
        PoseId::DabRight,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PoseId::ArmsUp => "arms-up",
            PoseId::TPose => "t-pose",
            PoseId::LeftArmUp => "left-arm-up",
            PoseId::RightArmUp => "right-arm-up",
            PoseId::HandsOnHips => "hands-on-hips",
            PoseId::Squat => "squat",
            PoseId::LeanLeft => "lean-left",
            PoseId::LeanRight => "lean-right",
            PoseId::DabLeft => "dab-left",
            PoseId::DabRight => "dab-right",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PoseId::ArmsUp => "Arms Up",
            PoseId::TPose => "T-Pose",
            PoseId::LeftArmUp => "Left Up",
            PoseId::RightArmUp => "Right Up",
            PoseId::HandsOnHips => "Hands on Hips",
            PoseId::Squat => "Squat",
            PoseId::LeanLeft => "Lean Left",
            PoseId::LeanRight => "Lean Right",
            PoseId::DabLeft => "Dab Left",
            PoseId::DabRight => "Dab Right",
        }
    }

    /// Single glyph shown on beat markers.
    pub fn icon(self) -> char {
        match self {
            PoseId::ArmsUp => '\u{2191}',
            PoseId::TPose => '\u{2194}',
            PoseId::LeftArmUp => '\u{2196}',
            PoseId::RightArmUp => '\u{2197}',
            PoseId::HandsOnHips => '\u{25C7}',
            PoseId::Squat => '\u{2193}',
            PoseId::LeanLeft => '\u{2190}',
            PoseId::LeanRight => '\u{2192}',
            PoseId::DabLeft => '\u{2199}',
            PoseId::DabRight => '\u{2198}',
        }
    }
}

impl fmt::Display for PoseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PoseId {
    type Err = SongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoseId::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| SongError::unknown("pose", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = SongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(SongError::unknown("difficulty", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// Musical style of the backing track. Drives the section layout and the
/// choreography used for drops and choruses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    DrumAndBass,
    HipHop,
    House,
    Edm,
    Pop,
    Funk,
    Synthwave,
    Chill,
}

impl Style {
    pub const ALL: [Style; 8] = [
        Style::DrumAndBass,
        Style::HipHop,
        Style::House,
        Style::Edm,
        Style::Pop,
        Style::Funk,
        Style::Synthwave,
        Style::Chill,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Style::DrumAndBass => "drum-and-bass",
            Style::HipHop => "hip-hop",
            Style::House => "house",
            Style::Edm => "edm",
            Style::Pop => "pop",
            Style::Funk => "funk",
            Style::Synthwave => "synthwave",
            Style::Chill => "chill",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Style {
    type Err = SongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.key() == wanted)
            .ok_or_else(|| SongError::unknown("style", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub tempo_bpm: f64,
    pub duration_seconds: Seconds,
    pub difficulty: Difficulty,
    pub style: Style,
}

impl Song {
    pub fn new(
        tempo_bpm: f64,
        duration_seconds: Seconds,
        difficulty: Difficulty,
        style: Style,
    ) -> Result<Self, SongError> {
        if !(tempo_bpm.is_finite() && tempo_bpm > 0.0) {
            return Err(SongError::InvalidTempo(tempo_bpm));
        }
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(SongError::InvalidDuration(duration_seconds));
        }
        Ok(Self {
            tempo_bpm,
            duration_seconds,
            difficulty,
            style,
        })
    }

    pub fn beat_seconds(&self) -> Seconds {
        60.0 / self.tempo_bpm
    }

    pub fn bar_seconds(&self) -> Seconds {
        4.0 * self.beat_seconds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Intro,
    Verse,
    Chorus,
    Buildup,
    Drop,
    Breakdown,
    Outro,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub start_seconds: Seconds,
    pub duration_seconds: Seconds,
}

impl Section {
    pub fn end_seconds(&self) -> Seconds {
        self.start_seconds + self.duration_seconds
    }

    pub fn contains(&self, time: Seconds) -> bool {
        time >= self.start_seconds && time < self.end_seconds()
    }
}

/// Judgment tiers, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Miss,
    Good,
    Great,
    Perfect,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Miss, Rating::Good, Rating::Great, Rating::Perfect];

    pub fn points(self) -> u64 {
        match self {
            Rating::Miss => 0,
            Rating::Good => 400,
            Rating::Great => 700,
            Rating::Perfect => 1000,
        }
    }

    pub fn is_hit(self) -> bool {
        self != Rating::Miss
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::Miss => "MISS",
            Rating::Good => "GOOD",
            Rating::Great => "GREAT",
            Rating::Perfect => "PERFECT",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingHint {
    Early,
    Late,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    pub time_seconds: Seconds,
    pub pose: PoseId,
    #[serde(default)]
    pub scored: bool,
    #[serde(default)]
    pub hit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingHint>,
}

impl BeatEvent {
    pub fn new(time_seconds: Seconds, pose: PoseId) -> Self {
        Self {
            time_seconds,
            pose,
            scored: false,
            hit: false,
            rating: None,
            timing: None,
        }
    }

    /// Records the outcome of this event. Returns `false` without touching
    /// anything if the event was already scored.
    pub fn resolve(&mut self, rating: Rating, timing: Option<TimingHint>) -> bool {
        if self.scored {
            return false;
        }
        self.scored = true;
        self.hit = rating.is_hit();
        self.rating = Some(rating);
        self.timing = timing;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingCounts {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
}

impl RatingCounts {
    pub fn get(&self, rating: Rating) -> u32 {
        match rating {
            Rating::Perfect => self.perfect,
            Rating::Great => self.great,
            Rating::Good => self.good,
            Rating::Miss => self.miss,
        }
    }

    pub fn increment(&mut self, rating: Rating) {
        match rating {
            Rating::Perfect => self.perfect += 1,
            Rating::Great => self.great += 1,
            Rating::Good => self.good += 1,
            Rating::Miss => self.miss += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.perfect + self.great + self.good + self.miss
    }
}

/// A generated chart: the song it was built for, its section timeline and the
/// timed pose events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatMap {
    pub song: Song,
    pub sections: Vec<Section>,
    pub events: Vec<BeatEvent>,
}

impl BeatMap {
    pub fn section_at(&self, time: Seconds) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(time))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub grade: Grade,
    pub max_combo: u32,
    pub rating_counts: RatingCounts,
    pub percentage: f64,
    pub beat_count: usize,
}
