pub mod judge;
pub mod score;
pub mod timeline;

pub use self::judge::{ActiveTarget, JudgeMachine, JudgmentResult, TickReport};
pub use self::score::{grade_for, max_score, ScoreSnapshot, ScoreState, ScoreUpdate};
pub use self::timeline::{visible_markers, BeatMarker, MarkerState};
