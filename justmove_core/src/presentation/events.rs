use beatmap_schema::{PoseId, Rating, SessionSummary, TimingHint};

use crate::gameplay::ScoreSnapshot;
use crate::session::Phase;

/// Notifications for the rendering/UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged(Phase),
    /// Countdown number about to be shown (3, 2, 1 by default).
    CountdownTick(u32),
    CountdownGo,
    /// A new reference pose should be rendered.
    TargetChanged { beat_index: usize, pose: PoseId },
    /// Live match value in `[0, 1]`.
    MatchMeter(f64),
    Judged {
        beat_index: usize,
        rating: Rating,
        timing: Option<TimingHint>,
    },
    ComboMilestone(u32),
    Hud(ScoreSnapshot),
    Finished(SessionSummary),
}
