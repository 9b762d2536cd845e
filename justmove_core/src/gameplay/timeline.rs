use beatmap_schema::{BeatEvent, PoseId};

/// Beats this far ahead enter the strip.
pub const VISIBLE_AHEAD_SECONDS: f64 = 4.0;
/// Beats stay visible this long after their time.
pub const VISIBLE_BEHIND_SECONDS: f64 = 1.0;
/// Horizontal position of the hit zone, as a fraction of the strip width.
pub const HIT_ZONE_POSITION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Pending,
    Hit,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatMarker {
    pub beat_index: usize,
    pub pose: PoseId,
    pub icon: char,
    /// Fraction of the strip width; beats slide from the right toward the hit zone.
    pub position: f64,
    pub state: MarkerState,
}

pub fn visible_markers(beats: &[BeatEvent], elapsed: f64) -> Vec<BeatMarker> {
    beats
        .iter()
        .enumerate()
        .filter_map(|(beat_index, beat)| {
            let ahead = beat.time_seconds - elapsed;
            if !(-VISIBLE_BEHIND_SECONDS..=VISIBLE_AHEAD_SECONDS).contains(&ahead) {
                return None;
            }
            let state = match (beat.scored, beat.hit) {
                (false, _) => MarkerState::Pending,
                (true, true) => MarkerState::Hit,
                (true, false) => MarkerState::Missed,
            };
            Some(BeatMarker {
                beat_index,
                pose: beat.pose,
                icon: beat.pose.icon(),
                position: HIT_ZONE_POSITION
                    + ahead / VISIBLE_AHEAD_SECONDS * (1.0 - HIT_ZONE_POSITION),
                state,
            })
        })
        .collect()
}
