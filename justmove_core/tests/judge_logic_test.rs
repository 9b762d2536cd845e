#[cfg(test)]
mod tests {
    use justmove_core::gameplay::{JudgeMachine, ScoreState};
    use justmove_core::pose::{canonical_frame, match_pose, neutral_frame, Keypoint, LandmarkFrame};
    use justmove_core::schema::{BeatEvent, PoseId, Rating, TimingHint};

    fn single_beat() -> Vec<BeatEvent> {
        vec![BeatEvent::new(10.0, PoseId::ArmsUp)]
    }

    /// Arms up with only the right elbow visible: 0.3 + 0.3 + 0.2.
    fn arms_up_perfect_edge() -> LandmarkFrame {
        canonical_frame(PoseId::ArmsUp).without(Keypoint::LeftElbow)
    }

    /// Arms up with no elbows visible: 0.3 + 0.3.
    fn arms_up_great() -> LandmarkFrame {
        canonical_frame(PoseId::ArmsUp)
            .without(Keypoint::LeftElbow)
            .without(Keypoint::RightElbow)
    }

    /// Only the left arm raised: 0.3 + 0.2.
    fn arms_up_good() -> LandmarkFrame {
        canonical_frame(PoseId::ArmsUp).with(Keypoint::RightWrist, 0.35, 0.4)
    }

    #[test]
    fn test_frame_fixtures_hit_expected_tiers() {
        assert_eq!(match_pose(PoseId::ArmsUp, &canonical_frame(PoseId::ArmsUp)), 1.0);
        assert_eq!(match_pose(PoseId::ArmsUp, &arms_up_perfect_edge()), 0.8);
        assert_eq!(match_pose(PoseId::ArmsUp, &arms_up_great()), 0.6);
        assert_eq!(match_pose(PoseId::ArmsUp, &arms_up_good()), 0.5);
        assert_eq!(match_pose(PoseId::ArmsUp, &canonical_frame(PoseId::TPose)), 0.0);
    }

    #[test]
    fn test_perfect_inside_scoring_window() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();
        let frame = arms_up_perfect_edge();

        let report = judge.tick(10.05, Some(&frame), &mut beats, &mut score);

        assert_eq!(report.judgments.len(), 1);
        let result = &report.judgments[0];
        assert_eq!(result.beat_index, 0);
        assert_eq!(result.rating, Rating::Perfect);
        assert_eq!(result.timing, None);
        assert!(beats[0].scored && beats[0].hit);
        assert_eq!(beats[0].rating, Some(Rating::Perfect));
        assert_eq!(score.score, 1000);
        assert_eq!(judge.next_beat_index, 1);
    }

    #[test]
    fn test_no_score_between_scoring_and_miss_windows_then_miss() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();
        let frame = canonical_frame(PoseId::ArmsUp);

        let report = judge.tick(10.6, Some(&frame), &mut beats, &mut score);
        assert!(report.judgments.is_empty());
        assert_eq!(report.match_meter, Some(1.0));
        assert!(!beats[0].scored);

        let report = judge.tick(10.9, Some(&frame), &mut beats, &mut score);
        assert_eq!(report.judgments.len(), 1);
        assert_eq!(report.judgments[0].rating, Rating::Miss);
        assert_eq!(report.match_meter, None);
        assert!(beats[0].scored && !beats[0].hit);
        assert_eq!(score.score, 0);
        assert_eq!(score.rating_counts.miss, 1);
    }

    #[test]
    fn test_missing_frame_still_ages_into_miss() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        for elapsed in [9.5, 10.0, 10.5, 10.75] {
            let report = judge.tick(elapsed, None, &mut beats, &mut score);
            assert!(report.judgments.is_empty(), "scored at {elapsed}");
            assert_eq!(report.match_meter, None);
        }

        let report = judge.tick(10.81, None, &mut beats, &mut score);
        assert_eq!(report.judgments[0].rating, Rating::Miss);
    }

    #[test]
    fn test_low_match_waits_for_better_pose() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let report = judge.tick(9.8, Some(&neutral_frame()), &mut beats, &mut score);
        assert!(report.judgments.is_empty());
        assert!(report.match_meter.is_some_and(|m| m < 0.4));

        let report = judge.tick(10.0, Some(&arms_up_good()), &mut beats, &mut score);
        assert_eq!(report.judgments[0].rating, Rating::Good);
        assert_eq!(report.judgments[0].timing, None);
    }

    #[test]
    fn test_timing_hints_on_non_perfect_hits() {
        let mut beats = vec![BeatEvent::new(10.0, PoseId::ArmsUp), BeatEvent::new(12.0, PoseId::ArmsUp)];
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let early = judge.tick(9.7, Some(&arms_up_great()), &mut beats, &mut score);
        assert_eq!(early.judgments[0].rating, Rating::Great);
        assert_eq!(early.judgments[0].timing, Some(TimingHint::Early));
        assert_eq!(beats[0].timing, Some(TimingHint::Early));

        let late = judge.tick(12.3, Some(&arms_up_good()), &mut beats, &mut score);
        assert_eq!(late.judgments[0].beat_index, 1);
        assert_eq!(late.judgments[0].timing, Some(TimingHint::Late));
    }

    #[test]
    fn test_perfect_carries_no_hint_even_when_early() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let report = judge.tick(9.6, Some(&canonical_frame(PoseId::ArmsUp)), &mut beats, &mut score);
        assert_eq!(report.judgments[0].rating, Rating::Perfect);
        assert_eq!(report.judgments[0].timing, None);
    }

    #[test]
    fn test_target_activates_once_two_seconds_ahead() {
        let mut beats = vec![BeatEvent::new(10.0, PoseId::ArmsUp), BeatEvent::new(11.0, PoseId::TPose)];
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let report = judge.tick(7.5, None, &mut beats, &mut score);
        assert_eq!(report.target_changed, None);
        assert_eq!(judge.active_target(), None);

        let report = judge.tick(8.5, None, &mut beats, &mut score);
        let target = report.target_changed.expect("first beat becomes the target");
        assert_eq!((target.beat_index, target.pose), (0, PoseId::ArmsUp));

        // Same target on the next tick: no repeat notification.
        let report = judge.tick(8.9, None, &mut beats, &mut score);
        assert_eq!(report.target_changed, None);
        assert_eq!(judge.active_target(), Some(target));

        // Beat 1 crosses the lead and supersedes beat 0.
        let report = judge.tick(9.2, None, &mut beats, &mut score);
        let next = report.target_changed.expect("second beat supersedes the first");
        assert_eq!((next.beat_index, next.pose), (1, PoseId::TPose));
        assert_eq!(judge.active_target(), Some(next));
    }

    #[test]
    fn test_beat_past_scoring_window_loses_the_target() {
        let mut beats = vec![BeatEvent::new(10.0, PoseId::ArmsUp), BeatEvent::new(11.0, PoseId::TPose)];
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let report = judge.tick(8.5, None, &mut beats, &mut score);
        assert_eq!(report.target_changed.map(|t| t.pose), Some(PoseId::ArmsUp));

        // Beat 0 is only meter-evaluated now and cannot score; beat 1 is 0.45 s away.
        let report = judge.tick(10.55, Some(&neutral_frame()), &mut beats, &mut score);
        assert!(report.judgments.is_empty());
        assert!(!beats[0].scored);
        let target = report.target_changed.expect("next beat takes over");
        assert_eq!((target.beat_index, target.pose), (1, PoseId::TPose));
        assert_eq!(judge.active_target().map(|t| t.pose), Some(PoseId::TPose));
    }

    #[test]
    fn test_last_target_stays_until_superseded() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        judge.tick(9.0, None, &mut beats, &mut score);
        let report = judge.tick(11.0, None, &mut beats, &mut score);
        assert_eq!(report.judgments[0].rating, Rating::Miss);
        assert_eq!(report.target_changed, None);
        assert_eq!(judge.active_target().map(|t| t.beat_index), Some(0));
    }

    #[test]
    fn test_cursor_waits_on_pending_beat() {
        let mut beats = vec![BeatEvent::new(10.0, PoseId::ArmsUp), BeatEvent::new(10.4, PoseId::TPose)];
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        // The T-pose frame scores the later beat while the earlier one is still open.
        let report = judge.tick(10.2, Some(&canonical_frame(PoseId::TPose)), &mut beats, &mut score);
        assert_eq!(report.judgments.len(), 1);
        assert_eq!(report.judgments[0].beat_index, 1);
        assert_eq!(judge.next_beat_index, 0);

        let report = judge.tick(10.9, None, &mut beats, &mut score);
        assert_eq!(report.judgments.len(), 1);
        assert_eq!(report.judgments[0].beat_index, 0);
        assert_eq!(report.judgments[0].rating, Rating::Miss);
        assert_eq!(judge.next_beat_index, 2);
    }

    #[test]
    fn test_scored_beats_are_not_rescored() {
        let mut beats = single_beat();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();
        let frame = canonical_frame(PoseId::ArmsUp);

        judge.tick(10.0, Some(&frame), &mut beats, &mut score);
        for elapsed in [10.1, 10.4, 11.0, 20.0] {
            let report = judge.tick(elapsed, Some(&frame), &mut beats, &mut score);
            assert!(report.judgments.is_empty());
        }
        assert_eq!(score.rating_counts.total(), 1);
    }

    #[test]
    fn test_far_future_beats_are_ignored() {
        let mut beats = vec![BeatEvent::new(100.0, PoseId::ArmsUp)];
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let report = judge.tick(0.0, Some(&canonical_frame(PoseId::ArmsUp)), &mut beats, &mut score);
        assert_eq!(report, Default::default());
    }

    #[test]
    fn test_late_tick_misses_every_overdue_beat() {
        let mut beats: Vec<BeatEvent> = (0..5)
            .map(|i| BeatEvent::new(3.0 + f64::from(i), PoseId::Squat))
            .collect();
        let mut score = ScoreState::new();
        let mut judge = JudgeMachine::new();

        let report = judge.tick(30.0, None, &mut beats, &mut score);
        assert_eq!(report.judgments.len(), 5);
        assert!(report.judgments.iter().all(|j| j.rating == Rating::Miss));
        assert_eq!(judge.next_beat_index, 5);
        assert_eq!(score.rating_counts.miss, 5);
    }
}
