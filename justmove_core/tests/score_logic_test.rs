use justmove_core::gameplay::score::{grade_for, max_score, multiplier_for, ScoreState};
use justmove_core::schema::{Grade, Rating};

#[test]
fn test_five_goods_from_fresh_state() {
    let mut state = ScoreState::new();
    let running: Vec<u64> = (0..5)
        .map(|_| {
            state.apply_rating(Rating::Good);
            state.score
        })
        .collect();

    assert_eq!(running, vec![400, 800, 1200, 1600, 2400]);
    assert_eq!(state.combo, 5);
    assert_eq!(state.multiplier, 2);
    assert_eq!(state.rating_counts.good, 5);
}

#[test]
fn test_miss_resets_combo_and_multiplier() {
    let mut state = ScoreState::new();
    for _ in 0..23 {
        state.apply_rating(Rating::Great);
    }
    assert_eq!(state.multiplier, 5);
    let before = state.score;

    let update = state.apply_rating(Rating::Miss);
    assert_eq!(update.points, 0);
    assert_eq!(state.score, before);
    assert_eq!(state.combo, 0);
    assert_eq!(state.multiplier, 1);
    assert_eq!(state.max_combo, 23);
    assert_eq!(state.rating_counts.miss, 1);

    // Next hit counts from combo 1 again.
    let update = state.apply_rating(Rating::Perfect);
    assert_eq!(update.points, 1000);
    assert_eq!(state.combo, 1);
}

#[test]
fn test_multiplier_tracks_combo_after_every_hit() {
    let mut state = ScoreState::new();
    let sequence = [Rating::Perfect, Rating::Good, Rating::Great, Rating::Miss, Rating::Good];
    for rating in sequence.iter().cycle().take(200) {
        state.apply_rating(*rating);
        if rating.is_hit() {
            assert_eq!(state.multiplier, multiplier_for(state.combo));
        } else {
            assert_eq!((state.combo, state.multiplier), (0, 1));
        }
        assert!((1..=8).contains(&state.multiplier));
    }
}

#[test]
fn test_all_perfect_run_reaches_max_score() {
    for beat_count in [0usize, 1, 4, 5, 12, 40, 137] {
        let mut state = ScoreState::new();
        for _ in 0..beat_count {
            state.apply_rating(Rating::Perfect);
        }
        assert_eq!(state.score, max_score(beat_count));

        let summary = state.summary(beat_count);
        if beat_count == 0 {
            assert_eq!(summary.percentage, 0.0);
            assert_eq!(summary.grade, Grade::D);
        } else {
            assert_eq!(summary.percentage, 1.0);
            assert_eq!(summary.grade, Grade::S);
        }
    }
}

#[test]
fn test_max_score_is_not_a_flat_multiple() {
    assert!(max_score(20) < 20 * 1000 * 8);
    // 4 at x1, 5 at x2, .., 5 at x7, then x8 from combo 35 on.
    let ramp: u64 = 4 * 1000 + (2..=7).map(|m| 5 * 1000 * m).sum::<u64>();
    assert_eq!(max_score(34), ramp);
    assert_eq!(max_score(36), ramp + 2 * 8000);
}

#[test]
fn test_summary_grades_partial_run() {
    let mut state = ScoreState::new();
    for i in 0..10 {
        state.apply_rating(if i % 2 == 0 { Rating::Perfect } else { Rating::Miss });
    }
    let summary = state.summary(10);
    assert_eq!(summary.score, 5000);
    assert_eq!(summary.max_combo, 1);
    assert_eq!(summary.rating_counts.perfect, 5);
    assert_eq!(summary.rating_counts.miss, 5);
    assert_eq!(summary.beat_count, 10);
    assert!((summary.percentage - 5000.0 / max_score(10) as f64).abs() < 1e-12);
    assert_eq!(summary.grade, grade_for(summary.percentage));
    assert_eq!(summary.grade, Grade::D);
}

#[test]
fn test_snapshot_mirrors_state() {
    let mut state = ScoreState::new();
    state.apply_rating(Rating::Great);
    let hud = state.snapshot();
    assert_eq!((hud.score, hud.combo, hud.max_combo, hud.multiplier), (700, 1, 1, 1));

    state.reset();
    assert_eq!(state, ScoreState::default());
}
