//! Beat-map generation: turns a song's tempo, length, difficulty and style
//! into a sorted list of timed target poses.
//!
//! Timing is fully determined by the song. Only the starting slot inside each
//! section's choreography pattern is drawn from the RNG.

pub mod catalog;
pub mod patterns;
pub mod sections;

use beatmap_schema::{BeatEvent, BeatMap, Difficulty, PoseId, Section, SectionKind, Song};
use rand::Rng;

use self::patterns::Pattern;
use self::sections::{section_timeline, TIME_EPSILON};

/// No event before this point of the song.
pub const LEAD_IN_SECONDS: f64 = 2.0;
/// No event closer than this to the end of the song.
pub const LEAD_OUT_SECONDS: f64 = 2.0;
/// Minimum distance between two events, in beats.
pub const MIN_SPACING_BEATS: f64 = 0.8;

const SPARSE_INTERVAL_BARS: f64 = 2.0;
const BUILDUP_DECAY: f64 = 0.8;

pub fn generate(song: &Song) -> BeatMap {
    generate_with_rng(song, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng>(song: &Song, rng: &mut R) -> BeatMap {
    let beat = song.beat_seconds();
    let sections = section_timeline(song);

    let mut slots = Vec::new();
    let mut verse_ordinal = 0;
    for (section_index, section) in sections.iter().enumerate() {
        let pattern = Pattern::for_section(section.kind, song.style, verse_ordinal);
        if section.kind == SectionKind::Verse {
            verse_ordinal += 1;
        }
        slots.extend(
            candidate_times(section, song)
                .into_iter()
                .map(|time| Slot { time, section_index, pattern }),
        );
    }

    let latest = song.duration_seconds - LEAD_OUT_SECONDS;
    slots.retain(|slot| slot.time >= LEAD_IN_SECONDS && slot.time <= latest);
    slots.sort_by(|a, b| a.time.total_cmp(&b.time));

    let min_gap = MIN_SPACING_BEATS * beat;
    let mut kept: Vec<Slot> = Vec::with_capacity(slots.len());
    for slot in slots {
        if kept.last().is_some_and(|last| slot.time - last.time < min_gap) {
            continue;
        }
        kept.push(slot);
    }

    let events = assign_poses(&kept, sections.len(), rng);
    tracing::debug!(
        tempo = song.tempo_bpm,
        duration = song.duration_seconds,
        style = %song.style,
        sections = sections.len(),
        events = events.len(),
        "generated beat map"
    );

    BeatMap {
        song: *song,
        sections,
        events,
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    time: f64,
    section_index: usize,
    pattern: Pattern,
}

/// Walks the kept slots in time order. Each section starts at a random slot of
/// its pattern; a pose equal to the previous event's is skipped.
fn assign_poses<R: Rng>(slots: &[Slot], section_count: usize, rng: &mut R) -> Vec<BeatEvent> {
    let mut cursors: Vec<Option<usize>> = vec![None; section_count];
    let mut previous: Option<PoseId> = None;
    let mut events = Vec::with_capacity(slots.len());

    for slot in slots {
        let poses = slot.pattern.poses();
        let cursor = cursors[slot.section_index].get_or_insert_with(|| rng.gen_range(0..poses.len()));

        let mut pose = poses[*cursor % poses.len()];
        *cursor += 1;
        if previous == Some(pose) {
            pose = poses[*cursor % poses.len()];
            *cursor += 1;
        }

        previous = Some(pose);
        events.push(BeatEvent::new(slot.time, pose));
    }
    events
}

fn difficulty_factor(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 1.0,
        Difficulty::Medium => 2.0,
        Difficulty::Hard => 3.0,
    }
}

/// Base spacing in beats on Easy for the sections whose density follows the
/// difficulty.
fn base_interval_beats(kind: SectionKind) -> Option<f64> {
    match kind {
        SectionKind::Verse | SectionKind::Breakdown => Some(8.0),
        SectionKind::Chorus => Some(6.0),
        SectionKind::Drop => Some(3.0),
        SectionKind::Intro | SectionKind::Outro | SectionKind::Buildup => None,
    }
}

/// Candidate event times inside `section`, strictly before its end.
pub fn candidate_times(section: &Section, song: &Song) -> Vec<f64> {
    let beat = song.beat_seconds();
    match section.kind {
        SectionKind::Intro | SectionKind::Outro => {
            regular_times(section, SPARSE_INTERVAL_BARS * song.bar_seconds())
        }
        SectionKind::Buildup => accelerating_times(section, SPARSE_INTERVAL_BARS * song.bar_seconds(), beat),
        kind => {
            let base = base_interval_beats(kind).unwrap_or(8.0);
            regular_times(section, base * beat / difficulty_factor(song.difficulty))
        }
    }
}

fn regular_times(section: &Section, interval: f64) -> Vec<f64> {
    let end = section.end_seconds() - TIME_EPSILON;
    (0u32..)
        .map(|k| section.start_seconds + f64::from(k) * interval)
        .take_while(|&t| t < end)
        .collect()
}

/// Intervals shrink geometrically from `initial` down to `floor`.
fn accelerating_times(section: &Section, initial: f64, floor: f64) -> Vec<f64> {
    let end = section.end_seconds() - TIME_EPSILON;
    let mut times = Vec::new();
    let mut t = section.start_seconds;
    let mut interval = initial;
    while t < end {
        times.push(t);
        t += interval;
        interval = (interval * BUILDUP_DECAY).max(floor);
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatmap_schema::Style;

    fn section(kind: SectionKind, start: f64, duration: f64) -> Section {
        Section {
            kind,
            start_seconds: start,
            duration_seconds: duration,
        }
    }

    #[test]
    fn drop_on_hard_is_one_beat_apart() {
        let song = Song::new(120.0, 60.0, Difficulty::Hard, Style::Edm).unwrap();
        let times = candidate_times(&section(SectionKind::Drop, 10.0, 8.0), &song);
        assert_eq!(times.len(), 16);
        assert_eq!(times[1] - times[0], 0.5);
    }

    #[test]
    fn verse_density_scales_with_difficulty() {
        let verse = section(SectionKind::Verse, 4.0, 8.0);
        let counts: Vec<usize> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .map(|d| {
                let song = Song::new(120.0, 60.0, d, Style::Pop).unwrap();
                candidate_times(&verse, &song).len()
            })
            .collect();
        assert_eq!(counts, vec![2, 4, 6]);
    }

    #[test]
    fn buildup_accelerates_toward_one_beat() {
        let song = Song::new(120.0, 60.0, Difficulty::Easy, Style::House).unwrap();
        let times = candidate_times(&section(SectionKind::Buildup, 0.0, 20.0), &song);
        let gaps: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
        assert!((gaps[0] - 4.0).abs() < 1e-9);
        assert!((gaps[1] - 3.2).abs() < 1e-9);
        assert!(gaps.windows(2).all(|w| w[1] <= w[0] + 1e-9));
        assert!((gaps.last().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn intro_is_sparse() {
        let song = Song::new(120.0, 60.0, Difficulty::Hard, Style::Pop).unwrap();
        let times = candidate_times(&section(SectionKind::Intro, 0.0, 4.0), &song);
        assert_eq!(times, vec![0.0]);
    }
}
