use beatmap_schema::{BeatMap, Rating, SectionKind};

fn section_label(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Intro => "intro",
        SectionKind::Verse => "verse",
        SectionKind::Chorus => "chorus",
        SectionKind::Buildup => "buildup",
        SectionKind::Drop => "drop",
        SectionKind::Breakdown => "breakdown",
        SectionKind::Outro => "outro",
    }
}

/// Prints one row per beat: time, beat position, section, pose and, for a
/// judged map, the outcome.
pub fn run_simulation(map: &BeatMap) -> anyhow::Result<()> {
    let song = &map.song;
    if map.events.is_empty() {
        println!("Beat map is empty.");
        return Ok(());
    }

    println!(
        "Simulation Start ({:.1}s, {} BPM, {}, {}, {} beats)",
        song.duration_seconds,
        song.tempo_bpm,
        song.difficulty,
        song.style,
        map.events.len()
    );
    println!("Time(s)  |   Beat | Section   | Pose              | Result");
    println!("---------|--------|-----------|-------------------|----------------");

    let beat = song.beat_seconds();
    let mut previous: Option<f64> = None;
    for event in &map.events {
        let section = map
            .section_at(event.time_seconds)
            .map_or("-", |s| section_label(s.kind));
        let pose = format!("{} {}", event.pose.icon(), event.pose.display_name());

        let mut info = Vec::new();
        if let Some(rating) = event.rating {
            info.push(rating.to_string());
            if let Some(timing) = event.timing {
                info.push(format!("{timing:?}").to_lowercase());
            }
        }
        if let Some(prev) = previous {
            let gap = (event.time_seconds - prev) / beat;
            if gap < 1.0 {
                info.push(format!("gap {gap:.2} beat"));
            }
        }
        previous = Some(event.time_seconds);

        println!(
            "{:8.3} | {:6.2} | {:<9} | {:<17} | {}",
            event.time_seconds,
            event.time_seconds / beat,
            section,
            pose,
            info.join(", ")
        );
    }

    if map.events.iter().any(|e| e.scored) {
        let hits = map.events.iter().filter(|e| e.hit).count();
        let perfects = map
            .events
            .iter()
            .filter(|e| e.rating == Some(Rating::Perfect))
            .count();
        println!("Hits: {hits}/{} ({perfects} perfect)", map.events.len());
    }

    Ok(())
}
