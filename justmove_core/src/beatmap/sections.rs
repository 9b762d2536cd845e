use beatmap_schema::{Section, SectionKind, Song, Style};

/// Tolerance for comparing accumulated section boundaries.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

const TRAILING_CHORUS_THRESHOLD_BARS: f64 = 2.0;
const OUTRO_BARS: f64 = 2.0;

/// Arrangement families. Each one fixes the order and length of the song body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    HighEnergy,
    FourOnTheFloor,
    Standard,
}

impl StyleFamily {
    pub fn of(style: Style) -> Self {
        match style {
            Style::DrumAndBass | Style::HipHop => StyleFamily::HighEnergy,
            Style::House | Style::Edm => StyleFamily::FourOnTheFloor,
            Style::Pop | Style::Funk | Style::Synthwave | Style::Chill => StyleFamily::Standard,
        }
    }

    /// Body sections in bars. The trailing chorus and the outro are derived
    /// from whatever time remains.
    fn template(self) -> &'static [(SectionKind, u32)] {
        use SectionKind::*;
        match self {
            StyleFamily::HighEnergy => &[
                (Intro, 2),
                (Buildup, 2),
                (Drop, 4),
                (Breakdown, 2),
                (Verse, 4),
                (Buildup, 2),
                (Drop, 4),
            ],
            StyleFamily::FourOnTheFloor => &[
                (Intro, 2),
                (Verse, 4),
                (Buildup, 2),
                (Drop, 4),
                (Breakdown, 2),
                (Buildup, 2),
                (Drop, 4),
            ],
            StyleFamily::Standard => &[
                (Intro, 2),
                (Verse, 4),
                (Chorus, 4),
                (Verse, 4),
                (Chorus, 4),
            ],
        }
    }
}

/// Lays the style's sections end to end from 0. A body section is only placed
/// if it fits completely; the remaining tail becomes a chorus plus a two-bar
/// outro when it is longer than two bars, otherwise a single outro.
pub fn section_timeline(song: &Song) -> Vec<Section> {
    let bar = song.bar_seconds();
    let duration = song.duration_seconds;
    let mut sections = Vec::new();
    let mut cursor = 0.0;

    for &(kind, bars) in StyleFamily::of(song.style).template() {
        let length = f64::from(bars) * bar;
        if cursor + length > duration + TIME_EPSILON {
            break;
        }
        sections.push(Section {
            kind,
            start_seconds: cursor,
            duration_seconds: length,
        });
        cursor += length;
    }

    let tail = duration - cursor;
    if tail > TRAILING_CHORUS_THRESHOLD_BARS * bar + TIME_EPSILON {
        let outro_start = duration - OUTRO_BARS * bar;
        sections.push(Section {
            kind: SectionKind::Chorus,
            start_seconds: cursor,
            duration_seconds: outro_start - cursor,
        });
        sections.push(Section {
            kind: SectionKind::Outro,
            start_seconds: outro_start,
            duration_seconds: OUTRO_BARS * bar,
        });
    } else if tail > TIME_EPSILON {
        sections.push(Section {
            kind: SectionKind::Outro,
            start_seconds: cursor,
            duration_seconds: tail,
        });
    }

    sections
}
