use beatmap_schema::{PoseId, SectionKind, Style};

/// Named choreography loops. A section walks its pattern cyclically; no
/// pattern has two equal neighbours, wrap-around included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Wave,
    Hype,
    Groove,
    Flow,
    Bounce,
    Chill,
    Strike,
}

const VERSE_ROTATION: [Pattern; 3] = [Pattern::Wave, Pattern::Groove, Pattern::Flow];

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Wave,
        Pattern::Hype,
        Pattern::Groove,
        Pattern::Flow,
        Pattern::Bounce,
        Pattern::Chill,
        Pattern::Strike,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Wave => "wave",
            Pattern::Hype => "hype",
            Pattern::Groove => "groove",
            Pattern::Flow => "flow",
            Pattern::Bounce => "bounce",
            Pattern::Chill => "chill",
            Pattern::Strike => "strike",
        }
    }

    pub fn poses(self) -> &'static [PoseId] {
        use PoseId::*;
        match self {
            Pattern::Wave => &[LeftArmUp, RightArmUp, LeftArmUp, RightArmUp, ArmsUp, TPose],
            Pattern::Hype => &[ArmsUp, DabLeft, TPose, DabRight, ArmsUp, Squat, DabLeft, DabRight],
            Pattern::Groove => &[LeanLeft, LeanRight, HandsOnHips, Squat, LeanLeft, LeanRight, HandsOnHips],
            Pattern::Flow => &[TPose, LeftArmUp, LeanLeft, HandsOnHips, RightArmUp, LeanRight],
            Pattern::Bounce => &[Squat, ArmsUp, Squat, TPose, HandsOnHips, ArmsUp],
            Pattern::Chill => &[HandsOnHips, LeanLeft, HandsOnHips, LeanRight, HandsOnHips, TPose],
            Pattern::Strike => &[DabLeft, Squat, DabRight, ArmsUp, TPose, Squat, DabRight, ArmsUp],
        }
    }

    /// High-intensity pattern used for drops and choruses of `style`.
    pub fn energetic(style: Style) -> Pattern {
        match style {
            Style::DrumAndBass | Style::Edm => Pattern::Strike,
            Style::HipHop | Style::Pop => Pattern::Hype,
            Style::House | Style::Chill => Pattern::Bounce,
            Style::Funk => Pattern::Groove,
            Style::Synthwave => Pattern::Wave,
        }
    }

    /// Pattern for a section. `verse_ordinal` counts the verses placed before
    /// this one.
    pub fn for_section(kind: SectionKind, style: Style, verse_ordinal: usize) -> Pattern {
        match kind {
            SectionKind::Drop | SectionKind::Chorus => Pattern::energetic(style),
            SectionKind::Verse => VERSE_ROTATION[verse_ordinal % VERSE_ROTATION.len()],
            SectionKind::Breakdown => Pattern::Chill,
            SectionKind::Buildup => Pattern::Bounce,
            SectionKind::Intro | SectionKind::Outro => Pattern::Flow,
        }
    }
}
