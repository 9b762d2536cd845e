use beatmap_schema::{Difficulty, Song, SongError, Style};

/// Built-in tracks offered on the song picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SongPreset {
    pub key: &'static str,
    pub title: &'static str,
    pub song: Song,
}

pub const PRESETS: [SongPreset; 3] = [
    SongPreset {
        key: "electric-dreams",
        title: "Electric Dreams",
        song: Song {
            tempo_bpm: 120.0,
            duration_seconds: 60.0,
            difficulty: Difficulty::Easy,
            style: Style::Synthwave,
        },
    },
    SongPreset {
        key: "neon-nights",
        title: "Neon Nights",
        song: Song {
            tempo_bpm: 140.0,
            duration_seconds: 60.0,
            difficulty: Difficulty::Medium,
            style: Style::House,
        },
    },
    SongPreset {
        key: "cyber-funk",
        title: "Cyber Funk",
        song: Song {
            tempo_bpm: 160.0,
            duration_seconds: 60.0,
            difficulty: Difficulty::Hard,
            style: Style::Funk,
        },
    },
];

pub fn preset(key: &str) -> Result<&'static SongPreset, SongError> {
    PRESETS
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| SongError::UnknownName {
            kind: "song",
            value: key.to_string(),
        })
}
