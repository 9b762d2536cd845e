use beatmap_schema::Style;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Music playback collaborator. The game clock does not depend on it.
pub trait AudioBackend {
    fn play(&mut self, tempo_bpm: f64, duration_seconds: f64, style: Style);
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    Play {
        tempo_bpm: f64,
        duration_seconds: f64,
        style: Style,
    },
    Stop,
}

/// Forwards commands to a synth running elsewhere.
#[derive(Debug, Clone)]
pub struct AudioHandle {
    command_tx: Sender<AudioCommand>,
}

impl AudioHandle {
    pub fn new() -> (Self, Receiver<AudioCommand>) {
        let (tx, rx) = unbounded();
        (Self { command_tx: tx }, rx)
    }
}

impl AudioBackend for AudioHandle {
    fn play(&mut self, tempo_bpm: f64, duration_seconds: f64, style: Style) {
        let _ = self.command_tx.send(AudioCommand::Play {
            tempo_bpm,
            duration_seconds,
            style,
        });
    }

    fn stop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Stop);
    }
}

/// Silent backend for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, tempo_bpm: f64, duration_seconds: f64, style: Style) {
        tracing::trace!(tempo_bpm, duration_seconds, %style, "audio disabled, not playing");
    }

    fn stop(&mut self) {}
}
