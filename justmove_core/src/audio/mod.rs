pub mod backend;

pub use self::backend::{AudioBackend, AudioCommand, AudioHandle, NullAudio};
