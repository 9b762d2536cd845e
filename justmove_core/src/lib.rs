pub mod audio;
pub mod beatmap;
pub mod config;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod pose;
pub mod presentation;
pub mod session;
pub mod time;

pub use beatmap_schema as schema;
