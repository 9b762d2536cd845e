pub mod clock;

pub use self::clock::SessionClock;
