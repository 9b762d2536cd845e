pub mod landmark;
pub mod matcher;
pub mod reference;

pub use self::landmark::{Keypoint, Landmark, LandmarkFrame, LANDMARK_COUNT};
pub use self::matcher::match_pose;
pub use self::reference::{canonical_frame, neutral_frame, reference_figure, ReferenceFigure, Stance};
