//! Reference material for each pose: the stick figure shown to the player and
//! synthetic landmark frames that satisfy (or ignore) the matcher rules.

use beatmap_schema::PoseId;
use glam::Vec2;

use super::landmark::{Keypoint, LandmarkFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Upright,
    Squat,
    LeanLeft,
    LeanRight,
}

/// Stick-figure description of a pose in a unit canvas: elbow then hand for
/// each arm, plus the body stance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFigure {
    pub left_arm: [Vec2; 2],
    pub right_arm: [Vec2; 2],
    pub stance: Stance,
}

impl ReferenceFigure {
    const fn upright(left_arm: [Vec2; 2], right_arm: [Vec2; 2]) -> Self {
        Self {
            left_arm,
            right_arm,
            stance: Stance::Upright,
        }
    }
}

const fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

pub fn reference_figure(pose: PoseId) -> ReferenceFigure {
    match pose {
        PoseId::ArmsUp => ReferenceFigure::upright([v(0.35, 0.25), v(0.3, 0.15)], [v(0.65, 0.25), v(0.7, 0.15)]),
        PoseId::TPose => ReferenceFigure::upright([v(0.2, 0.4), v(0.1, 0.4)], [v(0.8, 0.4), v(0.9, 0.4)]),
        PoseId::LeftArmUp => ReferenceFigure::upright([v(0.35, 0.25), v(0.3, 0.15)], [v(0.65, 0.5), v(0.65, 0.6)]),
        PoseId::RightArmUp => ReferenceFigure::upright([v(0.35, 0.5), v(0.35, 0.6)], [v(0.65, 0.25), v(0.7, 0.15)]),
        PoseId::HandsOnHips => ReferenceFigure::upright([v(0.38, 0.45), v(0.4, 0.55)], [v(0.62, 0.45), v(0.6, 0.55)]),
        PoseId::Squat => ReferenceFigure {
            left_arm: [v(0.3, 0.45), v(0.2, 0.45)],
            right_arm: [v(0.7, 0.45), v(0.8, 0.45)],
            stance: Stance::Squat,
        },
        PoseId::LeanLeft => ReferenceFigure {
            left_arm: [v(0.3, 0.35), v(0.2, 0.3)],
            right_arm: [v(0.6, 0.45), v(0.55, 0.55)],
            stance: Stance::LeanLeft,
        },
        PoseId::LeanRight => ReferenceFigure {
            left_arm: [v(0.4, 0.45), v(0.45, 0.55)],
            right_arm: [v(0.7, 0.35), v(0.8, 0.3)],
            stance: Stance::LeanRight,
        },
        PoseId::DabLeft => ReferenceFigure::upright([v(0.25, 0.35), v(0.15, 0.5)], [v(0.55, 0.3), v(0.45, 0.2)]),
        PoseId::DabRight => ReferenceFigure::upright([v(0.45, 0.3), v(0.55, 0.2)], [v(0.75, 0.35), v(0.85, 0.5)]),
    }
}

const NEUTRAL: [(Keypoint, f32, f32); 11] = [
    (Keypoint::Nose, 0.5, 0.2),
    (Keypoint::LeftShoulder, 0.6, 0.3),
    (Keypoint::RightShoulder, 0.4, 0.3),
    (Keypoint::LeftElbow, 0.66, 0.5),
    (Keypoint::RightElbow, 0.34, 0.5),
    (Keypoint::LeftWrist, 0.68, 0.68),
    (Keypoint::RightWrist, 0.32, 0.68),
    (Keypoint::LeftHip, 0.56, 0.55),
    (Keypoint::RightHip, 0.44, 0.55),
    (Keypoint::LeftKnee, 0.56, 0.72),
    (Keypoint::RightKnee, 0.44, 0.72),
];

const UPPER_BODY: [Keypoint; 7] = [
    Keypoint::Nose,
    Keypoint::LeftShoulder,
    Keypoint::RightShoulder,
    Keypoint::LeftElbow,
    Keypoint::RightElbow,
    Keypoint::LeftWrist,
    Keypoint::RightWrist,
];

/// Relaxed standing body with arms hanging. No pose scores high enough on it
/// to earn a rating.
pub fn neutral_frame() -> LandmarkFrame {
    NEUTRAL
        .iter()
        .fold(LandmarkFrame::empty(), |frame, &(keypoint, x, y)| frame.with(keypoint, x, y))
}

/// A body that satisfies every rule of `pose`.
pub fn canonical_frame(pose: PoseId) -> LandmarkFrame {
    let body = neutral_frame();
    match pose {
        PoseId::ArmsUp => body
            .with(Keypoint::LeftElbow, 0.64, 0.2)
            .with(Keypoint::LeftWrist, 0.65, 0.1)
            .with(Keypoint::RightElbow, 0.36, 0.2)
            .with(Keypoint::RightWrist, 0.35, 0.1),
        PoseId::TPose => body
            .with(Keypoint::LeftElbow, 0.73, 0.3)
            .with(Keypoint::LeftWrist, 0.85, 0.3)
            .with(Keypoint::RightElbow, 0.27, 0.3)
            .with(Keypoint::RightWrist, 0.15, 0.3),
        PoseId::LeftArmUp => body
            .with(Keypoint::LeftElbow, 0.64, 0.2)
            .with(Keypoint::LeftWrist, 0.65, 0.1)
            .with(Keypoint::RightWrist, 0.36, 0.6),
        PoseId::RightArmUp => body
            .with(Keypoint::RightElbow, 0.36, 0.2)
            .with(Keypoint::RightWrist, 0.35, 0.1)
            .with(Keypoint::LeftWrist, 0.64, 0.6),
        PoseId::HandsOnHips => body
            .with(Keypoint::LeftElbow, 0.7, 0.45)
            .with(Keypoint::LeftWrist, 0.58, 0.56)
            .with(Keypoint::RightElbow, 0.3, 0.45)
            .with(Keypoint::RightWrist, 0.42, 0.56),
        PoseId::Squat => {
            let lowered: Vec<Keypoint> = UPPER_BODY
                .into_iter()
                .chain([Keypoint::LeftHip, Keypoint::RightHip])
                .collect();
            shifted(body, &lowered, Vec2::new(0.0, 0.12))
        }
        PoseId::LeanLeft => shifted(body, &UPPER_BODY, Vec2::new(0.1, 0.0)),
        PoseId::LeanRight => shifted(body, &UPPER_BODY, Vec2::new(-0.1, 0.0)),
        PoseId::DabLeft => body
            .with(Keypoint::LeftElbow, 0.72, 0.38)
            .with(Keypoint::LeftWrist, 0.8, 0.45)
            .with(Keypoint::RightElbow, 0.6, 0.3)
            .with(Keypoint::RightWrist, 0.52, 0.25),
        PoseId::DabRight => body
            .with(Keypoint::RightElbow, 0.28, 0.38)
            .with(Keypoint::RightWrist, 0.2, 0.45)
            .with(Keypoint::LeftElbow, 0.4, 0.3)
            .with(Keypoint::LeftWrist, 0.48, 0.25),
    }
}

fn shifted(mut frame: LandmarkFrame, keypoints: &[Keypoint], offset: Vec2) -> LandmarkFrame {
    for &keypoint in keypoints {
        if let Some(position) = frame.get(keypoint) {
            frame.set(keypoint, position + offset);
        }
    }
    frame
}
