//! Per-pose similarity heuristics.
//!
//! Each pose is a handful of geometric rules over named keypoints. A rule that
//! holds awards a fixed partial credit and the credits of a pose add up to 1.0.
//! Coordinates are image-normalized, so "above" means a smaller `y`.

use beatmap_schema::PoseId;
use glam::Vec2;

use super::landmark::{Keypoint, LandmarkFrame};

const T_POSE_HEIGHT_TOLERANCE: f32 = 0.08;
const T_POSE_REACH: f32 = 0.2;
const RAISE_MARGIN: f32 = 0.1;
const RESTING_HAND_TOLERANCE: f32 = 0.15;
const HIP_TOLERANCE: f32 = 0.1;
const SQUAT_DEPTH_NEAR: f32 = 0.12;
const SQUAT_DEPTH_LOOSE: f32 = 0.18;
const SQUAT_SHOULDER_DROP: f32 = 0.35;
const LEAN_SLIGHT: f32 = 0.04;
const LEAN_FULL: f32 = 0.08;
const DAB_REACH: f32 = 0.1;
const DAB_FACE_RADIUS: f32 = 0.15;
const DAB_EXTENSION: f32 = 0.2;

/// Similarity of `frame` to `pose` in `[0, 1]`. Zero when a keypoint the pose
/// depends on is missing.
pub fn match_pose(pose: PoseId, frame: &LandmarkFrame) -> f64 {
    let credit = match pose {
        PoseId::ArmsUp => arms_up(frame),
        PoseId::TPose => t_pose(frame),
        PoseId::LeftArmUp => one_arm_up(frame, Side::Left),
        PoseId::RightArmUp => one_arm_up(frame, Side::Right),
        PoseId::HandsOnHips => hands_on_hips(frame),
        PoseId::Squat => squat(frame),
        PoseId::LeanLeft => lean(frame, Side::Left),
        PoseId::LeanRight => lean(frame, Side::Right),
        PoseId::DabLeft => dab(frame, Side::Left),
        PoseId::DabRight => dab(frame, Side::Right),
    };
    credit.map_or(0.0, Credit::score)
}

/// Credits are counted in hundredths so that sums like 0.3 + 0.3 + 0.2 land
/// exactly on the rating thresholds.
#[derive(Debug, Default, Clone, Copy)]
struct Credit(u32);

impl Credit {
    fn award(&mut self, holds: bool, hundredths: u32) {
        if holds {
            self.0 += hundredths;
        }
    }

    fn score(self) -> f64 {
        f64::from(self.0.min(100)) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Direction along `x` pointing away from the body on this side of the
    /// image.
    fn outward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    fn shoulder(self) -> Keypoint {
        match self {
            Side::Left => Keypoint::LeftShoulder,
            Side::Right => Keypoint::RightShoulder,
        }
    }

    fn elbow(self) -> Keypoint {
        match self {
            Side::Left => Keypoint::LeftElbow,
            Side::Right => Keypoint::RightElbow,
        }
    }

    fn wrist(self) -> Keypoint {
        match self {
            Side::Left => Keypoint::LeftWrist,
            Side::Right => Keypoint::RightWrist,
        }
    }

    fn hip(self) -> Keypoint {
        match self {
            Side::Left => Keypoint::LeftHip,
            Side::Right => Keypoint::RightHip,
        }
    }
}

fn is_above(a: Vec2, b: Vec2) -> bool {
    a.y < b.y
}

fn arms_up(frame: &LandmarkFrame) -> Option<Credit> {
    let mut credit = Credit::default();
    for side in [Side::Left, Side::Right] {
        let shoulder = frame.get(side.shoulder())?;
        let wrist = frame.get(side.wrist())?;
        credit.award(is_above(wrist, shoulder), 30);
        if let Some(elbow) = frame.get(side.elbow()) {
            credit.award(is_above(wrist, elbow), 20);
        }
    }
    Some(credit)
}

fn t_pose(frame: &LandmarkFrame) -> Option<Credit> {
    let left_shoulder = frame.get(Keypoint::LeftShoulder)?;
    let right_shoulder = frame.get(Keypoint::RightShoulder)?;
    let center_x = (left_shoulder.x + right_shoulder.x) / 2.0;

    let mut credit = Credit::default();
    for side in [Side::Left, Side::Right] {
        let shoulder = frame.get(side.shoulder())?;
        let wrist = frame.get(side.wrist())?;
        credit.award((wrist.y - shoulder.y).abs() < T_POSE_HEIGHT_TOLERANCE, 30);
        credit.award((wrist.x - center_x).abs() > T_POSE_REACH, 20);
    }
    Some(credit)
}

fn one_arm_up(frame: &LandmarkFrame, raised: Side) -> Option<Credit> {
    let resting = raised.other();
    let raised_shoulder = frame.get(raised.shoulder())?;
    let raised_wrist = frame.get(raised.wrist())?;
    frame.get(resting.shoulder())?;
    let resting_wrist = frame.get(resting.wrist())?;

    let mut credit = Credit::default();
    credit.award(is_above(raised_wrist, raised_shoulder), 40);
    credit.award(raised_wrist.y < raised_shoulder.y - RAISE_MARGIN, 30);
    if let Some(hip) = frame.get(resting.hip()) {
        credit.award((resting_wrist.y - hip.y).abs() < RESTING_HAND_TOLERANCE, 30);
    }
    Some(credit)
}

fn hands_on_hips(frame: &LandmarkFrame) -> Option<Credit> {
    let mut credit = Credit::default();
    for side in [Side::Left, Side::Right] {
        let hip = frame.get(side.hip())?;
        let wrist = frame.get(side.wrist())?;
        let offset = (wrist - hip).abs();
        credit.award(offset.y < HIP_TOLERANCE, 25);
        credit.award(offset.x < HIP_TOLERANCE, 25);
    }
    Some(credit)
}

fn squat(frame: &LandmarkFrame) -> Option<Credit> {
    let left_hip = frame.get(Keypoint::LeftHip)?;
    frame.get(Keypoint::RightHip)?;
    let left_knee = frame.get(Keypoint::LeftKnee)?;
    frame.get(Keypoint::RightKnee)?;
    let left_shoulder = frame.get(Keypoint::LeftShoulder)?;

    let mut credit = Credit::default();
    let depth = (left_hip.y - left_knee.y).abs();
    if depth < SQUAT_DEPTH_NEAR {
        credit.award(true, 50);
    } else if depth < SQUAT_DEPTH_LOOSE {
        credit.award(true, 25);
    }
    credit.award(left_shoulder.y > SQUAT_SHOULDER_DROP, 50);
    Some(credit)
}

/// Positive lean means the shoulders sit further toward `side` than the hips.
fn lean(frame: &LandmarkFrame, side: Side) -> Option<Credit> {
    let shoulders = (frame.get(Keypoint::LeftShoulder)? + frame.get(Keypoint::RightShoulder)?) / 2.0;
    let hips = (frame.get(Keypoint::LeftHip)? + frame.get(Keypoint::RightHip)?) / 2.0;
    let lean = (shoulders.x - hips.x) * side.outward();

    let mut credit = Credit::default();
    credit.award(lean > LEAN_SLIGHT, 50);
    credit.award(lean > LEAN_FULL, 50);
    Some(credit)
}

fn dab(frame: &LandmarkFrame, leading: Side) -> Option<Credit> {
    let trailing = leading.other();
    let lead_shoulder = frame.get(leading.shoulder())?;
    let lead_wrist = frame.get(leading.wrist())?;
    frame.get(trailing.shoulder())?;
    let trail_wrist = frame.get(trailing.wrist())?;

    let mut credit = Credit::default();
    let reach = (lead_wrist.x - lead_shoulder.x) * leading.outward();
    credit.award(reach > DAB_REACH && lead_wrist.y > lead_shoulder.y, 30);
    if let Some(nose) = frame.get(Keypoint::Nose) {
        credit.award(trail_wrist.distance(nose) < DAB_FACE_RADIUS, 40);
    }
    credit.award(lead_wrist.distance(lead_shoulder) > DAB_EXTENSION, 30);
    Some(credit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoulders_and_wrists() -> LandmarkFrame {
        LandmarkFrame::empty()
            .with(Keypoint::LeftShoulder, 0.6, 0.3)
            .with(Keypoint::RightShoulder, 0.4, 0.3)
            .with(Keypoint::LeftWrist, 0.85, 0.3)
            .with(Keypoint::RightWrist, 0.15, 0.3)
    }

    #[test]
    fn credits_sum_exactly() {
        let mut credit = Credit::default();
        credit.award(true, 30);
        credit.award(true, 30);
        credit.award(true, 20);
        assert_eq!(credit.score(), 0.8);
    }

    #[test]
    fn t_pose_awards_height_and_reach() {
        let frame = shoulders_and_wrists();
        assert_eq!(match_pose(PoseId::TPose, &frame), 1.0);

        let dropped = frame.with(Keypoint::RightWrist, 0.15, 0.5);
        assert_eq!(match_pose(PoseId::TPose, &dropped), 0.7);
    }

    #[test]
    fn arms_up_without_elbows_caps_at_shoulder_credit() {
        let frame = LandmarkFrame::empty()
            .with(Keypoint::LeftShoulder, 0.6, 0.3)
            .with(Keypoint::RightShoulder, 0.4, 0.3)
            .with(Keypoint::LeftWrist, 0.65, 0.1)
            .with(Keypoint::RightWrist, 0.35, 0.1);
        assert_eq!(match_pose(PoseId::ArmsUp, &frame), 0.6);
    }

    #[test]
    fn lean_direction_is_signed() {
        let frame = LandmarkFrame::empty()
            .with(Keypoint::LeftShoulder, 0.66, 0.3)
            .with(Keypoint::RightShoulder, 0.46, 0.3)
            .with(Keypoint::LeftHip, 0.56, 0.55)
            .with(Keypoint::RightHip, 0.44, 0.55);
        assert_eq!(match_pose(PoseId::LeanLeft, &frame), 0.5);
        assert_eq!(match_pose(PoseId::LeanRight, &frame), 0.0);
    }

    #[test]
    fn squat_gives_partial_credit_for_shallow_depth() {
        let frame = LandmarkFrame::empty()
            .with(Keypoint::LeftShoulder, 0.6, 0.3)
            .with(Keypoint::LeftHip, 0.56, 0.57)
            .with(Keypoint::RightHip, 0.44, 0.57)
            .with(Keypoint::LeftKnee, 0.56, 0.72)
            .with(Keypoint::RightKnee, 0.44, 0.72);
        assert_eq!(match_pose(PoseId::Squat, &frame), 0.25);
    }
}
