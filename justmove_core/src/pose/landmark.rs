use glam::Vec2;

/// Number of keypoints in a full-body frame from the pose estimator.
pub const LANDMARK_COUNT: usize = 33;

/// The keypoints the matchers look at. Indices follow the estimator's
/// 33-point body layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keypoint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
}

impl Keypoint {
    pub const ALL: [Keypoint; 11] = [
        Keypoint::Nose,
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftElbow,
        Keypoint::RightElbow,
        Keypoint::LeftWrist,
        Keypoint::RightWrist,
        Keypoint::LeftHip,
        Keypoint::RightHip,
        Keypoint::LeftKnee,
        Keypoint::RightKnee,
    ];

    pub const fn index(self) -> usize {
        match self {
            Keypoint::Nose => 0,
            Keypoint::LeftShoulder => 11,
            Keypoint::RightShoulder => 12,
            Keypoint::LeftElbow => 13,
            Keypoint::RightElbow => 14,
            Keypoint::LeftWrist => 15,
            Keypoint::RightWrist => 16,
            Keypoint::LeftHip => 23,
            Keypoint::RightHip => 24,
            Keypoint::LeftKnee => 25,
            Keypoint::RightKnee => 26,
        }
    }
}

/// One keypoint: image-normalized position (`y` grows downward) and the
/// estimator's visibility score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub position: Vec2,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            visibility: 1.0,
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }

    /// Placeholder for a keypoint the estimator did not report.
    pub fn missing() -> Self {
        Self {
            position: Vec2::NAN,
            visibility: 0.0,
        }
    }

    pub fn is_present(&self) -> bool {
        self.position.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkFrame {
    landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// A full-size frame where every keypoint is missing.
    pub fn empty() -> Self {
        Self {
            landmarks: vec![Landmark::missing(); LANDMARK_COUNT],
        }
    }

    pub fn with(mut self, keypoint: Keypoint, x: f32, y: f32) -> Self {
        self.set(keypoint, Vec2::new(x, y));
        self
    }

    pub fn without(mut self, keypoint: Keypoint) -> Self {
        if let Some(slot) = self.landmarks.get_mut(keypoint.index()) {
            *slot = Landmark::missing();
        }
        self
    }

    pub fn set(&mut self, keypoint: Keypoint, position: Vec2) {
        let index = keypoint.index();
        if self.landmarks.len() <= index {
            self.landmarks.resize(index + 1, Landmark::missing());
        }
        self.landmarks[index] = Landmark {
            position,
            visibility: 1.0,
        };
    }

    /// Position of `keypoint`, or `None` if it is absent or not finite.
    pub fn get(&self, keypoint: Keypoint) -> Option<Vec2> {
        self.landmarks
            .get(keypoint.index())
            .filter(|l| l.is_present())
            .map(|l| l.position)
    }

    pub fn landmark(&self, keypoint: Keypoint) -> Option<&Landmark> {
        self.landmarks.get(keypoint.index())
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Moves every present keypoint by `offset`.
    pub fn translated(mut self, offset: Vec2) -> Self {
        for landmark in self.landmarks.iter_mut().filter(|l| l.is_present()) {
            landmark.position += offset;
        }
        self
    }
}
