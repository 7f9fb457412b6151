//! Body landmark types and projection into surface pixel space.
//!
//! The upstream pose model emits a fixed 33-point topology in normalized
//! image coordinates. This module owns that topology table: every anatomical
//! lookup elsewhere in the crate goes through [`index`] or [`BodyJoints`]
//! instead of bare array positions.

use crate::constants::POSE_LANDMARK_COUNT;
use serde::{Deserialize, Serialize};

/// Landmark indices of the upstream 33-point pose topology
pub mod index {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
}

/// Bone segments drawn for the stick figure (start joint, end joint)
pub const SKELETON_BONES: [(usize, usize); 12] = [
    // Arms
    (index::LEFT_SHOULDER, index::RIGHT_SHOULDER),
    (index::LEFT_SHOULDER, index::LEFT_ELBOW),
    (index::LEFT_ELBOW, index::LEFT_WRIST),
    (index::RIGHT_SHOULDER, index::RIGHT_ELBOW),
    (index::RIGHT_ELBOW, index::RIGHT_WRIST),
    // Torso
    (index::LEFT_SHOULDER, index::LEFT_HIP),
    (index::RIGHT_SHOULDER, index::RIGHT_HIP),
    (index::LEFT_HIP, index::RIGHT_HIP),
    // Legs
    (index::LEFT_HIP, index::LEFT_KNEE),
    (index::LEFT_KNEE, index::LEFT_ANKLE),
    (index::RIGHT_HIP, index::RIGHT_KNEE),
    (index::RIGHT_KNEE, index::RIGHT_ANKLE),
];

/// Joints the spine model and feedback depend on
pub const CORE_JOINTS: [usize; 5] = [
    index::NOSE,
    index::LEFT_SHOULDER,
    index::RIGHT_SHOULDER,
    index::LEFT_HIP,
    index::RIGHT_HIP,
];

/// Landmark in normalized image coordinates as delivered by the pose model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJoint {
    /// Horizontal position in [0, 1]
    pub x: f64,
    /// Vertical position in [0, 1]
    pub y: f64,
    /// Relative depth, unused by the analysis
    #[serde(default)]
    pub z: f64,
    /// Model confidence that the joint is visible
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl NormalizedJoint {
    /// Create a fully visible joint at depth zero
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// Set the visibility score
    #[must_use]
    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Landmark position in surface pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelJoint {
    pub x: f64,
    pub y: f64,
}

impl PixelJoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// Linear interpolation; `t = 0` yields `self`, `t = 1` yields `other`
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Project normalized landmarks onto a surface of `width` x `height` pixels
///
/// Output has the same length and order as the input.
#[must_use]
pub fn project(joints: &[NormalizedJoint], width: f64, height: f64) -> Vec<PixelJoint> {
    joints
        .iter()
        .map(|joint| PixelJoint::new(joint.x * width, joint.y * height))
        .collect()
}

/// Whether a landmark array is long enough for anatomical lookups
#[must_use]
pub fn is_complete<T>(joints: &[T]) -> bool {
    joints.len() >= POSE_LANDMARK_COUNT
}

/// Whether every joint in [`CORE_JOINTS`] reaches `min_visibility`
///
/// Incomplete arrays never pass.
#[must_use]
pub fn core_joints_visible(joints: &[NormalizedJoint], min_visibility: f64) -> bool {
    is_complete(joints)
        && CORE_JOINTS
            .iter()
            .all(|&i| joints[i].visibility >= min_visibility)
}

/// Named view of the joints the spine analysis reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyJoints {
    pub nose: PixelJoint,
    pub left_shoulder: PixelJoint,
    pub right_shoulder: PixelJoint,
    pub left_hip: PixelJoint,
    pub right_hip: PixelJoint,
}

impl BodyJoints {
    /// Pick named joints out of a projected landmark array
    ///
    /// Returns `None` when fewer than [`POSE_LANDMARK_COUNT`] joints are present.
    #[must_use]
    pub fn from_pixels(joints: &[PixelJoint]) -> Option<Self> {
        if !is_complete(joints) {
            return None;
        }

        Some(Self {
            nose: joints[index::NOSE],
            left_shoulder: joints[index::LEFT_SHOULDER],
            right_shoulder: joints[index::RIGHT_SHOULDER],
            left_hip: joints[index::LEFT_HIP],
            right_hip: joints[index::RIGHT_HIP],
        })
    }

    #[must_use]
    pub fn shoulder_center(&self) -> PixelJoint {
        self.left_shoulder.midpoint(self.right_shoulder)
    }

    #[must_use]
    pub fn hip_center(&self) -> PixelJoint {
        self.left_hip.midpoint(self.right_hip)
    }
}
