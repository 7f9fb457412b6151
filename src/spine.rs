//! Spine model derived from sparse body landmarks.
//!
//! Pose models expose no vertebral joints, so the spine is approximated by
//! interpolating along the axis from the shoulder centre to the hip centre.
//! This is a fixed geometric approximation, not an anatomical measurement.

use crate::{
    constants::{LOWER_SPINE_FRACTION, MID_SPINE_FRACTION, SPINE_POINT_COUNT, UPPER_SPINE_FRACTION},
    landmarks::{BodyJoints, PixelJoint},
};

/// Six spine control points ordered head to pelvis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpineModel {
    pub nose: PixelJoint,
    pub neck: PixelJoint,
    pub upper_spine: PixelJoint,
    pub mid_spine: PixelJoint,
    pub lower_spine: PixelJoint,
    pub hip_center: PixelJoint,
}

impl SpineModel {
    /// Build the spine model from a projected landmark array
    ///
    /// Returns `None` when the array is shorter than the pose topology.
    #[must_use]
    pub fn build(joints: &[PixelJoint]) -> Option<Self> {
        BodyJoints::from_pixels(joints).map(|body| Self::from_body(&body))
    }

    /// Build the spine model from named joints
    #[must_use]
    pub fn from_body(body: &BodyJoints) -> Self {
        let shoulder_center = body.shoulder_center();
        let hip_center = body.hip_center();

        Self {
            nose: body.nose,
            neck: body.nose.midpoint(shoulder_center),
            upper_spine: shoulder_center.lerp(hip_center, UPPER_SPINE_FRACTION),
            mid_spine: shoulder_center.lerp(hip_center, MID_SPINE_FRACTION),
            lower_spine: shoulder_center.lerp(hip_center, LOWER_SPINE_FRACTION),
            hip_center,
        }
    }

    /// Control points in traversal order (nose first, hip centre last)
    #[must_use]
    pub fn points(&self) -> [PixelJoint; SPINE_POINT_COUNT] {
        [
            self.nose,
            self.neck,
            self.upper_spine,
            self.mid_spine,
            self.lower_spine,
            self.hip_center,
        ]
    }
}
