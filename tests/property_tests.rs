//! Property-based tests for projection, spine geometry and scoring

use proptest::prelude::*;
use spine_alignment::{
    alignment::{score_alignment, Severity},
    constants::POSE_LANDMARK_COUNT,
    landmarks::{index, project, NormalizedJoint, PixelJoint},
    pipeline::PostureAnalyzer,
    render::RecordingSurface,
    spine::SpineModel,
};

fn joint_strategy() -> impl Strategy<Value = NormalizedJoint> {
    (0.0..=1.0f64, 0.0..=1.0f64, -1.0..=1.0f64, 0.0..=1.0f64).prop_map(|(x, y, z, visibility)| NormalizedJoint {
        x,
        y,
        z,
        visibility,
    })
}

fn body_strategy() -> impl Strategy<Value = Vec<NormalizedJoint>> {
    prop::collection::vec(joint_strategy(), POSE_LANDMARK_COUNT..=POSE_LANDMARK_COUNT + 4)
}

/// Position of `point` along the axis from `origin` to `target`, in axis lengths
fn axis_position(point: PixelJoint, origin: PixelJoint, target: PixelJoint) -> f64 {
    let (ax, ay) = (target.x - origin.x, target.y - origin.y);
    ((point.x - origin.x) * ax + (point.y - origin.y) * ay) / (ax * ax + ay * ay)
}

proptest! {
    #[test]
    fn prop_projection_is_linear(
        joints in prop::collection::vec(joint_strategy(), 0..40),
        width in 1.0..4000.0f64,
        height in 1.0..4000.0f64,
    ) {
        let pixels = project(&joints, width, height);

        prop_assert_eq!(pixels.len(), joints.len());
        for (joint, pixel) in joints.iter().zip(&pixels) {
            prop_assert_eq!(pixel.x, joint.x * width);
            prop_assert_eq!(pixel.y, joint.y * height);
        }
    }

    #[test]
    fn prop_spine_points_ordered_head_to_pelvis(
        shoulder_x in 100.0..700.0f64,
        shoulder_y in 100.0..300.0f64,
        shoulder_half_width in 20.0..150.0f64,
        torso_dx in -150.0..150.0f64,
        torso_length in 80.0..400.0f64,
        hip_half_width in 20.0..150.0f64,
        nose_back in 0.0..0.8f64,
        nose_side in -0.5..0.5f64,
    ) {
        let shoulder_center = PixelJoint::new(shoulder_x, shoulder_y);
        let hip_center = PixelJoint::new(shoulder_x + torso_dx, shoulder_y + torso_length);

        // Nose above the shoulder centre along the torso axis, free to lean sideways
        let (ax, ay) = (hip_center.x - shoulder_center.x, hip_center.y - shoulder_center.y);
        let nose = PixelJoint::new(
            shoulder_center.x - nose_back * ax - nose_side * ay,
            shoulder_center.y - nose_back * ay + nose_side * ax,
        );

        let mut pixels = vec![hip_center; POSE_LANDMARK_COUNT];
        pixels[index::NOSE] = nose;
        pixels[index::LEFT_SHOULDER] = PixelJoint::new(shoulder_center.x - shoulder_half_width, shoulder_center.y);
        pixels[index::RIGHT_SHOULDER] = PixelJoint::new(shoulder_center.x + shoulder_half_width, shoulder_center.y);
        pixels[index::LEFT_HIP] = PixelJoint::new(hip_center.x - hip_half_width, hip_center.y);
        pixels[index::RIGHT_HIP] = PixelJoint::new(hip_center.x + hip_half_width, hip_center.y);

        let spine = SpineModel::build(&pixels).unwrap();
        let positions = spine.points().map(|p| axis_position(p, shoulder_center, hip_center));

        for pair in positions.windows(2) {
            prop_assert!(pair[0] <= pair[1] + 1e-9, "out of order: {:?}", positions);
        }
    }

    #[test]
    fn prop_severity_is_monotonic(a in 0.0..200.0f64, b in 0.0..200.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Severity::from_max_deviation(low) <= Severity::from_max_deviation(high));
    }

    #[test]
    fn prop_aligned_implies_mild_severity(joints in body_strategy(), width in 100.0..2000.0f64, height in 100.0..2000.0f64) {
        let pixels = project(&joints, width, height);
        let result = score_alignment(SpineModel::build(&pixels).as_ref(), width);

        if result.is_aligned() {
            prop_assert!(matches!(result.severity(), Severity::Excellent | Severity::Good));
        }
        prop_assert!(result.avg_deviation() <= result.max_deviation());
    }

    #[test]
    fn prop_pipeline_is_idempotent(joints in body_strategy(), width in 100.0..2000.0f64, height in 100.0..2000.0f64) {
        let mut analyzer = PostureAnalyzer::default();
        let mut surface = RecordingSurface::new(width, height);

        let first = analyzer.process_frame(Some(&joints), &mut surface).unwrap();
        let first_commands = surface.take_commands();
        let second = analyzer.process_frame(Some(&joints), &mut surface).unwrap();

        prop_assert_eq!(first.alignment(), second.alignment());
        prop_assert_eq!(&first.feedback, &second.feedback);
        prop_assert_eq!(first_commands, surface.take_commands());
    }
}
