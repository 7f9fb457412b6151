//! Turns an alignment score and joint geometry into user-facing feedback.
//!
//! Each frame yields a complete [`FeedbackState`] that replaces the previous
//! one. Presentation layers either read the value returned from the pipeline
//! or subscribe through [`FeedbackObserver`].

use crate::{
    alignment::{AlignmentResult, Severity},
    constants::{SHOULDER_TILT_THRESHOLD_PX, SYMMETRY_EPSILON_PX, TURNED_LEFT_RATIO, TURNED_RIGHT_RATIO},
    landmarks::{BodyJoints, PixelJoint},
};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

pub const NOT_DETECTED_MESSAGE: &str = "No person detected. Please step into the camera view.";
pub const SHOULDER_TILT_MESSAGE: &str = "Shoulders are uneven - try to level them.";
pub const EXCELLENT_MESSAGE: &str = "Excellent posture! Your spine is well aligned.";
pub const GOOD_MESSAGE: &str = "Good posture. Minor adjustments could help.";
pub const MODERATE_MESSAGE: &str = "Moderate misalignment detected. Try to straighten your back.";
pub const SEVERE_MESSAGE: &str = "Severe misalignment! Please center yourself and sit up straight.";
pub const TURNED_RIGHT_MESSAGE: &str = "You appear turned to the right - face the camera.";
pub const TURNED_LEFT_MESSAGE: &str = "You appear turned to the left - face the camera.";
pub const FACING_CAMERA_MESSAGE: &str = "Facing camera.";

/// Coarse status shown next to the feedback text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Nobody detected yet (or not any more)
    #[default]
    Checking,
    Excellent,
    Good,
    Moderate,
    Severe,
}

impl Status {
    /// Every status, in display order
    pub const ALL: [Self; 5] = [Self::Checking, Self::Excellent, Self::Good, Self::Moderate, Self::Severe];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Excellent => Self::Excellent,
            Severity::Good => Self::Good,
            Severity::Moderate => Self::Moderate,
            Severity::Severe => Self::Severe,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Feedback text and status for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackState {
    pub message: String,
    pub status: Status,
}

impl FeedbackState {
    /// The "nobody detected" value
    #[must_use]
    pub fn not_detected() -> Self {
        Self {
            message: NOT_DETECTED_MESSAGE.to_string(),
            status: Status::Checking,
        }
    }
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self::not_detected()
    }
}

/// Which way the subject's head is turned relative to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingDirection {
    TurnedRight,
    TurnedLeft,
    FacingCamera,
}

impl FacingDirection {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::TurnedRight => TURNED_RIGHT_MESSAGE,
            Self::TurnedLeft => TURNED_LEFT_MESSAGE,
            Self::FacingCamera => FACING_CAMERA_MESSAGE,
        }
    }
}

/// Estimate facing direction from horizontal nose-to-shoulder symmetry
///
/// A nose horizontally on top of either shoulder gives no usable ratio and
/// counts as facing the camera.
#[must_use]
pub fn facing_direction(nose: PixelJoint, left_shoulder: PixelJoint, right_shoulder: PixelJoint) -> FacingDirection {
    let left_dist = (nose.x - left_shoulder.x).abs();
    let right_dist = (nose.x - right_shoulder.x).abs();

    // Also rejects NaN distances
    if !(left_dist >= SYMMETRY_EPSILON_PX && right_dist >= SYMMETRY_EPSILON_PX) {
        return FacingDirection::FacingCamera;
    }

    let ratio = left_dist / right_dist;
    if ratio > TURNED_RIGHT_RATIO {
        FacingDirection::TurnedRight
    } else if ratio < TURNED_LEFT_RATIO {
        FacingDirection::TurnedLeft
    } else {
        FacingDirection::FacingCamera
    }
}

/// Whether the shoulders differ in height by more than the tilt threshold
#[must_use]
pub fn shoulders_tilted(left_shoulder: PixelJoint, right_shoulder: PixelJoint) -> bool {
    (left_shoulder.y - right_shoulder.y).abs() > SHOULDER_TILT_THRESHOLD_PX
}

/// Build the feedback for one frame
///
/// Fragments are joined with single spaces in a fixed order: shoulder tilt
/// (when present), severity, facing direction, deviation summary.
#[must_use]
pub fn synthesize_feedback(joints: &[PixelJoint], alignment: &AlignmentResult) -> FeedbackState {
    let Some(body) = BodyJoints::from_pixels(joints) else {
        return FeedbackState::not_detected();
    };
    if !alignment.is_detected() {
        return FeedbackState::not_detected();
    }

    let mut fragments: Vec<String> = Vec::with_capacity(4);

    if shoulders_tilted(body.left_shoulder, body.right_shoulder) {
        fragments.push(SHOULDER_TILT_MESSAGE.to_string());
    }

    let severity = alignment.severity();
    let severity_message = match severity {
        Severity::Excellent => EXCELLENT_MESSAGE,
        Severity::Good => GOOD_MESSAGE,
        Severity::Moderate => MODERATE_MESSAGE,
        Severity::Severe => SEVERE_MESSAGE,
    };
    fragments.push(severity_message.to_string());

    fragments.push(facing_direction(body.nose, body.left_shoulder, body.right_shoulder).message().to_string());

    fragments.push(format!(
        "Avg deviation: {}px, Max deviation: {}px",
        alignment.avg_deviation(),
        alignment.max_deviation()
    ));

    FeedbackState {
        message: fragments.join(" "),
        status: Status::from(severity),
    }
}

/// Subscriber notified with every frame's feedback
pub trait FeedbackObserver {
    fn on_feedback(&mut self, feedback: &FeedbackState);
}

impl<F> FeedbackObserver for F
where
    F: FnMut(&FeedbackState),
{
    fn on_feedback(&mut self, feedback: &FeedbackState) {
        self(feedback);
    }
}

/// Shared snapshot of the most recent feedback
///
/// Clones share the same slot, so one clone can be registered with the
/// pipeline while another is polled by a UI thread. Readers always see a
/// whole value.
#[derive(Debug, Clone, Default)]
pub struct LatestFeedback {
    slot: Arc<Mutex<FeedbackState>>,
}

impl LatestFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the latest feedback
    #[must_use]
    pub fn snapshot(&self) -> FeedbackState {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl FeedbackObserver for LatestFeedback {
    fn on_feedback(&mut self, feedback: &FeedbackState) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clone_from(feedback);
    }
}
