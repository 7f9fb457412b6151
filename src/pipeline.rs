//! Per-frame orchestration: projection, spine model, scoring, feedback and
//! rendering, run synchronously once per delivered frame.
//!
//! Each frame is derived from scratch. The only value carried between frames
//! is the latest [`FeedbackState`], which observers receive whole once the
//! feedback step finishes.

use crate::{
    alignment::{score_alignment, AlignmentResult},
    config::AnalysisConfig,
    feedback::{synthesize_feedback, FeedbackObserver, FeedbackState},
    landmarks::{core_joints_visible, is_complete, project, NormalizedJoint, PixelJoint},
    render::{FrameRenderer, FrameScene, RenderStyle, Surface},
    spine::SpineModel,
    Result,
};
use log::{debug, info};

/// Whether a frame could be analysed, with its intermediate results
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// A full landmark set was analysed
    Detected {
        joints: Vec<PixelJoint>,
        spine: SpineModel,
        alignment: AlignmentResult,
    },
    /// Too few (or too poorly visible) landmarks
    Undetected,
}

/// Everything one frame produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    pub feedback: FeedbackState,
}

impl FrameReport {
    fn undetected() -> Self {
        Self {
            outcome: FrameOutcome::Undetected,
            feedback: FeedbackState::not_detected(),
        }
    }

    #[must_use]
    pub fn is_detected(&self) -> bool {
        matches!(self.outcome, FrameOutcome::Detected { .. })
    }

    /// Alignment score; [`AlignmentResult::Undetected`] when nobody was found
    #[must_use]
    pub fn alignment(&self) -> AlignmentResult {
        match &self.outcome {
            FrameOutcome::Detected { alignment, .. } => *alignment,
            FrameOutcome::Undetected => AlignmentResult::Undetected,
        }
    }

    #[must_use]
    pub fn spine(&self) -> Option<&SpineModel> {
        match &self.outcome {
            FrameOutcome::Detected { spine, .. } => Some(spine),
            FrameOutcome::Undetected => None,
        }
    }

    #[must_use]
    pub fn joints(&self) -> &[PixelJoint] {
        match &self.outcome {
            FrameOutcome::Detected { joints, .. } => joints,
            FrameOutcome::Undetected => &[],
        }
    }

    /// Scene to draw for this frame
    #[must_use]
    pub fn scene(&self) -> FrameScene<'_> {
        FrameScene {
            joints: self.joints(),
            spine: self.spine(),
            is_aligned: self.alignment().is_aligned(),
        }
    }
}

/// Runs the posture pipeline frame by frame
pub struct PostureAnalyzer {
    renderer: FrameRenderer,
    analysis: AnalysisConfig,
    observers: Vec<Box<dyn FeedbackObserver>>,
    latest: FeedbackState,
}

impl Default for PostureAnalyzer {
    fn default() -> Self {
        Self::new(RenderStyle::default(), AnalysisConfig::default())
    }
}

impl PostureAnalyzer {
    #[must_use]
    pub fn new(style: RenderStyle, analysis: AnalysisConfig) -> Self {
        Self {
            renderer: FrameRenderer::new(style),
            analysis,
            observers: Vec::new(),
            latest: FeedbackState::not_detected(),
        }
    }

    /// Register an observer notified after every frame's feedback step
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: FeedbackObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Feedback published by the most recent frame
    #[must_use]
    pub fn feedback(&self) -> &FeedbackState {
        &self.latest
    }

    /// Analyse one frame without drawing or notifying anyone
    #[must_use]
    pub fn analyze(&self, joints: Option<&[NormalizedJoint]>, width: f64, height: f64) -> FrameReport {
        let Some(joints) = joints.filter(|joints| self.is_usable(joints)) else {
            return FrameReport::undetected();
        };

        let pixels = project(joints, width, height);
        let Some(spine) = SpineModel::build(&pixels) else {
            return FrameReport::undetected();
        };
        let alignment = score_alignment(Some(&spine), width);
        let feedback = synthesize_feedback(&pixels, &alignment);

        FrameReport {
            outcome: FrameOutcome::Detected {
                joints: pixels,
                spine,
                alignment,
            },
            feedback,
        }
    }

    /// Analyse one frame, publish its feedback and draw it onto `surface`
    ///
    /// Feedback is published before drawing starts, so observers see the
    /// frame's result even if the surface fails.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the surface
    pub fn process_frame(&mut self, joints: Option<&[NormalizedJoint]>, surface: &mut dyn Surface) -> Result<FrameReport> {
        let report = self.analyze(joints, surface.width(), surface.height());

        match &report.outcome {
            FrameOutcome::Detected { alignment, .. } => debug!(
                "Frame analysed: severity={} avg={}px max={}px aligned={}",
                alignment.severity(),
                alignment.avg_deviation(),
                alignment.max_deviation(),
                alignment.is_aligned()
            ),
            FrameOutcome::Undetected => debug!("No usable landmarks in frame"),
        }

        self.publish(&report.feedback);
        self.renderer.render(surface, &report.scene())?;

        Ok(report)
    }

    fn is_usable(&self, joints: &[NormalizedJoint]) -> bool {
        match self.analysis.min_visibility {
            Some(min_visibility) => core_joints_visible(joints, min_visibility),
            None => is_complete(joints),
        }
    }

    fn publish(&mut self, feedback: &FeedbackState) {
        if feedback.status != self.latest.status {
            info!("Posture status: {} -> {}", self.latest.status, feedback.status);
        }
        self.latest.clone_from(feedback);

        for observer in &mut self.observers {
            observer.on_feedback(feedback);
        }
    }
}
