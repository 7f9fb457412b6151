//! Session driver: pulls frames from a source and runs them through the
//! analyzer one at a time.

use crate::{
    config::Config,
    feedback::{FeedbackState, Status},
    frame_source::FrameSource,
    pipeline::{FrameReport, PostureAnalyzer},
    render::Surface,
    Result,
};
use log::{info, warn};
use std::collections::HashMap;
#[cfg(feature = "opencv")]
use std::time::{Duration, Instant};

/// Frame counts collected over one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Frames delivered by the source
    pub frames: usize,
    /// Frames with a usable landmark set
    pub detected: usize,
    /// Frames per published status
    pub status_counts: HashMap<Status, usize>,
    /// Feedback of the last processed frame
    pub last_feedback: Option<FeedbackState>,
}

impl SessionSummary {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        if report.is_detected() {
            self.detected += 1;
        }
        *self.status_counts.entry(report.feedback.status).or_insert(0) += 1;
        self.last_feedback = Some(report.feedback.clone());
    }

    /// Frames that ended with `status`
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

/// Runs a [`PostureAnalyzer`] over every frame of a [`FrameSource`]
pub struct SessionRunner<S> {
    source: S,
    analyzer: PostureAnalyzer,
    summary: SessionSummary,
}

impl<S: FrameSource> SessionRunner<S> {
    #[must_use]
    pub fn new(source: S, analyzer: PostureAnalyzer) -> Self {
        Self {
            source,
            analyzer,
            summary: SessionSummary::default(),
        }
    }

    /// Build a runner whose analyzer follows `config`
    #[must_use]
    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, PostureAnalyzer::new(config.style.clone(), config.analysis.clone()))
    }

    /// Analyzer, e.g. to subscribe observers before running
    pub fn analyzer_mut(&mut self) -> &mut PostureAnalyzer {
        &mut self.analyzer
    }

    #[must_use]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Process the next frame; `Ok(None)` once the source is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the source or the surface fails
    pub fn step(&mut self, surface: &mut dyn Surface) -> Result<Option<FrameReport>> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };

        let report = self.analyzer.process_frame(frame.as_deref(), surface)?;
        self.summary.record(&report);
        Ok(Some(report))
    }

    /// Process every remaining frame, calling `on_report` after each
    ///
    /// # Errors
    ///
    /// Returns an error if the source or the surface fails
    pub fn run<F>(&mut self, surface: &mut dyn Surface, mut on_report: F) -> Result<&SessionSummary>
    where
        F: FnMut(&FrameReport),
    {
        info!("Starting analysis session");
        while let Some(report) = self.step(surface)? {
            on_report(&report);
        }
        self.log_summary();
        Ok(&self.summary)
    }

    /// Show every frame in a `HighGUI` window, paced to `fps`
    ///
    /// Stops early when Esc or `q` is pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the source, drawing or the window fails
    #[cfg(feature = "opencv")]
    pub fn run_window(
        &mut self,
        surface: &mut crate::render::opencv_surface::OpenCvSurface,
        title: &str,
        fps: u32,
    ) -> Result<&SessionSummary> {
        use crate::render::opencv_surface::OpenCvSurface;

        info!("Starting windowed analysis session");
        OpenCvSurface::open_window(title)?;
        let frame_time = Duration::from_secs(1) / fps.max(1);

        loop {
            let started = Instant::now();
            if self.step(surface)?.is_none() {
                info!("End of landmark stream reached");
                break;
            }

            let remaining = frame_time.saturating_sub(started.elapsed());
            let delay_ms = i32::try_from(remaining.as_millis()).unwrap_or(i32::MAX).max(1);
            let key = surface.show(title, delay_ms)?;
            if key == 27 || key == i32::from(b'q') {
                info!("Exit requested by user");
                break;
            }
        }

        self.log_summary();
        Ok(&self.summary)
    }

    fn log_summary(&self) {
        let summary = &self.summary;
        info!(
            "Session finished: {} frames, {} with a detected person",
            summary.frames, summary.detected
        );
        if summary.frames > 0 && summary.detected == 0 {
            warn!("No person was detected in any frame");
        }
        for status in Status::ALL {
            let count = summary.count(status);
            if count > 0 {
                info!("  {status}: {count}");
            }
        }
    }
}
