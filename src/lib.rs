//! Spinal alignment analysis for real-time body pose landmarks.
//!
//! This library turns the per-frame output of a 2D pose-estimation model into
//! a posture assessment and a visual overlay:
//! - spine control points interpolated from nose, shoulder and hip landmarks
//! - lateral deviation from the vertical frame centre, classified into
//!   severity bands
//! - a status and human-readable feedback for the presentation layer
//! - a layered overlay (centre guide, skeleton, colour-coded spine curve)
//!   drawn through a backend-neutral [`render::Surface`]
//!
//! Camera capture and pose inference are not part of this crate. Landmarks
//! arrive through a [`frame_source::FrameSource`], one frame at a time.
//!
//! # Examples
//!
//! ## Analysing a Single Frame
//!
//! ```
//! use spine_alignment::{
//!     landmarks::{index, NormalizedJoint},
//!     pipeline::PostureAnalyzer,
//!     render::RecordingSurface,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut joints = vec![NormalizedJoint::new(0.5, 0.5); 33];
//! joints[index::NOSE] = NormalizedJoint::new(0.5, 0.2);
//! joints[index::LEFT_SHOULDER] = NormalizedJoint::new(0.4, 0.35);
//! joints[index::RIGHT_SHOULDER] = NormalizedJoint::new(0.6, 0.35);
//! joints[index::LEFT_HIP] = NormalizedJoint::new(0.45, 0.7);
//! joints[index::RIGHT_HIP] = NormalizedJoint::new(0.55, 0.7);
//!
//! let mut analyzer = PostureAnalyzer::default();
//! let mut surface = RecordingSurface::new(640.0, 480.0);
//!
//! let report = analyzer.process_frame(Some(&joints), &mut surface)?;
//! println!("{}: {}", report.feedback.status, report.feedback.message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Subscribing to Feedback
//!
//! ```
//! use spine_alignment::{feedback::LatestFeedback, pipeline::PostureAnalyzer, render::RecordingSurface};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut analyzer = PostureAnalyzer::default();
//! let latest = LatestFeedback::new();
//! analyzer.subscribe(latest.clone());
//!
//! // No body in this frame
//! analyzer.process_frame(None, &mut RecordingSurface::new(640.0, 480.0))?;
//! assert_eq!(latest.snapshot().status.as_str(), "checking");
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying a Recording
//!
//! ```no_run
//! use spine_alignment::{
//!     app::SessionRunner, config::Config, frame_source::RecordedFrames, render::RecordingSurface,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let source = RecordedFrames::open("recordings/session.jsonl")?;
//! let mut runner = SessionRunner::from_config(source, &config);
//! let mut surface = RecordingSurface::new(640.0, 480.0);
//!
//! let summary = runner.run(&mut surface, |report| {
//!     println!("{}", report.feedback.message);
//! })?;
//! println!("{} frames", summary.frames);
//! # Ok(())
//! # }
//! ```

/// Landmark types, topology table and pixel projection
pub mod landmarks;

/// Spine control points interpolated from landmarks
pub mod spine;

/// Lateral deviation scoring and severity bands
pub mod alignment;

/// Status and feedback text synthesis
pub mod feedback;

/// Layered overlay rendering
pub mod render;

/// Per-frame orchestration
pub mod pipeline;

/// Landmark frame sources
pub mod frame_source;

/// Session driver
pub mod app;

/// Numeric helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

/// Command line arguments and configuration overrides
pub mod cli;

pub use error::{Error, Result};
