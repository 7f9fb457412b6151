//! Command line arguments for the `spine-alignment` binary and how they
//! combine with the configuration file.

use crate::{
    alignment::AlignmentResult,
    config::Config,
    feedback::Status,
    pipeline::FrameReport,
    Error, Result,
};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spine-alignment", author, version, about, long_about = None)]
pub struct Args {
    /// JSON-lines landmark recording to analyse
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Drawing surface width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Drawing surface height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Ignore frames whose nose, shoulders or hips are less visible than this
    #[arg(long)]
    pub min_visibility: Option<f64>,

    /// Show the overlay in a window (requires the `opencv` feature)
    #[arg(short, long)]
    pub window: bool,

    /// Print one JSON object per frame instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Print the example configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Configuration file contents, or defaults when none is given or it
    /// cannot be loaded
    #[must_use]
    pub fn load_config(&self) -> Config {
        let Some(config_path) = &self.config else {
            return Config::default();
        };

        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    }

    /// Let command line values replace their configuration counterparts
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.display.width = width;
        }
        if let Some(height) = self.height {
            config.display.height = height;
        }
        if self.min_visibility.is_some() {
            config.analysis.min_visibility = self.min_visibility;
        }
        if self.input.is_some() {
            config.input.recording.clone_from(&self.input);
        }
        config.display.show_window |= self.window;
    }

    /// Load, override and validate the configuration for this run
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the merged configuration is invalid
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = self.load_config();
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// Recording the run should replay
///
/// # Errors
///
/// Returns a `ConfigError` when neither `--input` nor `input.recording` is set
pub fn recording_path(config: &Config) -> Result<PathBuf> {
    config.input.recording.clone().ok_or_else(|| {
        Error::ConfigError("No landmark recording given; pass --input or set input.recording in the config".to_string())
    })
}

/// Per-frame line printed with `--json`
#[derive(Debug, Serialize)]
pub struct FrameLine<'a> {
    pub frame: usize,
    pub status: Status,
    pub message: &'a str,
    pub alignment: AlignmentResult,
}

impl<'a> FrameLine<'a> {
    #[must_use]
    pub fn new(frame: usize, report: &'a FrameReport) -> Self {
        Self {
            frame,
            status: report.feedback.status,
            message: &report.feedback.message,
            alignment: report.alignment(),
        }
    }
}

/// Text printed for one frame, plain or as a JSON object
///
/// # Errors
///
/// Returns an error if the JSON line cannot be serialized
pub fn report_line(frame: usize, report: &FrameReport, json: bool) -> Result<String> {
    if json {
        serde_json::to_string(&FrameLine::new(frame, report))
            .map_err(|e| Error::InvalidInput(format!("Failed to serialize frame {frame}: {e}")))
    } else {
        Ok(format!("[{frame:>5}] {:<10} {}", report.feedback.status, report.feedback.message))
    }
}
