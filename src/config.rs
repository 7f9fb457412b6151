//! Configuration management for the spine alignment monitor
//!
//! Alignment thresholds are fixed constants and deliberately absent here.

use crate::{
    constants::{DEFAULT_FPS, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, MIN_GUIDE_DASH_PX},
    render::RenderStyle,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Surface and window configuration
    pub display: DisplayConfig,

    /// Overlay colours and strokes
    pub style: RenderStyle,

    /// Analysis options
    pub analysis: AnalysisConfig,

    /// Landmark input configuration
    pub input: InputConfig,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Drawing surface width in pixels
    pub width: u32,

    /// Drawing surface height in pixels
    pub height: u32,

    /// Window title when rendering to a window
    pub window_title: String,

    /// Show the overlay in a window (requires the `opencv` feature)
    pub show_window: bool,
}

/// Analysis options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Treat frames as undetected when the nose, shoulders or hips fall
    /// below this visibility. Disabled when unset.
    pub min_visibility: Option<f64>,
}

/// Landmark input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON-lines landmark recording
    pub recording: Option<PathBuf>,

    /// Playback rate when showing a window
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            window_title: "Spine Alignment".to_string(),
            show_window: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            recording: None,
            fps: DEFAULT_FPS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Serialize configuration to YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        // Validate display settings
        if self.display.width == 0 || self.display.height == 0 {
            return Err(Error::ConfigError(format!(
                "Surface size must be non-zero, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if i32::try_from(self.display.width).is_err() || i32::try_from(self.display.height).is_err() {
            return Err(Error::ConfigError("Surface size is too large".to_string()));
        }

        // Validate analysis settings
        if let Some(min_visibility) = self.analysis.min_visibility {
            if !(0.0..=1.0).contains(&min_visibility) {
                return Err(Error::ConfigError(
                    "Minimum visibility must be between 0.0 and 1.0".to_string(),
                ));
            }
        }

        // Validate style
        let [dash, gap] = self.style.guide_dash;
        if !(dash >= MIN_GUIDE_DASH_PX && gap >= MIN_GUIDE_DASH_PX && dash.is_finite() && gap.is_finite()) {
            return Err(Error::ConfigError(format!(
                "Guide dash and gap lengths must be finite and at least {MIN_GUIDE_DASH_PX}px, got [{dash}, {gap}]"
            )));
        }
        for (name, value) in [
            ("guide_width", self.style.guide_width),
            ("bone_width", self.style.bone_width),
            ("spine_width", self.style.spine_width),
            ("joint_radius", self.style.joint_radius),
            ("spine_point_radius", self.style.spine_point_radius),
            ("nose_radius", self.style.nose_radius),
            ("label_size", self.style.label_size),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::ConfigError(format!("Style {name} must be positive, got {value}")));
            }
        }

        // Validate input settings
        if self.input.fps == 0 {
            return Err(Error::ConfigError("Input FPS must be greater than 0".to_string()));
        }
        if let Some(recording) = &self.input.recording {
            if !recording.exists() {
                return Err(Error::ConfigError(format!(
                    "Landmark recording not found: {}",
                    recording.display()
                )));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Spine Alignment Configuration

# Drawing surface
display:
  width: 640
  height: 480
  window_title: "Spine Alignment"
  show_window: false

# Overlay appearance
style:
  background: { r: 26, g: 26, b: 46 }
  guide_color: { r: 120, g: 144, b: 156 }
  guide_width: 2.0
  guide_dash: [10.0, 10.0]
  guide_label: "CENTER"
  label_size: 14.0
  label_offset: 20.0
  bone_color: { r: 0, g: 188, b: 212 }
  bone_width: 3.0
  joint_color: { r: 255, g: 255, b: 255 }
  joint_radius: 4.0
  aligned_color: { r: 76, g: 175, b: 80 }
  misaligned_color: { r: 244, g: 67, b: 54 }
  spine_width: 5.0
  spine_point_radius: 5.0
  nose_radius: 9.0

# Analysis
analysis:
  # Set (e.g. 0.5) to ignore frames whose core joints are poorly visible
  min_visibility: null

# Landmark input
input:
  # recording: "recordings/session.jsonl"
  fps: 30
"#;
