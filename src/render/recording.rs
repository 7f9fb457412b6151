//! Drawing surface that records commands for headless runs and inspection.

use super::{Color, Path, Stroke, Surface};
use crate::{landmarks::PixelJoint, Result};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
    },
    FillCircle {
        center: PixelJoint,
        radius: f64,
        color: Color,
    },
    FillText {
        text: String,
        anchor: PixelJoint,
        size: f64,
        color: Color,
    },
}

/// Surface that keeps a list of draw calls
///
/// Used headless and in tests to inspect exactly what a frame drew.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the dimensions
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take recorded commands, leaving the surface empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Change the reported dimensions, as when a window is resized
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()> {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: *stroke,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: PixelJoint, radius: f64, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, anchor: PixelJoint, size: f64, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            anchor,
            size,
            color,
        });
        Ok(())
    }
}
