//! Layered overlay rendering onto a 2D drawing surface.
//!
//! A frame is drawn in a fixed order, later layers covering earlier ones:
//!
//! 1. background fill
//! 2. dashed vertical centre guide with its label
//! 3. skeleton bones, then a dot on every joint
//! 4. smoothed spine curve coloured by alignment, with point markers
//!
//! The renderer is stateless; everything it needs arrives in a [`FrameScene`].

/// Path segments, curve flattening and dashing
pub mod path;

/// Colours and stroke settings
pub mod style;

/// Surface that records draw calls instead of rasterizing
pub mod recording;

/// `OpenCV` `Mat` drawing surface
#[cfg(feature = "opencv")]
pub mod opencv_surface;

use crate::{
    landmarks::{is_complete, PixelJoint, SKELETON_BONES},
    spine::SpineModel,
    Result,
};
use log::trace;

pub use path::{Path, PathSegment};
pub use recording::{DrawCommand, RecordingSurface};
pub use style::{Color, RenderStyle};

/// Line appearance for [`Surface::stroke_path`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash and gap lengths; `None` draws a solid line
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    #[must_use]
    pub fn dashed(color: Color, width: f64, dash: [f64; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// Imperative 2D drawing backend
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> f64;

    /// Height in pixels
    fn height(&self) -> f64;

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()>;

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()>;

    /// Fill a circle
    fn fill_circle(&mut self, center: PixelJoint, radius: f64, color: Color) -> Result<()>;

    /// Draw text horizontally centred on `anchor.x` with its baseline at `anchor.y`
    fn fill_text(&mut self, text: &str, anchor: PixelJoint, size: f64, color: Color) -> Result<()>;
}

/// What to draw for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameScene<'a> {
    /// Projected joints; empty when nobody is detected
    pub joints: &'a [PixelJoint],
    pub spine: Option<&'a SpineModel>,
    pub is_aligned: bool,
}

impl FrameScene<'static> {
    /// Scene with only background and centre guide
    #[must_use]
    pub fn empty() -> Self {
        Self {
            joints: &[],
            spine: None,
            is_aligned: false,
        }
    }
}

/// Draws frames with a fixed style
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    style: RenderStyle,
}

impl FrameRenderer {
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Draw every layer of `scene`
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the surface
    pub fn render(&self, surface: &mut dyn Surface, scene: &FrameScene<'_>) -> Result<()> {
        self.draw_background(surface)?;
        self.draw_center_guide(surface)?;

        if is_complete(scene.joints) {
            self.draw_skeleton(surface, scene.joints)?;
        } else if !scene.joints.is_empty() {
            trace!("Skipping skeleton for {} joints", scene.joints.len());
        }

        if let Some(spine) = scene.spine {
            self.draw_spine(surface, spine, scene.is_aligned)?;
        }

        Ok(())
    }

    fn draw_background(&self, surface: &mut dyn Surface) -> Result<()> {
        let (width, height) = (surface.width(), surface.height());
        surface.fill_rect(0.0, 0.0, width, height, self.style.background)
    }

    fn draw_center_guide(&self, surface: &mut dyn Surface) -> Result<()> {
        let center_x = surface.width() / 2.0;
        let guide = Path::line(PixelJoint::new(center_x, 0.0), PixelJoint::new(center_x, surface.height()));

        surface.stroke_path(
            &guide,
            &Stroke::dashed(self.style.guide_color, self.style.guide_width, self.style.guide_dash),
        )?;
        surface.fill_text(
            &self.style.guide_label,
            PixelJoint::new(center_x, self.style.label_offset),
            self.style.label_size,
            self.style.guide_color,
        )
    }

    fn draw_skeleton(&self, surface: &mut dyn Surface, joints: &[PixelJoint]) -> Result<()> {
        let bone = Stroke::solid(self.style.bone_color, self.style.bone_width);
        for (start, end) in SKELETON_BONES {
            surface.stroke_path(&Path::line(joints[start], joints[end]), &bone)?;
        }

        for joint in joints {
            surface.fill_circle(*joint, self.style.joint_radius, self.style.joint_color)?;
        }

        Ok(())
    }

    fn draw_spine(&self, surface: &mut dyn Surface, spine: &SpineModel, is_aligned: bool) -> Result<()> {
        let color = self.style.spine_color(is_aligned);
        let points = spine.points();

        surface.stroke_path(&spine_curve(&points), &Stroke::solid(color, self.style.spine_width))?;

        for (i, point) in points.iter().enumerate() {
            let radius = if i == 0 {
                self.style.nose_radius
            } else {
                self.style.spine_point_radius
            };
            surface.fill_circle(*point, radius, color)?;
        }

        Ok(())
    }
}

/// Smooth path through `points` using successive midpoints
///
/// Each interior point becomes the control of a quadratic ending halfway to
/// the next point; the last point is reached with a straight segment.
#[must_use]
pub fn spine_curve(points: &[PixelJoint]) -> Path {
    let Some((first, rest)) = points.split_first() else {
        return Path::new();
    };

    let mut path = Path::new().move_to(*first);
    if let Some((last, interior)) = rest.split_last() {
        for (i, control) in interior.iter().enumerate() {
            let next = rest[i + 1];
            path = path.quad_to(*control, control.midpoint(next));
        }
        path = path.line_to(*last);
    }
    path
}
