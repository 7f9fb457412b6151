//! `OpenCV` surface drawing the overlay onto an 8-bit BGR `Mat`.

use super::{path::dash_polyline, path::DEFAULT_CURVE_STEPS, Color, Path, Stroke, Surface};
use crate::{
    landmarks::PixelJoint,
    utils::safe_cast::{f64_to_i32_clamp, u32_to_i32},
    Result,
};
use opencv::{
    core::{Mat, Point, Rect, Scalar, CV_8UC3},
    highgui::{self, WINDOW_NORMAL},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_AA},
    prelude::*,
};

/// Pixel height of `FONT_HERSHEY_SIMPLEX` at scale 1.0
const HERSHEY_BASE_HEIGHT: f64 = 22.0;

/// Coordinates are clamped to this margin around the image
const COORD_LIMIT: i32 = 1 << 15;

fn to_scalar(color: Color) -> Scalar {
    // OpenCV images are BGR
    Scalar::new(f64::from(color.b), f64::from(color.g), f64::from(color.r), 0.0)
}

fn to_point(point: PixelJoint) -> Point {
    Point::new(
        f64_to_i32_clamp(point.x, -COORD_LIMIT, COORD_LIMIT),
        f64_to_i32_clamp(point.y, -COORD_LIMIT, COORD_LIMIT),
    )
}

fn to_thickness(width: f64) -> i32 {
    f64_to_i32_clamp(width, 1, 255)
}

/// Surface backed by an 8-bit BGR `Mat`
pub struct OpenCvSurface {
    image: Mat,
}

impl OpenCvSurface {
    /// Create a black canvas of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the size does not fit `OpenCV` dimensions or the
    /// allocation fails
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let image = Mat::new_rows_cols_with_default(
            u32_to_i32(height)?,
            u32_to_i32(width)?,
            CV_8UC3,
            Scalar::all(0.0),
        )?;
        Ok(Self { image })
    }

    /// The rendered image
    #[must_use]
    pub fn image(&self) -> &Mat {
        &self.image
    }

    /// Create a resizable `HighGUI` window
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created
    pub fn open_window(title: &str) -> Result<()> {
        highgui::named_window(title, WINDOW_NORMAL)?;
        Ok(())
    }

    /// Show the image in a `HighGUI` window and poll the keyboard
    ///
    /// Returns the pressed key code, or -1 when no key was pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be updated
    pub fn show(&self, title: &str, delay_ms: i32) -> Result<i32> {
        highgui::imshow(title, &self.image)?;
        Ok(highgui::wait_key(delay_ms)?)
    }

    fn draw_segment(&mut self, from: PixelJoint, to: PixelJoint, color: Scalar, thickness: i32) -> Result<()> {
        imgproc::line(&mut self.image, to_point(from), to_point(to), color, thickness, LINE_AA, 0)?;
        Ok(())
    }
}

impl Surface for OpenCvSurface {
    fn width(&self) -> f64 {
        f64::from(self.image.cols())
    }

    fn height(&self) -> f64 {
        f64::from(self.image.rows())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> Result<()> {
        let origin = to_point(PixelJoint::new(x, y));
        let corner = to_point(PixelJoint::new(x + width, y + height));
        let rect = Rect::new(origin.x, origin.y, corner.x - origin.x, corner.y - origin.y);

        imgproc::rectangle(&mut self.image, rect, to_scalar(color), imgproc::FILLED, LINE_AA, 0)?;
        Ok(())
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()> {
        let color = to_scalar(stroke.color);
        let thickness = to_thickness(stroke.width);

        for polyline in path.flatten(DEFAULT_CURVE_STEPS) {
            match stroke.dash {
                Some([on, off]) => {
                    for (from, to) in dash_polyline(&polyline, on, off) {
                        self.draw_segment(from, to, color, thickness)?;
                    }
                }
                None => {
                    for pair in polyline.windows(2) {
                        self.draw_segment(pair[0], pair[1], color, thickness)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn fill_circle(&mut self, center: PixelJoint, radius: f64, color: Color) -> Result<()> {
        imgproc::circle(
            &mut self.image,
            to_point(center),
            f64_to_i32_clamp(radius, 1, COORD_LIMIT),
            to_scalar(color),
            imgproc::FILLED,
            LINE_AA,
            0,
        )?;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, anchor: PixelJoint, size: f64, color: Color) -> Result<()> {
        let scale = size / HERSHEY_BASE_HEIGHT;
        let mut baseline = 0;
        let text_size = imgproc::get_text_size(text, FONT_HERSHEY_SIMPLEX, scale, 1, &mut baseline)?;

        let origin = to_point(anchor);
        let origin = Point::new(origin.x - text_size.width / 2, origin.y);

        imgproc::put_text(
            &mut self.image,
            text,
            origin,
            FONT_HERSHEY_SIMPLEX,
            scale,
            to_scalar(color),
            1,
            LINE_AA,
            false,
        )?;
        Ok(())
    }
}
