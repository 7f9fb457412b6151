//! Backend-neutral path geometry: segments, curve flattening and dashing.

use crate::landmarks::PixelJoint;

/// Default number of line segments used to approximate one quadratic curve
pub const DEFAULT_CURVE_STEPS: usize = 16;

/// Shortest dash length in pixels; shorter patterns are drawn solid
pub const MIN_DASH_LENGTH_PX: f64 = 0.5;

/// One drawing instruction in a [`Path`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath
    MoveTo(PixelJoint),
    /// Straight line from the current point
    LineTo(PixelJoint),
    /// Quadratic Bézier from the current point
    QuadTo { control: PixelJoint, end: PixelJoint },
}

/// Sequence of path segments, built fluently
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, point: PixelJoint) -> Self {
        self.segments.push(PathSegment::MoveTo(point));
        self
    }

    #[must_use]
    pub fn line_to(mut self, point: PixelJoint) -> Self {
        self.segments.push(PathSegment::LineTo(point));
        self
    }

    #[must_use]
    pub fn quad_to(mut self, control: PixelJoint, end: PixelJoint) -> Self {
        self.segments.push(PathSegment::QuadTo { control, end });
        self
    }

    /// Straight line between two points
    #[must_use]
    pub fn line(from: PixelJoint, to: PixelJoint) -> Self {
        Self::new().move_to(from).line_to(to)
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Approximate the path with polylines, one per subpath
    ///
    /// Each quadratic contributes `curve_steps` line segments. Drawing
    /// commands before the first `MoveTo` start from the origin.
    #[must_use]
    pub fn flatten(&self, curve_steps: usize) -> Vec<Vec<PixelJoint>> {
        let steps = curve_steps.max(1);
        let mut polylines: Vec<Vec<PixelJoint>> = Vec::new();
        let mut current: Vec<PixelJoint> = Vec::new();
        let mut cursor = PixelJoint::default();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(point) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(point);
                    cursor = point;
                }
                PathSegment::LineTo(point) => {
                    if current.is_empty() {
                        current.push(cursor);
                    }
                    current.push(point);
                    cursor = point;
                }
                PathSegment::QuadTo { control, end } => {
                    if current.is_empty() {
                        current.push(cursor);
                    }
                    let start = cursor;
                    for step in 1..=steps {
                        #[allow(clippy::cast_precision_loss)] // step counts are small
                        let t = step as f64 / steps as f64;
                        current.push(quadratic_point(start, control, end, t));
                    }
                    cursor = end;
                }
            }
        }

        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }
}

/// Point at parameter `t` on a quadratic Bézier
#[must_use]
pub fn quadratic_point(start: PixelJoint, control: PixelJoint, end: PixelJoint, t: f64) -> PixelJoint {
    let a = start.lerp(control, t);
    let b = control.lerp(end, t);
    a.lerp(b, t)
}

/// Split a polyline into dash segments of `on` length separated by `off` gaps
///
/// The dash phase carries across polyline vertices. A dash shorter than
/// [`MIN_DASH_LENGTH_PX`] or a negative gap returns the polyline as solid
/// segments.
#[must_use]
pub fn dash_polyline(points: &[PixelJoint], on: f64, off: f64) -> Vec<(PixelJoint, PixelJoint)> {
    if !(on >= MIN_DASH_LENGTH_PX && off >= 0.0) {
        return points.windows(2).map(|pair| (pair[0], pair[1])).collect();
    }

    let mut dashes = Vec::new();
    let mut drawing = true;
    let mut remaining = on;

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = (end.x - start.x).hypot(end.y - start.y);
        if length <= f64::EPSILON {
            continue;
        }

        let mut travelled = 0.0;
        while travelled < length {
            let step = remaining.min(length - travelled);
            // Stop once the step no longer moves along the segment
            if travelled + step <= travelled {
                break;
            }
            if drawing {
                let from = start.lerp(end, travelled / length);
                let to = start.lerp(end, (travelled + step) / length);
                dashes.push((from, to));
            }
            travelled += step;
            remaining -= step;
            if remaining <= f64::EPSILON {
                drawing = !drawing;
                remaining = if drawing { on } else { off };
                if remaining <= f64::EPSILON {
                    // Zero-length gap
                    drawing = true;
                    remaining = on;
                }
            }
        }
    }

    dashes
}
