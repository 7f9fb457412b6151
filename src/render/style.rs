//! Colours and stroke settings for the overlay layers.

use serde::{Deserialize, Serialize};

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Visual settings for every overlay layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Surface fill behind everything else
    pub background: Color,

    /// Centre guide colour
    pub guide_color: Color,

    /// Centre guide line width
    pub guide_width: f64,

    /// Centre guide dash and gap lengths
    pub guide_dash: [f64; 2],

    /// Text drawn near the top of the centre guide
    pub guide_label: String,

    /// Label font size in pixels
    pub label_size: f64,

    /// Distance from the top edge to the label baseline
    pub label_offset: f64,

    /// Bone colour
    pub bone_color: Color,

    /// Bone line width
    pub bone_width: f64,

    /// Joint dot colour
    pub joint_color: Color,

    /// Joint dot radius
    pub joint_radius: f64,

    /// Spine colour when aligned
    pub aligned_color: Color,

    /// Spine colour when misaligned
    pub misaligned_color: Color,

    /// Spine curve width
    pub spine_width: f64,

    /// Marker radius at each spine point
    pub spine_point_radius: f64,

    /// Marker radius at the nose
    pub nose_radius: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(26, 26, 46),
            guide_color: Color::rgb(120, 144, 156),
            guide_width: 2.0,
            guide_dash: [10.0, 10.0],
            guide_label: "CENTER".to_string(),
            label_size: 14.0,
            label_offset: 20.0,
            bone_color: Color::rgb(0, 188, 212),
            bone_width: 3.0,
            joint_color: Color::rgb(255, 255, 255),
            joint_radius: 4.0,
            aligned_color: Color::rgb(76, 175, 80),
            misaligned_color: Color::rgb(244, 67, 54),
            spine_width: 5.0,
            spine_point_radius: 5.0,
            nose_radius: 9.0,
        }
    }
}

impl RenderStyle {
    /// Spine colour for the given alignment
    #[must_use]
    pub fn spine_color(&self, is_aligned: bool) -> Color {
        if is_aligned {
            self.aligned_color
        } else {
            self.misaligned_color
        }
    }
}
