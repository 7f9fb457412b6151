//! Lateral alignment scoring against the vertical frame centre line.
//!
//! Every spine point is compared with `width / 2`, assuming the subject is
//! framed centrally. Thresholds are absolute pixel constants; they are not
//! normalized to subject distance or shoulder width.

use crate::{
    constants::{
        ALIGNED_AVG_DEVIATION_PX, ALIGNED_MAX_DEVIATION_PX, EXCELLENT_MAX_DEVIATION_PX, GOOD_MAX_DEVIATION_PX,
        MODERATE_MAX_DEVIATION_PX, SPINE_POINT_COUNT,
    },
    spine::SpineModel,
    utils::safe_cast::round_to_pixel,
};
use serde::Serialize;
use std::fmt;

/// Severity band keyed on maximum deviation, ordered best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Excellent,
    Good,
    Moderate,
    Severe,
}

impl Severity {
    /// Classify a maximum deviation in pixels
    ///
    /// NaN falls through to [`Severity::Severe`].
    #[must_use]
    pub fn from_max_deviation(max_deviation: f64) -> Self {
        if max_deviation < EXCELLENT_MAX_DEVIATION_PX {
            Self::Excellent
        } else if max_deviation < GOOD_MAX_DEVIATION_PX {
            Self::Good
        } else if max_deviation < MODERATE_MAX_DEVIATION_PX {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of scoring one frame's spine
///
/// `Undetected` is kept distinct from a perfectly centred spine. Its
/// accessors still read as not aligned, zero deviation and severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AlignmentResult {
    Assessed {
        is_aligned: bool,
        /// Mean deviation, rounded to whole pixels
        avg_deviation: u32,
        /// Largest deviation, rounded to whole pixels
        max_deviation: u32,
        severity: Severity,
    },
    Undetected,
}

impl AlignmentResult {
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        matches!(self, Self::Assessed { is_aligned: true, .. })
    }

    #[must_use]
    pub fn avg_deviation(&self) -> u32 {
        match self {
            Self::Assessed { avg_deviation, .. } => *avg_deviation,
            Self::Undetected => 0,
        }
    }

    #[must_use]
    pub fn max_deviation(&self) -> u32 {
        match self {
            Self::Assessed { max_deviation, .. } => *max_deviation,
            Self::Undetected => 0,
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Assessed { severity, .. } => *severity,
            Self::Undetected => Severity::Severe,
        }
    }

    #[must_use]
    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Assessed { .. })
    }
}

/// Horizontal distance of each spine point from the centre line
#[must_use]
pub fn deviations(spine: &SpineModel, width: f64) -> [f64; SPINE_POINT_COUNT] {
    let center_x = width / 2.0;
    spine.points().map(|point| (point.x - center_x).abs())
}

/// Score a spine model against a surface of the given width
#[must_use]
#[allow(clippy::cast_precision_loss)] // SPINE_POINT_COUNT is tiny
pub fn score_alignment(spine: Option<&SpineModel>, width: f64) -> AlignmentResult {
    let Some(spine) = spine else {
        return AlignmentResult::Undetected;
    };

    let deviations = deviations(spine, width);
    let avg = deviations.iter().sum::<f64>() / SPINE_POINT_COUNT as f64;
    // NaN must win so a corrupt landmark never scores as centred
    let max = deviations
        .iter()
        .copied()
        .fold(0.0_f64, |acc, d| if d.is_nan() || d > acc { d } else { acc });

    AlignmentResult::Assessed {
        is_aligned: avg < ALIGNED_AVG_DEVIATION_PX && max < ALIGNED_MAX_DEVIATION_PX,
        avg_deviation: round_to_pixel(avg),
        max_deviation: round_to_pixel(max),
        severity: Severity::from_max_deviation(max),
    }
}
