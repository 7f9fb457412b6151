//! Constants used throughout the library

/// Number of landmarks the upstream pose model emits per person
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Number of derived spine control points (nose to hip centre)
pub const SPINE_POINT_COUNT: usize = 6;

/// Average deviation (px) below which the spine counts as aligned
pub const ALIGNED_AVG_DEVIATION_PX: f64 = 25.0;

/// Maximum deviation (px) below which the spine counts as aligned
pub const ALIGNED_MAX_DEVIATION_PX: f64 = 40.0;

/// Severity band upper bounds on maximum deviation (px), exclusive
pub const EXCELLENT_MAX_DEVIATION_PX: f64 = 25.0;
pub const GOOD_MAX_DEVIATION_PX: f64 = 40.0;
pub const MODERATE_MAX_DEVIATION_PX: f64 = 60.0;

/// Vertical shoulder offset (px) above which the shoulders count as tilted
pub const SHOULDER_TILT_THRESHOLD_PX: f64 = 15.0;

/// Nose-to-shoulder distance ratio bounds for facing the camera
pub const TURNED_RIGHT_RATIO: f64 = 1.2;
pub const TURNED_LEFT_RATIO: f64 = 0.8;

/// Horizontal nose-to-shoulder distance (px) treated as zero
pub const SYMMETRY_EPSILON_PX: f64 = 1e-6;

/// Interpolation fractions from shoulder centre towards hip centre
pub const UPPER_SPINE_FRACTION: f64 = 1.0 / 3.0;
pub const MID_SPINE_FRACTION: f64 = 0.5;
pub const LOWER_SPINE_FRACTION: f64 = 2.0 / 3.0;

/// Default surface size when none is configured
pub const DEFAULT_SURFACE_WIDTH: u32 = 640;
pub const DEFAULT_SURFACE_HEIGHT: u32 = 480;

/// Shortest configurable centre guide dash or gap (px)
pub const MIN_GUIDE_DASH_PX: f64 = 1.0;

/// Default pacing for the window driver
pub const DEFAULT_FPS: u32 = 30;
