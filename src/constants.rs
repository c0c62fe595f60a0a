/// Geodesic and geometry constants used by the dispersion engine

/// Mean Earth radius for the spherical model (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Assumed fragmentation half-angle for explosive munitions (degrees)
///
/// Used by the H/I, J/K and L/M safety lines. Never zero, so `tan` and `sin`
/// of this angle are safe denominators.
pub const FRAGMENTATION_HALF_ANGLE_DEG: f64 = 25.0;

/// Default number of segments for a general arc
pub const DEFAULT_ARC_SEGMENTS: usize = 100;

/// Segments used for the main dispersion arc
pub const MAIN_ARC_SEGMENTS: usize = 150;

/// Segments used for the explosive safety circle
pub const SAFETY_CIRCLE_SEGMENTS: usize = 200;

/// Full turn in degrees
pub const FULL_TURN_DEG: f64 = 360.0;

// Numerical tolerances
/// Coordinate comparison tolerance (degrees), roughly a millimetre on the ground
pub const COORDINATE_TOLERANCE_DEG: f64 = 1e-9;

/// Maximum zoom level advertised for the base tile layers
pub const TILE_MAX_ZOOM: u8 = 19;
