//! # Dispersion Engine
//!
//! Geodesic geometry for ballistic firing overlays: turns firing parameters
//! into the named great-circle lines and arcs (dispersion cone, auxiliary
//! lines, main arc and explosive safety geometry) drawn over a web map.

// Re-export the main types and functions
pub use cli_api::{compute_checked, load_parameters, parse_parameters, DispersionError, OutputFormat};
pub use geodesic::{
    arc_points, destination_point, haversine_distance, initial_bearing, normalize_longitude, LatLng,
};
pub use geometry::{
    build_geometry, derive_distances, DerivedDistances, ExplosiveDistances, GeometryResult, Segment,
    SegmentGroup, Shape,
};
pub use params::{FiringParameters, ImpactSurface, MunitionType};
pub use render::{Bounds, OverlayRegistry, StrokeStyle, TileSource, BASE_LAYERS};

// Module declarations
pub mod cli_api;
pub mod constants;
pub mod geodesic;
pub mod geometry;
pub mod params;
pub mod render;

#[cfg(feature = "wasm")]
pub mod wasm;
