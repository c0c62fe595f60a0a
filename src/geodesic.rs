//! Spherical-Earth geodesic primitives.
//!
//! All angles are in degrees at the API boundary and converted to radians
//! internally. Distances are great-circle meters on a sphere of radius
//! [`EARTH_RADIUS_M`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    COORDINATE_TOLERANCE_DEG, DEFAULT_ARC_SEGMENTS, EARTH_RADIUS_M, FULL_TURN_DEG,
};

/// A WGS84 geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Copy with the longitude wrapped into [-180, 180).
    pub fn normalized(self) -> Self {
        Self {
            lat: self.lat,
            lng: normalize_longitude(self.lng),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Component-wise comparison within `tolerance` degrees.
    pub fn approx_eq(&self, other: &LatLng, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lng - other.lng).abs() <= tolerance
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Point reached by travelling `distance_m` along the initial compass
/// `bearing_deg` from `origin` (spherical direct formula).
///
/// The returned longitude is not wrapped; use [`normalize_longitude`] when a
/// value in [-180, 180) is required.
pub fn destination_point(origin: LatLng, bearing_deg: f64, distance_m: f64) -> LatLng {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lng.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    LatLng {
        lat: phi2.to_degrees(),
        lng: lambda2.to_degrees(),
    }
}

/// Raw (pre-modulo) bearings sampled by [`arc_points`].
///
/// When `end_deg < start_deg` a full turn is added to the end so the sweep is
/// always clockwise. `segments == 0` yields only the start bearing.
pub fn sweep_bearings(start_deg: f64, end_deg: f64, segments: usize) -> Vec<f64> {
    if segments == 0 {
        return vec![start_deg];
    }

    let end_deg = if end_deg < start_deg {
        end_deg + FULL_TURN_DEG
    } else {
        end_deg
    };
    let span = end_deg - start_deg;

    (0..=segments)
        .map(|i| start_deg + span * i as f64 / segments as f64)
        .collect()
}

/// Sample an arc of radius `radius_m` around `origin` from `start_deg` to
/// `end_deg`, returning `segments + 1` points.
pub fn arc_points(
    origin: LatLng,
    radius_m: f64,
    start_deg: f64,
    end_deg: f64,
    segments: usize,
) -> Vec<LatLng> {
    sweep_bearings(start_deg, end_deg, segments)
        .into_iter()
        .map(|bearing| destination_point(origin, bearing % FULL_TURN_DEG, radius_m))
        .collect()
}

/// [`arc_points`] with the default segment count.
pub fn default_arc_points(origin: LatLng, radius_m: f64, start_deg: f64, end_deg: f64) -> Vec<LatLng> {
    arc_points(origin, radius_m, start_deg, end_deg, DEFAULT_ARC_SEGMENTS)
}

/// Great-circle distance between two points (haversine, meters)
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial compass bearing from `a` to `b`, in [0, 360)
pub fn initial_bearing(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if bearing >= FULL_TURN_DEG {
        0.0
    } else {
        bearing
    }
}

/// Wrap a longitude into [-180, 180)
pub fn normalize_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(FULL_TURN_DEG) - 180.0
}

/// True when two points coincide within the engine's coordinate tolerance.
pub fn same_point(a: LatLng, b: LatLng) -> bool {
    a.approx_eq(&b, COORDINATE_TOLERANCE_DEG)
}
