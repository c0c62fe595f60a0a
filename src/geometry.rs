//! Derived-geometry builder.
//!
//! Turns a [`FiringParameters`] record into the ordered set of named lines and
//! arcs drawn on the map overlay. The builder performs no validation: degenerate
//! inputs surface as non-finite coordinates in the result, which callers can
//! detect with [`GeometryResult::is_finite`].

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, trace};

use crate::constants::{FRAGMENTATION_HALF_ANGLE_DEG, MAIN_ARC_SEGMENTS, SAFETY_CIRCLE_SEGMENTS};
use crate::geodesic::{arc_points, destination_point, LatLng};
use crate::params::FiringParameters;
use crate::render::Bounds;

/// Which family a segment belongs to; drives its stroke style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentGroup {
    /// A: aim line at full range
    Primary,
    /// B, C: cone edges
    Dispersion,
    /// D, E, F, G
    Auxiliary,
    MainArc,
    /// H through M
    Explosive,
    SafetyCircle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Line { start: LatLng, end: LatLng },
    Arc { points: Vec<LatLng> },
}

impl Shape {
    /// Points in drawing order
    pub fn points(&self) -> Vec<LatLng> {
        match self {
            Shape::Line { start, end } => vec![*start, *end],
            Shape::Arc { points } => points.clone(),
        }
    }

    /// Borrowing iterator over the points in drawing order
    pub fn iter_points(&self) -> impl Iterator<Item = &LatLng> + '_ {
        let (line, arc): (Option<[&LatLng; 2]>, &[LatLng]) = match self {
            Shape::Line { start, end } => (Some([start, end]), &[]),
            Shape::Arc { points } => (None, points.as_slice()),
        };
        line.into_iter().flatten().chain(arc)
    }

    pub fn point_count(&self) -> usize {
        match self {
            Shape::Line { .. } => 2,
            Shape::Arc { points } => points.len(),
        }
    }

    pub fn first(&self) -> Option<LatLng> {
        match self {
            Shape::Line { start, .. } => Some(*start),
            Shape::Arc { points } => points.first().copied(),
        }
    }

    pub fn last(&self) -> Option<LatLng> {
        match self {
            Shape::Line { end, .. } => Some(*end),
            Shape::Arc { points } => points.last().copied(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Shape::Line { start, end } => start.is_finite() && end.is_finite(),
            Shape::Arc { points } => points.iter().all(LatLng::is_finite),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line { .. } => "line",
            Shape::Arc { .. } => "arc",
        }
    }
}

/// A named entry of a [`GeometryResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub name: String,
    pub group: SegmentGroup,
    #[serde(flatten)]
    pub shape: Shape,
}

/// Ordered mapping from segment name to its shape, in pipeline order.
///
/// Serializes as a JSON object whose keys keep the pipeline order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryResult {
    segments: Vec<Segment>,
}

impl GeometryResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or replace the entry called `name`
    pub fn insert(&mut self, name: &str, group: SegmentGroup, shape: Shape) {
        trace!(segment = name, kind = shape.kind(), points = shape.point_count(), "segment built");
        if let Some(existing) = self.segments.iter_mut().find(|s| s.name == name) {
            existing.group = group;
            existing.shape = shape;
        } else {
            self.segments.push(Segment {
                name: name.to_string(),
                group,
                shape,
            });
        }
    }

    pub fn get(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Union of every drawn point; `None` when empty or nothing is finite
    pub fn bounds(&self) -> Option<Bounds> {
        self.segments
            .iter()
            .flat_map(|s| s.shape.iter_points())
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<Bounds>, &p| match acc {
                Some(b) => Some(b.extend(p)),
                None => Some(Bounds::from_point(p)),
            })
    }

    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(|s| s.shape.is_finite())
    }

    /// Names of segments containing NaN or infinite coordinates
    pub fn non_finite_keys(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| !s.shape.is_finite())
            .map(|s| s.name.as_str())
            .collect()
    }
}

impl Serialize for GeometryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.segments.len()))?;
        for segment in &self.segments {
            map.serialize_entry(&segment.name, segment)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a GeometryResult {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Distances and angles used by the explosive safety geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosiveDistances {
    pub distance_h: f64,
    pub distance_j: f64,
    /// degrees
    pub angle_l: f64,
    /// Shared by L and M; never negative
    pub distance_l: f64,
    pub circle_radius: f64,
    /// degrees either side of the fire bearing
    pub circle_half_span: f64,
}

/// Intermediate quantities of the builder pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedDistances {
    pub distance_d: f64,
    /// degrees; angleP unless overwritten by asin(W/X)
    pub angle_b: f64,
    pub distance_f: f64,
    /// degrees added beyond the cone edges by the main arc, when drawn
    pub arc_offset: Option<f64>,
    pub explosive: Option<ExplosiveDistances>,
}

/// Compute the pipeline's derived distances without building any geometry.
pub fn derive_distances(params: &FiringParameters) -> DerivedDistances {
    let x = params.distance_x;
    let w = params.distance_w;
    let a = params.distance_a;
    let b = params.distance_b;
    let angle_p = params.angle_p;
    let p_rad = angle_p.to_radians();

    let distance_d = if angle_p != 0.0 { w / p_rad.sin() } else { x };

    // angleB starts as angleP and is replaced whenever X and A are both set,
    // even though only W/X enters the arcsine.
    let mut angle_b = angle_p;
    if x > 0.0 && a > 0.0 {
        angle_b = (w / x).asin().to_degrees();
    }
    let distance_f = x * angle_b.to_radians().cos() - w / p_rad.tan();

    let arc_offset = if x > 0.0 && w > 0.0 {
        Some((w / x).asin().to_degrees())
    } else {
        None
    };

    let explosive = if params.munition_type.is_explosive() {
        let frag_rad = FRAGMENTATION_HALF_ANGLE_DEG.to_radians();
        let distance_h = a / frag_rad.sin();
        let distance_j = distance_d + a / p_rad.sin() - a / p_rad.tan() - a / frag_rad.tan();

        let circle_radius = x + b;
        let angle_l_rad = ((a + w) / circle_radius).asin();
        let raw_l = circle_radius * angle_l_rad.cos()
            - distance_j * p_rad.cos()
            - distance_h * (angle_p + FRAGMENTATION_HALF_ANGLE_DEG).to_radians().cos();
        // Only negative lengths are clamped; NaN passes through
        let distance_l = if raw_l < 0.0 { 0.0 } else { raw_l };

        let circle_half_span = params.dispersion_angle + ((a + w) / circle_radius).asin().to_degrees();

        Some(ExplosiveDistances {
            distance_h,
            distance_j,
            angle_l: angle_l_rad.to_degrees(),
            distance_l,
            circle_radius,
            circle_half_span,
        })
    } else {
        None
    };

    DerivedDistances {
        distance_d,
        angle_b,
        distance_f,
        arc_offset,
        explosive,
    }
}

fn line(from: LatLng, bearing_deg: f64, distance_m: f64) -> Shape {
    Shape::Line {
        start: from,
        end: destination_point(from, bearing_deg, distance_m),
    }
}

fn end_of(shape: &Shape) -> LatLng {
    match shape {
        Shape::Line { end, .. } => *end,
        Shape::Arc { points } => points.last().copied().unwrap_or(LatLng::new(f64::NAN, f64::NAN)),
    }
}

/// Build every segment and arc for `params`, in pipeline order.
pub fn build_geometry(params: &FiringParameters) -> GeometryResult {
    let derived = derive_distances(params);
    debug!(
        munition = %params.munition_type,
        bearing = params.fire_bearing,
        distance_d = derived.distance_d,
        distance_f = derived.distance_f,
        angle_b = derived.angle_b,
        "building dispersion geometry"
    );

    let origin = params.origin();
    let bearing = params.fire_bearing;
    let dispersion = params.dispersion_angle;
    let angle_p = params.angle_p;
    let x = params.distance_x;

    let mut result = GeometryResult::new();

    result.insert("A", SegmentGroup::Primary, line(origin, bearing, x));
    result.insert("B", SegmentGroup::Dispersion, line(origin, bearing + dispersion, x));
    result.insert("C", SegmentGroup::Dispersion, line(origin, bearing - dispersion, x));

    let d = line(origin, bearing + dispersion + angle_p, derived.distance_d);
    let e = line(origin, bearing - dispersion - angle_p, derived.distance_d);
    let f = line(end_of(&d), bearing + dispersion, derived.distance_f);
    let g = line(end_of(&e), bearing - dispersion, derived.distance_f);
    result.insert("D", SegmentGroup::Auxiliary, d);
    result.insert("E", SegmentGroup::Auxiliary, e);
    result.insert("F", SegmentGroup::Auxiliary, f);
    result.insert("G", SegmentGroup::Auxiliary, g);

    if let Some(offset) = derived.arc_offset {
        let points = arc_points(
            origin,
            x,
            bearing - dispersion - offset,
            bearing + dispersion + offset,
            MAIN_ARC_SEGMENTS,
        );
        result.insert("arc", SegmentGroup::MainArc, Shape::Arc { points });
    }

    if let Some(ex) = derived.explosive {
        let frag = FRAGMENTATION_HALF_ANGLE_DEG;

        let h = line(origin, bearing + frag + dispersion + angle_p, ex.distance_h);
        let i = line(origin, bearing - frag - dispersion - angle_p, ex.distance_h);
        let j = line(end_of(&h), bearing + dispersion + angle_p, ex.distance_j);
        let k = line(end_of(&i), bearing - dispersion - angle_p, ex.distance_j);
        let l = line(end_of(&j), bearing + dispersion, ex.distance_l);
        let m = line(end_of(&k), bearing - dispersion, ex.distance_l);

        for (name, shape) in [("H", h), ("I", i), ("J", j), ("K", k), ("L", l), ("M", m)] {
            result.insert(name, SegmentGroup::Explosive, shape);
        }

        let points = arc_points(
            origin,
            ex.circle_radius,
            bearing - ex.circle_half_span,
            bearing + ex.circle_half_span,
            SAFETY_CIRCLE_SEGMENTS,
        );
        result.insert("circle", SegmentGroup::SafetyCircle, Shape::Arc { points });
    }

    debug!(segments = result.len(), finite = result.is_finite(), "dispersion geometry built");
    result
}
