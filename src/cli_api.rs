// CLI API module - shared helpers for the command-line tool and the wasm bindings
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::json;
use std::error::Error;
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;

use crate::geodesic::{haversine_distance, LatLng};
use crate::geometry::{build_geometry, derive_distances, DerivedDistances, GeometryResult, Segment, Shape};
use crate::params::FiringParameters;
use crate::render::{Bounds, StrokeStyle};

// Output format for results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    GeoJson,
    Csv,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "geojson" | "geo-json" => Some(OutputFormat::GeoJson),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

// Error type for parameter handling and output at the collaborator boundary
#[derive(Debug)]
pub struct DispersionError {
    message: String,
}

impl DispersionError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DispersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for DispersionError {}

impl From<String> for DispersionError {
    fn from(msg: String) -> Self {
        DispersionError { message: msg }
    }
}

impl From<&str> for DispersionError {
    fn from(msg: &str) -> Self {
        DispersionError { message: msg.to_string() }
    }
}

impl From<serde_json::Error> for DispersionError {
    fn from(err: serde_json::Error) -> Self {
        DispersionError { message: format!("invalid parameter JSON: {err}") }
    }
}

impl From<std::io::Error> for DispersionError {
    fn from(err: std::io::Error) -> Self {
        DispersionError { message: format!("I/O error: {err}") }
    }
}

/// Parse a JSON parameter record; absent fields take their defaults
pub fn parse_parameters(json: &str) -> Result<FiringParameters, DispersionError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON parameter file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<FiringParameters, DispersionError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| DispersionError::from(format!("cannot read {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "loaded parameter file");
    parse_parameters(&contents)
}

/// Validate and build; the entry point used by collaborators
pub fn compute_checked(params: &FiringParameters) -> Result<GeometryResult, DispersionError> {
    params.validate()?;
    let result = build_geometry(params);
    let bad = result.non_finite_keys();
    if !bad.is_empty() {
        tracing::warn!(segments = ?bad, "geometry contains non-finite coordinates");
    }
    Ok(result)
}

/// Great-circle length of a shape along its points (meters)
pub fn shape_length(shape: &Shape) -> f64 {
    let points = shape.points();
    points
        .windows(2)
        .map(|w| haversine_distance(w[0], w[1]))
        .sum()
}

#[derive(Serialize)]
struct StyledSegment<'a> {
    #[serde(flatten)]
    segment: &'a Segment,
    style: StrokeStyle,
}

/// Serializes a result with each segment's stroke style attached
pub struct StyledGeometry<'a>(pub &'a GeometryResult);

impl Serialize for StyledGeometry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for segment in self.0 {
            let styled = StyledSegment {
                segment,
                style: segment.group.style(),
            };
            map.serialize_entry(&segment.name, &styled)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    parameters: &'a FiringParameters,
    derived: DerivedDistances,
    bounds: Option<Bounds>,
    finite: bool,
    segments: StyledGeometry<'a>,
}

pub fn format_json(result: &GeometryResult, params: &FiringParameters) -> Result<String, DispersionError> {
    let report = JsonReport {
        parameters: params,
        derived: derive_distances(params),
        bounds: result.bounds(),
        finite: result.is_finite(),
        segments: StyledGeometry(result),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn lng_lat(p: &LatLng) -> [f64; 2] {
    [p.lng, p.lat]
}

/// GeoJSON FeatureCollection, one LineString per segment ([lng, lat] order)
pub fn format_geojson(result: &GeometryResult, params: &FiringParameters) -> Result<String, DispersionError> {
    let features: Vec<serde_json::Value> = result
        .iter()
        .map(|segment| {
            let style = segment.group.style();
            let coordinates: Vec<[f64; 2]> = segment.shape.iter_points().map(lng_lat).collect();
            json!({
                "type": "Feature",
                "properties": {
                    "name": segment.name,
                    "group": segment.group,
                    "kind": segment.shape.kind(),
                    "stroke": style.color,
                    "dashArray": style.dash_array,
                    "weight": style.weight,
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "properties": {
            "munitionType": params.munition_type,
            "impactSurface": params.impact_surface,
            "origin": lng_lat(&params.origin()),
        },
        "features": features,
    });
    Ok(serde_json::to_string_pretty(&collection)?)
}

pub fn format_csv(result: &GeometryResult) -> String {
    let mut out = String::from("segment,index,latitude,longitude\n");
    for segment in result {
        for (i, p) in segment.shape.iter_points().enumerate() {
            let _ = writeln!(out, "{},{},{:.8},{:.8}", segment.name, i, p.lat, p.lng);
        }
    }
    out
}

pub fn format_table(result: &GeometryResult, params: &FiringParameters) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "╔════════════════════════════════════════╗");
    let _ = writeln!(out, "║         DISPERSION GEOMETRY            ║");
    let _ = writeln!(out, "╠════════════════════════════════════════╣");
    let _ = writeln!(out, "║ Munition:       {:>14}         ║", params.munition_type.to_string());
    let _ = writeln!(out, "║ Impact Surface: {:>14}         ║", params.impact_surface.to_string());
    let _ = writeln!(out, "║ Origin Lat:     {:>14.6}         ║", params.latitude);
    let _ = writeln!(out, "║ Origin Lng:     {:>14.6}         ║", params.longitude);
    let _ = writeln!(out, "║ Fire Bearing:   {:>12.2} °         ║", params.fire_bearing);
    let _ = writeln!(out, "║ Range X:        {:>12.1} m         ║", params.distance_x);
    let _ = writeln!(out, "╚════════════════════════════════════════╝");
    let _ = writeln!(out);
    let _ = writeln!(out, "┌─────────┬──────┬──────┬──────────────┬──────────────┬────────────┐");
    let _ = writeln!(out, "│ Segment │ Kind │  Pts │  End Lat (°) │  End Lng (°) │ Length (m) │");
    let _ = writeln!(out, "├─────────┼──────┼──────┼──────────────┼──────────────┼────────────┤");
    for segment in result {
        let end = segment.shape.last().unwrap_or(LatLng::new(f64::NAN, f64::NAN));
        let _ = writeln!(
            out,
            "│ {:<7} │ {:<4} │ {:>4} │ {:>12.6} │ {:>12.6} │ {:>10.1} │",
            segment.name,
            segment.shape.kind(),
            segment.shape.point_count(),
            end.lat,
            end.lng,
            shape_length(&segment.shape)
        );
    }
    let _ = writeln!(out, "└─────────┴──────┴──────┴──────────────┴──────────────┴────────────┘");

    let bad = result.non_finite_keys();
    if !bad.is_empty() {
        let _ = writeln!(out, "\nWarning: non-finite coordinates in {}", bad.join(", "));
    }
    out
}

pub fn format_result(
    result: &GeometryResult,
    params: &FiringParameters,
    format: OutputFormat,
) -> Result<String, DispersionError> {
    match format {
        OutputFormat::Table => Ok(format_table(result, params)),
        OutputFormat::Json => format_json(result, params),
        OutputFormat::GeoJson => format_geojson(result, params),
        OutputFormat::Csv => Ok(format_csv(result)),
    }
}
