//! Presentation support for map front-ends: stroke styles, base tile layers,
//! viewport bounds, and the renderer-owned overlay registry.

use serde::Serialize;
use std::collections::HashMap;

use crate::constants::TILE_MAX_ZOOM;
use crate::geodesic::LatLng;
use crate::geometry::{GeometryResult, Segment, SegmentGroup};

/// Polyline stroke style, in the vocabulary of web map libraries
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: &'static str,
    pub dash_array: &'static str,
    pub weight: f64,
}

const RED: &str = "#FF0000";
const GREEN: &str = "#00AA00";
const BLUE: &str = "#0000FF";
const STROKE_WEIGHT: f64 = 3.0;

impl SegmentGroup {
    pub fn style(&self) -> StrokeStyle {
        let (color, dash_array) = match self {
            SegmentGroup::Primary => (RED, "5,5"),
            SegmentGroup::Dispersion => (GREEN, "2,2"),
            SegmentGroup::Auxiliary => (BLUE, "5,5"),
            SegmentGroup::MainArc => (BLUE, "8,4"),
            SegmentGroup::Explosive => (RED, "5,5"),
            SegmentGroup::SafetyCircle => (RED, "10,5"),
        };
        StrokeStyle {
            color,
            dash_array,
            weight: STROKE_WEIGHT,
        }
    }
}

/// Static tile endpoint offered as a base map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    /// Shown when the map first loads
    pub default: bool,
}

pub const BASE_LAYERS: [TileSource; 3] = [
    TileSource {
        id: "osm",
        name: "Standard",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>",
        max_zoom: TILE_MAX_ZOOM,
        default: true,
    },
    TileSource {
        id: "satellite",
        name: "Satellite",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles &copy; Esri",
        max_zoom: TILE_MAX_ZOOM,
        default: false,
    },
    TileSource {
        id: "terrain",
        name: "Terrain",
        url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "Map data: &copy; OpenTopoMap",
        max_zoom: TILE_MAX_ZOOM,
        default: false,
    },
];

pub fn default_base_layer() -> &'static TileSource {
    BASE_LAYERS.iter().find(|l| l.default).unwrap_or(&BASE_LAYERS[0])
}

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    pub fn extend(self, p: LatLng) -> Self {
        Self {
            south: self.south.min(p.lat),
            west: self.west.min(p.lng),
            north: self.north.max(p.lat),
            east: self.east.max(p.lng),
        }
    }

    pub fn union(self, other: Bounds) -> Self {
        Self {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }

    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

/// Layers currently drawn on a map, keyed by segment name.
///
/// Owned by the renderer. `L` is whatever handle the map library returns for
/// a drawn polyline.
#[derive(Debug)]
pub struct OverlayRegistry<L> {
    layers: HashMap<String, L>,
}

impl<L> Default for OverlayRegistry<L> {
    fn default() -> Self {
        Self {
            layers: HashMap::new(),
        }
    }
}

impl<L> OverlayRegistry<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every held layer and draw `result` from scratch.
    ///
    /// Returns the previous layers so the caller can remove them from the map.
    pub fn replace_with<F>(&mut self, result: &GeometryResult, mut draw: F) -> Vec<L>
    where
        F: FnMut(&Segment, StrokeStyle) -> L,
    {
        let previous: Vec<L> = self.layers.drain().map(|(_, layer)| layer).collect();
        for segment in result {
            let layer = draw(segment, segment.group.style());
            self.layers.insert(segment.name.clone(), layer);
        }
        tracing::debug!(removed = previous.len(), drawn = self.layers.len(), "overlay redrawn");
        previous
    }

    /// Remove everything; returns the handles for disposal
    pub fn clear(&mut self) -> Vec<L> {
        self.layers.drain().map(|(_, layer)| layer).collect()
    }

    pub fn get(&self, name: &str) -> Option<&L> {
        self.layers.get(name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
