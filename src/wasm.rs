// WASM bindings for browser map front-ends
use wasm_bindgen::prelude::*;

use crate::cli_api::{compute_checked, format_geojson, parse_parameters, StyledGeometry};
use crate::geodesic::LatLng;
use crate::params::FiringParameters;
use crate::render::BASE_LAYERS;

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WasmDispersion;

#[wasm_bindgen]
impl WasmDispersion {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmDispersion
    }

    /// Compute the overlay for a JSON parameter record.
    ///
    /// Returns a JSON object keyed by segment name, each entry carrying its
    /// points and stroke style.
    pub fn compute(&self, params_json: &str) -> Result<String, JsValue> {
        let params = parse_parameters(params_json).map_err(to_js)?;
        let result = compute_checked(&params).map_err(to_js)?;
        serde_json::to_string(&StyledGeometry(&result)).map_err(to_js)
    }

    /// Same computation, as a GeoJSON FeatureCollection
    #[wasm_bindgen(js_name = computeGeoJson)]
    pub fn compute_geojson(&self, params_json: &str) -> Result<String, JsValue> {
        let params = parse_parameters(params_json).map_err(to_js)?;
        let result = compute_checked(&params).map_err(to_js)?;
        format_geojson(&result, &params).map_err(to_js)
    }

    /// Bounds of the computed overlay for fitting the viewport, as JSON
    #[wasm_bindgen(js_name = computeBounds)]
    pub fn compute_bounds(&self, params_json: &str) -> Result<String, JsValue> {
        let params = parse_parameters(params_json).map_err(to_js)?;
        let result = compute_checked(&params).map_err(to_js)?;
        serde_json::to_string(&result.bounds()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = defaultParameters)]
    pub fn default_parameters(&self) -> Result<String, JsValue> {
        serde_json::to_string(&FiringParameters::default()).map_err(to_js)
    }

    /// Apply a map click to a parameter record
    #[wasm_bindgen(js_name = withOrigin)]
    pub fn with_origin(&self, params_json: &str, lat: f64, lng: f64) -> Result<String, JsValue> {
        let params = parse_parameters(params_json).map_err(to_js)?;
        serde_json::to_string(&params.with_origin(LatLng::new(lat, lng))).map_err(to_js)
    }

    #[wasm_bindgen(js_name = baseLayers)]
    pub fn base_layers(&self) -> Result<String, JsValue> {
        serde_json::to_string(&BASE_LAYERS).map_err(to_js)
    }
}

impl Default for WasmDispersion {
    fn default() -> Self {
        Self::new()
    }
}
