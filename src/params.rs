use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cli_api::DispersionError;
use crate::geodesic::LatLng;

/// Munition class; explosive munitions get the extended safety geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MunitionType {
    #[serde(alias = "explosiva")]
    Explosive,
    #[serde(alias = "nao-explosiva")]
    NonExplosive,
}

impl MunitionType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "explosive" | "explosiva" => Some(MunitionType::Explosive),
            "non-explosive" | "nonexplosive" | "nao-explosiva" => Some(MunitionType::NonExplosive),
            _ => None,
        }
    }

    pub fn is_explosive(&self) -> bool {
        matches!(self, MunitionType::Explosive)
    }
}

impl fmt::Display for MunitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MunitionType::Explosive => write!(f, "explosive"),
            MunitionType::NonExplosive => write!(f, "non-explosive"),
        }
    }
}

/// Impact surface. Carried through to outputs; no geometry depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactSurface {
    #[serde(alias = "terra")]
    Ground,
    Metal,
}

impl ImpactSurface {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ground" | "terra" => Some(ImpactSurface::Ground),
            "metal" => Some(ImpactSurface::Metal),
            _ => None,
        }
    }
}

impl fmt::Display for ImpactSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactSurface::Ground => write!(f, "ground"),
            ImpactSurface::Metal => write!(f, "metal"),
        }
    }
}

// Firing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiringParameters {
    pub munition_type: MunitionType,
    pub impact_surface: ImpactSurface,
    /// Cone half-angle (degrees)
    pub dispersion_angle: f64,
    /// Primary range (meters)
    pub distance_x: f64,
    /// Auxiliary angle (degrees)
    pub angle_p: f64,
    /// Lateral distance (meters)
    pub distance_w: f64,
    /// Explosive-only distance (meters)
    pub distance_a: f64,
    /// Safety circle offset (meters)
    pub distance_b: f64,
    /// Informational only, no geometry uses it (meters)
    pub max_height: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees clockwise from north
    pub fire_bearing: f64,
}

impl Default for FiringParameters {
    fn default() -> Self {
        Self {
            munition_type: MunitionType::Explosive,
            impact_surface: ImpactSurface::Ground,
            dispersion_angle: 5.0,
            distance_x: 5474.0,
            angle_p: 24.0,
            distance_w: 1225.0,
            distance_a: 615.0,
            distance_b: 615.0,
            max_height: 1090.0,
            latitude: -23.5505,
            longitude: -46.6333,
            fire_bearing: 0.0,
        }
    }
}

impl FiringParameters {
    pub fn origin(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Copy of these parameters fired from a different origin.
    ///
    /// This is what a map click applies to the parameter store.
    pub fn with_origin(&self, origin: LatLng) -> Self {
        Self {
            latitude: origin.lat,
            longitude: origin.lng,
            ..self.clone()
        }
    }

    /// Check the record's invariants.
    ///
    /// The geometry builder never calls this; collaborators validate before
    /// computing when they want a user-facing failure instead of NaN geometry.
    pub fn validate(&self) -> Result<(), DispersionError> {
        let numeric = [
            ("dispersionAngle", self.dispersion_angle),
            ("distanceX", self.distance_x),
            ("angleP", self.angle_p),
            ("distanceW", self.distance_w),
            ("distanceA", self.distance_a),
            ("distanceB", self.distance_b),
            ("maxHeight", self.max_height),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("fireBearing", self.fire_bearing),
        ];
        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number, got {value}").into());
            }
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude must be within [-90, 90], got {}", self.latitude).into());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude must be within [-180, 180], got {}", self.longitude).into());
        }
        if self.dispersion_angle < 0.0 {
            return Err(format!("dispersionAngle must be non-negative, got {}", self.dispersion_angle).into());
        }

        let distances = [
            ("distanceX", self.distance_x),
            ("distanceW", self.distance_w),
            ("distanceA", self.distance_a),
            ("distanceB", self.distance_b),
        ];
        for (name, value) in distances {
            if value < 0.0 {
                return Err(format!("{name} must be non-negative, got {value}").into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = FiringParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.munition_type, MunitionType::Explosive);
        assert_eq!(params.distance_x, 5474.0);
        assert_eq!(params.origin(), LatLng::new(-23.5505, -46.6333));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut params = FiringParameters::default();
        params.latitude = 91.0;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("latitude"));

        let mut params = FiringParameters::default();
        params.longitude = -180.5;
        assert!(params.validate().is_err());

        let mut params = FiringParameters::default();
        params.distance_b = -1.0;
        assert!(params.validate().unwrap_err().to_string().contains("distanceB"));

        let mut params = FiringParameters::default();
        params.dispersion_angle = -0.1;
        assert!(params.validate().is_err());

        let mut params = FiringParameters::default();
        params.angle_p = f64::NAN;
        assert!(params.validate().unwrap_err().to_string().contains("angleP"));
    }

    #[test]
    fn test_validate_accepts_degenerate_angle_p() {
        let params = FiringParameters { angle_p: 0.0, ..Default::default() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_with_origin_only_moves_origin() {
        let params = FiringParameters::default();
        let moved = params.with_origin(LatLng::new(48.8566, 2.3522));
        assert_eq!(moved.latitude, 48.8566);
        assert_eq!(moved.longitude, 2.3522);
        assert_eq!(moved.distance_x, params.distance_x);
        assert_eq!(moved.fire_bearing, params.fire_bearing);
        assert_eq!(params.latitude, -23.5505);
    }

    #[test]
    fn test_munition_from_str() {
        assert_eq!(MunitionType::from_str("explosive"), Some(MunitionType::Explosive));
        assert_eq!(MunitionType::from_str("Explosiva"), Some(MunitionType::Explosive));
        assert_eq!(MunitionType::from_str("non-explosive"), Some(MunitionType::NonExplosive));
        assert_eq!(MunitionType::from_str("NON_EXPLOSIVE"), Some(MunitionType::NonExplosive));
        assert_eq!(MunitionType::from_str("nao-explosiva"), Some(MunitionType::NonExplosive));
        assert_eq!(MunitionType::from_str("inert-ish"), None);
        assert_eq!(format!("{}", MunitionType::NonExplosive), "non-explosive");
    }

    #[test]
    fn test_impact_surface_from_str() {
        assert_eq!(ImpactSurface::from_str("terra"), Some(ImpactSurface::Ground));
        assert_eq!(ImpactSurface::from_str("METAL"), Some(ImpactSurface::Metal));
        assert_eq!(ImpactSurface::from_str("water"), None);
        assert_eq!(format!("{}", ImpactSurface::Ground), "ground");
    }

    #[test]
    fn test_json_fields_are_camel_case_with_defaults() {
        let params: FiringParameters =
            serde_json::from_str(r#"{"munitionType":"non-explosive","distanceX":1200,"fireBearing":90}"#).unwrap();
        assert_eq!(params.munition_type, MunitionType::NonExplosive);
        assert_eq!(params.distance_x, 1200.0);
        assert_eq!(params.fire_bearing, 90.0);
        assert_eq!(params.angle_p, 24.0);

        let json = serde_json::to_string(&FiringParameters::default()).unwrap();
        assert!(json.contains("\"dispersionAngle\":5.0"));
        assert!(json.contains("\"munitionType\":\"explosive\""));
        assert!(json.contains("\"impactSurface\":\"ground\""));
    }

    #[test]
    fn test_json_accepts_portuguese_labels() {
        let params: FiringParameters =
            serde_json::from_str(r#"{"munitionType":"nao-explosiva","impactSurface":"terra"}"#).unwrap();
        assert_eq!(params.munition_type, MunitionType::NonExplosive);
        assert_eq!(params.impact_surface, ImpactSurface::Ground);
    }
}
