/// Explosive Overlay Example
///
/// Builds the full overlay for the reference firing, prints the derived
/// distances, and writes a GeoJSON file that any web map can display.

use dispersion_engine::cli_api::format_geojson;
use dispersion_engine::{build_geometry, derive_distances, FiringParameters, LatLng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Explosive Overlay Example ===\n");

    let params = FiringParameters::default().with_origin(LatLng::new(-22.9068, -43.1729));
    params.validate()?;

    let derived = derive_distances(&params);
    println!("Derived distances:");
    println!("  D: {:.1} m", derived.distance_d);
    println!("  F: {:.1} m", derived.distance_f);
    println!("  angle B: {:.3}°", derived.angle_b);
    if let Some(ex) = derived.explosive {
        println!("  H: {:.1} m", ex.distance_h);
        println!("  J: {:.1} m", ex.distance_j);
        println!("  L: {:.1} m", ex.distance_l);
        println!("  circle radius: {:.1} m, half-span {:.3}°", ex.circle_radius, ex.circle_half_span);
    }
    println!();

    let result = build_geometry(&params);
    for segment in &result {
        let style = segment.group.style();
        println!(
            "  {:<7} {:<5} {:>4} pts  {} dash {}",
            segment.name,
            segment.shape.kind(),
            segment.shape.point_count(),
            style.color,
            style.dash_array
        );
    }

    if let Some(bounds) = result.bounds() {
        println!(
            "\nViewport: S {:.5} W {:.5} N {:.5} E {:.5}",
            bounds.south, bounds.west, bounds.north, bounds.east
        );
    }

    let path = std::env::temp_dir().join("explosive_overlay.geojson");
    std::fs::write(&path, format_geojson(&result, &params)?)?;
    println!("\nGeoJSON written to {}", path.display());

    Ok(())
}
