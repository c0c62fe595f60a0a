use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn get_cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dispersion-cli"))
}

#[test]
fn test_cli_compute_defaults_table() {
    let output = Command::new(get_cli_binary())
        .args(&["compute"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DISPERSION GEOMETRY"), "Should contain table header");
    assert!(stdout.contains("circle"), "Explosive defaults should draw the safety circle");
}

#[test]
fn test_cli_compute_non_explosive_json() {
    let output = Command::new(get_cli_binary())
        .args(&[
            "compute",
            "--munition", "non-explosive",
            "--distance-x", "3000",
            "--bearing", "45",
            "--output", "json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["parameters"]["munitionType"], "non-explosive");
    assert_eq!(value["parameters"]["distanceX"], 3000.0);
    assert!(value["segments"]["arc"].is_object());
    assert!(value["segments"]["H"].is_null());
    assert!(value["segments"]["circle"].is_null());
}

#[test]
fn test_cli_output_format_geojson() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--output", "geojson"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FeatureCollection"), "Should be GeoJSON");
    assert!(stdout.contains("LineString"));
}

#[test]
fn test_cli_output_format_csv() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--output", "csv"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("segment,index,latitude,longitude"));
    assert!(stdout.contains("A,1,"));
}

#[test]
fn test_cli_params_file_with_override() {
    let mut path = std::env::temp_dir();
    path.push(format!("dispersion-params-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("Failed to create params file");
        write!(file, r#"{{"munitionType":"non-explosive","distanceX":2000,"latitude":10.0}}"#).unwrap();
    }

    let output = Command::new(get_cli_binary())
        .args(&["compute", "--output", "json", "--distance-x", "2500", "--params"])
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success(), "Command should succeed");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["parameters"]["distanceX"], 2500.0);
    assert_eq!(value["parameters"]["latitude"], 10.0);
    assert_eq!(value["parameters"]["munitionType"], "non-explosive");
    assert_eq!(value["parameters"]["angleP"], 24.0);
}

#[test]
fn test_cli_rejects_invalid_latitude() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--latitude", "95"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Out-of-range latitude should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("latitude"));
}

#[test]
fn test_cli_negative_latitude_accepted() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--latitude", "-33.9", "--longitude", "-70.6", "-o", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Negative coordinates should parse");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["parameters"]["latitude"], -33.9);
}

#[test]
fn test_cli_negative_angle_and_bearing_accepted() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--angle-p", "-24", "--bearing", "-30", "-o", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Negative angleP and bearing should parse");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["parameters"]["angleP"], -24.0);
    assert_eq!(value["parameters"]["fireBearing"], -30.0);
}

#[test]
fn test_cli_negative_distance_reaches_validation() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "-x", "-5"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Negative distance should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("distanceX must be non-negative"), "stderr was: {stderr}");
}

#[test]
fn test_cli_output_format_aliases() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--output", "geo-json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["type"], "FeatureCollection");

    let output = Command::new(get_cli_binary())
        .args(&["compute", "--output", "xml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown output format"));
}

#[test]
fn test_cli_unknown_munition_fails() {
    let output = Command::new(get_cli_binary())
        .args(&["compute", "--munition", "plasma"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_defaults_command() {
    let output = Command::new(get_cli_binary())
        .args(&["defaults"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["distanceX"], 5474.0);
    assert_eq!(value["munitionType"], "explosive");
}

#[test]
fn test_cli_help() {
    let output = Command::new(get_cli_binary())
        .args(&["--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("compute"), "Should list compute command");
    assert!(stdout.contains("defaults"), "Should list defaults command");
    assert!(stdout.contains("info"), "Should list info command");
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(get_cli_binary())
        .args(&["invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");
}
