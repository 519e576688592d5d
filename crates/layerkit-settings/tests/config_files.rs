use layerkit_settings::{Config, SettingsError};
use tempfile::TempDir;

#[test]
fn test_save_and_load_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::new();
    config.cli.write_header = true;
    config.gcode.feed_rate = Some(1800.0);
    config.bbox.layer_height = Some(0.3);
    config.save_to_file(&path).expect("save failed");

    let loaded = Config::load_from_file(&path).expect("load failed");
    assert_eq!(loaded, config);
}

#[test]
fn test_save_and_load_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::new();
    config.vtk.title = "benchy".to_string();
    config.save_to_file(&path).expect("save failed");

    let loaded = Config::load_from_file(&path).expect("load failed");
    assert_eq!(loaded.vtk.title, "benchy");
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "cli: {}").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(ext) if ext == "yaml"));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bbox]\nnozzle_diameter = -1.0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { key, .. } if key == "bbox.nozzle_diameter"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        Config::load_or_default(Some(&path)),
        Err(SettingsError::LoadError(_))
    ));
}
