//! Layered configuration loading: global file, workspace file, environment.

use std::fs;

use tempfile::TempDir;
use vista::config::WORKSPACE_FILE;
use vista::ViewConfig;

use super::support::EnvGuard;

#[test]
fn workspace_file_overrides_global() {
    let temp = TempDir::new().unwrap();
    let config_home = temp.path().join("config");
    let home = temp.path().join("home");
    let workspace = temp.path().join("workspace");
    fs::create_dir_all(config_home.join("vista")).unwrap();
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    let _env = EnvGuard::isolate(&config_home, &home);

    fs::write(
        config_home.join("vista").join("config.toml"),
        "namespaces = [\"Global.Views\"]\n\n[logging]\nlevel = \"warn\"\n",
    )
    .unwrap();
    fs::write(
        workspace.join(WORKSPACE_FILE),
        "[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = ViewConfig::load(Some(&workspace)).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.namespaces, vec!["Global.Views".to_string()]);
}

#[test]
fn environment_overrides_files() {
    let temp = TempDir::new().unwrap();
    let config_home = temp.path().join("config");
    let home = temp.path().join("home");
    let workspace = temp.path().join("workspace");
    fs::create_dir_all(&config_home).unwrap();
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    let _env = EnvGuard::isolate(&config_home, &home);
    std::env::set_var("VISTA_LOGGING__LEVEL", "trace");

    fs::write(
        workspace.join(WORKSPACE_FILE),
        "[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = ViewConfig::load(Some(&workspace)).unwrap();
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let config_home = temp.path().join("config");
    let home = temp.path().join("home");
    fs::create_dir_all(&config_home).unwrap();
    fs::create_dir_all(&home).unwrap();

    let _env = EnvGuard::isolate(&config_home, &home);

    let config = ViewConfig::load(None).unwrap();
    assert_eq!(config, ViewConfig::default());
}

#[test]
fn save_and_reload_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vista.toml");

    let config = ViewConfig::from_toml_str(
        r#"
        namespaces = ["App.Views"]
        exclude_prefixes = ["_"]

        [[templates]]
        path = "views"
        extension = "spark"
        "#,
    )
    .unwrap();

    config.save(&path).unwrap();
    let reloaded = ViewConfig::from_toml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded, config);
}
