//! File template discovery wired through the registry and configuration.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use vista::{CommonNamespaces, FileTemplateFacility, ViewConfig, ViewEngineRegistry};

fn write_template(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"<template/>").unwrap();
}

#[test]
fn registry_discovers_templates_from_disk() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), "home.html");
    write_template(temp.path(), "orders/list.html");
    write_template(temp.path(), "orders/list.css");

    let mut registry = ViewEngineRegistry::new();
    registry.add_facility(FileTemplateFacility::new(temp.path(), "html"));

    let bag = registry.views().unwrap();
    let names: Vec<&str> = bag.iter().map(|token| token.name()).collect();
    assert_eq!(names, vec!["home", "list"]);
    assert_eq!(
        bag.find("list").unwrap().resolved_path(),
        Some(Path::new("orders/list.html"))
    );
}

#[test]
fn config_seeds_facility_exclusions_and_namespaces() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), "home.html");
    write_template(temp.path(), "draft_report.html");

    let config = ViewConfig::from_toml_str(&format!(
        r#"
        namespaces = ["App.Views"]
        exclude_prefixes = ["draft_"]

        [[templates]]
        path = "{}"
        "#,
        temp.path().display()
    ))
    .unwrap();
    config.validate().unwrap();

    let mut registry = ViewEngineRegistry::new();
    config.apply_to(&mut registry);

    let bag = registry.views().unwrap();
    let names: Vec<&str> = bag.iter().map(|token| token.name()).collect();
    assert_eq!(names, vec!["home"]);

    // Namespaces registered into the graph reach discovered tokens.
    assert_eq!(
        bag.find("home").unwrap().metadata_value("namespaces"),
        Some(&json!(["App.Views"]))
    );
}

#[test]
fn host_namespaces_merge_with_configured_ones() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), "home.html");

    let config = ViewConfig::from_toml_str(&format!(
        r#"
        namespaces = ["App.Views"]

        [[templates]]
        path = "{}"
        "#,
        temp.path().display()
    ))
    .unwrap();

    let mut registry = ViewEngineRegistry::new();
    config.apply_to(&mut registry);

    // Host appends its own namespace after config seeding.
    registry
        .graph_mut()
        .get_or_default::<CommonNamespaces>()
        .add("Host.Helpers");

    let bag = registry.views().unwrap();
    assert_eq!(
        bag.find("home").unwrap().metadata_value("namespaces"),
        Some(&json!(["App.Views", "Host.Helpers"]))
    );
}
