use mplan_catalog::{CatalogError, bundled, load_dir, validate};
use mplan_domain::{Cardinality, InputKind};
use std::fs;
use tempfile::TempDir;

#[test]
fn bundled_tenants_are_valid() {
    let plugins = bundled().expect("embedded bundles parse");
    let ids: Vec<_> = plugins.iter().map(|p| p.tenant_id.as_str()).collect();
    assert_eq!(ids, ["default", "veggie", "costco-kitchen"]);

    for plugin in &plugins {
        validate(plugin).expect("bundle is valid");
        assert!(!plugin.meal_library.is_empty());
    }
}

#[test]
fn default_bundle_keeps_its_category_order() {
    let plugins = bundled().unwrap();
    let default = &plugins[0];

    let order: Vec<_> = default.category_config.keys().map(|c| c.as_str()).collect();
    assert_eq!(order, ["breakfast", "dinner", "coffee", "fruit", "snack", "shake"]);

    let breakfast = default.rule("breakfast").unwrap();
    assert_eq!((breakfast.input, breakfast.cardinality), (InputKind::Dropdown, Cardinality::ExactlyOne));
    let fruit = default.rule("fruit").unwrap();
    assert_eq!((fruit.input, fruit.cardinality), (InputKind::Checkbox, Cardinality::Unbounded));
    assert_eq!(default.rule("shake").map(|r| r.input), Some(InputKind::Radio));
}

#[test]
fn veggie_bundle_brands_itself() {
    let plugins = bundled().unwrap();
    let veggie = plugins.iter().find(|p| p.tenant_id == "veggie").unwrap();
    let branding = veggie.branding.as_ref().unwrap();

    assert_eq!(branding.app_title.as_deref(), Some("Veggie Meal Planner"));
    assert_eq!(branding.primary_color.as_deref(), Some("#10b981"));
    assert_eq!(veggie.rule("snack").map(|r| r.label.as_str()), Some("Healthy Snacks"));
}

#[test]
fn costco_kitchen_declares_lunch_and_sides() {
    let plugins = bundled().unwrap();
    let costco = plugins.iter().find(|p| p.tenant_id == "costco-kitchen").unwrap();

    assert!(costco.rule("lunch").is_some());
    assert!(costco.meals_in("side").count() > 0);
}

#[test]
fn load_dir_reads_json_in_name_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("b-house.json"),
        r#"{ "tenant_id": "house", "tenant_name": "House", "version": "2.0.0" }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("a-keto.json"),
        r#"{
            "tenant_id": "keto", "tenant_name": "Keto", "version": "1.0.0",
            "meal_library": [
                { "id": "eggs", "name": "Eggs", "calories": 210, "protein": 18,
                  "carbs": 1, "fat": 15, "category": "breakfast" }
            ],
            "category_config": {
                "breakfast": { "label": "Breakfast", "input": "dropdown", "cardinality": "exactly_one" }
            },
            "features": { "enable_local_storage": true }
        }"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a bundle").unwrap();

    let plugins = load_dir(dir.path()).expect("bundles load");
    let ids: Vec<_> = plugins.iter().map(|p| p.tenant_id.as_str()).collect();
    assert_eq!(ids, ["keto", "house"]);
    assert_eq!(plugins[0].features.as_ref().and_then(|f| f.enable_local_storage), Some(true));
}

#[test]
fn load_dir_rejects_invalid_bundles() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.json"),
        r#"{
            "tenant_id": "bad", "tenant_name": "Bad", "version": "1.0.0",
            "meal_library": [
                { "id": "x", "name": "X", "calories": 1, "protein": 1,
                  "carbs": 1, "fat": 1, "category": "nowhere" }
            ]
        }"#,
    )
    .unwrap();

    let err = load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Invalid { ref tenant_id, .. } if tenant_id == "bad"));
}

#[test]
fn load_dir_reports_missing_directory() {
    let dir = TempDir::new().unwrap();
    let err = load_dir(dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("reading"));
}
