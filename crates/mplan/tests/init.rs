use mplan::domain::config::{CatalogConfig, PlannerConfig, ResolutionStrategy, TenancyConfig};
use mplan::planner::Planner;
use mplan::tenancy::{ResolutionContext, TenancyError};
use std::fs;
use tempfile::TempDir;

fn prerender_only(default_tenant: &str) -> TenancyConfig {
    TenancyConfig {
        default_tenant: default_tenant.to_owned(),
        strategies: vec![ResolutionStrategy::Url, ResolutionStrategy::Default],
        ..TenancyConfig::default()
    }
}

#[test]
fn bundled_catalog_backs_the_injector() {
    let injector = mplan::init(&PlannerConfig::default()).expect("init");
    assert_eq!(injector.registry().len(), 3);

    let config = injector
        .get_config(&ResolutionContext::client_at("https://x.example/?tenant=costco-kitchen"))
        .expect("resolves");
    assert_eq!(config.tenant_id, "costco-kitchen");
    assert_eq!(config.features.storage_key, "boring-meal-planner-qusai-costco-kitchen");
    // Not overridden by the bundle.
    assert_eq!(config.branding.primary_color, "#000000");
}

#[test]
fn plugin_dir_overrides_bundled_tenants() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("default.json"),
        r#"{ "tenant_id": "default", "tenant_name": "Replaced", "version": "9.0.0" }"#,
    )
    .unwrap();

    let config = PlannerConfig {
        tenancy: prerender_only("default"),
        catalog: CatalogConfig { bundled: true, plugin_dir: Some(dir.path().to_path_buf()) },
    };
    let injector = mplan::init(&config).expect("init");

    let resolved = injector.get_config(&ResolutionContext::prerender()).unwrap();
    assert_eq!(resolved.tenant_name, "Replaced");
    assert_eq!(injector.registry().len(), 3);
}

#[test]
fn empty_catalog_cannot_resolve() {
    let config = PlannerConfig {
        tenancy: prerender_only("default"),
        catalog: CatalogConfig { bundled: false, plugin_dir: None },
    };
    let injector = mplan::init(&config).expect("init");

    let err = injector.get_config(&ResolutionContext::prerender()).unwrap_err();
    assert!(matches!(err, TenancyError::DefaultTenantMissing { .. }));
}

#[test]
fn unreadable_plugin_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = CatalogConfig { bundled: false, plugin_dir: Some(dir.path().join("absent")) };

    let err = mplan::build_registry(&config).unwrap_err();
    assert!(err.to_string().starts_with("Catalog error (plugin directory): "));
}

#[test]
fn resolved_tenant_drives_a_planner_session() {
    let injector = mplan::init(&PlannerConfig::default()).unwrap();
    let config = injector
        .get_config(&ResolutionContext::client_at("https://x.example/?tenant=veggie"))
        .unwrap();

    let mut planner = Planner::new(config.plugin().clone());
    let breakfast = config.meals_in("breakfast").next().expect("veggie has breakfasts");
    assert!(planner.toggle("breakfast", Some(&breakfast.id)));
    assert!((planner.totals().calories - breakfast.calories).abs() < f64::EPSILON);
}
