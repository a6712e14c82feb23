use clap::Parser;
use mplan_cli::cli::Cli;
use mplan_cli::{AppConfig, run};
use std::fs;
use tempfile::TempDir;

fn report(args: &[&str], config: &AppConfig) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("mplan").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&cli, config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn tenants_are_listed_with_the_default_marked() {
    let text = report(&["tenants"], &AppConfig::default()).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("costco-kitchen\t"));
    assert!(lines[1].starts_with("default\t") && lines[1].ends_with("(default)"));
}

#[test]
fn url_tenant_is_planned_with_selections() {
    let text = report(
        &[
            "--url",
            "https://x.example/?tenant=veggie",
            "--select",
            "breakfast=veggie_breakfast_oatmeal",
            "--select",
            "coffee",
        ],
        &AppConfig::default(),
    )
    .unwrap();

    assert!(text.starts_with("Veggie Meal Planner [veggie 1.0.0]"));
    assert!(text.contains("Steel Cut Oatmeal with Berries & Almonds"));
    assert!(text.contains("Totals: 380 kcal, 14.0 g protein, 52.0 g carbs, 12.0 g fat"));
}

#[test]
fn missing_default_tenant_fails() {
    let mut config = AppConfig::default();
    config.catalog.bundled = false;

    let err = report(&["--prerender"], &config).unwrap_err();
    assert!(err.to_string().contains("not found in registry"));
}

#[test]
fn config_file_sections_deserialize() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("planner.toml");
    fs::write(
        &path,
        "[tenancy]\ndefault_tenant = \"veggie\"\n\n[logging]\nlevel = \"debug\"\njson = true\n",
    )
    .unwrap();

    let config: AppConfig = mplan::kernel::config::load_config(Some(&path)).unwrap();
    assert_eq!(config.planner().tenancy.default_tenant, "veggie");
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert!(config.catalog.bundled);
}
