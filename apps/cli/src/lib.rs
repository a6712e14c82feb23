//! Command line front end for the meal planner.

pub mod cli;

use anyhow::Context;
use cli::{Cli, Command};
use mplan::domain::config::{CatalogConfig, PlannerConfig, TenancyConfig};
use mplan::domain::ResolvedConfig;
use mplan::planner::{Planner, Totals};
use mplan::tenancy::{ConfigurationInjector, ResolutionContext};
use mplan_logger::LogSettings;
use serde::Deserialize;
use std::io::Write;
use tracing::info;

/// Everything `planner.toml` may hold.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tenancy: TenancyConfig,
    pub catalog: CatalogConfig,
    pub logging: LogSettings,
}

impl AppConfig {
    /// The sections the planner slices consume.
    #[must_use]
    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig { tenancy: self.tenancy.clone(), catalog: self.catalog.clone() }
    }
}

/// Executes `cli` against `config`, writing the report to `out`.
///
/// # Errors
/// Fails when the catalog cannot be loaded, no tenant can be resolved or
/// `out` cannot be written.
pub fn run(cli: &Cli, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let injector = mplan::init(&config.planner()).context("Failed to build the plugin registry")?;

    match cli.command {
        Some(Command::Tenants) => list_tenants(&injector, out),
        None => plan(cli, &injector, out),
    }
}

fn list_tenants(injector: &ConfigurationInjector, out: &mut impl Write) -> anyhow::Result<()> {
    for tenant in injector.registry().list_summaries() {
        let marker = if tenant.tenant_id == injector.default_tenant_id() { " (default)" } else { "" };
        writeln!(out, "{}\t{}{marker}", tenant.tenant_id, tenant.tenant_name)?;
    }
    Ok(())
}

fn plan(cli: &Cli, injector: &ConfigurationInjector, out: &mut impl Write) -> anyhow::Result<()> {
    let context = match (&cli.url, cli.prerender) {
        (_, true) => ResolutionContext::prerender(),
        (Some(url), false) => ResolutionContext::client_at(url),
        (None, false) => ResolutionContext::client(),
    };

    let config = injector.get_config(&context)?;
    info!(tenant = %config.tenant_id, "resolved tenant");

    let mut planner = Planner::new(config.plugin().clone());
    for selection in &cli.selections {
        planner.toggle(&selection.category, selection.meal_id.as_deref());
    }

    write_report(&config, &planner, out)
}

fn write_report(config: &ResolvedConfig, planner: &Planner, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{} [{} {}]", config.branding.app_title, config.tenant_id, config.version)?;
    writeln!(out, "{}", config.branding.app_description)?;
    writeln!(out)?;

    for (category, rule) in config.categories() {
        let names: Vec<&str> = planner
            .snapshot()
            .selected(category.as_str())
            .iter()
            .map(|id| config.meal(id).map_or(id.as_str(), |meal| meal.name.as_str()))
            .collect();
        let shown = if names.is_empty() { "-".to_owned() } else { names.join(", ") };
        writeln!(out, "{:<20} {:<9} {shown}", rule.label, rule.input.as_ref())?;
    }

    let Totals { calories, protein, carbs, fat } = planner.totals();
    writeln!(out)?;
    writeln!(out, "Totals: {calories:.0} kcal, {protein:.1} g protein, {carbs:.1} g carbs, {fat:.1} g fat")?;
    Ok(())
}
