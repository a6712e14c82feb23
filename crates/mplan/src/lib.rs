//! Facade crate for the meal planner slices and shared modules.
//! Re-exports domain/kernel primitives and wires a registry and injector from configuration.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! ```rust
//! use mplan::domain::config::PlannerConfig;
//! use mplan::tenancy::ResolutionContext;
//!
//! let injector = mplan::init(&PlannerConfig::default()).unwrap();
//! let config = injector.get_config(&ResolutionContext::client_at("https://x.example/?tenant=veggie")).unwrap();
//! assert_eq!(config.branding.app_title, "Veggie Meal Planner");
//! ```

use mplan_domain::config::{CatalogConfig, PlannerConfig};
use mplan_tenancy::{ConfigurationInjector, PluginRegistry};
use std::borrow::Cow;
use tracing::info;

pub use mplan_catalog as catalog;
pub use mplan_domain as domain;
pub use mplan_kernel as kernel;
pub use mplan_planner as planner;
pub use mplan_tenancy as tenancy;

/// Errors raised while wiring the planner from configuration.
#[mplan_derive::planner_error]
pub enum InitError {
    #[error("Catalog error{}: {source}", format_context(.context))]
    Catalog { source: mplan_catalog::CatalogError, context: Option<Cow<'static, str>> },
}

/// Builds a registry holding every bundle the catalog settings name.
///
/// Bundles from `plugin_dir` are registered after the built-in ones and replace
/// them on a shared tenant id.
///
/// # Errors
/// Returns [`InitError::Catalog`] if a bundle cannot be read, parsed or validated.
pub fn build_registry(config: &CatalogConfig) -> Result<PluginRegistry, InitError> {
    let registry = PluginRegistry::new();

    if config.bundled {
        registry.register_all(mplan_catalog::bundled().context("bundled tenants")?);
    }
    if let Some(dir) = &config.plugin_dir {
        registry.register_all(mplan_catalog::load_dir(dir).context("plugin directory")?);
    }

    info!(tenants = registry.len(), "plugin registry ready");
    Ok(registry)
}

/// Builds the registry and an injector over it from loaded configuration.
///
/// # Errors
/// Returns [`InitError`] if the registry cannot be built.
pub fn init(config: &PlannerConfig) -> Result<ConfigurationInjector, InitError> {
    let registry = build_registry(&config.catalog)?;
    Ok(ConfigurationInjector::from_config(&config.tenancy, registry))
}
