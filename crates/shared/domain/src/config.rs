use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the environment variable consulted by the `env` strategy unless configured otherwise.
pub const DEFAULT_TENANT_ENV_VAR: &str = "MPLAN_TENANT_ID";

/// Tenant id used when no configuration names one.
pub const DEFAULT_TENANT_ID: &str = "default";

/// Top-level planner configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub tenancy: TenancyConfig,
    pub catalog: CatalogConfig,
}

/// Tenant resolution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    pub default_tenant: String,
    pub strategies: Vec<ResolutionStrategy>,
    pub env_var: String,
}

/// Where tenant bundles come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Register the bundles shipped with the binary.
    pub bundled: bool,
    /// Directory scanned for additional `*.json` bundles.
    pub plugin_dir: Option<PathBuf>,
}

/// A source of candidate tenant ids, tried in configured order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResolutionStrategy {
    /// `tenant` query parameter of the current location.
    Url,
    /// First label of a host with at least three labels.
    Subdomain,
    /// The configured environment variable.
    Env,
    /// The configured default tenant; always signals.
    Default,
}

impl ResolutionStrategy {
    /// The standard chain: URL, subdomain, environment, default.
    pub const STANDARD: [Self; 4] = [Self::Url, Self::Subdomain, Self::Env, Self::Default];
}

// --- Default ---

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            default_tenant: DEFAULT_TENANT_ID.to_owned(),
            strategies: ResolutionStrategy::STANDARD.to_vec(),
            env_var: DEFAULT_TENANT_ENV_VAR.to_owned(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { bundled: true, plugin_dir: None }
    }
}
