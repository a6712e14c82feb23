//! Tenant resolution for the meal planner.
//!
//! A [`PluginRegistry`] holds every tenant bundle. A [`ConfigurationInjector`]
//! walks its strategy chain (`url`, `subdomain`, `env`, `default` unless
//! configured otherwise) to pick the active tenant, falls back to the default
//! tenant when the pick is not registered, and fills unset branding and feature
//! fields from the baseline.

pub mod defaults;
mod error;
mod injector;
mod registry;
mod strategy;

pub use error::{TenancyError, TenancyErrorExt};
pub use injector::{ConfigurationInjector, InjectorBuilder};
pub use registry::{PluginRegistry, TenantSummary};
pub use strategy::{EnvSource, ExecutionContext, ProcessEnv, ResolutionContext, TENANT_QUERY_PARAM};

pub use mplan_domain::config::ResolutionStrategy;
