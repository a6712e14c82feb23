//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it owns the layered config loader and re-exports the domain.
//!
//! ## Config loading
//! ```rust,no_run
//! use mplan_kernel::config::load_config;
//! use mplan_kernel::domain::config::PlannerConfig;
//!
//! let cfg: PlannerConfig = load_config(Some("config/planner")).unwrap_or_default();
//! assert!(!cfg.tenancy.default_tenant.is_empty());
//! ```
pub mod config;

pub use mplan_domain as domain;
