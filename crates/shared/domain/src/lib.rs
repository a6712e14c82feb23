//! # Domain Models
//!
//! Pure types shared by the tenancy, planner and catalog crates, with minimal
//! dependencies (`serde`, `indexmap`, `strum`).
//! Keep it lean: no I/O or resolution logic, just data and simple helpers.

pub mod config;
pub mod meal;
pub mod planner;
pub mod plugin;
pub mod rules;

pub use crate::meal::{Category, Meal};
pub use crate::planner::{PlannerState, Snapshot};
pub use crate::plugin::{Branding, BrandingOverrides, FeatureOverrides, Features, ResolvedConfig, TenantPlugin};
pub use crate::rules::{Cardinality, CategoryRule, InputKind};
