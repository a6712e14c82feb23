//! Meal selection for a planning session.
//!
//! [`toggle_meal`] is the pure transition applied to a selection snapshot for
//! each interaction. [`Planner`] wraps it into a session over one tenant bundle
//! and adds nutrition [`Totals`].

mod selection;
mod session;
pub mod totals;

pub use selection::{CategoryRules, toggle_meal};
pub use session::Planner;
pub use totals::{Totals, calculate_totals, selected_meals};
