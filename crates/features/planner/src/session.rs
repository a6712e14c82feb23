use crate::selection::{CategoryRules, toggle_meal};
use crate::totals::{Totals, calculate_totals, selected_meals};
use mplan_domain::{Meal, PlannerState, Snapshot, TenantPlugin};
use std::sync::Arc;
use tracing::debug;

/// One user's planning session against a single tenant bundle.
///
/// Holds the current snapshot and replaces it on every change, so a snapshot
/// handed out earlier never changes under its holder.
#[derive(Debug, Clone)]
pub struct Planner {
    plugin: Arc<TenantPlugin>,
    snapshot: Snapshot,
}

impl Planner {
    /// Starts an empty session.
    #[must_use]
    pub fn new(plugin: Arc<TenantPlugin>) -> Self {
        Self { plugin, snapshot: PlannerState::cleared() }
    }

    /// Applies one interaction. Returns `true` when the selection changed.
    pub fn toggle(&mut self, category: &str, meal_id: Option<&str>) -> bool {
        let next = toggle_meal(&self.snapshot, category, meal_id, self.rules());
        let changed = !Arc::ptr_eq(&next, &self.snapshot);
        self.snapshot = next;
        changed
    }

    /// Drops every selection.
    pub fn clear(&mut self) {
        debug!(tenant = %self.plugin.tenant_id, "clearing selections");
        self.snapshot = PlannerState::cleared();
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn rules(&self) -> &CategoryRules {
        &self.plugin.category_config
    }

    /// Selected meals, category by category.
    #[must_use]
    pub fn selected_meals(&self) -> Vec<&Meal> {
        selected_meals(&self.snapshot, &self.plugin.meal_library)
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        calculate_totals(self.selected_meals())
    }
}
