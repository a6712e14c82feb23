use mplan_domain::{Meal, PlannerState};
use serde::Serialize;
use std::ops::Add;

/// Summed nutrition of a set of meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Add<&Meal> for Totals {
    type Output = Self;

    fn add(self, meal: &Meal) -> Self {
        Self {
            calories: self.calories + meal.calories,
            protein: self.protein + meal.protein,
            carbs: self.carbs + meal.carbs,
            fat: self.fat + meal.fat,
        }
    }
}

#[must_use]
pub fn calculate_totals<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Totals {
    meals.into_iter().fold(Totals::default(), Add::add)
}

/// Meals behind the selected ids, category by category in selection order.
///
/// Ids missing from `library` are skipped.
#[must_use]
pub fn selected_meals<'a>(state: &PlannerState, library: &'a [Meal]) -> Vec<&'a Meal> {
    state
        .iter()
        .flat_map(|(_, ids)| ids)
        .filter_map(|id| library.iter().find(|meal| &meal.id == id))
        .collect()
}
