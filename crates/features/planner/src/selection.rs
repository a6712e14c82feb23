use indexmap::IndexMap;
use mplan_domain::{Cardinality, Category, CategoryRule, InputKind, Snapshot};
use std::sync::Arc;
use tracing::trace;

/// Category rules keyed by category, in display order.
pub type CategoryRules = IndexMap<Category, CategoryRule>;

/// Applies one user interaction to a selection snapshot.
///
/// `meal_id` is `None` when the control reports nothing, `Some("")` for an
/// explicit "none" choice. The result shares `prev`'s allocation whenever the
/// interaction changes nothing, including for categories without a rule.
/// Multi-select checkboxes ignore empty ids.
#[must_use]
pub fn toggle_meal(
    prev: &Snapshot,
    category: &str,
    meal_id: Option<&str>,
    rules: &CategoryRules,
) -> Snapshot {
    let Some(rule) = rules.get(category) else {
        trace!(%category, "no rule for category");
        return Arc::clone(prev);
    };

    let current = prev.selected(category);
    let next = match rule.input {
        InputKind::Dropdown => dropdown(meal_id),
        InputKind::Radio => radio(current, meal_id),
        InputKind::Checkbox if rule.cardinality.is_single() => single_checkbox(meal_id),
        InputKind::Checkbox => multi_checkbox(current, meal_id, rule.cardinality),
    };

    match next {
        Some(ids) if ids.as_slice() != current => {
            trace!(%category, input = %rule.input, selected = ids.len(), "selection changed");
            Arc::new(prev.with_selection(category, ids))
        },
        _ => Arc::clone(prev),
    }
}

// Each transition returns the new list for the category, `None` when unchanged.

fn dropdown(meal_id: Option<&str>) -> Option<Vec<String>> {
    match meal_id {
        None | Some("") => Some(Vec::new()),
        Some(id) => Some(vec![id.to_owned()]),
    }
}

fn radio(current: &[String], meal_id: Option<&str>) -> Option<Vec<String>> {
    match meal_id? {
        "" => Some(Vec::new()),
        id if matches!(current, [only] if only == id) => Some(Vec::new()),
        id => Some(vec![id.to_owned()]),
    }
}

fn single_checkbox(meal_id: Option<&str>) -> Option<Vec<String>> {
    match meal_id? {
        "" => Some(Vec::new()),
        id => Some(vec![id.to_owned()]),
    }
}

fn multi_checkbox(
    current: &[String],
    meal_id: Option<&str>,
    cardinality: Cardinality,
) -> Option<Vec<String>> {
    let id = meal_id.filter(|id| !id.is_empty())?;

    if current.iter().any(|selected| selected == id) {
        return Some(current.iter().filter(|selected| *selected != id).cloned().collect());
    }

    let full = cardinality
        .max_selections()
        .is_some_and(|max| current.len() >= usize::try_from(max).unwrap_or(usize::MAX));
    if full {
        trace!(meal = %id, ?cardinality, "category is full");
        return None;
    }

    let mut next = current.to_vec();
    next.push(id.to_owned());
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mplan_domain::PlannerState;

    fn rules() -> CategoryRules {
        [
            ("breakfast", CategoryRule::dropdown("Breakfast")),
            ("coffee", CategoryRule::radio("Coffee")),
            ("shake", CategoryRule::checkbox("Protein Shake", Cardinality::AtMostOne)),
            ("fruit", CategoryRule::checkbox("Fruit", Cardinality::Unbounded)),
            ("snack", CategoryRule::checkbox("Snacks", Cardinality::UpTo(2))),
        ]
        .into_iter()
        .map(|(category, rule)| (Category::from(category), rule))
        .collect()
    }

    fn state(pairs: &[(&str, &[&str])]) -> Snapshot {
        Arc::new(pairs.iter().map(|(category, ids)| (*category, ids.iter().copied())).collect())
    }

    #[test]
    fn dropdown_replaces_and_clears() {
        let rules = rules();
        let picked = toggle_meal(&PlannerState::cleared(), "breakfast", Some("bagel"), &rules);
        assert_eq!(picked.selected("breakfast"), ["bagel"]);

        let swapped = toggle_meal(&picked, "breakfast", Some("oats"), &rules);
        assert_eq!(swapped.selected("breakfast"), ["oats"]);

        let again = toggle_meal(&swapped, "breakfast", Some("oats"), &rules);
        assert!(Arc::ptr_eq(&again, &swapped));

        assert!(toggle_meal(&swapped, "breakfast", Some(""), &rules).selected("breakfast").is_empty());
        assert!(toggle_meal(&swapped, "breakfast", None, &rules).selected("breakfast").is_empty());
    }

    #[test]
    fn radio_toggles_off_the_sole_selection() {
        let rules = rules();
        let prev = state(&[("coffee", &["c1"])]);

        assert!(toggle_meal(&prev, "coffee", Some("c1"), &rules).selected("coffee").is_empty());
        assert_eq!(toggle_meal(&prev, "coffee", Some("c2"), &rules).selected("coffee"), ["c2"]);
        assert!(toggle_meal(&prev, "coffee", Some(""), &rules).selected("coffee").is_empty());
        assert!(Arc::ptr_eq(&toggle_meal(&prev, "coffee", None, &rules), &prev));
    }

    #[test]
    fn single_checkbox_never_toggles_off() {
        let rules = rules();
        let prev = state(&[("shake", &["whey"])]);

        let same = toggle_meal(&prev, "shake", Some("whey"), &rules);
        assert!(Arc::ptr_eq(&same, &prev));
        assert_eq!(toggle_meal(&prev, "shake", Some("vegan"), &rules).selected("shake"), ["vegan"]);
        assert!(toggle_meal(&prev, "shake", Some(""), &rules).selected("shake").is_empty());
        assert!(Arc::ptr_eq(&toggle_meal(&prev, "shake", None, &rules), &prev));
    }

    #[test]
    fn unbounded_checkbox_appends_and_removes_in_place() {
        let rules = rules();
        let prev = state(&[("fruit", &["apple", "banana", "kiwi"])]);

        let removed = toggle_meal(&prev, "fruit", Some("banana"), &rules);
        assert_eq!(removed.selected("fruit"), ["apple", "kiwi"]);

        let appended = toggle_meal(&removed, "fruit", Some("banana"), &rules);
        assert_eq!(appended.selected("fruit"), ["apple", "kiwi", "banana"]);

        assert!(Arc::ptr_eq(&toggle_meal(&prev, "fruit", Some(""), &rules), &prev));
        assert!(Arc::ptr_eq(&toggle_meal(&prev, "fruit", None, &rules), &prev));
    }

    #[test]
    fn bounded_checkbox_refuses_past_its_limit() {
        let rules = rules();
        let prev = state(&[("snack", &["nuts", "bar"])]);

        let refused = toggle_meal(&prev, "snack", Some("chips"), &rules);
        assert!(Arc::ptr_eq(&refused, &prev));

        let freed = toggle_meal(&prev, "snack", Some("nuts"), &rules);
        assert_eq!(toggle_meal(&freed, "snack", Some("chips"), &rules).selected("snack"), ["bar", "chips"]);
    }

    #[test]
    fn unknown_category_is_a_no_op() {
        let prev = state(&[("fruit", &["apple"])]);
        let next = toggle_meal(&prev, "dessert", Some("cake"), &rules());
        assert!(Arc::ptr_eq(&next, &prev));
    }

    #[test]
    fn other_categories_are_preserved() {
        let rules = rules();
        let prev = state(&[("fruit", &["apple"]), ("coffee", &["c1"])]);
        let next = toggle_meal(&prev, "breakfast", Some("bagel"), &rules);

        assert_eq!(next.selected("fruit"), ["apple"]);
        assert_eq!(next.selected("coffee"), ["c1"]);
        assert_eq!(prev.selected("breakfast").len(), 0);
    }
}
