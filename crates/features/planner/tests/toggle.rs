use mplan_domain::{Cardinality, Category, CategoryRule, Meal, PlannerState, Snapshot, TenantPlugin};
use mplan_planner::{CategoryRules, Planner, Totals, toggle_meal};
use std::sync::Arc;

fn rules() -> CategoryRules {
    [
        (Category::from("coffee"), CategoryRule::radio("Coffee")),
        (Category::from("fruit"), CategoryRule::checkbox("Fruit", Cardinality::Unbounded)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn radio_selects_then_toggles_off() {
    let rules = rules();
    let empty = PlannerState::cleared();

    let selected = toggle_meal(&empty, "coffee", Some("c1"), &rules);
    let expected: PlannerState = [("coffee", ["c1"])].into_iter().collect();
    assert_eq!(*selected, expected);

    let toggled = toggle_meal(&selected, "coffee", Some("c1"), &rules);
    assert_eq!(*toggled, PlannerState::new());
    assert!(toggled.selected("coffee").is_empty());
}

#[test]
fn unbounded_checkbox_appends() {
    let rules = rules();
    let prev: Snapshot = Arc::new([("fruit", ["apple"])].into_iter().collect());

    let next = toggle_meal(&prev, "fruit", Some("banana"), &rules);
    assert_eq!(next.selected("fruit"), ["apple", "banana"]);
    assert_eq!(prev.selected("fruit"), ["apple"]);
}

#[test]
fn planner_session_tracks_totals() {
    let plugin = TenantPlugin::new("default", "Default User", "1.0.0")
        .with_category("breakfast", CategoryRule::dropdown("Breakfast"))
        .with_category("fruit", CategoryRule::checkbox("Fruit", Cardinality::Unbounded))
        .with_meal(Meal::new("bagel", "Bagel", "breakfast").with_macros(290.0, 11.0, 56.0, 2.0))
        .with_meal(Meal::new("apple", "Apple", "fruit").with_macros(95.0, 0.5, 25.0, 0.3))
        .with_meal(Meal::new("banana", "Banana", "fruit").with_macros(105.0, 1.3, 27.0, 0.4));
    let mut planner = Planner::new(Arc::new(plugin));

    assert!(planner.toggle("breakfast", Some("bagel")));
    assert!(planner.toggle("fruit", Some("apple")));
    assert!(planner.toggle("fruit", Some("banana")));
    assert!(!planner.toggle("dessert", Some("cake")));
    assert!(!planner.toggle("fruit", None));

    let before_clear = Arc::clone(planner.snapshot());
    let totals = planner.totals();
    assert!((totals.calories - 490.0).abs() < 1e-9);
    assert!((totals.carbs - 108.0).abs() < 1e-9);
    assert_eq!(planner.selected_meals().len(), 3);

    planner.clear();
    assert!(planner.snapshot().is_empty());
    assert_eq!(planner.totals(), Totals::default());
    assert_eq!(before_clear.len(), 3);
}
