use crate::meal::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A shared, immutable selection snapshot.
///
/// Transitions hand back the same allocation when nothing changed, so callers
/// can skip work with [`Arc::ptr_eq`].
pub type Snapshot = Arc<PlannerState>;

/// Per-category ordered lists of selected meal ids.
///
/// A category missing from the map is the same as one with an empty list, and
/// equality treats them alike.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlannerState {
    selections: BTreeMap<Category, Vec<String>>,
}

impl PlannerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty [`Snapshot`], for a new session or an explicit clear.
    #[must_use]
    pub fn cleared() -> Snapshot {
        Arc::new(Self::default())
    }

    /// Ids selected for `category`, empty when the category was never touched.
    #[must_use]
    pub fn selected(&self, category: &str) -> &[String] {
        self.selections.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_selected(&self, category: &str, meal_id: &str) -> bool {
        self.selected(category).iter().any(|id| id == meal_id)
    }

    /// `true` when no category holds a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.values().all(Vec::is_empty)
    }

    /// Number of selected ids across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.values().map(Vec::len).sum()
    }

    /// A copy of this state with `category` replaced by `ids`; other categories are kept.
    #[must_use]
    pub fn with_selection(&self, category: impl Into<Category>, ids: Vec<String>) -> Self {
        let mut selections = self.selections.clone();
        selections.insert(category.into(), ids);
        Self { selections }
    }

    /// Categories and their selections, including explicitly emptied ones.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[String])> {
        self.selections.iter().map(|(category, ids)| (category, ids.as_slice()))
    }

    fn non_empty(&self) -> impl Iterator<Item = (&Category, &Vec<String>)> {
        self.selections.iter().filter(|(_, ids)| !ids.is_empty())
    }
}

impl PartialEq for PlannerState {
    fn eq(&self, other: &Self) -> bool {
        self.non_empty().eq(other.non_empty())
    }
}

impl Eq for PlannerState {}

impl<C, I, S> FromIterator<(C, I)> for PlannerState
where
    C: Into<Category>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let selections = iter
            .into_iter()
            .map(|(category, ids)| (category.into(), ids.into_iter().map(Into::into).collect()))
            .collect();
        Self { selections }
    }
}
