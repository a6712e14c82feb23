use serde::de::{self, Deserializer, Unexpected};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The input control a category is rendered with.
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
pub enum InputKind {
    /// Single choice; only an explicit "none" clears it.
    Dropdown,
    /// Single choice with an explicit none and toggle-off on re-selection.
    Radio,
    /// Multi choice, or a compact single choice when limited to one.
    Checkbox,
}

/// How many meals a category may hold at once.
///
/// On the wire a cardinality is either a name (`"exactly_one"`, `"at_most_one"`,
/// `"unbounded"`) or a positive count, where `1` reads as [`Cardinality::AtMostOne`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// One meal is always expected (dropdowns).
    ExactlyOne,
    /// Zero or one meal.
    AtMostOne,
    /// Up to `n` meals, `n >= 2`.
    UpTo(u32),
    /// Any number of distinct meals.
    Unbounded,
}

impl Cardinality {
    /// Builds a cardinality from a selection count, normalizing `1` to [`Cardinality::AtMostOne`].
    ///
    /// Returns `None` for zero.
    #[must_use]
    pub const fn limited(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::AtMostOne),
            n => Some(Self::UpTo(n)),
        }
    }

    /// The selection cap, `None` when unbounded.
    #[must_use]
    pub const fn max_selections(self) -> Option<u32> {
        match self {
            Self::ExactlyOne | Self::AtMostOne => Some(1),
            Self::UpTo(n) => Some(if n == 0 { 1 } else { n }),
            Self::Unbounded => None,
        }
    }

    /// `true` when at most one meal can be held.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self.max_selections(), Some(1))
    }
}

impl Serialize for Cardinality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::ExactlyOne => serializer.serialize_str("exactly_one"),
            Self::AtMostOne => serializer.serialize_str("at_most_one"),
            Self::UpTo(n) => serializer.serialize_u32(*n),
            Self::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

impl<'de> Deserialize<'de> for Cardinality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(u32),
            Named(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(count) => Self::limited(count).ok_or_else(|| {
                de::Error::invalid_value(Unexpected::Unsigned(0), &"a positive selection count")
            }),
            Repr::Named(name) => match name.as_str() {
                "exactly_one" => Ok(Self::ExactlyOne),
                "at_most_one" => Ok(Self::AtMostOne),
                "unbounded" => Ok(Self::Unbounded),
                other => Err(de::Error::unknown_variant(
                    other,
                    &["exactly_one", "at_most_one", "unbounded"],
                )),
            },
        }
    }
}

/// Rule descriptor for one category: how it is labelled, rendered and limited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRule {
    pub label: String,
    pub input: InputKind,
    pub cardinality: Cardinality,
}

impl CategoryRule {
    pub fn new(label: impl Into<String>, input: InputKind, cardinality: Cardinality) -> Self {
        Self { label: label.into(), input, cardinality }
    }

    pub fn dropdown(label: impl Into<String>) -> Self {
        Self::new(label, InputKind::Dropdown, Cardinality::ExactlyOne)
    }

    pub fn radio(label: impl Into<String>) -> Self {
        Self::new(label, InputKind::Radio, Cardinality::AtMostOne)
    }

    pub fn checkbox(label: impl Into<String>, cardinality: Cardinality) -> Self {
        Self::new(label, InputKind::Checkbox, cardinality)
    }

    /// Whether the cardinality makes sense for the input kind.
    ///
    /// `ExactlyOne` belongs to dropdowns; multi-choice limits belong to checkboxes.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        match self.cardinality {
            Cardinality::ExactlyOne => matches!(self.input, InputKind::Dropdown),
            Cardinality::AtMostOne => true,
            Cardinality::UpTo(_) | Cardinality::Unbounded => {
                matches!(self.input, InputKind::Checkbox)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_and_names_deserialize() {
        let one: Cardinality = serde_json::from_value(json!(1)).unwrap();
        let three: Cardinality = serde_json::from_value(json!(3)).unwrap();
        let all: Cardinality = serde_json::from_value(json!("unbounded")).unwrap();
        let exact: Cardinality = serde_json::from_value(json!("exactly_one")).unwrap();

        assert_eq!(one, Cardinality::AtMostOne);
        assert_eq!(three, Cardinality::UpTo(3));
        assert_eq!(all, Cardinality::Unbounded);
        assert_eq!(exact, Cardinality::ExactlyOne);
    }

    #[test]
    fn zero_and_unknown_names_are_rejected() {
        assert!(serde_json::from_value::<Cardinality>(json!(0)).is_err());
        assert!(serde_json::from_value::<Cardinality>(json!("infinity")).is_err());
    }

    #[test]
    fn caps_follow_the_variant() {
        assert_eq!(Cardinality::ExactlyOne.max_selections(), Some(1));
        assert_eq!(Cardinality::UpTo(4).max_selections(), Some(4));
        assert_eq!(Cardinality::UpTo(0).max_selections(), Some(1));
        assert_eq!(Cardinality::Unbounded.max_selections(), None);
        assert!(Cardinality::AtMostOne.is_single());
        assert!(!Cardinality::UpTo(2).is_single());
    }

    #[test]
    fn consistency_ties_limits_to_inputs() {
        assert!(CategoryRule::dropdown("Breakfast").is_consistent());
        assert!(CategoryRule::radio("Coffee").is_consistent());
        assert!(CategoryRule::checkbox("Fruit", Cardinality::Unbounded).is_consistent());
        assert!(CategoryRule::checkbox("Shake", Cardinality::AtMostOne).is_consistent());

        assert!(!CategoryRule::new("Coffee", InputKind::Radio, Cardinality::Unbounded).is_consistent());
        assert!(!CategoryRule::new("Fruit", InputKind::Checkbox, Cardinality::ExactlyOne).is_consistent());
        assert!(!CategoryRule::new("Dinner", InputKind::Dropdown, Cardinality::UpTo(2)).is_consistent());
    }

    #[test]
    fn input_kind_parses_lowercase() {
        assert_eq!("radio".parse::<InputKind>().unwrap(), InputKind::Radio);
        assert_eq!(InputKind::Checkbox.to_string(), "checkbox");
    }
}
