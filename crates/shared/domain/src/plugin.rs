use crate::meal::{Category, Meal};
use crate::rules::CategoryRule;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// The complete configuration bundle owned by one tenant.
///
/// Category rules keep their declaration order, which is also the display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantPlugin {
    pub tenant_id: String,
    pub tenant_name: String,
    pub version: String,
    #[serde(default)]
    pub meal_library: Vec<Meal>,
    #[serde(default)]
    pub category_config: IndexMap<Category, CategoryRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<BrandingOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureOverrides>,
}

impl TenantPlugin {
    pub fn new(
        tenant_id: impl Into<String>,
        tenant_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tenant_name: tenant_name.into(),
            version: version.into(),
            meal_library: Vec::new(),
            category_config: IndexMap::new(),
            branding: None,
            features: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>, rule: CategoryRule) -> Self {
        self.category_config.insert(category.into(), rule);
        self
    }

    #[must_use]
    pub fn with_meal(mut self, meal: Meal) -> Self {
        self.meal_library.push(meal);
        self
    }

    #[must_use]
    pub fn with_branding(mut self, branding: BrandingOverrides) -> Self {
        self.branding = Some(branding);
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: FeatureOverrides) -> Self {
        self.features = Some(features);
        self
    }

    /// Meals of one category, in library order.
    pub fn meals_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Meal> + 'a {
        self.meal_library.iter().filter(move |meal| meal.category.as_str() == category)
    }

    #[must_use]
    pub fn meal(&self, id: &str) -> Option<&Meal> {
        self.meal_library.iter().find(|meal| meal.id == id)
    }

    #[must_use]
    pub fn rule(&self, category: &str) -> Option<&CategoryRule> {
        self.category_config.get(category)
    }
}

/// Partial branding supplied by a tenant; unset fields fall back to [`Branding::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingOverrides {
    pub app_title: Option<String>,
    pub app_description: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
}

/// Partial feature flags supplied by a tenant; unset fields fall back to [`Features::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureOverrides {
    pub enable_local_storage: Option<bool>,
    pub storage_key: Option<String>,
    pub enable_mobile_view: Option<bool>,
}

/// Fully populated branding block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub app_title: String,
    pub app_description: String,
    pub primary_color: String,
    pub accent_color: String,
}

/// Fully populated feature block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub enable_local_storage: bool,
    pub storage_key: String,
    pub enable_mobile_view: bool,
}

/// A tenant bundle with its branding and feature blocks fully populated.
///
/// Dereferences to the underlying [`TenantPlugin`]; `branding` and `features`
/// resolve to the merged blocks, not the tenant's partial overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    plugin: Arc<TenantPlugin>,
    pub branding: Branding,
    pub features: Features,
}

impl ResolvedConfig {
    #[must_use]
    pub const fn new(plugin: Arc<TenantPlugin>, branding: Branding, features: Features) -> Self {
        Self { plugin, branding, features }
    }

    /// The bundle this configuration was resolved from.
    #[must_use]
    pub const fn plugin(&self) -> &Arc<TenantPlugin> {
        &self.plugin
    }

    /// Categories with their rules, in display order.
    pub fn categories(&self) -> impl Iterator<Item = (&Category, &CategoryRule)> {
        self.plugin.category_config.iter()
    }
}

impl Deref for ResolvedConfig {
    type Target = TenantPlugin;

    fn deref(&self) -> &Self::Target {
        &self.plugin
    }
}

// --- Default ---

impl Default for Branding {
    fn default() -> Self {
        Self {
            app_title: "Meal Planner".to_owned(),
            app_description: "Plan your meals efficiently".to_owned(),
            primary_color: "#000000".to_owned(),
            accent_color: "#0070f3".to_owned(),
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self {
            enable_local_storage: false,
            storage_key: "meal-planner-state".to_owned(),
            enable_mobile_view: true,
        }
    }
}
