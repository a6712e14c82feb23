//! Tenant bundles shipped with the planner, plus loading of extra bundles from disk.
//!
//! Every bundle goes through [`validate`] before it is handed out.

mod error;

pub use error::{CatalogError, CatalogErrorExt};

use mplan_domain::TenantPlugin;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bundles compiled into the binary, by file stem.
const BUNDLED: [(&str, &str); 3] = [
    ("default", include_str!("../bundles/default.json")),
    ("veggie", include_str!("../bundles/veggie.json")),
    ("costco-kitchen", include_str!("../bundles/costco-kitchen.json")),
];

/// The built-in tenant bundles: `default`, `veggie` and `costco-kitchen`.
///
/// # Errors
/// Returns [`CatalogError`] if an embedded bundle fails to parse or validate.
pub fn bundled() -> Result<Vec<TenantPlugin>, CatalogError> {
    BUNDLED.iter().map(|(name, raw)| parse(name, raw)).collect()
}

/// Parses and validates one bundle. `name` only labels errors.
///
/// # Errors
/// Returns [`CatalogError::Parse`] for malformed JSON and [`CatalogError::Invalid`]
/// when the bundle breaks a catalog rule.
pub fn parse(name: &str, raw: &str) -> Result<TenantPlugin, CatalogError> {
    let plugin: TenantPlugin =
        serde_json::from_str(raw).context(format!("bundle \"{name}\""))?;
    validate(&plugin)?;
    debug!(bundle = %name, tenant = %plugin.tenant_id, meals = plugin.meal_library.len(), "bundle parsed");
    Ok(plugin)
}

/// Reads every `*.json` bundle directly inside `dir`, in file name order.
///
/// # Errors
/// Returns [`CatalogError`] when the directory or a file cannot be read, or a
/// bundle fails to parse or validate.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<TenantPlugin>, CatalogError> {
    let dir = dir.as_ref();
    let mut files = fs::read_dir(dir)
        .context(format!("reading {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .context(format!("listing {}", dir.display()))?;
    files.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"));
    files.sort();

    let plugins = files
        .iter()
        .map(|path| {
            let raw = fs::read_to_string(path).context(format!("reading {}", path.display()))?;
            parse(&path.display().to_string(), &raw)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(dir = %dir.display(), bundles = plugins.len(), "loaded bundles from disk");
    Ok(plugins)
}

/// Checks the rules a bundle must follow beyond its schema.
///
/// - the tenant id is not empty;
/// - every category rule pairs its cardinality with a fitting input kind;
/// - meal ids are unique and not empty;
/// - every meal belongs to a declared category;
/// - nutrition values are finite and non-negative.
///
/// # Errors
/// Returns [`CatalogError::Invalid`] naming the first broken rule.
pub fn validate(plugin: &TenantPlugin) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::Invalid {
        tenant_id: plugin.tenant_id.clone(),
        reason: reason.into(),
    };

    if plugin.tenant_id.trim().is_empty() {
        return Err(invalid("tenant id is empty".to_owned()));
    }

    for (category, rule) in &plugin.category_config {
        if !rule.is_consistent() {
            return Err(invalid(format!(
                "category \"{category}\" uses {:?} with a {} input",
                rule.cardinality, rule.input
            )));
        }
    }

    let mut seen = HashSet::with_capacity(plugin.meal_library.len());
    for meal in &plugin.meal_library {
        if meal.id.is_empty() {
            return Err(invalid(format!("meal \"{}\" has an empty id", meal.name)));
        }
        if !seen.insert(meal.id.as_str()) {
            return Err(invalid(format!("meal id \"{}\" is used twice", meal.id)));
        }
        if !plugin.category_config.contains_key(meal.category.as_str()) {
            return Err(invalid(format!(
                "meal \"{}\" belongs to undeclared category \"{}\"",
                meal.id, meal.category
            )));
        }
        let nutrition = [meal.calories, meal.protein, meal.carbs, meal.fat];
        if nutrition.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(invalid(format!("meal \"{}\" has negative or non-finite nutrition", meal.id)));
        }
    }

    Ok(())
}
