use mplan_domain::{Branding, BrandingOverrides, FeatureOverrides, Features, ResolvedConfig, TenantPlugin};
use std::sync::Arc;

/// Fills every branding and feature field the tenant left unset from the baseline.
#[must_use]
pub fn apply_defaults(plugin: Arc<TenantPlugin>) -> ResolvedConfig {
    let branding = merge_branding(plugin.branding.as_ref());
    let features = merge_features(plugin.features.as_ref());
    ResolvedConfig::new(plugin, branding, features)
}

#[must_use]
pub fn merge_branding(overrides: Option<&BrandingOverrides>) -> Branding {
    let base = Branding::default();
    let Some(overrides) = overrides else { return base };

    Branding {
        app_title: overrides.app_title.clone().unwrap_or(base.app_title),
        app_description: overrides.app_description.clone().unwrap_or(base.app_description),
        primary_color: overrides.primary_color.clone().unwrap_or(base.primary_color),
        accent_color: overrides.accent_color.clone().unwrap_or(base.accent_color),
    }
}

#[must_use]
pub fn merge_features(overrides: Option<&FeatureOverrides>) -> Features {
    let base = Features::default();
    let Some(overrides) = overrides else { return base };

    Features {
        enable_local_storage: overrides.enable_local_storage.unwrap_or(base.enable_local_storage),
        storage_key: overrides.storage_key.clone().unwrap_or(base.storage_key),
        enable_mobile_view: overrides.enable_mobile_view.unwrap_or(base.enable_mobile_view),
    }
}
