use fxhash::FxHashMap;
use mplan_domain::TenantPlugin;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Identity of a registered tenant, for tenant pickers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TenantSummary {
    pub tenant_id: String,
    pub tenant_name: String,
}

/// A thread-safe store of tenant bundles keyed by `tenant_id`.
///
/// Clones are handles to the same store: a bundle registered through one is
/// visible through all of them.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Arc<RwLock<FxHashMap<String, Arc<TenantPlugin>>>>,
}

impl PluginRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `plugin` under its `tenant_id`, replacing any bundle already there.
    ///
    /// Returns the replaced bundle, if any.
    pub fn register(&self, plugin: impl Into<Arc<TenantPlugin>>) -> Option<Arc<TenantPlugin>> {
        let plugin = plugin.into();
        let tenant_id = plugin.tenant_id.clone();
        let previous = self.plugins.write().insert(tenant_id.clone(), plugin);

        if previous.is_some() {
            debug!(tenant = %tenant_id, "tenant plugin replaced");
        } else {
            info!(tenant = %tenant_id, "tenant plugin registered");
        }
        previous
    }

    /// Registers every bundle of `plugins` in iteration order.
    pub fn register_all<I, P>(&self, plugins: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Arc<TenantPlugin>>,
    {
        for plugin in plugins {
            self.register(plugin);
        }
    }

    #[must_use]
    pub fn get(&self, tenant_id: &str) -> Option<Arc<TenantPlugin>> {
        self.plugins.read().get(tenant_id).cloned()
    }

    #[must_use]
    pub fn contains(&self, tenant_id: &str) -> bool {
        self.plugins.read().contains_key(tenant_id)
    }

    /// All registered bundles, in no particular order.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<TenantPlugin>> {
        self.plugins.read().values().cloned().collect()
    }

    /// Ids and display names of all tenants, sorted by id.
    #[must_use]
    pub fn list_summaries(&self) -> Vec<TenantSummary> {
        let mut summaries: Vec<_> = self
            .plugins
            .read()
            .values()
            .map(|plugin| TenantSummary {
                tenant_id: plugin.tenant_id.clone(),
                tenant_name: plugin.tenant_name.clone(),
            })
            .collect();
        summaries.sort_unstable();
        summaries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }
}

impl<P: Into<Arc<TenantPlugin>>> FromIterator<P> for PluginRegistry {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        let registry = Self::new();
        registry.register_all(iter);
        registry
    }
}
