use crate::defaults::apply_defaults;
use crate::error::TenancyError;
use crate::registry::PluginRegistry;
use crate::strategy::{EnvSource, ProcessEnv, ResolutionContext, Signals};
use mplan_domain::config::{DEFAULT_TENANT_ENV_VAR, DEFAULT_TENANT_ID, ResolutionStrategy, TenancyConfig};
use mplan_domain::{ResolvedConfig, TenantPlugin};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Resolves the active tenant and hands out its fully populated configuration.
///
/// Reads and writes go to a shared [`PluginRegistry`]. The resolved tenant id is
/// cached per instance for client calls, so one injector serves one session;
/// use [`ConfigurationInjector::fork`] to start another.
///
/// ```rust
/// use mplan_domain::TenantPlugin;
/// use mplan_tenancy::{ConfigurationInjector, ResolutionContext};
///
/// let injector = ConfigurationInjector::builder()
///     .plugins([TenantPlugin::new("default", "Default User", "1.0.0")])
///     .build();
///
/// let config = injector.get_config(&ResolutionContext::prerender()).unwrap();
/// assert_eq!(config.tenant_id, "default");
/// assert_eq!(config.branding.app_title, "Meal Planner");
/// ```
#[derive(Debug)]
pub struct ConfigurationInjector {
    registry: PluginRegistry,
    default_tenant: String,
    strategies: Arc<[ResolutionStrategy]>,
    environment: Arc<dyn EnvSource>,
    env_var: String,
    cached_tenant: Mutex<Option<String>>,
}

impl ConfigurationInjector {
    #[must_use]
    pub fn builder() -> InjectorBuilder {
        InjectorBuilder::default()
    }

    /// Builds an injector from loaded settings over an existing registry.
    #[must_use]
    pub fn from_config(config: &TenancyConfig, registry: PluginRegistry) -> Self {
        Self::builder()
            .registry(registry)
            .default_tenant(config.default_tenant.clone())
            .strategies(config.strategies.iter().copied())
            .env_var(config.env_var.clone())
            .build()
    }

    /// The configuration of the active tenant, with defaults applied.
    ///
    /// Falls back to the default tenant when the resolved one is not registered.
    ///
    /// # Errors
    /// Returns [`TenancyError::DefaultTenantMissing`] when the default tenant is
    /// needed but not registered.
    pub fn get_config(&self, context: &ResolutionContext) -> Result<ResolvedConfig, TenancyError> {
        let tenant_id = self.resolve_tenant_id(context);

        let plugin = match self.registry.get(&tenant_id) {
            Some(plugin) => plugin,
            None => {
                warn!(
                    tenant = %tenant_id,
                    fallback = %self.default_tenant,
                    "tenant not registered, using default"
                );
                self.registry.get(&self.default_tenant).ok_or_else(|| {
                    TenancyError::DefaultTenantMissing { tenant_id: self.default_tenant.clone() }
                })?
            },
        };

        debug!(tenant = %plugin.tenant_id, version = %plugin.version, "resolved tenant configuration");
        Ok(apply_defaults(plugin))
    }

    /// The tenant id the strategy chain picks for `context`.
    ///
    /// Client calls return the cached id when there is one and cache what they
    /// resolve. Prerender calls never touch the cache.
    pub fn resolve_tenant_id(&self, context: &ResolutionContext) -> String {
        if !context.is_client() {
            return self.signals(context).resolve(&self.strategies);
        }

        let mut cached = self.cached_tenant.lock();
        if let Some(tenant_id) = cached.as_ref() {
            trace!(tenant = %tenant_id, "using cached tenant");
            return tenant_id.clone();
        }

        let tenant_id = self.signals(context).resolve(&self.strategies);
        *cached = Some(tenant_id.clone());
        tenant_id
    }

    /// Writes `plugin` into the shared registry. The cached tenant id is kept.
    pub fn register_plugin(&self, plugin: impl Into<Arc<TenantPlugin>>) {
        self.registry.register(plugin);
    }

    #[must_use]
    pub fn get_plugin(&self, tenant_id: &str) -> Option<Arc<TenantPlugin>> {
        self.registry.get(tenant_id)
    }

    #[must_use]
    pub const fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    #[must_use]
    pub fn default_tenant_id(&self) -> &str {
        &self.default_tenant
    }

    #[must_use]
    pub fn strategies(&self) -> &[ResolutionStrategy] {
        &self.strategies
    }

    /// The tenant id cached by an earlier client call, if any.
    #[must_use]
    pub fn cached_tenant_id(&self) -> Option<String> {
        self.cached_tenant.lock().clone()
    }

    /// Forgets the cached tenant id; the next client call resolves afresh.
    pub fn clear_cache(&self) {
        self.cached_tenant.lock().take();
    }

    /// A new injector for another session: same registry and settings, empty cache.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            default_tenant: self.default_tenant.clone(),
            strategies: Arc::clone(&self.strategies),
            environment: Arc::clone(&self.environment),
            env_var: self.env_var.clone(),
            cached_tenant: Mutex::new(None),
        }
    }

    fn signals<'a>(&'a self, context: &'a ResolutionContext) -> Signals<'a> {
        Signals {
            context,
            environment: self.environment.as_ref(),
            env_var: &self.env_var,
            default_tenant: &self.default_tenant,
        }
    }
}

/// Builder for [`ConfigurationInjector`]; every setting has a default.
#[derive(Debug, Default)]
pub struct InjectorBuilder {
    registry: Option<PluginRegistry>,
    plugins: Vec<TenantPlugin>,
    default_tenant: Option<String>,
    strategies: Option<Vec<ResolutionStrategy>>,
    environment: Option<Arc<dyn EnvSource>>,
    env_var: Option<String>,
}

impl InjectorBuilder {
    /// Shares an existing registry instead of creating a private one.
    #[must_use]
    pub fn registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Bundles written into the registry when the injector is built.
    #[must_use]
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = TenantPlugin>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    #[must_use]
    pub fn default_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.default_tenant = Some(tenant_id.into());
        self
    }

    /// Strategy chain in priority order. Defaults to url, subdomain, env, default.
    #[must_use]
    pub fn strategies(mut self, strategies: impl IntoIterator<Item = ResolutionStrategy>) -> Self {
        self.strategies = Some(strategies.into_iter().collect());
        self
    }

    /// Environment consulted by the env strategy. Defaults to the process environment.
    #[must_use]
    pub fn environment(mut self, environment: impl EnvSource + 'static) -> Self {
        self.environment = Some(Arc::new(environment));
        self
    }

    #[must_use]
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ConfigurationInjector {
        let registry = self.registry.unwrap_or_default();
        registry.register_all(self.plugins);

        let strategies = self.strategies.unwrap_or_else(|| ResolutionStrategy::STANDARD.to_vec());
        let default_tenant = self.default_tenant.unwrap_or_else(|| DEFAULT_TENANT_ID.to_owned());
        debug!(default = %default_tenant, ?strategies, "configuration injector ready");

        ConfigurationInjector {
            registry,
            default_tenant,
            strategies: strategies.into(),
            environment: self.environment.unwrap_or_else(|| Arc::new(ProcessEnv) as Arc<dyn EnvSource>),
            env_var: self.env_var.unwrap_or_else(|| DEFAULT_TENANT_ENV_VAR.to_owned()),
            cached_tenant: Mutex::new(None),
        }
    }
}
