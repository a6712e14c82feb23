use mplan_domain::config::ResolutionStrategy;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use tracing::trace;
use url::Url;

/// Query parameter carrying an explicit tenant id.
pub const TENANT_QUERY_PARAM: &str = "tenant";

/// Where a resolution call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    /// Ahead-of-time rendering: no location is available and nothing is cached.
    Prerender,
    /// A live client session with an optional location.
    Client,
}

/// Inputs of a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    location: Option<Url>,
    execution: ExecutionContext,
}

impl ResolutionContext {
    #[must_use]
    pub const fn prerender() -> Self {
        Self { location: None, execution: ExecutionContext::Prerender }
    }

    /// A client call without a known location.
    #[must_use]
    pub const fn client() -> Self {
        Self { location: None, execution: ExecutionContext::Client }
    }

    /// A client call at `location`. A malformed location is kept as absent.
    #[must_use]
    pub fn client_at(location: &str) -> Self {
        let location = Url::parse(location)
            .inspect_err(|err| trace!(%location, %err, "ignoring malformed location"))
            .ok();
        Self { location, execution: ExecutionContext::Client }
    }

    #[must_use]
    pub fn with_location(mut self, location: Url) -> Self {
        self.location = Some(location);
        self
    }

    /// The location, hidden while prerendering.
    #[must_use]
    pub const fn location(&self) -> Option<&Url> {
        match self.execution {
            ExecutionContext::Client => self.location.as_ref(),
            ExecutionContext::Prerender => None,
        }
    }

    #[must_use]
    pub const fn execution(&self) -> ExecutionContext {
        self.execution
    }

    #[must_use]
    pub const fn is_client(&self) -> bool {
        matches!(self.execution, ExecutionContext::Client)
    }
}

/// Read access to environment variables.
pub trait EnvSource: Send + Sync + fmt::Debug {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S> EnvSource for HashMap<String, String, S>
where
    S: BuildHasher + Send + Sync,
{
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Everything a strategy may consult, borrowed for one resolution pass.
#[derive(Debug)]
pub(crate) struct Signals<'a> {
    pub(crate) context: &'a ResolutionContext,
    pub(crate) environment: &'a dyn EnvSource,
    pub(crate) env_var: &'a str,
    pub(crate) default_tenant: &'a str,
}

impl Signals<'_> {
    /// The tenant id `strategy` signals, or `None` when it has nothing to say.
    pub(crate) fn signal(&self, strategy: ResolutionStrategy) -> Option<String> {
        let signal = match strategy {
            ResolutionStrategy::Url => self.context.location().and_then(from_query),
            ResolutionStrategy::Subdomain => self.context.location().and_then(from_subdomain),
            ResolutionStrategy::Env => {
                self.environment.var(self.env_var).filter(|value| !value.is_empty())
            },
            ResolutionStrategy::Default => Some(self.default_tenant.to_owned()),
        };

        match &signal {
            Some(tenant) => trace!(%strategy, %tenant, "strategy signalled"),
            None => trace!(%strategy, "no signal"),
        }
        signal
    }

    /// First signal along `strategies`, or the default tenant when none fires.
    pub(crate) fn resolve(&self, strategies: &[ResolutionStrategy]) -> String {
        strategies
            .iter()
            .find_map(|strategy| self.signal(*strategy))
            .unwrap_or_else(|| self.default_tenant.to_owned())
    }
}

fn from_query(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == TENANT_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn from_subdomain(location: &Url) -> Option<String> {
    let host = location.host_str()?;
    let mut labels = host.split('.');
    let first = labels.next()?;
    (labels.count() >= 2 && !first.is_empty()).then(|| first.to_owned())
}
