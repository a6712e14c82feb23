use config::{Config, ConfigBuilder, Environment, File, Map, builder::DefaultState};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "MPLAN";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// File used when no path is given; the extension is discovered.
pub const DEFAULT_CONFIG_PATH: &str = "planner";

/// Keys parsed as comma separated lists when they come from the environment.
const LIST_KEYS: [&str; 1] = ["tenancy.strategies"];

/// Custom error type for config loading.
#[mplan_derive::planner_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file overlaid with environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Base file**: `path`, or `planner` in the working directory. The extension
///    may be omitted (`planner` finds `planner.toml`).
/// 2. **Environment**: variables prefixed with `MPLAN__`, nested keys separated by
///    double underscores (`MPLAN__TENANCY__DEFAULT_TENANT` maps to `tenancy.default_tenant`).
///    `MPLAN__TENANCY__STRATEGIES` takes a comma separated list.
///
/// # Errors
/// Returns [`ConfigError`] if the file is missing or unreadable, or if the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use mplan_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     name: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = effective_path(path);
    info!("Loading config from {}", effective_path.display());

    build(&effective_path, true, None)
}

/// Like [`load_config`], but a missing file is not an error.
///
/// Without a file only environment overrides apply, so `T` should carry
/// `#[serde(default)]` for the remaining fields.
///
/// # Errors
/// Returns [`ConfigError`] if an existing file is malformed or the merged values
/// do not deserialize into `T`.
pub fn load_config_or_default<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = effective_path(path);
    debug!("Loading optional config from {}", effective_path.display());

    build(&effective_path, false, None)
}

/// Like [`load_config`], with `vars` standing in for the process environment.
///
/// Used by embedders that keep their own variable set, and by tests.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with_env<T, K, V>(
    path: impl AsRef<Path>,
    vars: impl IntoIterator<Item = (K, V)>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    build(path.as_ref(), true, Some(vars))
}

fn effective_path(path: Option<impl AsRef<Path>>) -> PathBuf {
    path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), |p| p.as_ref().to_path_buf())
}

fn build<T>(path: &Path, required: bool, vars: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path, required, vars)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

fn layered(
    path: &Path,
    required: bool,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    let environment = LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .list_separator(",")
            .source(vars),
        |env, key| env.with_list_parse_key(key),
    );

    Config::builder().add_source(File::from(path).required(required)).add_source(environment)
}
