//! Shared traits.
//!
//! [`ConfigManager`] lets CLI config handlers stay generic over the concrete
//! configuration type.

use crate::util::paths::{env_prefix, env_var, expand_tilde};
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// A TOML-backed configuration type.
///
/// Implementors only need to name their project; path resolution, loading,
/// serialization and environment export come with the trait.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Default config file location: `<config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Name of the environment variable that may point at a config file.
    fn config_env_var() -> String {
        env_var(Self::project_name(), "CONFIG")
    }

    /// Resolve the config file path.
    ///
    /// Checks, in order: the explicit path, the `<PROJECT>_CONFIG`
    /// environment variable, then [`default_config_path`](Self::default_config_path).
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_path(
            explicit,
            std::env::var(Self::config_env_var()).ok(),
            Self::default_config_path(),
        )
    }

    /// Load the configuration.
    ///
    /// A missing file at the default location yields the defaults. A file
    /// that was asked for explicitly (flag or env var) must exist.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let from_env = std::env::var(Self::config_env_var()).ok();
        let requested = explicit.is_some() || from_env.is_some();
        load_path(
            resolve_path(explicit, from_env, Self::default_config_path()),
            requested,
        )
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten into `<PROJECT>_<SECTION>_<KEY>=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&env_prefix(Self::project_name()), &value, &mut vars);
        Ok(vars)
    }
}

/// Pick the config path: explicit, then env var value, then default.
fn resolve_path(
    explicit: Option<&str>,
    from_env: Option<String>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .map(str::to_string)
        .or(from_env)
        .map(|p| expand_tilde(&p))
        .or(default)
}

/// Read a config file; `requested` makes a missing file an error.
fn load_path<C: ConfigManager>(path: Option<PathBuf>, requested: bool) -> Result<C> {
    let Some(path) = path else {
        log::debug!("No config directory on this platform, using defaults");
        return Ok(C::default());
    };

    if !path.exists() {
        if requested {
            return Err(Error::io_with_path(
                std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                &path,
            ));
        }
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(C::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                flatten_env(&format!("{prefix}_{}", env_prefix(key)), child, out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Array(items) => {
            let joined: Vec<String> = items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            out.push((prefix.to_string(), joined.join(",")));
        }
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
