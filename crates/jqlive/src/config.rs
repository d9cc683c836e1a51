use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::shorthand::ShorthandTable;

pub const CONFIG_DIR_NAME: &str = "jqlive";
pub const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_VERSION: &str = "1";
pub const DEFAULT_EXECUTABLE: &str = "jq";
pub const DEFAULT_MAX_INFLIGHT: usize = 1;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Session configuration. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub executable: String,
    #[serde(default = "default_max_inflight")]
    pub max_inflight: usize,
    #[serde(default)]
    pub shorthands: ShorthandTable,
    #[serde(default)]
    pub clipboard: ClipboardPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardPreferences {
    /// Entries remembered from this run.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ClipboardPreferences {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            max_inflight: DEFAULT_MAX_INFLIGHT,
            shorthands: ShorthandTable::default(),
            clipboard: ClipboardPreferences::default(),
        }
    }
}

fn default_max_inflight() -> usize {
    DEFAULT_MAX_INFLIGHT
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    fn validate(self) -> CoreResult<Self> {
        if self.version != CONFIG_VERSION {
            return Err(CoreError::InvalidConfig(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                self.version
            )));
        }
        if self.executable.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "executable must not be empty".to_string(),
            ));
        }
        if self.max_inflight == 0 {
            return Err(CoreError::InvalidConfig(
                "max_inflight must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Default config location, `<config_dir>/jqlive/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Loads the config at `path`, writing the defaults there first if missing.
pub fn load_or_create_config(path: &Path) -> CoreResult<Config> {
    if !path.exists() {
        let config = Config::default();
        write_config(path, &config)?;
        tracing::info!("wrote default config to {}", path.display());
        return Ok(config);
    }
    load_config(path)
}

pub fn load_config(path: &Path) -> CoreResult<Config> {
    let data = std::fs::read_to_string(path).map_err(|error| {
        CoreError::InvalidConfig(format!("failed to read {}: {error}", path.display()))
    })?;
    let config: Config = serde_json::from_str(&data).map_err(|error| {
        CoreError::InvalidConfig(format!("failed to parse {}: {error}", path.display()))
    })?;
    config.validate()
}

pub fn write_config(path: &Path, config: &Config) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            CoreError::Internal(format!(
                "failed to create config directory {}: {error}",
                parent.display()
            ))
        })?;
    }
    let data = serde_json::to_string_pretty(config).map_err(|error| {
        CoreError::Internal(format!("failed to serialize config: {error}"))
    })?;
    std::fs::write(path, data).map_err(|error| {
        CoreError::Internal(format!(
            "failed to write config {}: {error}",
            path.display()
        ))
    })
}

/// Resolves the filter engine against the process `PATH`.
pub fn resolve_executable(executable: &str) -> CoreResult<PathBuf> {
    let path_var = std::env::var_os("PATH");
    resolve_executable_in(executable, path_var.as_deref())
}

/// Resolves `executable` once for the session.
///
/// Anything containing a path separator is taken as a path and must exist;
/// a bare name is looked up in each `PATH` entry in order.
pub fn resolve_executable_in(executable: &str, path_var: Option<&OsStr>) -> CoreResult<PathBuf> {
    let executable = executable.trim();
    if executable.is_empty() {
        return Err(CoreError::ExecutableNotFound("(empty)".to_string()));
    }

    let candidate = Path::new(executable);
    if candidate.components().count() > 1 {
        if is_executable_file(candidate) {
            return Ok(candidate.to_path_buf());
        }
        return Err(CoreError::ExecutableNotFound(executable.to_string()));
    }

    let Some(path_var) = path_var else {
        return Err(CoreError::ExecutableNotFound(executable.to_string()));
    };
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(executable))
        .find(|path| is_executable_file(path))
        .ok_or_else(|| CoreError::ExecutableNotFound(executable.to_string()))
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
