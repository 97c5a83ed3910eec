//! Settings file: defaults for `build` parameters.
//!
//! YAML (`.yaml` / `.yml`) or JSON, chosen by extension. CLI flags win over
//! file values; the file wins over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Executable used when the settings file does not name one.
pub const DEFAULT_PROGRAM: &str = "shoestring";

/// Environment fallback for the global `--config` flag.
pub const CONFIG_ENV: &str = "SHOESTRING_CMD_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Shoestring invocation prefix, e.g. `python3 -m shoestring`
    pub program: Option<String>,
    pub destination_directory: Option<PathBuf>,
    pub shoestring_directory: Option<PathBuf>,
    pub ca_pem_path: Option<PathBuf>,
    pub package: Option<String>,
    pub has_custom_rest_overrides: Option<bool>,
}

impl Settings {
    /// Load from `path`, picking the parser by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;
        let lower = path.to_string_lossy().to_ascii_lowercase();

        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::from_yaml(&raw)
        } else {
            Self::from_json(&raw)
        }
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // empty YAML documents deserialize as null
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).context("failed to parse YAML settings file")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse JSON settings file")
    }

    /// Program tokens (shell-split), defaulting to `shoestring`.
    pub fn program_tokens(&self) -> Result<Vec<String>> {
        let program = self
            .program
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROGRAM);
        let tokens = shell_words::split(program)
            .with_context(|| format!("failed to parse program: '{program}'"))?;
        if tokens.is_empty() {
            anyhow::bail!("program cannot be empty");
        }
        Ok(tokens)
    }
}

/// Resolve the settings path: explicit flag, then `SHOESTRING_CMD_CONFIG`.
pub fn resolve_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    })
}

/// Load settings if a path was given, otherwise defaults.
pub fn load_optional(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(p) => Settings::load(p),
        None => Ok(Settings::default()),
    }
}
