use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming an alternate overlay file.
pub const CONFIG_ENV_VAR: &str = "CODEB_GUARD_CONFIG";

/// Overlay location used when [`CONFIG_ENV_VAR`] is unset.
const DEFAULT_OVERLAY_PATH: &str = "~/.config/codeb-guard/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub patterns: Patterns,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Second stderr line printed after a block.
    #[serde(default)]
    pub guidance: String,
    #[serde(default)]
    pub log_decisions: bool,
    /// `log` level filter name for the diagnostic log (off, error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guidance: String::new(),
            log_decisions: false,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "off".into()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Patterns {
    /// Ordered denylist; regex source strings.
    #[serde(default)]
    pub blocked: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    patterns: PatternsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    guidance: Option<String>,
    log_decisions: Option<bool>,
    log_level: Option<String>,
}

/// Overlays may only add patterns. Built-in entries cannot be removed or
/// replaced, so `remove_blocked`/`replace` keys reject the whole file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PatternsOverlay {
    #[serde(default)]
    blocked: Vec<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Result<Self, GuardError> {
        toml::from_str(DEFAULT_CONFIG).map_err(|source| GuardError::ConfigParse {
            path: PathBuf::from("<embedded config.default.toml>"),
            source,
        })
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the user overlay (if one exists)
    ///
    /// A broken overlay is skipped and handed back alongside the defaults so
    /// the caller can report it once logging is up.
    pub fn load() -> Result<(Self, Option<GuardError>), GuardError> {
        let mut config = Self::default_config()?;
        match Self::read_overlay(&overlay_path()) {
            Ok(Some(overlay)) => {
                config.apply_overlay(overlay);
                Ok((config, None))
            }
            Ok(None) => Ok((config, None)),
            Err(e) => Ok((config, Some(e))),
        }
    }

    /// Read and parse an overlay file. A missing file is `Ok(None)`.
    fn read_overlay(path: &Path) -> Result<Option<ConfigOverlay>, GuardError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(GuardError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| GuardError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        let s = overlay.settings;
        if let Some(v) = s.guidance {
            self.settings.guidance = v;
        }
        if let Some(v) = s.log_decisions {
            self.settings.log_decisions = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }

        // Patterns: append after the built-in table, skipping repeats
        for pattern in overlay.patterns.blocked {
            if !self.patterns.blocked.contains(&pattern) {
                self.patterns.blocked.push(pattern);
            }
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

/// Resolve the overlay path, expanding `~` and `$VARS`.
pub fn overlay_path() -> PathBuf {
    let raw = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_OVERLAY_PATH.into());
    expand_path(&raw)
}

/// Expand `~` and environment variables in a path; unresolvable variables
/// leave the input untouched.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
    }
}
