//! Gateway configuration, resolved once at startup.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional YAML file passed with `--config`
//! 3. environment variables (a `.env` file in the working directory is
//!    loaded first)

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::pipeline::platform::PlatformProfile;

/// Timeout budget shared by every command unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "SHELLGATE_LOG";
/// Environment variable overriding the shell binary.
pub const SHELL_ENV: &str = "SHELLGATE_SHELL";
/// Environment variable overriding the timeout budget, in whole seconds.
pub const TIMEOUT_ENV: &str = "SHELLGATE_TIMEOUT_SECS";

/// On-disk configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// `tracing` filter directive, e.g. `debug` or `shellgate=trace`.
    pub log_level: Option<String>,
    /// Shell binary replacing the detected one.
    pub shell: Option<String>,
    /// Timeout budget in whole seconds.
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Reads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
    }
}

/// Fully resolved settings for one gateway process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// `tracing` filter directive.
    pub log_level: String,
    /// Shell override; the platform default is used when `None`.
    pub shell: Option<String>,
    /// Wall-clock budget applied to every command.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { log_level: DEFAULT_LOG_LEVEL.to_string(), shell: None, timeout: DEFAULT_TIMEOUT }
    }
}

impl GatewayConfig {
    /// Loads `.env`, the optional config file and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or any value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();

        let file = path.map(FileConfig::load).transpose()?.unwrap_or_default();
        Self::resolve(file, |key| env::var(key).ok())
    }

    /// Layers `file` and the variables visible through `lookup` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or not a number.
    pub fn resolve(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(level) = file.log_level {
            config.log_level = level;
        }
        config.shell = file.shell;
        if let Some(secs) = file.timeout_secs {
            config.timeout = timeout_from_secs(secs)?;
        }

        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_level = level;
        }
        if let Some(shell) = lookup(SHELL_ENV).filter(|v| !v.trim().is_empty()) {
            config.shell = Some(shell);
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid {TIMEOUT_ENV} value {raw:?}: {e}"))?;
            config.timeout = timeout_from_secs(secs)?;
        }

        Ok(config)
    }

    /// Builds the platform profile for this process.
    #[must_use]
    pub fn profile(&self) -> PlatformProfile {
        let profile = PlatformProfile::detect();
        match &self.shell {
            Some(shell) => profile.with_shell(shell.clone()),
            None => profile,
        }
    }
}

fn timeout_from_secs(secs: u64) -> Result<Duration, String> {
    if secs == 0 {
        return Err("Timeout must be at least one second".to_string());
    }
    Ok(Duration::from_secs(secs))
}
