use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the dedup marker file lives
    pub state_path: PathBuf,

    /// Coordinates the snowfall forecast is queried for
    #[serde(default)]
    pub location: LocationConfig,

    /// Push notification credentials
    #[serde(default)]
    pub pushover: PushoverConfig,
}

/// Geographic point for the weather query
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Null Island; validation flags it until the user sets real coordinates
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

/// Pushover application credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushoverConfig {
    /// Application API token
    pub token: String,
    /// User key the message is delivered to
    pub user_key: String,
}

impl PushoverConfig {
    /// Let the environment win over whatever the saved file holds, so
    /// secrets never have to live on disk.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("PUSHOVER_TOKEN") {
            self.token = token;
        }
        if let Ok(user_key) = std::env::var("PUSHOVER_USER_KEY") {
            self.user_key = user_key;
        }
    }

    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
            && !self.user_key.is_empty()
            && !self.token.starts_with("YOUR_")
            && !self.user_key.starts_with("YOUR_")
    }
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            token: std::env::var("PUSHOVER_TOKEN")
                .unwrap_or_else(|_| "YOUR_PUSHOVER_TOKEN".to_string()),
            user_key: std::env::var("PUSHOVER_USER_KEY")
                .unwrap_or_else(|_| "YOUR_PUSHOVER_USER_KEY".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snowalert");

        Self {
            state_path: config_dir.join("state.json"),
            location: LocationConfig::default(),
            pushover: PushoverConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.pushover.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; validation errors fail the load.
    pub fn load_validated() -> Result<Self> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !(-90.0..=90.0).contains(&self.location.latitude) {
            result.add_error(
                "location.latitude",
                format!(
                    "Latitude must be between -90 and 90, got {}",
                    self.location.latitude
                ),
            );
        }

        if !(-180.0..=180.0).contains(&self.location.longitude) {
            result.add_error(
                "location.longitude",
                format!(
                    "Longitude must be between -180 and 180, got {}",
                    self.location.longitude
                ),
            );
        }

        if self.location.latitude == 0.0 && self.location.longitude == 0.0 {
            result.add_warning(
                "location",
                "Coordinates are (0, 0) - set your actual location",
            );
        }

        if !self.pushover.is_configured() {
            result.add_error(
                "pushover",
                "Pushover credentials not configured - set token and user_key \
                 (or PUSHOVER_TOKEN / PUSHOVER_USER_KEY in the environment)",
            );
        }

        if let Some(parent) = self.state_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                result.add_warning(
                    "state_path",
                    format!(
                        "State directory does not exist yet: {}",
                        parent.display()
                    ),
                );
            }
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("snowalert");

        Ok(config_dir.join("config.toml"))
    }
}
