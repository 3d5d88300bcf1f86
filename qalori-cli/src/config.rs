use qalori_core::ai::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GEMINI_API_KEY_ENV};
use qalori_core::{AiError, GeminiClient};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Generative AI settings
#[derive(Debug, Clone, Serialize)]
pub struct AiConfig {
    /// Gemini API key. Never printed.
    #[serde(skip_serializing)]
    pub api_key: Option<ConfigValue<String>>,
    /// Model used for plans, swaps and chat
    pub text_model: ConfigValue<String>,
    /// Model used for meal images
    pub image_model: ConfigValue<String>,
}

impl AiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the stored JSON documents
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub ai: AiConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    ai: Option<AiConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AiConfigFile {
    api_key: Option<String>,
    text_model: Option<String>,
    image_model: Option<String>,
}

/// Non-empty value of an environment variable.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut api_key = None;
        let mut text_model =
            ConfigValue::new(DEFAULT_TEXT_MODEL.to_string(), ConfigSource::Default);
        let mut image_model =
            ConfigValue::new(DEFAULT_IMAGE_MODEL.to_string(), ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(ai) = file_config.ai {
                if let Some(key) = ai.api_key.filter(|k| !k.trim().is_empty()) {
                    api_key = Some(ConfigValue::new(key, ConfigSource::File));
                }
                if let Some(model) = ai.text_model {
                    text_model = ConfigValue::new(model, ConfigSource::File);
                }
                if let Some(model) = ai.image_model {
                    image_model = ConfigValue::new(model, ConfigSource::File);
                }
            }
        }

        // Apply environment variable overrides
        if let Some(dir) = env_var("QALORI_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(key) = env_var(GEMINI_API_KEY_ENV) {
            api_key = Some(ConfigValue::new(key, ConfigSource::Environment));
        }
        if let Some(model) = env_var("QALORI_TEXT_MODEL") {
            text_model = ConfigValue::new(model, ConfigSource::Environment);
        }
        if let Some(model) = env_var("QALORI_IMAGE_MODEL") {
            image_model = ConfigValue::new(model, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            config_file,
            ai: AiConfig {
                api_key,
                text_model,
                image_model,
            },
        })
    }

    /// Builds the Gemini client from the configured key and models.
    pub fn gemini_client(&self) -> Result<GeminiClient, AiError> {
        let key = self.ai.api_key.as_ref().ok_or(AiError::MissingApiKey)?;
        Ok(GeminiClient::new(key.value.clone())
            .with_text_model(self.ai.text_model.value.clone())
            .with_image_model(self.ai.image_model.value.clone()))
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/qalori/
    /// - macOS: ~/Library/Application Support/qalori/
    /// - Windows: %APPDATA%/qalori/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qalori")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/qalori/
    /// - macOS: ~/Library/Application Support/qalori/
    /// - Windows: %APPDATA%/qalori/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qalori")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
