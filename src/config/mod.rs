#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;

use crate::adapters::anthropic::DEFAULT_MESSAGES_URL;
use crate::adapters::weather::DEFAULT_WEATHER_BASE_URL;
use crate::core::location::DEFAULT_CITY;
use crate::core::ConfigProvider;
use crate::domain::model::GenerationSettings;
use crate::utils::error::{Result, StylistError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const MAX_TOKENS_LIMIT: u32 = 4096;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylistConfig {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub wardrobe: WardrobeConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub default_city: String,
    pub country: Option<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            country: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_MESSAGES_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 400,
            temperature: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WardrobeConfig {
    pub data_dir: String,
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub user: String,
    pub gender: String,
    pub shuffle: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            user: "parsa".to_string(),
            gender: "male".to_string(),
            shuffle: true,
        }
    }
}

impl StylistConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StylistError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StylistError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只用環境變數建立配置，其餘取預設值
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// 檔案存在就讀檔，否則退回環境變數
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using environment",
                path.as_ref().display()
            );
            Ok(Self::from_env())
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("OPENWEATHERMAP_API_KEY") {
            self.weather.api_key = key;
        }
        if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
            self.generation.api_key = key;
        }
        if let Ok(dir) = env::var("STYLIST_DATA_DIR") {
            self.wardrobe.data_dir = dir;
        }
        if let Ok(city) = env::var("STYLIST_DEFAULT_CITY") {
            self.weather.default_city = city;
        }
        if let Ok(model) = env::var("STYLIST_MODEL") {
            self.generation.model = model;
        }
    }

    /// 替換環境變數 (例如 ${API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StylistError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("weather.base_url", &self.weather.base_url)?;
        validate_non_empty_string("weather.api_key", &self.weather.api_key)?;
        validate_non_empty_string("weather.default_city", &self.weather.default_city)?;

        validate_url("generation.base_url", &self.generation.base_url)?;
        validate_non_empty_string("generation.api_key", &self.generation.api_key)?;
        validate_non_empty_string("generation.model", &self.generation.model)?;
        validate_range("generation.max_tokens", self.generation.max_tokens, 1, MAX_TOKENS_LIMIT)?;
        validate_range("generation.temperature", self.generation.temperature, 0.0, 1.0)?;

        validate_non_empty_string("wardrobe.data_dir", &self.wardrobe.data_dir)?;
        validate_non_empty_string("defaults.user", &self.defaults.user)?;

        Ok(())
    }
}

impl ConfigProvider for StylistConfig {
    fn default_user(&self) -> &str {
        &self.defaults.user
    }

    fn default_gender(&self) -> &str {
        &self.defaults.gender
    }

    fn shuffle_outfits(&self) -> bool {
        self.defaults.shuffle
    }

    fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.generation.model.clone(),
            max_tokens: self.generation.max_tokens,
            temperature: self.generation.temperature,
        }
    }
}

impl Validate for StylistConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
