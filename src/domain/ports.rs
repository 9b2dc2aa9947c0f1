use crate::domain::model::{GenerationRequest, GenerationSettings, LocationQuery, WeatherReading};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// 找不到物件時回傳 `StylistError::ObjectNotFound`
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn lookup(&self, query: &LocationQuery) -> Result<WeatherReading>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// 從自由文字推測天氣查詢條件。盡力而為，找不到時退回預設城市。
pub trait LocationExtractor: Send + Sync {
    fn extract(&self, text: &str) -> LocationQuery;
}

pub trait ConfigProvider: Send + Sync {
    fn default_user(&self) -> &str;
    fn default_gender(&self) -> &str;
    fn shuffle_outfits(&self) -> bool;
    fn generation_settings(&self) -> GenerationSettings;
}
