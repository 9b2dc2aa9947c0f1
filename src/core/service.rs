use crate::core::agent::{AgentRequest, OutfitAgent};
use crate::core::composer::ComposeOptions;
use crate::core::{ConfigProvider, LocationExtractor, Storage, TextGenerator, WeatherProvider};
use crate::domain::model::{OutfitRequest, OutfitResponse, WeatherReading};
use crate::utils::error::{Result, StylistError};
use crate::utils::validation::validate_user_id;

#[derive(Debug, Clone)]
pub struct ServiceDefaults {
    pub user: String,
    pub gender: String,
    pub shuffle: bool,
}

impl ServiceDefaults {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            user: config.default_user().to_string(),
            gender: config.default_gender().to_string(),
            shuffle: config.shuffle_outfits(),
        }
    }
}

/// 對外的請求處理：解析地點與日期、查天氣，再交給 [`OutfitAgent`]。
///
/// 不持有可變狀態，可同時處理多個請求。
pub struct StylistService<S, G, W, L>
where
    S: Storage,
    G: TextGenerator,
    W: WeatherProvider,
    L: LocationExtractor,
{
    agent: OutfitAgent<S, G>,
    weather: W,
    locator: L,
    defaults: ServiceDefaults,
}

impl<S, G, W, L> StylistService<S, G, W, L>
where
    S: Storage,
    G: TextGenerator,
    W: WeatherProvider,
    L: LocationExtractor,
{
    pub fn new(agent: OutfitAgent<S, G>, weather: W, locator: L, defaults: ServiceDefaults) -> Self {
        Self {
            agent,
            weather,
            locator,
            defaults,
        }
    }

    pub async fn handle(&self, request: OutfitRequest) -> Result<OutfitResponse> {
        validate_request(&request)?;

        let query = self.locator.extract(&request.message);
        tracing::info!(
            "🌍 Detected city for weather lookup: {} (day +{})",
            query.city,
            query.forecast_day
        );
        let reading = self.weather.lookup(&query).await?;

        self.handle_with_weather(request, reading).await
    }

    /// 使用已知的天氣資料，略過天氣查詢
    pub async fn handle_with_weather(
        &self,
        request: OutfitRequest,
        reading: WeatherReading,
    ) -> Result<OutfitResponse> {
        validate_request(&request)?;

        let user = request.user.as_deref().unwrap_or(&self.defaults.user);
        validate_user_id(user)?;
        let gender = request.gender.as_deref().unwrap_or(&self.defaults.gender);
        let color = request.color.as_deref().filter(|c| !c.trim().is_empty());

        let agent_request = AgentRequest {
            message: &request.message,
            user,
            gender,
            color,
            compose: ComposeOptions {
                shuffle: self.defaults.shuffle,
                lock_top: request.lock_top.clone(),
                lock_bottom: request.lock_bottom.clone(),
            },
        };

        let outcome = self.agent.run(&agent_request, &reading).await?;

        Ok(OutfitResponse {
            outfits: outcome.combinations,
            outfit_descriptions: outcome.descriptions,
            message: outcome.verdict,
            temperature: reading.display,
            location: reading.location,
            forecast_date: reading.date_label,
            occasion: outcome.occasion,
        })
    }
}

fn validate_request(request: &OutfitRequest) -> Result<()> {
    if request.message.trim().is_empty() {
        return Err(StylistError::ValidationError {
            message: "message cannot be empty".to_string(),
        });
    }
    Ok(())
}
