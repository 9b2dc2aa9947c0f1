use crate::adapters::wardrobe::WardrobeRepository;
use crate::core::composer::{compose_outfits, ComposeOptions};
use crate::core::filter::{filter_wardrobe, FilterCriteria};
use crate::core::occasion::classify_occasion;
use crate::core::preferences::extract_preferences;
use crate::core::recommender::Recommender;
use crate::core::{Storage, TextGenerator};
use crate::domain::model::{Occasion, OutfitCombination, WeatherReading};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct AgentRequest<'a> {
    pub message: &'a str,
    pub user: &'a str,
    pub gender: &'a str,
    pub color: Option<&'a str>,
    pub compose: ComposeOptions,
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub occasion: Occasion,
    pub combinations: Vec<OutfitCombination>,
    pub descriptions: Vec<String>,
    pub verdict: String,
}

/// 單次請求的完整流程：讀衣櫃 → 判斷場合 → 篩選 → 搭配 → 請模型推薦。
///
/// 不保留任何跨請求狀態，任何一步失敗都直接回傳給呼叫端。
pub struct OutfitAgent<S: Storage, G: TextGenerator> {
    wardrobes: WardrobeRepository<S>,
    recommender: Recommender<G>,
}

impl<S: Storage, G: TextGenerator> OutfitAgent<S, G> {
    pub fn new(wardrobes: WardrobeRepository<S>, recommender: Recommender<G>) -> Self {
        Self {
            wardrobes,
            recommender,
        }
    }

    pub async fn run(&self, request: &AgentRequest<'_>, weather: &WeatherReading) -> Result<AgentOutcome> {
        let wardrobe = self.wardrobes.load(request.user).await?;
        let occasion = classify_occasion(request.message);

        tracing::info!("👤 Wardrobe selected: {}", request.user);
        tracing::info!(
            "🌤️ Temperature in {} on {}: {}",
            weather.location,
            weather.date_label,
            weather.display
        );
        tracing::info!("🎯 Occasion detected: {}", occasion);

        let preferences = extract_preferences(request.message);
        let criteria = FilterCriteria {
            temperature: weather.celsius,
            occasion,
            color: request.color,
            preferences: &preferences,
        };
        let filtered = filter_wardrobe(&wardrobe, &criteria);
        tracing::info!(
            "🧺 {} of {} garments passed the filter",
            filtered.len(),
            wardrobe.len()
        );

        let combinations = compose_outfits(&filtered, &request.compose);
        tracing::info!("👕 Composed {} outfits", combinations.len());

        let recommendation = self
            .recommender
            .recommend(request.message, &weather.display, request.gender, &combinations)
            .await?;

        Ok(AgentOutcome {
            occasion,
            combinations,
            descriptions: recommendation.outfit_descriptions,
            verdict: recommendation.final_recommendation,
        })
    }
}
