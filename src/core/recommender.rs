use crate::domain::model::{
    GenerationRequest, GenerationSettings, OutfitCombination, RecommendationResult,
};
use crate::domain::ports::TextGenerator;
use crate::utils::error::{Result, StylistError};

/// 請語言模型為每套搭配寫一句描述並給出最終建議
pub struct Recommender<G: TextGenerator> {
    generator: G,
    settings: GenerationSettings,
}

impl<G: TextGenerator> Recommender<G> {
    pub fn new(generator: G, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// 單次呼叫，不重試。回覆不是預期的 JSON 時回傳 `GenerationParse`
    pub async fn recommend(
        &self,
        user_input: &str,
        temperature: &str,
        gender: &str,
        combinations: &[OutfitCombination],
    ) -> Result<RecommendationResult> {
        let prompt = build_prompt(user_input, temperature, gender, combinations)?;
        tracing::debug!(
            "Requesting recommendation for {} outfits from {}",
            combinations.len(),
            self.settings.model
        );

        let raw = self
            .generator
            .generate(GenerationRequest {
                prompt,
                settings: self.settings.clone(),
            })
            .await?;

        parse_recommendation(&raw, combinations.len()).inspect_err(|e| {
            if let StylistError::GenerationParse { reason, raw } = e {
                tracing::error!("❌ Failed to parse recommendation ({}): {}", reason, raw);
            }
        })
    }
}

pub fn build_prompt(
    user_input: &str,
    temperature: &str,
    gender: &str,
    combinations: &[OutfitCombination],
) -> Result<String> {
    let mut prompt = format!(
        "You're my stylish friend helping me pick what to wear.\n\
         I'm {gender}.\n\n\
         My situation: \"{user_input}\" (temperature is {temperature})\n\n\
         These are the {count} outfit combos I'm considering:\n",
        count = combinations.len(),
    );

    for (i, outfit) in combinations.iter().enumerate() {
        prompt.push_str(&format!(
            "\nOutfit {}:\n{}\n",
            i + 1,
            serde_json::to_string_pretty(outfit)?
        ));
    }

    prompt.push_str(&format!(
        "\nFor each outfit, describe the vibe it gives off (chill, sporty, bold, ...) in two short lines.\n\
         Then give a final verdict on which one to wear and why. Keep it casual, like a text message.\n\n\
         Reply with exactly {count} descriptions, in the same order, using this JSON shape:\n\
         {{\n  \"outfit_descriptions\": [\"vibe for outfit 1\", ...],\n  \"final_recommendation\": \"your verdict\"\n}}\n\
         Return only valid JSON, without markdown or any other text.\n",
        count = combinations.len(),
    ));

    Ok(prompt)
}

/// 嚴格解析：只接受前後空白，不剝除 markdown 區塊
pub fn parse_recommendation(raw: &str, expected_outfits: usize) -> Result<RecommendationResult> {
    let trimmed = raw.trim();

    let parsed: RecommendationResult =
        serde_json::from_str(trimmed).map_err(|e| StylistError::GenerationParse {
            reason: e.to_string(),
            raw: raw.to_string(),
        })?;

    if parsed.outfit_descriptions.len() != expected_outfits {
        return Err(StylistError::GenerationParse {
            reason: format!(
                "expected {} outfit descriptions, got {}",
                expected_outfits,
                parsed.outfit_descriptions.len()
            ),
            raw: raw.to_string(),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Garment;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct CannedGenerator {
        reply: String,
        prompts: Arc<Mutex<Vec<GenerationRequest>>>,
    }

    impl CannedGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, request: GenerationRequest) -> Result<String> {
            self.prompts.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    fn settings() -> GenerationSettings {
        GenerationSettings {
            model: "claude-3-haiku-20240307".to_string(),
            max_tokens: 400,
            temperature: 0.8,
        }
    }

    fn combos() -> Vec<OutfitCombination> {
        vec![
            OutfitCombination {
                top: Garment::new("shirt", &["formal"], "white").with_name("Oxford shirt"),
                bottom: Garment::new("pants", &["formal"], "charcoal"),
            },
            OutfitCombination {
                top: Garment::new("shirt", &["formal"], "navy"),
                bottom: Garment::new("pants", &["formal"], "black"),
            },
        ]
    }

    #[test]
    fn test_prompt_embeds_context_and_outfits() {
        let prompt = build_prompt("job interview in Boston", "10°C / 50°F", "female", &combos()).unwrap();

        assert!(prompt.contains("\"job interview in Boston\""));
        assert!(prompt.contains("10°C / 50°F"));
        assert!(prompt.contains("I'm female."));
        assert!(prompt.contains("Outfit 1:"));
        assert!(prompt.contains("Outfit 2:"));
        assert!(!prompt.contains("Outfit 3:"));
        assert!(prompt.contains("Oxford shirt"));
        assert!(prompt.contains("\"outfit_descriptions\""));
        assert!(prompt.contains("\"final_recommendation\""));
    }

    #[test]
    fn test_parse_accepts_surrounding_whitespace() {
        let raw = "\n  {\"outfit_descriptions\": [\"sharp\", \"moody\"], \"final_recommendation\": \"go with 1\"}  \n";
        let result = parse_recommendation(raw, 2).unwrap();
        assert_eq!(result.outfit_descriptions, vec!["sharp", "moody"]);
        assert_eq!(result.final_recommendation, "go with 1");
    }

    #[test]
    fn test_parse_rejects_markdown_fence() {
        let raw = "```json\n{\"outfit_descriptions\": [], \"final_recommendation\": \"x\"}\n```";
        match parse_recommendation(raw, 0) {
            Err(StylistError::GenerationParse { raw: captured, .. }) => assert_eq!(captured, raw),
            other => panic!("expected GenerationParse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let raw = r#"{"outfit_descriptions": ["a"]}"#;
        assert!(matches!(
            parse_recommendation(raw, 1),
            Err(StylistError::GenerationParse { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_count_mismatch() {
        let raw = r#"{"outfit_descriptions": ["a", "b", "c"], "final_recommendation": "b"}"#;
        let err = parse_recommendation(raw, 2).unwrap_err();
        assert!(err.to_string().contains("expected 2 outfit descriptions, got 3"));
    }

    #[tokio::test]
    async fn test_recommend_sends_settings_and_parses_reply() {
        let generator = CannedGenerator::new(
            r#"{"outfit_descriptions": ["crisp", "calm"], "final_recommendation": "wear the white one"}"#,
        );
        let recommender = Recommender::new(generator.clone(), settings());

        let result = recommender
            .recommend("interview", "10°C / 50°F", "male", &combos())
            .await
            .unwrap();

        assert_eq!(result.final_recommendation, "wear the white one");
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].settings, settings());
    }

    #[tokio::test]
    async fn test_recommend_surfaces_malformed_reply() {
        let generator = CannedGenerator::new("Outfit 1 is great, go with it!");
        let recommender = Recommender::new(generator, settings());

        let err = recommender
            .recommend("interview", "10°C / 50°F", "male", &combos())
            .await
            .unwrap_err();

        match err {
            StylistError::GenerationParse { raw, .. } => {
                assert_eq!(raw, "Outfit 1 is great, go with it!")
            }
            other => panic!("expected GenerationParse, got {:?}", other),
        }
    }
}
