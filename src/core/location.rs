use crate::domain::model::LocationQuery;
use crate::domain::ports::LocationExtractor;
use crate::utils::error::{Result, StylistError};
use regex::Regex;

pub const DEFAULT_CITY: &str = "Washington";

/// 一到兩個首字大寫的單字
const CITY_PATTERN: &str = r"\b(?:[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\b";

/// 以正規表達式猜城市：取最後一段首字大寫的詞。
///
/// 句首單字或人名也會被當成城市，之後的天氣查詢會回報找不到地點。
#[derive(Debug, Clone)]
pub struct RegexLocationExtractor {
    pattern: Regex,
    default_city: String,
    country: Option<String>,
}

impl RegexLocationExtractor {
    pub fn new(default_city: &str, country: Option<String>) -> Result<Self> {
        let pattern = Regex::new(CITY_PATTERN).map_err(|e| StylistError::ConfigError {
            message: format!("Invalid city pattern: {}", e),
        })?;

        Ok(Self {
            pattern,
            default_city: default_city.to_string(),
            country,
        })
    }

    pub fn extract_city(&self, text: &str) -> String {
        self.pattern
            .find_iter(text)
            .last()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| self.default_city.clone())
    }
}

pub fn forecast_day(text: &str) -> u32 {
    if text.to_lowercase().contains("tomorrow") {
        1
    } else {
        0
    }
}

impl LocationExtractor for RegexLocationExtractor {
    fn extract(&self, text: &str) -> LocationQuery {
        LocationQuery {
            city: self.extract_city(text),
            country: self.country.clone(),
            forecast_day: forecast_day(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RegexLocationExtractor {
        RegexLocationExtractor::new(DEFAULT_CITY, None).unwrap()
    }

    #[test]
    fn test_last_capitalized_word_wins() {
        let query = extractor().extract("I have a job interview tomorrow in Boston");
        assert_eq!(query.city, "Boston");
        assert_eq!(query.forecast_day, 1);
        assert_eq!(query.country, None);
    }

    #[test]
    fn test_two_word_city() {
        assert_eq!(extractor().extract_city("dinner in New York"), "New York");
    }

    #[test]
    fn test_falls_back_to_default_city() {
        let query = extractor().extract("what should i wear today");
        assert_eq!(query.city, DEFAULT_CITY);
        assert_eq!(query.forecast_day, 0);
    }

    #[test]
    fn test_sentence_initial_word_can_misfire() {
        // 盡力而為：沒有地名時句首單字會被當成城市
        assert_eq!(extractor().extract_city("Going out tonight"), "Going");
    }

    #[test]
    fn test_tomorrow_is_case_insensitive() {
        assert_eq!(forecast_day("TOMORROW in Paris"), 1);
        assert_eq!(forecast_day("today in Paris"), 0);
    }

    #[test]
    fn test_country_is_carried_into_query() {
        let extractor = RegexLocationExtractor::new(DEFAULT_CITY, Some("US".to_string())).unwrap();
        let query = extractor.extract("brunch in Portland");
        assert_eq!(query.query_string(), "Portland,US");
    }
}
