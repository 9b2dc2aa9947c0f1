use indexmap::IndexMap;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 衣物類別，未知的類別原樣保留
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Shirt,
    TShirt,
    Pants,
    Shorts,
    Other(String),
}

/// 鎖定的單品可能沒有 `category`，此時視為空白類別
impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Shirt => "shirt",
            Category::TShirt => "t-shirt",
            Category::Pants => "pants",
            Category::Shorts => "shorts",
            Category::Other(name) => name,
        }
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Category::Shirt | Category::TShirt)
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Category::Pants | Category::Shorts)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "shirt" => Category::Shirt,
            "t-shirt" => Category::TShirt,
            "pants" => Category::Pants,
            "shorts" => Category::Shorts,
            _ => Category::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 衣櫃中的單件衣物。
///
/// 除了篩選用到的欄位外，其餘鍵值（名稱、圖片路徑等）保存在 `extra`，
/// 回傳給呼叫端與寫入提示詞時原樣帶出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "one_or_many")]
    pub style: Vec<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Garment {
    pub fn new(category: impl Into<Category>, styles: &[&str], color: &str) -> Self {
        Self {
            category: category.into(),
            style: styles.iter().map(|s| s.to_string()).collect(),
            color: color.to_string(),
            sleeve: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_sleeve(mut self, sleeve: &str) -> Self {
        self.sleeve = Some(sleeve.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.extra.insert(
            "name".to_string(),
            serde_json::Value::String(name.to_string()),
        );
        self
    }

    pub fn has_style(&self, tag: &str) -> bool {
        self.style.iter().any(|s| s == tag)
    }

    pub fn has_long_sleeves(&self) -> bool {
        self.sleeve
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("long"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

// 舊的衣櫃檔案中 style 可能是單一字串
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(style) => vec![style],
        OneOrMany::Many(styles) => styles,
    })
}

/// 單一使用者的衣櫃：集合名稱 → 衣物，保留檔案中的順序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wardrobe {
    collections: IndexMap<String, Vec<Garment>>,
}

impl Wardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, name: &str, garments: Vec<Garment>) -> Self {
        self.collections.insert(name.to_string(), garments);
        self
    }

    /// 依集合順序逐件列出
    pub fn garments(&self) -> impl Iterator<Item = &Garment> {
        self.collections.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    #[serde(rename = "date night")]
    DateNight,
    #[serde(rename = "job interview")]
    JobInterview,
    #[serde(rename = "beach walk")]
    BeachWalk,
    #[serde(rename = "chill weekend hang")]
    ChillWeekendHang,
    #[serde(rename = "formal")]
    Formal,
    #[serde(rename = "sporty")]
    Sporty,
    #[serde(rename = "casual")]
    Casual,
}

impl Occasion {
    /// 與衣物 style 標籤相同的字串
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::DateNight => "date night",
            Occasion::JobInterview => "job interview",
            Occasion::BeachWalk => "beach walk",
            Occasion::ChillWeekendHang => "chill weekend hang",
            Occasion::Formal => "formal",
            Occasion::Sporty => "sporty",
            Occasion::Casual => "casual",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceRules {
    pub preferred_tops: Vec<Category>,
    pub preferred_bottoms: Vec<Category>,
    pub excluded_tops: Vec<Category>,
    pub excluded_bottoms: Vec<Category>,
}

/// 天氣查詢條件：城市、可選的國家/地區，以及預報天數（0 = 今天）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub country: Option<String>,
    pub forecast_day: u32,
}

impl LocationQuery {
    pub fn query_string(&self) -> String {
        match &self.country {
            Some(country) => format!("{},{}", self.city, country),
            None => self.city.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReading {
    pub celsius: i32,
    /// 例如 `"10°C / 50°F"`
    pub display: String,
    pub location: String,
    pub date_label: String,
}

impl WeatherReading {
    pub fn from_celsius(celsius: i32, location: &str, date_label: &str) -> Self {
        Self {
            celsius,
            display: format_temperature(celsius),
            location: location.to_string(),
            date_label: date_label.to_string(),
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32
}

pub fn format_temperature(celsius: i32) -> String {
    format!("{}°C / {}°F", celsius, celsius_to_fahrenheit(celsius))
}

/// 一套搭配：上衣 + 下身。序列化為 `[top, bottom]`
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitCombination {
    pub top: Garment,
    pub bottom: Garment,
}

impl Serialize for OutfitCombination {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.top)?;
        pair.serialize_element(&self.bottom)?;
        pair.end()
    }
}

/// 語言模型回覆必須符合的 JSON 結構
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendationResult {
    pub outfit_descriptions: Vec<String>,
    pub final_recommendation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub settings: GenerationSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutfitRequest {
    pub message: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub lock_top: Option<Garment>,
    #[serde(default)]
    pub lock_bottom: Option<Garment>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitResponse {
    pub outfits: Vec<OutfitCombination>,
    pub outfit_descriptions: Vec<String>,
    pub message: String,
    pub temperature: String,
    pub location: String,
    pub forecast_date: String,
    pub occasion: Occasion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garment_accepts_single_style_string() {
        let garment: Garment = serde_json::from_value(serde_json::json!({
            "category": "shirt",
            "style": "formal",
            "color": "Navy Blue",
            "image": "shirts/navy.jpg"
        }))
        .unwrap();

        assert_eq!(garment.category, Category::Shirt);
        assert_eq!(garment.style, vec!["formal".to_string()]);
        assert!(garment.sleeve.is_none());
        assert_eq!(garment.extra["image"], "shirts/navy.jpg");
    }

    #[test]
    fn test_unknown_category_round_trips_its_name() {
        let garment: Garment = serde_json::from_value(serde_json::json!({
            "category": "jacket",
            "style": ["casual"]
        }))
        .unwrap();

        assert_eq!(garment.category, Category::Other("jacket".to_string()));
        assert!(!garment.category.is_top());
        let value = serde_json::to_value(&garment).unwrap();
        assert_eq!(value["category"], "jacket");
        assert_eq!(value["color"], "");
    }

    #[test]
    fn test_request_accepts_locked_item_without_category() {
        let request: OutfitRequest = serde_json::from_value(serde_json::json!({
            "message": "dinner tonight",
            "lock_top": {"name": "Lucky jersey", "image": "jersey.png"}
        }))
        .unwrap();

        let locked = request.lock_top.unwrap();
        assert_eq!(locked.category, Category::Other(String::new()));
        assert!(!locked.category.is_top());
        assert_eq!(locked.extra["name"], "Lucky jersey");
        assert!(request.lock_bottom.is_none());
    }

    #[test]
    fn test_wardrobe_preserves_file_order() {
        let wardrobe: Wardrobe = serde_json::from_str(
            r#"{
                "zeta": [{"category": "pants", "style": ["casual"]}],
                "alpha": [{"category": "shirt", "style": ["casual"]},
                          {"category": "shorts", "style": ["casual"]}]
            }"#,
        )
        .unwrap();

        let categories: Vec<&str> = wardrobe.garments().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["pants", "shirt", "shorts"]);
        assert_eq!(wardrobe.len(), 3);
    }

    #[test]
    fn test_temperature_display() {
        assert_eq!(format_temperature(10), "10°C / 50°F");
        assert_eq!(format_temperature(-3), "-3°C / 27°F");
        let reading = WeatherReading::from_celsius(22, "Boston", "Monday, March 03");
        assert_eq!(reading.display, "22°C / 72°F");
    }

    #[test]
    fn test_outfit_combination_serializes_as_pair() {
        let combo = OutfitCombination {
            top: Garment::new("shirt", &["formal"], "white"),
            bottom: Garment::new("pants", &["formal"], "black"),
        };
        let value = serde_json::to_value(&combo).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["category"], "shirt");
        assert_eq!(value[1]["category"], "pants");
    }

    #[test]
    fn test_occasion_serializes_as_label() {
        let value = serde_json::to_value(Occasion::ChillWeekendHang).unwrap();
        assert_eq!(value, "chill weekend hang");
    }
}
