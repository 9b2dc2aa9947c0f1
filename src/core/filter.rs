use crate::domain::model::{Category, Garment, Occasion, PreferenceRules, Wardrobe};

/// 低於此溫度只收長袖或長褲
pub const COLD_THRESHOLD_CELSIUS: i32 = 15;

/// 主篩選少於這個數量時放寬條件
pub const MIN_CANDIDATES: usize = 2;

#[derive(Debug, Clone)]
pub struct FilterCriteria<'a> {
    pub temperature: i32,
    pub occasion: Occasion,
    pub color: Option<&'a str>,
    pub preferences: &'a PreferenceRules,
}

/// 從衣櫃挑出符合場合、溫度、顏色與類別偏好的衣物，順序與衣櫃相同。
///
/// 放寬階段會重新掃描整個衣櫃並附加在主篩選結果之後，
/// 已選過的衣物可能因此出現兩次。
pub fn filter_wardrobe<'w>(wardrobe: &'w Wardrobe, criteria: &FilterCriteria<'_>) -> Vec<&'w Garment> {
    let mut suitable = primary_pass(wardrobe, criteria.occasion, criteria.temperature);
    tracing::debug!("Primary pass selected {} garments", suitable.len());

    if suitable.len() < MIN_CANDIDATES {
        let before = suitable.len();
        suitable.extend(relaxation_pass(wardrobe, criteria.occasion));
        tracing::debug!(
            "Relaxed filter for '{}': {} -> {} garments",
            criteria.occasion,
            before,
            suitable.len()
        );
    }

    if let Some(color) = criteria.color {
        suitable = apply_color_preference(suitable, color);
    }

    apply_category_preferences(suitable, criteria.preferences)
}

fn primary_pass(wardrobe: &Wardrobe, occasion: Occasion, temperature: i32) -> Vec<&Garment> {
    wardrobe
        .garments()
        .filter(|g| g.has_style(occasion.as_str()))
        .filter(|g| temperature >= COLD_THRESHOLD_CELSIUS || is_warm(g))
        .collect()
}

fn is_warm(garment: &Garment) -> bool {
    garment.category == Category::Pants || garment.has_long_sleeves()
}

// 不看溫度；非正式場合時 casual 也算數
fn relaxation_pass(wardrobe: &Wardrobe, occasion: Occasion) -> Vec<&Garment> {
    wardrobe
        .garments()
        .filter(|g| {
            g.has_style(occasion.as_str())
                || (occasion != Occasion::Formal && g.has_style(Occasion::Casual.as_str()))
        })
        .collect()
}

/// 顏色只是軟性偏好：篩完為空就保留原本的結果
fn apply_color_preference<'w>(candidates: Vec<&'w Garment>, color: &str) -> Vec<&'w Garment> {
    let wanted = color.trim().to_lowercase();
    if wanted.is_empty() {
        return candidates;
    }

    let matching: Vec<&Garment> = candidates
        .iter()
        .copied()
        .filter(|g| g.color.to_lowercase().contains(&wanted))
        .collect();

    if matching.is_empty() {
        tracing::debug!("No garment matches color '{}', ignoring preference", color);
        candidates
    } else {
        matching
    }
}

fn apply_category_preferences<'w>(
    candidates: Vec<&'w Garment>,
    preferences: &PreferenceRules,
) -> Vec<&'w Garment> {
    let mut result = candidates;

    if !preferences.preferred_tops.is_empty() {
        result.retain(|g| {
            !preferences.excluded_tops.contains(&g.category)
                || preferences.preferred_tops.contains(&g.category)
        });
    }

    if !preferences.preferred_bottoms.is_empty() {
        result.retain(|g| {
            !preferences.excluded_bottoms.contains(&g.category)
                || preferences.preferred_bottoms.contains(&g.category)
        });
    }

    result
}
