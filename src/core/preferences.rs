use crate::domain::model::{Category, PreferenceRules};

const T_SHIRT_KEYWORDS: &[&str] = &["t-shirts", "t-shirt", "t shirts", "t shirt", "tshirts", "tshirt"];
const SHIRT_KEYWORDS: &[&str] = &["shirts", "shirt"];

/// 從描述中取出上衣/下身的偏好。
///
/// 同一組互斥關鍵字兩邊都提到或都沒提到時不設限制。
/// "t-shirt" 本身包含 "shirt"，所以先移除 t-shirt 類關鍵字再找單獨的 shirt。
pub fn extract_preferences(text: &str) -> PreferenceRules {
    let lowered = text.to_lowercase();
    let mut rules = PreferenceRules::default();

    let mentions_tshirt = T_SHIRT_KEYWORDS.iter().any(|k| lowered.contains(k));
    let without_tshirts = T_SHIRT_KEYWORDS
        .iter()
        .fold(lowered.clone(), |acc, k| acc.replace(k, " "));
    let mentions_shirt = SHIRT_KEYWORDS.iter().any(|k| without_tshirts.contains(k));

    match (mentions_tshirt, mentions_shirt) {
        (true, false) => {
            rules.preferred_tops.push(Category::TShirt);
            rules.excluded_tops.push(Category::Shirt);
        }
        (false, true) => {
            rules.preferred_tops.push(Category::Shirt);
            rules.excluded_tops.push(Category::TShirt);
        }
        _ => {}
    }

    match (lowered.contains("shorts"), lowered.contains("pants")) {
        (true, false) => {
            rules.preferred_bottoms.push(Category::Shorts);
            rules.excluded_bottoms.push(Category::Pants);
        }
        (false, true) => {
            rules.preferred_bottoms.push(Category::Pants);
            rules.excluded_bottoms.push(Category::Shorts);
        }
        _ => {}
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tshirt_only_prefers_tshirts() {
        let rules = extract_preferences("Just a T-Shirt please");
        assert_eq!(rules.preferred_tops, vec![Category::TShirt]);
        assert_eq!(rules.excluded_tops, vec![Category::Shirt]);
        assert!(rules.preferred_bottoms.is_empty());
    }

    #[test]
    fn test_shirt_only_prefers_shirts() {
        let rules = extract_preferences("a button-up shirt and shorts");
        assert_eq!(rules.preferred_tops, vec![Category::Shirt]);
        assert_eq!(rules.excluded_tops, vec![Category::TShirt]);
        assert_eq!(rules.preferred_bottoms, vec![Category::Shorts]);
        assert_eq!(rules.excluded_bottoms, vec![Category::Pants]);
    }

    #[test]
    fn test_both_tops_mentioned_is_unconstrained() {
        let rules = extract_preferences("t-shirt or a shirt, not sure");
        assert!(rules.preferred_tops.is_empty());
        assert!(rules.excluded_tops.is_empty());
    }

    #[test]
    fn test_both_bottoms_mentioned_is_unconstrained() {
        let rules = extract_preferences("pants or shorts?");
        assert!(rules.preferred_bottoms.is_empty());
        assert!(rules.excluded_bottoms.is_empty());
    }

    #[test]
    fn test_pants_only() {
        let rules = extract_preferences("I want to wear pants");
        assert_eq!(rules.preferred_bottoms, vec![Category::Pants]);
        assert_eq!(rules.excluded_bottoms, vec![Category::Shorts]);
    }

    #[test]
    fn test_no_mentions_is_empty() {
        assert_eq!(extract_preferences("dinner downtown"), PreferenceRules::default());
    }
}
