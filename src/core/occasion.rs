use crate::domain::model::Occasion;

/// 依優先順序比對關鍵字，第一個命中的規則勝出
const OCCASION_RULES: &[(&[&str], Occasion)] = &[
    (&["date", "romantic"], Occasion::DateNight),
    (&["interview", "meeting"], Occasion::JobInterview),
    (&["beach", "walk"], Occasion::BeachWalk),
    (&["chill", "weekend", "hang"], Occasion::ChillWeekendHang),
    (&["formal"], Occasion::Formal),
    (&["gym", "run", "sporty"], Occasion::Sporty),
];

/// 把使用者的描述歸類成一個場合，沒有任何關鍵字時為 `Casual`。
///
/// 比對是不分大小寫的子字串比對，所以 "update" 也會命中 "date"。
pub fn classify_occasion(text: &str) -> Occasion {
    let lowered = text.to_lowercase();

    OCCASION_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, occasion)| *occasion)
        .unwrap_or(Occasion::Casual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_maps_to_its_occasion() {
        let cases = [
            ("Romantic dinner tonight", Occasion::DateNight),
            ("I have a job interview tomorrow in Boston", Occasion::JobInterview),
            ("Team MEETING at 9", Occasion::JobInterview),
            ("Heading to the beach", Occasion::BeachWalk),
            ("let's hang out this weekend", Occasion::ChillWeekendHang),
            ("It's a formal gala", Occasion::Formal),
            ("Going to the gym", Occasion::Sporty),
        ];

        for (text, expected) in cases {
            assert_eq!(classify_occasion(text), expected, "text: {}", text);
        }
    }

    #[test]
    fn test_no_keyword_defaults_to_casual() {
        assert_eq!(classify_occasion("What should I wear?"), Occasion::Casual);
        assert_eq!(classify_occasion(""), Occasion::Casual);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // "date" 的優先順序高於 "formal"
        assert_eq!(classify_occasion("formal date at the opera"), Occasion::DateNight);
        // "walk" 的優先順序高於 "weekend"
        assert_eq!(classify_occasion("weekend walk"), Occasion::BeachWalk);
    }
}
