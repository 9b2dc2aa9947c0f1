use crate::domain::model::{Garment, OutfitCombination};
use rand::seq::SliceRandom;
use rand::Rng;

pub const MAX_OUTFITS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// 每次請求打亂順序，讓相同條件也能得到不同搭配
    pub shuffle: bool,
    pub lock_top: Option<Garment>,
    pub lock_bottom: Option<Garment>,
}

pub fn compose_outfits(filtered: &[&Garment], options: &ComposeOptions) -> Vec<OutfitCombination> {
    compose_outfits_with_rng(filtered, options, &mut rand::thread_rng())
}

/// 把篩選結果分成上衣與下身後依位置配對，最多三套。
///
/// 鎖定的衣物會取代每一套中對應的位置，不經過任何篩選；
/// 套數仍由篩選出的上衣與下身數量決定。
pub fn compose_outfits_with_rng<R: Rng + ?Sized>(
    filtered: &[&Garment],
    options: &ComposeOptions,
    rng: &mut R,
) -> Vec<OutfitCombination> {
    let mut tops: Vec<&Garment> = filtered.iter().copied().filter(|g| g.category.is_top()).collect();
    let mut bottoms: Vec<&Garment> = filtered
        .iter()
        .copied()
        .filter(|g| g.category.is_bottom())
        .collect();

    if options.shuffle {
        tops.shuffle(rng);
        bottoms.shuffle(rng);
    }

    tops.iter()
        .zip(bottoms.iter())
        .take(MAX_OUTFITS)
        .map(|(top, bottom)| OutfitCombination {
            top: options.lock_top.clone().unwrap_or_else(|| (*top).clone()),
            bottom: options.lock_bottom.clone().unwrap_or_else(|| (*bottom).clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn garments() -> Vec<Garment> {
        vec![
            Garment::new("shirt", &["casual"], "white"),
            Garment::new("pants", &["casual"], "grey"),
            Garment::new("t-shirt", &["casual"], "black"),
            Garment::new("jacket", &["casual"], "olive"),
            Garment::new("shorts", &["casual"], "khaki"),
            Garment::new("shirt", &["casual"], "blue"),
            Garment::new("pants", &["casual"], "navy"),
            Garment::new("t-shirt", &["casual"], "green"),
            Garment::new("pants", &["casual"], "black"),
        ]
    }

    #[test]
    fn test_pairs_tops_and_bottoms_in_filter_order() {
        let owned = garments();
        let filtered: Vec<&Garment> = owned.iter().collect();
        let combos = compose_outfits(&filtered, &ComposeOptions::default());

        assert_eq!(combos.len(), MAX_OUTFITS);
        let pairs: Vec<(&str, &str)> = combos
            .iter()
            .map(|c| (c.top.color.as_str(), c.bottom.color.as_str()))
            .collect();
        assert_eq!(pairs, vec![("white", "grey"), ("black", "khaki"), ("blue", "navy")]);
    }

    #[test]
    fn test_count_is_bounded_by_smaller_side() {
        let owned = vec![
            Garment::new("shirt", &["casual"], "white"),
            Garment::new("t-shirt", &["casual"], "black"),
            Garment::new("pants", &["casual"], "grey"),
        ];
        let filtered: Vec<&Garment> = owned.iter().collect();
        assert_eq!(compose_outfits(&filtered, &ComposeOptions::default()).len(), 1);

        let tops_only: Vec<&Garment> = owned.iter().take(2).collect();
        assert!(compose_outfits(&tops_only, &ComposeOptions::default()).is_empty());
    }

    #[test]
    fn test_locked_top_replaces_every_top() {
        let owned = garments();
        let filtered: Vec<&Garment> = owned.iter().collect();
        let locked = Garment::new("jacket", &["formal"], "camel").with_name("Camel blazer");
        let options = ComposeOptions {
            shuffle: true,
            lock_top: Some(locked.clone()),
            lock_bottom: None,
        };
        let combos = compose_outfits(&filtered, &options);

        assert_eq!(combos.len(), MAX_OUTFITS);
        assert!(combos.iter().all(|c| c.top == locked));
        assert!(combos.iter().all(|c| c.bottom.category.is_bottom()));
    }

    #[test]
    fn test_locked_bottom_does_not_add_pairs() {
        let owned = vec![Garment::new("shirt", &["casual"], "white")];
        let filtered: Vec<&Garment> = owned.iter().collect();
        let options = ComposeOptions {
            lock_bottom: Some(Garment::new("pants", &["casual"], "grey")),
            ..ComposeOptions::default()
        };
        assert!(compose_outfits(&filtered, &options).is_empty());
    }

    #[test]
    fn test_shuffle_draws_from_filtered_items() {
        let owned = garments();
        let filtered: Vec<&Garment> = owned.iter().collect();
        let options = ComposeOptions {
            shuffle: true,
            ..ComposeOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let combos = compose_outfits_with_rng(&filtered, &options, &mut rng);

        assert_eq!(combos.len(), MAX_OUTFITS);
        for combo in &combos {
            assert!(combo.top.category.is_top());
            assert!(combo.bottom.category.is_bottom());
            assert!(owned.contains(&combo.top));
            assert!(owned.contains(&combo.bottom));
        }
    }

    #[test]
    fn test_same_seed_same_outfits() {
        let owned = garments();
        let filtered: Vec<&Garment> = owned.iter().collect();
        let options = ComposeOptions {
            shuffle: true,
            ..ComposeOptions::default()
        };
        let first = compose_outfits_with_rng(&filtered, &options, &mut StdRng::seed_from_u64(42));
        let second = compose_outfits_with_rng(&filtered, &options, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
