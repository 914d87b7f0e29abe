//! Categorical sampling helpers.

use rand::Rng;
use rand::seq::IndexedRandom;

use regiondata_core::WeightedLabel;

use crate::errors::GenerationError;

/// Draw one item with probability proportional to its weight.
///
/// Items with a zero, negative, or non-finite weight are never drawn.
/// Returns `None` when no item carries a positive weight.
pub fn choose_weighted<'a, T, R>(
    items: &'a [T],
    weight_of: impl Fn(&T) -> f64,
    rng: &mut R,
) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let usable = |weight: f64| weight.is_finite() && weight > 0.0;
    let total: f64 = items
        .iter()
        .map(&weight_of)
        .filter(|weight| usable(*weight))
        .sum();
    if total <= 0.0 {
        return None;
    }

    let mut target = rng.random::<f64>() * total;
    let mut last = None;
    for item in items {
        let weight = weight_of(item);
        if !usable(weight) {
            continue;
        }
        if target < weight {
            return Some(item);
        }
        target -= weight;
        last = Some(item);
    }

    // rounding can leave a residue past the final bucket
    last
}

/// Draw a label from a weighted label table.
pub fn pick_weighted<'a, R>(
    field: &str,
    labels: &'a [WeightedLabel],
    rng: &mut R,
) -> Result<&'a str, GenerationError>
where
    R: Rng + ?Sized,
{
    choose_weighted(labels, |label| label.weight, rng)
        .map(|label| label.label.as_str())
        .ok_or_else(|| {
            GenerationError::Configuration(format!("{field} has no label with a positive weight"))
        })
}

/// Draw a label uniformly.
pub fn pick<'a, R>(field: &str, values: &'a [String], rng: &mut R) -> Result<&'a str, GenerationError>
where
    R: Rng + ?Sized,
{
    values
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| GenerationError::Configuration(format!("{field} must not be empty")))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn zero_weight_items_are_never_drawn() {
        let labels = vec![
            WeightedLabel::new("a", 0.0),
            WeightedLabel::new("b", 1.0),
            WeightedLabel::new("c", 0.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(pick_weighted("labels", &labels, &mut rng).unwrap(), "b");
        }
    }

    #[test]
    fn draws_track_weights() {
        let labels = vec![
            WeightedLabel::new("rare", 0.1),
            WeightedLabel::new("common", 0.9),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 20_000;
        let common = (0..draws)
            .filter(|_| pick_weighted("labels", &labels, &mut rng).unwrap() == "common")
            .count();
        let share = common as f64 / draws as f64;
        assert!((0.87..0.93).contains(&share), "share was {share}");
    }

    #[test]
    fn unnormalized_weights_are_accepted() {
        let items = [("x", 3.0), ("y", 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let draws = 8_000;
        let x = (0..draws)
            .filter(|_| choose_weighted(&items, |item| item.1, &mut rng).unwrap().0 == "x")
            .count();
        let share = x as f64 / draws as f64;
        assert!((0.72..0.78).contains(&share), "share was {share}");
    }

    #[test]
    fn empty_or_weightless_tables_yield_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let empty: [WeightedLabel; 0] = [];
        assert!(choose_weighted(&empty, |label| label.weight, &mut rng).is_none());

        let weightless = vec![WeightedLabel::new("a", 0.0), WeightedLabel::new("b", f64::NAN)];
        assert!(matches!(
            pick_weighted("labels", &weightless, &mut rng),
            Err(GenerationError::Configuration(_))
        ));
    }

    #[test]
    fn uniform_pick_rejects_empty_tables() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            pick("provinces", &[], &mut rng),
            Err(GenerationError::Configuration(_))
        ));
    }
}
