use crate::rng::RandomSource;

/// Chooses an index with probability proportional to its weight using a single draw.
///
/// Weights are normalized into a cumulative distribution and the first index whose
/// cumulative value is strictly greater than the draw wins, so a draw that lands exactly
/// on a boundary belongs to the next bucket. Rounding errors that leave the draw above
/// every cumulative value select the last index. Infinite weights, e.g. scores of
/// zero length edges, outweigh everything else and the draw picks uniformly among them.
/// If the weights don't sum to a positive finite value otherwise every index is
/// treated as equally likely.
pub fn choose_weight_biased<R>(weights: &[f64], rng: &mut R) -> usize
where
    R: RandomSource + ?Sized,
{
    if weights.is_empty() {
        return 0;
    }

    let infinite: Vec<usize> = weights
        .iter()
        .enumerate()
        .filter(|(_, weight)| **weight == f64::INFINITY)
        .map(|(i, _)| i)
        .collect();
    if !infinite.is_empty() {
        let draw = rng.next_double();
        let index = ((draw * infinite.len() as f64) as usize).min(infinite.len() - 1);
        return infinite[index];
    }

    let sum: f64 = weights.iter().sum();
    let mut cumulative: Vec<f64> = if sum > 0.0 && sum.is_finite() {
        weights.iter().map(|weight| weight / sum).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    };
    for i in 1..cumulative.len() {
        cumulative[i] += cumulative[i - 1];
    }

    let draw = rng.next_double();
    let last = cumulative.len() - 1;
    let mut index = 0;
    while index != last && draw >= cumulative[index] {
        index += 1;
    }
    index
}

/// Index of the strictly highest score; the first one wins on ties.
pub fn index_of_max(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    fn choose(weights: &[f64], draw: f64) -> usize {
        choose_weight_biased(weights, &mut ScriptedRandom::doubles(vec![draw]))
    }

    #[test]
    fn lower_bound_returns_first() {
        assert_eq!(choose(&[5.4, 6.7, 9.0], 0.0), 0);
    }

    #[test]
    fn upper_bound_returns_last() {
        let below_one = f64::from_bits(1.0f64.to_bits() - 1);
        assert_eq!(choose(&[5.4, 6.7, 9.0], below_one), 2);
    }

    #[test]
    fn border_belongs_to_next_index() {
        assert_eq!(choose(&[1.0, 1.0], 0.5), 1);
    }

    #[test]
    fn heavier_weight_is_preferred() {
        assert_eq!(choose(&[1.0, 2.0], 0.5), 1);
        assert_eq!(choose(&[2.0, 1.0], 0.5), 0);
    }

    #[test]
    fn single_element_always_chosen() {
        assert_eq!(choose(&[3.0], 0.0), 0);
        assert_eq!(choose(&[3.0], 0.99), 0);
    }

    #[test]
    fn zero_weight_is_skipped() {
        assert_eq!(choose(&[0.0, 1.0], 0.0), 1);
    }

    #[test]
    fn all_zero_weights_fall_back_to_uniform() {
        assert_eq!(choose(&[0.0, 0.0, 0.0, 0.0], 0.1), 0);
        assert_eq!(choose(&[0.0, 0.0, 0.0, 0.0], 0.6), 2);
    }

    #[test]
    fn infinite_weight_wins() {
        assert_eq!(choose(&[1.0, f64::INFINITY, 1e300], 0.0), 1);
        assert_eq!(choose(&[1.0, f64::INFINITY, 1e300], 0.99), 1);
    }

    #[test]
    fn infinite_weights_share_the_draw() {
        let weights = [f64::INFINITY, 2.0, f64::INFINITY];

        assert_eq!(choose(&weights, 0.2), 0);
        assert_eq!(choose(&weights, 0.7), 2);
    }

    #[test]
    fn index_of_max_prefers_first_on_ties() {
        assert_eq!(index_of_max(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(index_of_max(&[4.0]), 0);
    }
}
