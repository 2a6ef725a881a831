//! Tournament selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Draw `size` candidates uniformly (with replacement) and return the index of
/// the best one. `None` when there is nobody to draw from.
pub fn tournament(scores: &[i32], size: usize, rng: &mut ChaCha8Rng) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }
    let candidates: Vec<usize> = (0..size.max(1))
        .map(|_| rng.gen_range(0..scores.len()))
        .collect();
    best_of(scores, &candidates)
}

/// The candidate with the lowest score; equal scores go to the lower index
pub fn best_of(scores: &[i32], candidates: &[usize]) -> Option<usize> {
    candidates
        .iter()
        .copied()
        .min_by_key(|&index| (scores[index], index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop, prop_assert, proptest};
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_best_of_prefers_low_score() {
        let scores = [5, 2, 9, 2];
        assert_eq!(best_of(&scores, &[0, 2, 3]), Some(3));
        assert_eq!(best_of(&scores, &[3, 1]), Some(1));
        assert_eq!(best_of(&scores, &[2]), Some(2));
        assert_eq!(best_of(&scores, &[]), None);
    }

    #[test]
    fn test_unique_best_wins_when_drawn() {
        let mut scores = vec![50; 20];
        scores[13] = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let mut wins = 0;
        for _ in 0..500 {
            let mut replay = rng.clone();
            let drawn: Vec<usize> = (0..4).map(|_| replay.gen_range(0..scores.len())).collect();

            let winner = tournament(&scores, 4, &mut rng).unwrap();
            if drawn.contains(&13) {
                assert_eq!(winner, 13);
                wins += 1;
            } else {
                assert_ne!(winner, 13);
            }
        }
        assert!(wins > 0);
    }

    #[test]
    fn test_empty_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(tournament(&[], 4, &mut rng), None);
    }

    #[test]
    fn test_single_candidate_is_uniform_pick() {
        let scores = [3, 1, 2];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[tournament(&scores, 1, &mut rng).unwrap()] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    proptest! {
        #[test]
        fn prop_winner_is_best_drawn(
            scores in prop::collection::vec(0i32..100, 1..50),
            size in 1usize..8,
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut replay = rng.clone();
            let drawn: Vec<usize> = (0..size).map(|_| replay.gen_range(0..scores.len())).collect();

            let winner = tournament(&scores, size, &mut rng).unwrap();
            prop_assert!(drawn.contains(&winner));
            prop_assert!(drawn.iter().all(|&i| scores[winner] <= scores[i]));
        }
    }
}
