//! Fisher–Yates shuffling that leaves its input untouched.

use rand::Rng;

/// Return a uniformly shuffled copy of `items` using the thread RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Return a uniformly shuffled copy of `items` drawing from `rng`.
///
/// Walks `i` from the last index down to 1 and swaps slot `i` with a slot
/// drawn uniformly from `0..=i`.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn empty_input() {
        let empty: Vec<u32> = Vec::new();
        assert!(shuffle(&empty).is_empty());
    }

    #[test]
    fn single_element_unchanged() {
        assert_eq!(shuffle(&[7]), vec![7]);
    }

    #[test]
    fn result_is_a_permutation() {
        let original = vec!["a", "b", "c", "d", "e", "b"];
        let snapshot = original.clone();

        let mut shuffled = shuffle(&original);
        assert_eq!(original, snapshot, "input must not be mutated");
        assert_eq!(shuffled.len(), original.len());

        let mut sorted = original.clone();
        sorted.sort_unstable();
        shuffled.sort_unstable();
        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn produces_more_than_one_order() {
        let items = [1, 2, 3, 4, 5];
        let orders: HashSet<Vec<i32>> = (0..50).map(|_| shuffle(&items)).collect();
        assert!(orders.len() > 1, "50 shuffles of 5 items gave one order");
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let items: Vec<u32> = (0..20).collect();
        let first = shuffle_with(&items, &mut StdRng::seed_from_u64(42));
        let second = shuffle_with(&items, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn every_position_is_reachable() {
        // Element 0 of a 4-element slice should land in each slot eventually.
        let items = [0u8, 1, 2, 3];
        let mut rng = StdRng::seed_from_u64(7);
        let mut positions = HashSet::new();
        for _ in 0..200 {
            let shuffled = shuffle_with(&items, &mut rng);
            let pos = shuffled.iter().position(|&x| x == 0).unwrap();
            positions.insert(pos);
        }
        assert_eq!(positions.len(), 4);
    }
}
