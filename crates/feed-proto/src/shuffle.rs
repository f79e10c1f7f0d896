//! Uniform random reordering of episode lists.

use rand::Rng;

/// Returns a uniformly shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::thread_rng())
}

/// Fisher–Yates over a copy, walking from the back.
pub fn shuffled_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::tests::episode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn ids(v: &[crate::episode::Episode]) -> Vec<String> {
        v.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_output_is_permutation_and_input_untouched() {
        let input: Vec<_> = (0..20).map(|i| episode(&format!("E{}", i))).collect();
        let before = input.clone();

        let out = shuffled(&input);

        assert_eq!(input, before);
        assert_eq!(out.len(), input.len());
        let mut a = ids(&out);
        let mut b = ids(&input);
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_inputs_are_copied_as_is() {
        let empty: Vec<crate::episode::Episode> = Vec::new();
        assert!(shuffled(&empty).is_empty());

        let one = vec![episode("only")];
        assert_eq!(shuffled(&one), one);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let input: Vec<u32> = (0..10).collect();
        let a = shuffled_with(&input, &mut StdRng::seed_from_u64(7));
        let b = shuffled_with(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_permutation_of_three_is_reached() {
        let input = [1u8, 2, 3];
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(shuffled_with(&input, &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        // Expected ~1000 each; a loose bound catches an off-by-one in the range
        for (perm, n) in &counts {
            assert!((800..1200).contains(n), "{:?} drawn {} times", perm, n);
        }
    }
}
