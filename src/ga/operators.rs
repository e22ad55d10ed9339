//! Permutation operators on raw gene slices.
//!
//! These work on `&[usize]` index vectors and know nothing about costs or
//! fitness. [`Chromosome`](super::Chromosome) wraps them and maintains the
//! fitness cache.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

/// Returns `true` if `perm` contains every value in `0..n` exactly once.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Draws a uniformly random permutation of `0..n`.
///
/// Repeatedly removes a uniformly chosen element from an ordered pool of
/// remaining indices, so every permutation is equally likely.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut perm = Vec::with_capacity(n);
    while !pool.is_empty() {
        let idx = rng.random_range(0..pool.len());
        perm.push(pool.remove(idx));
    }
    perm
}

/// Order Crossover (OX) with explicit cut points.
///
/// # Algorithm
///
/// 1. Copy `template[start..=end]` into the child at the same positions
/// 2. Fill positions `0..start`, then `end+1..n`, left to right, with
///    `donor`'s genes in their original order, skipping genes already in
///    the child
///
/// A single donor cursor is shared by both fill passes, so the donor is
/// scanned from its first gene exactly once.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents differ in length, if `start > end`, or if
/// `end >= n`. The result is only a permutation when both parents are.
pub fn order_crossover(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(start <= end && end < n, "invalid crossover segment");

    let mut child = vec![usize::MAX; n];
    let mut present = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        present[template[i]] = true;
    }

    let mut cursor = 0;
    for pos in (0..start).chain(end + 1..n) {
        while present[donor[cursor]] {
            cursor += 1;
        }
        child[pos] = donor[cursor];
        present[donor[cursor]] = true;
        cursor += 1;
    }

    child
}

/// Picks OX cut points `r1 <= r2`, each drawn from `0..n-1`.
///
/// The last position is never a cut point, so it is always filled from
/// the donor.
///
/// # Panics
/// Panics if `n < 2`.
pub fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "need at least two genes to cut");
    let a = rng.random_range(0..n - 1);
    let b = rng.random_range(0..n - 1);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Swap mutation: exchange two random positions drawn from `0..n`.
///
/// Both positions may coincide, in which case the permutation is unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }

    #[test]
    fn test_random_permutation_valid() {
        let mut rng = create_rng(42);
        for n in 0..20 {
            let perm = random_permutation(n, &mut rng);
            assert!(is_permutation(&perm, n), "invalid: {perm:?}");
        }
    }

    #[test]
    fn test_random_permutation_covers_all_orders() {
        let mut rng = create_rng(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            seen.insert(random_permutation(3, &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_ox_known_child() {
        let p1 = [0, 1, 2, 3, 4, 5];
        let p2 = [5, 4, 3, 2, 1, 0];
        // segment [2, 3] = {2, 3}; donor order without them: 5, 4, 1, 0
        let child = order_crossover(&p1, &p2, 2, 3);
        assert_eq!(child, vec![5, 4, 2, 3, 1, 0]);
    }

    #[test]
    fn test_ox_shared_cursor_across_passes() {
        let p1 = [3, 0, 1, 2, 4];
        let p2 = [1, 4, 0, 3, 2];
        // segment [1, 2] = {0, 1}; donor remainder in order: 4, 3, 2
        let child = order_crossover(&p1, &p2, 1, 2);
        assert_eq!(child, vec![4, 0, 1, 3, 2]);
    }

    #[test]
    fn test_ox_full_segment_copies_template() {
        let p1 = [2, 0, 1];
        let p2 = [0, 1, 2];
        assert_eq!(order_crossover(&p1, &p2, 0, 2), vec![2, 0, 1]);
    }

    #[test]
    fn test_ox_every_cut_point_valid() {
        let p1 = [4, 2, 0, 6, 1, 5, 3];
        let p2 = [1, 3, 5, 0, 2, 4, 6];
        for start in 0..7 {
            for end in start..7 {
                let child = order_crossover(&p1, &p2, start, end);
                assert!(is_permutation(&child, 7), "cut ({start},{end}): {child:?}");
                assert_eq!(&child[start..=end], &p1[start..=end]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_ox_length_mismatch_panics() {
        order_crossover(&[0, 1, 2], &[0, 1], 0, 1);
    }

    #[test]
    fn test_cut_points_exclude_last() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (a, b) = random_cut_points(5, &mut rng);
            assert!(a <= b && b < 4);
        }
    }

    #[test]
    fn test_swap_mutation_reaches_last_position() {
        let mut rng = create_rng(3);
        let mut moved_last = false;
        for _ in 0..200 {
            let mut perm = vec![0, 1, 2, 3];
            swap_mutation(&mut perm, &mut rng);
            assert!(is_permutation(&perm, 4));
            if perm[3] != 3 {
                moved_last = true;
            }
        }
        assert!(moved_last);
    }

    #[test]
    fn test_swap_mutation_tiny() {
        let mut rng = create_rng(42);
        let mut one = vec![0];
        swap_mutation(&mut one, &mut rng);
        assert_eq!(one, vec![0]);
    }

    fn perm_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (2usize..24).prop_flat_map(|n| {
            let base: Vec<usize> = (0..n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_ox_child_is_permutation(
            (p1, p2) in perm_pair(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let n = p1.len();
            let (x, y) = (a.index(n), b.index(n));
            let (start, end) = if x <= y { (x, y) } else { (y, x) };
            let child = order_crossover(&p1, &p2, start, end);
            prop_assert!(is_permutation(&child, n));
            prop_assert_eq!(&child[start..=end], &p1[start..=end]);
        }

        #[test]
        fn prop_swap_keeps_permutation(seed in any::<u64>(), n in 0usize..30) {
            let mut rng = create_rng(seed);
            let mut perm = random_permutation(n, &mut rng);
            swap_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation(&perm, n));
        }
    }
}
