//! Bubble sort used by the median computation.
//!
//! The inner comparison index is bounded by `n - 1 - i`, so `j + 1` never
//! reaches `n`. After pass `i` the last `i + 1` slots already hold their final
//! values.

/// Sort `values` in place into non-decreasing order.
///
/// Incomparable pairs (e.g. NaN) are left where they are; callers that need a
/// total order reject non-finite input before sorting.
pub fn sort_in_place<T: PartialOrd>(values: &mut [T]) {
    let n = values.len();
    for i in 0..n {
        let mut swapped = false;
        for j in 0..n.saturating_sub(1 + i) {
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Return a sorted copy, leaving `values` untouched.
pub fn sorted<T: PartialOrd + Clone>(values: &[T]) -> Vec<T> {
    let mut out = values.to_vec();
    sort_in_place(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn is_non_decreasing(v: &[f64]) -> bool {
        v.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn sorts_small_input() {
        assert_eq!(sorted(&[3, 1, 2]), vec![1, 2, 3]);
    }

    #[test]
    fn handles_empty_and_single() {
        let empty: [i32; 0] = [];
        assert!(sorted(&empty).is_empty());
        assert_eq!(sorted(&[7]), vec![7]);
    }

    #[test]
    fn sorts_reference_sample() {
        let data = [12.0, 15.0, 23.0, 42.0, 35.0, 48.0, 62.0, 17.0, 29.0];
        assert_eq!(
            sorted(&data),
            vec![12.0, 15.0, 17.0, 23.0, 29.0, 35.0, 42.0, 48.0, 62.0]
        );
    }

    #[test]
    fn random_inputs_are_sorted_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in [2usize, 3, 10, 57] {
            let input: Vec<f64> = (0..len).map(|_| rng.gen_range(-100.0..100.0)).collect();
            let out = sorted(&input);
            assert!(is_non_decreasing(&out));

            let mut expected = input.clone();
            expected.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn sorting_is_idempotent() {
        let input = vec![5, 3, 9, 3, 1, 0, 8];
        let once = sorted(&input);
        assert_eq!(sorted(&once), once);
    }

    #[test]
    fn keeps_duplicates() {
        assert_eq!(sorted(&[2, 2, 1, 2]), vec![1, 2, 2, 2]);
    }
}
