use rand::{Rng, seq::SliceRandom};

/// Sample indices of one cross-validation fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// 0-based fold index.
    pub index: usize,
    /// Indices of the samples the fold is trained on, in dataset order.
    pub train: Vec<usize>,
    /// Indices of the held-out samples, in dataset order.
    pub validation: Vec<usize>,
}

/// Splits `[0..len)` into `n_parts` folds through a random permutation.
///
/// Sample `j` is held out by fold `permutation[j] % n_parts`.
///
/// Properties:
/// - Validation sets are disjoint and cover `[0..len)`.
/// - Each fold's train set is the complement of its validation set.
/// - Validation sizes differ by at most 1.
///
/// # Arguments
/// * `len` - The dataset size.
/// * `n_parts` - The amount of folds, must be > 0.
/// * `rng` - Source of the permutation.
///
/// # Panics
/// If `n_parts` is 0.
pub fn partition<R: Rng + ?Sized>(len: usize, n_parts: usize, rng: &mut R) -> Vec<Fold> {
    let mut permutation: Vec<usize> = (0..len).collect();
    permutation.shuffle(rng);
    partition_with(&permutation, n_parts)
}

/// Same as `partition` with an explicit permutation of `[0..len)`.
///
/// # Panics
/// If `n_parts` is 0.
pub fn partition_with(permutation: &[usize], n_parts: usize) -> Vec<Fold> {
    assert!(n_parts > 0, "n_parts must be > 0");

    (0..n_parts)
        .map(|index| {
            let (validation, train): (Vec<usize>, Vec<usize>) =
                (0..permutation.len()).partition(|&j| permutation[j] % n_parts == index);

            Fold {
                index,
                train,
                validation,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    #[should_panic(expected = "n_parts must be > 0")]
    fn zero_parts_panics() {
        partition_with(&[0, 1, 2], 0);
    }

    #[test]
    fn identity_permutation_deals_round_robin() {
        let folds = partition_with(&[0, 1, 2, 3, 4, 5, 6], 3);

        assert_eq!(folds[0].validation, vec![0, 3, 6]);
        assert_eq!(folds[1].validation, vec![1, 4]);
        assert_eq!(folds[2].validation, vec![2, 5]);
        assert_eq!(folds[1].train, vec![0, 2, 3, 5, 6]);
    }

    #[test]
    fn permutation_decides_membership() {
        let folds = partition_with(&[3, 0, 2, 1], 2);

        assert_eq!(folds[0].validation, vec![1, 2]);
        assert_eq!(folds[1].validation, vec![0, 3]);
    }

    #[test]
    fn folds_cover_every_sample_exactly_once() {
        let mut rng = StdRng::seed_from_u64(9);
        let len = 23;
        let folds = partition(len, 5, &mut rng);

        let mut seen = vec![0usize; len];
        for fold in &folds {
            for &j in &fold.validation {
                seen[j] += 1;
            }

            assert_eq!(fold.train.len() + fold.validation.len(), len);
            assert!(fold.train.iter().all(|j| !fold.validation.contains(j)));
            assert!(fold.validation.len() == 4 || fold.validation.len() == 5);
        }

        assert!(seen.iter().all(|&c| c == 1));
    }
}
