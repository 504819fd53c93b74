// =========================================================================
// Partition contracts for KFold and split_indices.
//
// The ridge penalty search and the held-out evaluation both depend on these
// index partitions being complete, disjoint and deterministic.
// =========================================================================

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn kfold_produces_k_splits() {
    let splits = KFold::new(5).split(100).expect("valid folds");
    assert_eq!(splits.len(), 5, "splits={}, expected 5", splits.len());
}

#[test]
fn kfold_first_folds_take_remainder() {
    let sizes: Vec<usize> = KFold::new(5)
        .split(23)
        .expect("valid folds")
        .iter()
        .map(|(_, test)| test.len())
        .collect();
    assert_eq!(sizes, vec![5, 5, 5, 4, 4]);
}

#[test]
fn kfold_train_test_disjoint() {
    for (fold_idx, (train, test)) in KFold::new(3).split(30).expect("valid").iter().enumerate() {
        let train_set: HashSet<usize> = train.iter().copied().collect();
        let overlap = test.iter().filter(|i| train_set.contains(i)).count();
        assert_eq!(overlap, 0, "fold {fold_idx} has {overlap} shared samples");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn kfold_every_sample_tested_once(k in 2..=10usize, n in 10..=60usize) {
        let splits = KFold::new(k).split(n).expect("k <= n");
        prop_assert_eq!(splits.len(), k);

        let mut counts = vec![0usize; n];
        for (train, test) in &splits {
            prop_assert_eq!(train.len() + test.len(), n);
            for &idx in test {
                counts[idx] += 1;
            }
        }
        prop_assert!(counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn split_indices_partition_all_rows(
        n in 2..=500usize,
        test_size in 0.01f64..0.99,
        seed in any::<u64>(),
    ) {
        let n_test = (test_size * n as f64).ceil() as usize;
        prop_assume!(n_test < n);

        let split = split_indices(n, test_size, seed).expect("valid split");
        prop_assert_eq!(split.test.len(), n_test);
        prop_assert_eq!(split.train.len() + split.test.len(), n);

        let test_set: HashSet<usize> = split.test.iter().copied().collect();
        prop_assert!(split.train.iter().all(|i| !test_set.contains(i)));

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn split_indices_deterministic(n in 5..=200usize, seed in any::<u64>()) {
        let a = split_indices(n, 0.2, seed).expect("valid split");
        let b = split_indices(n, 0.2, seed).expect("valid split");
        prop_assert_eq!(a, b);
    }
}
