use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::data::{Dataset, Fold};
use crate::error::Error;

fn obs(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

fn coverage<D: ?Sized>(folds: &[Fold<'_, D>]) -> (HashSet<usize>, usize) {
    let mut seen = HashSet::new();
    let mut total = 0;
    for fold in folds {
        for &i in fold.test.indices() {
            seen.insert(i);
            total += 1;
        }
    }
    (seen, total)
}

#[test]
fn test_fixed_split_80_20() {
    let data = obs(100);
    let split = FixedSplit::new(&data, 0.8).unwrap();
    assert_eq!(split.len(), 1);
    let folds: Vec<_> = split.collect();
    assert_eq!(folds.len(), 1);
    assert_eq!(folds[0].train.len(), 80);
    assert_eq!(folds[0].test.len(), 20);
    assert_eq!(folds[0].train.indices()[0], 0);
    assert_eq!(folds[0].test.indices()[0], 80);
}

#[test]
fn test_fixed_split_explicit_size() {
    let data = obs(10);
    let folds: Vec<_> = FixedSplit::with_size(&data, 7).unwrap().collect();
    assert_eq!(folds[0].train.len(), 7);
    assert_eq!(folds[0].test.len(), 3);
}

#[test]
fn test_fixed_split_rejects_degenerate_sizes() {
    let data = obs(10);
    assert!(matches!(FixedSplit::with_size(&data, 0), Err(Error::InvalidSplit { .. })));
    assert!(matches!(FixedSplit::with_size(&data, 10), Err(Error::InvalidSplit { .. })));
    assert!(FixedSplit::new(&data, 0.0).is_err());
    assert!(FixedSplit::new(&data, 1.0).is_err());
}

#[test]
fn test_random_split_is_a_permutation() {
    let data = obs(20);
    let mut rng = StdRng::seed_from_u64(7);
    let folds: Vec<_> = RandomSplit::new(&data, 0.75, &mut rng).unwrap().collect();
    assert_eq!(folds.len(), 1);
    assert_eq!(folds[0].train.len(), 15);
    assert_eq!(folds[0].test.len(), 5);
    let mut all: Vec<usize> = folds[0]
        .train
        .indices()
        .iter()
        .chain(folds[0].test.indices())
        .copied()
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_random_split_deterministic_under_seed() {
    let data = obs(12);
    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    let fa: Vec<_> = RandomSplit::new(&data, 0.5, &mut a).unwrap().collect();
    let fb: Vec<_> = RandomSplit::new(&data, 0.5, &mut b).unwrap().collect();
    assert_eq!(fa[0].train.indices(), fb[0].train.indices());
}

#[test]
fn test_leave_one_out() {
    let data = obs(6);
    let loo = LeaveOneOut::new(&data).unwrap();
    assert_eq!(loo.len(), 6);
    let folds: Vec<_> = loo.collect();
    assert_eq!(folds.len(), 6);
    for (i, fold) in folds.iter().enumerate() {
        assert_eq!(fold.test.indices(), &[i]);
        assert_eq!(fold.train.len(), 5);
        assert!(!fold.train.indices().contains(&i));
    }
    let (seen, total) = coverage(&folds);
    assert_eq!(seen.len(), 6);
    assert_eq!(total, 6);
}

#[test]
fn test_leave_one_out_requires_two_obs() {
    let data = obs(1);
    assert!(LeaveOneOut::new(&data).is_err());
}

#[test]
fn test_kfold_10_of_100() {
    let data = obs(100);
    let mut rng = StdRng::seed_from_u64(42);
    let kf = KFold::new(&data, 10, &mut rng).unwrap();
    assert_eq!(kf.len(), 10);
    let folds: Vec<_> = kf.collect();
    assert_eq!(folds.len(), 10);
    for fold in &folds {
        assert_eq!(fold.test.len(), 10);
        assert_eq!(fold.train.len(), 90);
    }
    let (seen, total) = coverage(&folds);
    assert_eq!(seen.len(), 100);
    assert_eq!(total, 100);
}

#[test]
fn test_kfold_uneven_sizes() {
    // 10 observations over 3 folds: sizes 4, 3, 3.
    let data = obs(10);
    let mut rng = StdRng::seed_from_u64(1);
    let folds: Vec<_> = KFold::new(&data, 3, &mut rng).unwrap().collect();
    let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
    assert_eq!(sizes, vec![4, 3, 3]);
    let (seen, total) = coverage(&folds);
    assert_eq!(seen.len(), 10);
    assert_eq!(total, 10);
}

#[test]
fn test_kfold_k_equals_n_is_leave_one_out() {
    let data = obs(8);
    let mut rng = StdRng::seed_from_u64(5);
    let folds: Vec<_> = KFold::new(&data, 8, &mut rng).unwrap().collect();
    assert_eq!(folds.len(), 8);
    for fold in &folds {
        assert_eq!(fold.test.len(), 1);
        assert_eq!(fold.train.len(), 7);
    }
    let (seen, _) = coverage(&folds);
    assert_eq!(seen.len(), 8);
}

#[test]
fn test_kfold_over_unsized_slice() {
    // D = [f64]: iteration must work without a Dataset bound on the slice.
    let data = obs(12);
    let mut rng = StdRng::seed_from_u64(6);
    let folds: Vec<_> = KFold::new(data.as_slice(), 4, &mut rng).unwrap().collect();
    assert_eq!(folds.len(), 4);
    for fold in &folds {
        assert_eq!(fold.test.len(), 3);
        assert_eq!(fold.train.len(), 9);
    }
    let (seen, total) = coverage(&folds);
    assert_eq!(seen.len(), 12);
    assert_eq!(total, 12);
}

#[test]
fn test_kfold_rejects_bad_k() {
    let data = obs(5);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(KFold::new(&data, 1, &mut rng), Err(Error::InvalidFolds { .. })));
    assert!(matches!(KFold::new(&data, 6, &mut rng), Err(Error::InvalidFolds { .. })));
}

#[test]
fn test_forward_chaining_partial() {
    // n=10, init=4, out=3: folds test on [4,7), [7,10).
    let data = obs(10);
    let fc = ForwardChaining::new(&data, 4, 3).unwrap();
    assert_eq!(fc.len(), 2);
    let folds: Vec<_> = fc.collect();
    assert_eq!(folds[0].train.indices(), &(0..4).collect::<Vec<_>>()[..]);
    assert_eq!(folds[0].test.indices(), &[4, 5, 6]);
    assert_eq!(folds[1].train.indices(), &(0..7).collect::<Vec<_>>()[..]);
    assert_eq!(folds[1].test.indices(), &[7, 8, 9]);
}

#[test]
fn test_forward_chaining_partial_final_window() {
    // n=10, init=4, out=4: partial keeps the short final window [8,10).
    let data = obs(10);
    let with_partial: Vec<_> = ForwardChaining::new(&data, 4, 4).unwrap().collect();
    assert_eq!(with_partial.len(), 2);
    assert_eq!(with_partial[1].test.indices(), &[8, 9]);

    let without: Vec<_> = ForwardChaining::without_partial(&data, 4, 4).unwrap().collect();
    assert_eq!(without.len(), 1);
    assert_eq!(without[0].test.indices(), &[4, 5, 6, 7]);
}

#[test]
fn test_forward_chaining_rejects_bad_windows() {
    let data = obs(10);
    assert!(matches!(
        ForwardChaining::new(&data, 0, 2),
        Err(Error::InvalidWindow { .. })
    ));
    assert!(ForwardChaining::new(&data, 10, 2).is_err());
    assert!(ForwardChaining::new(&data, 4, 0).is_err());
}

#[test]
fn test_sliding_window() {
    // n=10, window=4, out=2: train windows slide by 2.
    let data = obs(10);
    let sw = SlidingWindow::new(&data, 4, 2).unwrap();
    assert_eq!(sw.len(), 3);
    let folds: Vec<_> = sw.collect();
    assert_eq!(folds[0].train.indices(), &[0, 1, 2, 3]);
    assert_eq!(folds[0].test.indices(), &[4, 5]);
    assert_eq!(folds[1].train.indices(), &[2, 3, 4, 5]);
    assert_eq!(folds[1].test.indices(), &[6, 7]);
    assert_eq!(folds[2].train.indices(), &[4, 5, 6, 7]);
    assert_eq!(folds[2].test.indices(), &[8, 9]);
    for fold in &folds {
        assert_eq!(fold.train.len(), 4);
    }
}

#[test]
fn test_sliding_window_partial_final_window() {
    let data = obs(9);
    let with_partial: Vec<_> = SlidingWindow::new(&data, 4, 2).unwrap().collect();
    assert_eq!(with_partial.len(), 3);
    assert_eq!(with_partial[2].test.indices(), &[8]);

    let without: Vec<_> = SlidingWindow::without_partial(&data, 4, 2).unwrap().collect();
    assert_eq!(without.len(), 2);
}

#[test]
fn test_len_matches_yielded_count() {
    let data = obs(17);
    let mut rng = StdRng::seed_from_u64(3);

    let r = FixedSplit::new(&data, 0.5).unwrap();
    assert_eq!(r.len(), r.count());
    let r = RandomSplit::new(&data, 0.5, &mut rng).unwrap();
    assert_eq!(r.len(), r.count());
    let r = LeaveOneOut::new(&data).unwrap();
    assert_eq!(r.len(), r.count());
    let r = KFold::new(&data, 5, &mut rng).unwrap();
    assert_eq!(r.len(), r.count());
    let r = ForwardChaining::new(&data, 5, 3).unwrap();
    assert_eq!(r.len(), r.count());
    let r = SlidingWindow::new(&data, 5, 3).unwrap();
    assert_eq!(r.len(), r.count());
}

#[test]
fn test_composite_dataset_mismatch_fails_fast() {
    let x = obs(10);
    let y = obs(9);
    let pair = (&x, &y);
    assert!(matches!(pair.nobs(), Err(Error::ObsMismatch { .. })));
    assert!(FixedSplit::new(&pair, 0.8).is_err());
}

mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_kfold_partitions_all_indices(n in 4usize..60, k in 2usize..8, seed in 0u64..1000) {
            prop_assume!(k <= n);
            let data = obs(n);
            let mut rng = StdRng::seed_from_u64(seed);
            let folds: Vec<_> = KFold::new(&data, k, &mut rng).unwrap().collect();
            prop_assert_eq!(folds.len(), k);
            let (seen, total) = coverage(&folds);
            prop_assert_eq!(seen.len(), n);
            prop_assert_eq!(total, n);
            for fold in &folds {
                prop_assert_eq!(fold.train.len() + fold.test.len(), n);
            }
        }

        #[test]
        fn prop_window_len_matches_iteration(n in 4usize..60, train in 1usize..10, out in 1usize..6) {
            prop_assume!(train < n);
            let data = obs(n);
            let fc = ForwardChaining::new(&data, train, out).unwrap();
            prop_assert_eq!(fc.len(), fc.count());
            let sw = SlidingWindow::without_partial(&data, train, out).unwrap();
            prop_assert_eq!(sw.len(), sw.count());
        }
    }
}
