//! Stratified train/test partitioning
//!
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::Label;
use crate::error::{Error, Result};

/// Row indices of a stratified train/test partition
///
/// Both index lists are sorted ascending and refer to positions in the labels the split was
/// computed from. Together they cover every position exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifiedSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition the positions of `labels` into train and test indices, preserving class proportions
///
/// The test partition receives `ceil(test_ratio * n)` observations. Every class contributes
/// `floor(count * n_test / n)` observations to it, the remainder is handed out one by one to the
/// classes with the largest fractional share. A class never gives away its last observation, so
/// each class is represented in the training partition. Which members of a class land in the test
/// partition is decided by shuffling with `rng`, so a seeded generator makes the split
/// reproducible.
///
/// ### Errors
///
/// * `Error::Parameters` if `test_ratio` is not in `(0, 1)`
/// * `Error::NotEnoughSamples` if fewer than two labels are given
pub fn stratified_split_indices<L: Label, R: Rng>(
    labels: &[L],
    test_ratio: f64,
    rng: &mut R,
) -> Result<StratifiedSplit> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(Error::Parameters(format!(
            "test ratio should be in (0, 1), but was {}",
            test_ratio
        )));
    }

    let nsamples = labels.len();
    if nsamples < 2 {
        return Err(Error::NotEnoughSamples);
    }

    let mut by_class: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    let ntest = ((test_ratio * nsamples as f64).ceil() as usize).clamp(1, nsamples - 1);

    // (class position, floor allocation, fractional part, upper bound)
    let mut shares = by_class
        .values()
        .enumerate()
        .map(|(pos, members)| {
            let exact = members.len() as f64 * ntest as f64 / nsamples as f64;
            let cap = members.len() - 1;
            (pos, (exact.floor() as usize).min(cap), exact.fract(), cap)
        })
        .collect::<Vec<_>>();

    let mut remaining = ntest.saturating_sub(shares.iter().map(|s| s.1).sum::<usize>());

    // largest remainder first, class order breaks ties
    let mut order = (0..shares.len()).collect::<Vec<_>>();
    order.sort_by(|a, b| {
        shares[*b]
            .2
            .partial_cmp(&shares[*a].2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(shares[*a].0.cmp(&shares[*b].0))
    });

    while remaining > 0 {
        let mut handed_out = false;
        for &pos in &order {
            if remaining == 0 {
                break;
            }
            let share = &mut shares[pos];
            if share.1 < share.3 {
                share.1 += 1;
                remaining -= 1;
                handed_out = true;
            }
        }
        if !handed_out {
            break;
        }
    }

    let mut train = Vec::with_capacity(nsamples - ntest);
    let mut test = Vec::with_capacity(ntest);
    for (members, share) in by_class.into_values().zip(shares.iter()) {
        let mut members = members;
        members.shuffle(rng);
        let (to_test, to_train) = members.split_at(share.1);
        test.extend_from_slice(to_test);
        train.extend_from_slice(to_train);
    }

    train.sort_unstable();
    test.sort_unstable();

    Ok(StratifiedSplit { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn labels(counts: &[(&'static str, usize)]) -> Vec<&'static str> {
        counts
            .iter()
            .flat_map(|(label, n)| std::iter::repeat(*label).take(*n))
            .collect()
    }

    #[test]
    fn partitions_every_row_exactly_once() {
        let labels = labels(&[("ya", 37), ("tidak", 101), ("mungkin", 12)]);
        let mut rng = StdRng::seed_from_u64(42);
        let split = stratified_split_indices(&labels, 0.2, &mut rng).unwrap();

        assert_eq!(split.test.len(), 30);
        assert_eq!(split.train.len() + split.test.len(), labels.len());

        let train = split.train.iter().collect::<HashSet<_>>();
        let test = split.test.iter().collect::<HashSet<_>>();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.union(&test).count(), labels.len());
    }

    #[test]
    fn class_shares_stay_within_one_row() {
        let labels = labels(&[("a", 7), ("b", 13), ("c", 29), ("d", 51)]);
        let mut rng = StdRng::seed_from_u64(7);
        let split = stratified_split_indices(&labels, 0.2, &mut rng).unwrap();

        let ntest = split.test.len() as f64;
        let n = labels.len() as f64;
        for class in ["a", "b", "c", "d"] {
            let total = labels.iter().filter(|l| **l == class).count() as f64;
            let in_test = split.test.iter().filter(|i| labels[**i] == class).count() as f64;
            assert!((in_test - total * ntest / n).abs() <= 1.0, "class {}", class);
        }
    }

    #[test]
    fn singleton_class_stays_in_training() {
        let labels = labels(&[("ya", 20), ("jarang", 1)]);
        let mut rng = StdRng::seed_from_u64(42);
        let split = stratified_split_indices(&labels, 0.2, &mut rng).unwrap();

        assert!(split.train.contains(&20));
        assert!(!split.test.contains(&20));
    }

    #[test]
    fn same_seed_gives_same_split() {
        let labels = labels(&[("ya", 40), ("tidak", 60)]);
        let a = stratified_split_indices(&labels, 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = stratified_split_indices(&labels, 0.2, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_ratio() {
        let labels = labels(&[("ya", 4)]);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(stratified_split_indices(&labels, 0.0, &mut rng).is_err());
        assert!(stratified_split_indices(&labels, 1.0, &mut rng).is_err());
    }
}
