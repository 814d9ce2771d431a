use super::{AsTargets, DatasetBase, Label, Labels, Records};
use ndarray::{ArrayBase, ArrayView1, Data, Ix1};
use std::collections::HashMap;

/// A one-dimensional NdArray can act as targets
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_targets(&self) -> ArrayView1<L> {
        self.view()
    }
}

/// The targets of a dataset
impl<R: Records, T: AsTargets> AsTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem> {
        self.targets.as_targets()
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem> {
        (*self).as_targets()
    }
}

/// Targets with discrete labels can be counted
impl<L: Label, T: AsTargets<Elem = L>> Labels for T {
    type Elem = L;

    fn label_count(&self) -> HashMap<L, usize> {
        let mut count = HashMap::new();

        for label in self.as_targets().iter() {
            *count.entry(label.clone()).or_insert(0) += 1;
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn counts_labels() {
        let targets = array!["ya", "tidak", "ya", "ya"];
        let count = targets.label_count();

        assert_eq!(count[&"ya"], 3);
        assert_eq!(count[&"tidak"], 1);
        assert_eq!(targets.label_set(), vec!["tidak", "ya"]);
    }
}
