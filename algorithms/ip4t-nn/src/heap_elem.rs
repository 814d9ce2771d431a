use std::cmp::{Ordering, Reverse};

use ip4t::Float;
use noisy_float::{checkers::FiniteChecker, NoisyFloat};

pub(crate) struct HeapElem<D: Ord, T> {
    pub(crate) dist: D,
    pub(crate) elem: T,
}

impl<D: Ord, T> PartialEq for HeapElem<D, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dist.eq(&other.dist)
    }
}
impl<D: Ord, T> Eq for HeapElem<D, T> {}

impl<D: Ord, T> PartialOrd for HeapElem<D, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Ord, T> Ord for HeapElem<D, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.cmp(&other.dist)
    }
}

/// Pops the smallest distance first, the lower batch position wins ties
pub(crate) type MinHeapElem<F, T> = HeapElem<Reverse<(NoisyFloat<F, FiniteChecker>, usize)>, T>;

impl<F: Float, T> MinHeapElem<F, T> {
    pub(crate) fn new(dist: F, pos: usize, elem: T) -> Self {
        Self {
            dist: Reverse((NoisyFloat::new(dist), pos)),
            elem,
        }
    }
}
