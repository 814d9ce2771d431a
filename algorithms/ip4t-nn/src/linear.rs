use std::collections::BinaryHeap;

use ip4t::Float;
use ndarray::{ArrayView2, Axis};

use crate::{
    distance::{Distance, L2Dist},
    heap_elem::MinHeapElem,
    NearestNeighbour, NnError, Point,
};

/// Linear search, the simplest nearest neighbour index
///
/// Construction is free and every query scans all indexed points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSearch<'a, F: Float, D: Distance<F> = L2Dist>(ArrayView2<'a, F>, D);

impl<'a, F: Float, D: Distance<F>> LinearSearch<'a, F, D> {
    /// Index the rows of `batch`
    pub fn new(batch: ArrayView2<'a, F>, dist_fn: D) -> Result<Self, NnError> {
        if batch.ncols() == 0 {
            Err(NnError::ZeroDimension)
        } else {
            Ok(Self(batch, dist_fn))
        }
    }

    fn check_dimension(&self, point: &Point<F>) -> Result<(), NnError> {
        if self.0.ncols() != point.len() {
            Err(NnError::WrongDimension {
                expected: self.0.ncols(),
                found: point.len(),
            })
        } else {
            Ok(())
        }
    }
}

impl<'a, F: Float, D: Distance<F>> NearestNeighbour<F> for LinearSearch<'a, F, D> {
    fn k_nearest<'b>(
        &self,
        point: Point<'b, F>,
        k: usize,
    ) -> Result<Vec<(Point<F>, usize)>, NnError> {
        self.check_dimension(&point)?;

        let mut heap = BinaryHeap::with_capacity(self.0.nrows());
        for (i, pt) in self.0.axis_iter(Axis(0)).enumerate() {
            let dist = self.1.rdistance(point.reborrow(), pt.reborrow());
            heap.push(MinHeapElem::new(dist, i, (pt, i)));
        }

        Ok((0..k.min(heap.len()))
            .filter_map(|_| heap.pop().map(|e| e.elem))
            .collect())
    }
}
