//! Distance functions between points
use ip4t::Float;
use ndarray_stats::DeviationExt;

use crate::Point;

/// Metric between two points of equal dimension
pub trait Distance<F: Float> {
    // Panics if a and b are not of equal dimension
    fn distance(&self, a: Point<F>, b: Point<F>) -> F;

    // Fast distance metric that keeps the order of the distance function
    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        self.distance(a, b)
    }
}

/// Euclidean distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        a.sq_l2_dist(&b).unwrap()
    }
}
