//! `ip4t-nn` provides the nearest neighbour queries the minority oversampler needs.
//!
//! The only index implemented is a linear scan. The oversampler queries each minority class on
//! its own, and those classes are small, so building a spatial tree would not pay off.
//!
//! Queries return the position of every neighbour in the indexed batch alongside a view on the
//! point, so callers can exclude the query point itself or look up per-row metadata.
use ip4t::Float;
use ndarray::ArrayView1;
use thiserror::Error;

pub mod distance;
mod heap_elem;
mod linear;

pub use linear::LinearSearch;

pub(crate) type Point<'a, F> = ArrayView1<'a, F>;

/// Error returned when building an index or querying it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NnError {
    /// The points have zero dimensions
    #[error("points have dimension of 0")]
    ZeroDimension,
    /// The query point has a different dimension than the indexed points
    #[error("query point has dimension {found}, indexed points have dimension {expected}")]
    WrongDimension { expected: usize, found: usize },
}

/// A nearest neighbour index over a batch of points
pub trait NearestNeighbour<F: Float> {
    /// Return the `k` points closest to `point`, nearest first
    ///
    /// Each entry carries the position of the point in the indexed batch. Equally distant points
    /// are ordered by position. If fewer than `k` points are indexed, all of them are returned.
    fn k_nearest<'b>(
        &self,
        point: Point<'b, F>,
        k: usize,
    ) -> Result<Vec<(Point<F>, usize)>, NnError>;
}
