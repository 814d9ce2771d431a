mod algorithm;
mod hyperparams;
mod iter;
mod random_forest;
mod text;

pub use algorithm::*;
pub use hyperparams::*;
pub use iter::*;
pub use random_forest::*;
pub use text::*;
