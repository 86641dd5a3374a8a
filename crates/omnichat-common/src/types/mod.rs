mod geometry;
mod model;

pub use geometry::*;
pub use model::*;
