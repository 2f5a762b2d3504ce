//! Exact distance evaluators for segments and quadratic Bézier curves.

mod bezier;
mod segment;


pub use bezier::quadratic_bezier_distance;
pub use segment::distance_to_segment;
