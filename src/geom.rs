pub mod enclosure;
pub mod point;
pub mod polygon;
pub mod ray;
pub mod segment;
pub mod vector;

/// Geometric precision
const EPS: f64 = 1e-13;
