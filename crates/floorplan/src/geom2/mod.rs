//! 2D geometry primitives for floorplan tracing.
//!
//! Purpose
//! - Pure value types (points, vectors, angles, affine maps, segments, rays,
//!   polygons, boxes) with no interaction state.
//! - Numerically explicit: predicates take or default to the epsilons in
//!   `GeomCfg`.
//!
//! Code cross-refs: `Polygon2`, `Segment2`, `Ray2`, `AffineMap`, `GeomCfg`

mod polygon;
mod segment;
mod types;

pub use polygon::{Bbox2, Polygon2};
pub use segment::{Ray2, Segment2};
pub use types::{cross, orient, rotate, AffineMap, Angle2, GeomCfg, Point2, Vector2};

#[cfg(test)]
mod tests;
