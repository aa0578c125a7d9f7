//! Spatial primitives
//!
//! Vectors, axis-aligned bounds and the dense 3D grid everything else is
//! built on.

mod bounds;
mod grid;
mod vector;

pub use bounds::BoundsInt3D;
pub use grid::Grid3D;
pub use vector::{Vector3, Vector3Int};
