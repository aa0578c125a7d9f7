//! Graph primitives and connectivity
//!
//! Vertices, edges, 3D Delaunay triangulation and the spanning-tree pass that
//! picks which rooms get a hallway.

mod delaunay;
mod mst;
mod vertex;

pub use delaunay::{Circumsphere, Delaunay3D, Tetrahedron, Triangle};
pub use mst::{add_random_connections, minimum_spanning_tree};
pub use vertex::{Edge, Vertex};
