//! Graph vertices and edges

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::consts::VERTEX_EPSILON_SQ;
use crate::spatial::Vector3;

/// A point in space carrying a payload.
///
/// Equality and hashing look at the position only; the payload is ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex<T = ()> {
    pub position: Vector3,
    pub data: T,
}

impl Vertex<()> {
    pub fn at(position: Vector3) -> Self {
        Self { position, data: () }
    }
}

impl<T> Vertex<T> {
    pub fn new(position: Vector3, data: T) -> Self {
        Self { position, data }
    }

    /// Positions closer than 0.01 count as the same point
    pub fn almost_eq<U>(&self, other: &Vertex<U>) -> bool {
        (self.position - other.position).sqr_magnitude() < VERTEX_EPSILON_SQ
    }
}

/// Normalize -0.0 to 0.0 so that equal positions hash equally
fn key_bits(v: f64) -> u64 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

impl<T> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Vertex<T> {}

impl<T> Hash for Vertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key_bits(self.position.x).hash(state);
        key_bits(self.position.y).hash(state);
        key_bits(self.position.z).hash(state);
    }
}

/// An undirected edge between two vertices of a vertex list.
///
/// `u` and `v` index into the list the edge was built from. Equality and
/// hashing are symmetric: `(u, v)` and `(v, u)` are the same edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    /// Euclidean length
    pub distance: f64,
}

impl Edge {
    /// Build the edge between `vertices[u]` and `vertices[v]`
    pub fn between<T>(vertices: &[Vertex<T>], u: usize, v: usize) -> Self {
        Self {
            u,
            v,
            distance: vertices[u].position.distance(vertices[v].position),
        }
    }

    /// Endpoints with the smaller index first
    pub fn key(&self) -> (usize, usize) {
        if self.u <= self.v { (self.u, self.v) } else { (self.v, self.u) }
    }

    pub fn touches(&self, vertex: usize) -> bool {
        self.u == vertex || self.v == vertex
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
