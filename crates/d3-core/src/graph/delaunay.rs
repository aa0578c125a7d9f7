//! Delaunay tetrahedralization (Bowyer–Watson)
//!
//! Produces the candidate edge set for room connectivity:
//! 1. Wrap every input point in one large super-tetrahedron
//! 2. Insert points one at a time, re-triangulating the cavity left by every
//!    tetrahedron whose circumsphere contains the new point
//! 3. Drop every tetrahedron touching a super-tetrahedron corner
//! 4. Collect the unique triangles and edges of what remains
//!
//! Circumspheres use the closed-form determinant solution. Degenerate
//! (flat) tetrahedra get no circumsphere and never contain a point.

use core::hash::{Hash, Hasher};

use hashbrown::{HashMap, HashSet};
use log::{debug, warn};

use super::{Edge, Vertex};
use crate::spatial::Vector3;

/// Orientation determinants smaller than this are treated as flat
const DEGENERATE_EPSILON: f64 = 1e-9;

/// A triangular face, as indices into the vertex list.
///
/// Equality and hashing ignore vertex order.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [usize; 3],
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { vertices: [a, b, c] }
    }

    fn key(&self) -> [usize; 3] {
        let mut key = self.vertices;
        key.sort_unstable();
        key
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Sphere through the four corners of a tetrahedron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumsphere {
    pub center: Vector3,
    pub radius_sq: f64,
}

/// A tetrahedron, as indices into the vertex list
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron {
    pub vertices: [usize; 4],
    circumsphere: Option<Circumsphere>,
}

impl Tetrahedron {
    fn new(vertices: [usize; 4], points: &[Vector3]) -> Self {
        let [a, b, c, d] = vertices.map(|i| points[i]);
        Self {
            vertices,
            circumsphere: circumsphere(a, b, c, d),
        }
    }

    /// `None` when the four corners are (nearly) coplanar
    pub fn circumsphere(&self) -> Option<Circumsphere> {
        self.circumsphere
    }

    /// Check if `point` lies inside or on the circumsphere
    pub fn circumsphere_contains(&self, point: Vector3) -> bool {
        match self.circumsphere {
            Some(sphere) => (point - sphere.center).sqr_magnitude() <= sphere.radius_sq,
            None => false,
        }
    }

    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }

    fn faces(&self) -> [Triangle; 4] {
        let [a, b, c, d] = self.vertices;
        [
            Triangle::new(a, b, c),
            Triangle::new(a, b, d),
            Triangle::new(a, c, d),
            Triangle::new(b, c, d),
        ]
    }

    fn edges(&self) -> [(usize, usize); 6] {
        let [a, b, c, d] = self.vertices;
        [(a, b), (b, c), (c, d), (d, a), (a, c), (b, d)]
    }
}

fn det3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// 4x4 determinant by cofactor expansion along the first row
fn det4(m: [[f64; 4]; 4]) -> f64 {
    let minor = |col: usize| {
        let mut sub = [[0.0; 3]; 3];
        for (r, row) in m.iter().skip(1).enumerate() {
            let mut k = 0;
            for (c, value) in row.iter().enumerate() {
                if c != col {
                    sub[r][k] = *value;
                    k += 1;
                }
            }
        }
        det3(sub)
    };
    m[0][0] * minor(0) - m[0][1] * minor(1) + m[0][2] * minor(2) - m[0][3] * minor(3)
}

fn circumsphere(a: Vector3, b: Vector3, c: Vector3, d: Vector3) -> Option<Circumsphere> {
    let xs = [a.x, b.x, c.x, d.x];
    let ys = [a.y, b.y, c.y, d.y];
    let zs = [a.z, b.z, c.z, d.z];
    let sq = [
        a.sqr_magnitude(),
        b.sqr_magnitude(),
        c.sqr_magnitude(),
        d.sqr_magnitude(),
    ];
    let ones = [1.0; 4];

    let det_a = det4([xs, ys, zs, ones]);
    if det_a.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let dx = det4([sq, ys, zs, ones]);
    let dy = -det4([sq, xs, zs, ones]);
    let dz = det4([sq, xs, ys, ones]);
    let det_c = det4([sq, xs, ys, zs]);

    let center = Vector3::new(dx / (2.0 * det_a), dy / (2.0 * det_a), dz / (2.0 * det_a));
    let radius_sq = (dx * dx + dy * dy + dz * dz - 4.0 * det_a * det_c) / (4.0 * det_a * det_a);

    if !center.is_finite() || !radius_sq.is_finite() {
        return None;
    }
    Some(Circumsphere { center, radius_sq })
}

/// Result of a 3D Delaunay triangulation.
///
/// All indices in `edges`, `triangles` and `tetrahedra` refer to `vertices`.
#[derive(Debug, Clone)]
pub struct Delaunay3D<T> {
    pub vertices: Vec<Vertex<T>>,
    pub edges: Vec<Edge>,
    pub triangles: Vec<Triangle>,
    pub tetrahedra: Vec<Tetrahedron>,
}

impl<T> Delaunay3D<T> {
    /// Triangulate a set of vertices.
    ///
    /// Fewer than 4 (distinct) vertices is not an error: the result simply
    /// has no edges, triangles or tetrahedra.
    pub fn triangulate(vertices: impl IntoIterator<Item = Vertex<T>>) -> Self {
        let mut unique: Vec<Vertex<T>> = Vec::new();
        for vertex in vertices {
            if unique.iter().any(|u| u.almost_eq(&vertex)) {
                debug!("Merging near-duplicate vertex at {:?}", vertex.position);
                continue;
            }
            unique.push(vertex);
        }

        let mut result = Self {
            vertices: unique,
            edges: Vec::new(),
            triangles: Vec::new(),
            tetrahedra: Vec::new(),
        };

        if result.vertices.len() < 4 {
            warn!(
                "Delaunay3D needs at least 4 vertices, got {}; no edges produced",
                result.vertices.len()
            );
            return result;
        }

        result.tetrahedralize();
        result
    }

    fn tetrahedralize(&mut self) {
        let n = self.vertices.len();
        let mut points: Vec<Vector3> = self.vertices.iter().map(|v| v.position).collect();

        let (min, max) = points[1..]
            .iter()
            .fold((points[0], points[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        let extent = max - min;
        let delta_max = extent.x.max(extent.y).max(extent.z) * 2.0;

        points.push(Vector3::new(min.x - 1.0, min.y - 1.0, min.z - 1.0));
        points.push(Vector3::new(max.x + delta_max, min.y - 1.0, min.z - 1.0));
        points.push(Vector3::new(min.x - 1.0, max.y + delta_max, min.z - 1.0));
        points.push(Vector3::new(min.x - 1.0, min.y - 1.0, max.z + delta_max));

        let mut tetrahedra = vec![Tetrahedron::new([n, n + 1, n + 2, n + 3], &points)];

        for i in 0..n {
            let point = points[i];
            let mut cavity: Vec<Triangle> = Vec::new();
            tetrahedra.retain(|t| {
                if t.circumsphere_contains(point) {
                    cavity.extend(t.faces());
                    false
                } else {
                    true
                }
            });

            // Faces shared by two bad tetrahedra are interior to the cavity
            let mut counts: HashMap<Triangle, usize> = HashMap::with_capacity(cavity.len());
            for face in &cavity {
                *counts.entry(*face).or_insert(0) += 1;
            }

            for face in cavity {
                if counts.get(&face) == Some(&1) {
                    let [a, b, c] = face.vertices;
                    tetrahedra.push(Tetrahedron::new([a, b, c, i], &points));
                }
            }
        }

        tetrahedra.retain(|t| t.vertices.iter().all(|&v| v < n));

        let mut triangle_set = HashSet::new();
        let mut edge_set = HashSet::new();
        for t in &tetrahedra {
            for face in t.faces() {
                if triangle_set.insert(face) {
                    self.triangles.push(face);
                }
            }
            for (u, v) in t.edges() {
                let edge = Edge::between(&self.vertices, u, v);
                if edge_set.insert(edge) {
                    self.edges.push(edge);
                }
            }
        }

        debug!(
            "Delaunay3D: {} vertices, {} tetrahedra, {} triangles, {} edges",
            n,
            tetrahedra.len(),
            self.triangles.len(),
            self.edges.len()
        );
        self.tetrahedra = tetrahedra;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verts(points: &[(f64, f64, f64)]) -> Vec<Vertex> {
        points
            .iter()
            .map(|&(x, y, z)| Vertex::at(Vector3::new(x, y, z)))
            .collect()
    }

    #[test]
    fn test_circumsphere_of_unit_corner() {
        let sphere = circumsphere(
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!((sphere.center.x - 0.5).abs() < 1e-12);
        assert!((sphere.center.y - 0.5).abs() < 1e-12);
        assert!((sphere.center.z - 0.5).abs() < 1e-12);
        assert!((sphere.radius_sq - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_flat_tetrahedron_has_no_circumsphere() {
        let points = [
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
        ];
        let t = Tetrahedron::new([0, 1, 2, 3], &points);
        assert!(t.circumsphere().is_none());
        assert!(!t.circumsphere_contains(Vector3::new(0.5, 0.0, 0.5)));
    }

    #[test]
    fn test_too_few_vertices() {
        for count in 0..4 {
            let input = verts(&[(0.0, 0.0, 0.0), (5.0, 0.0, 0.0), (0.0, 5.0, 0.0)][..count.min(3)]);
            let result = Delaunay3D::triangulate(input);
            assert!(result.edges.is_empty());
            assert!(result.triangles.is_empty());
            assert!(result.tetrahedra.is_empty());
        }
    }

    #[test]
    fn test_duplicates_do_not_count_toward_minimum() {
        let result = Delaunay3D::triangulate(verts(&[
            (0.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
            (0.0, 4.0, 0.0),
        ]));
        assert_eq!(result.vertices.len(), 3);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_single_tetrahedron() {
        let result = Delaunay3D::triangulate(verts(&[
            (0.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
            (0.0, 4.0, 0.0),
            (0.0, 0.0, 4.0),
        ]));
        assert_eq!(result.tetrahedra.len(), 1);
        assert_eq!(result.triangles.len(), 4);
        assert_eq!(result.edges.len(), 6);
    }

    #[test]
    fn test_interior_point_splits_tetrahedron() {
        let result = Delaunay3D::triangulate(verts(&[
            (0.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
            (0.0, 4.0, 0.0),
            (0.0, 0.0, 4.0),
            (1.0, 1.0, 1.0),
        ]));
        assert_eq!(result.tetrahedra.len(), 4);
        assert_eq!(result.triangles.len(), 10);
        assert_eq!(result.edges.len(), 10);
        // The interior point connects to every corner
        assert_eq!(result.edges.iter().filter(|e| e.touches(4)).count(), 4);
    }

    #[test]
    fn test_result_is_delaunay() {
        let input = verts(&[
            (0.0, 0.0, 0.0),
            (9.0, 1.0, 2.0),
            (3.0, 4.0, 8.0),
            (7.0, 7.0, 1.0),
            (2.0, 8.0, 5.0),
            (5.0, 2.0, 6.0),
            (8.0, 5.0, 9.0),
        ]);
        let result = Delaunay3D::triangulate(input);
        assert!(!result.tetrahedra.is_empty());
        for t in &result.tetrahedra {
            let Some(sphere) = t.circumsphere() else { continue };
            for (i, v) in result.vertices.iter().enumerate() {
                if t.contains_vertex(i) {
                    continue;
                }
                let d = (v.position - sphere.center).sqr_magnitude();
                assert!(d >= sphere.radius_sq - 1e-6, "vertex {i} inside circumsphere");
            }
        }
    }

    #[test]
    fn test_coplanar_input_yields_no_edges() {
        // Every real tetrahedron would be flat, so only ones touching the
        // super corners survive insertion and all of them are dropped.
        let result = Delaunay3D::triangulate(verts(&[
            (0.0, 0.0, 0.0),
            (6.0, 0.0, 1.0),
            (1.0, 0.0, 7.0),
            (8.0, 0.0, 9.0),
            (4.0, 0.0, 4.0),
        ]));
        assert_eq!(result.vertices.len(), 5);
        assert!(result.tetrahedra.is_empty());
        assert!(result.triangles.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_edges_are_unique() {
        let result = Delaunay3D::triangulate(verts(&[
            (0.0, 0.0, 0.0),
            (9.0, 1.0, 2.0),
            (3.0, 4.0, 8.0),
            (7.0, 7.0, 1.0),
            (2.0, 8.0, 5.0),
            (5.0, 2.0, 6.0),
        ]));
        let set: HashSet<Edge> = result.edges.iter().copied().collect();
        assert_eq!(set.len(), result.edges.len());
    }
}
