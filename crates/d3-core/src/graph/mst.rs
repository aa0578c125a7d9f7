//! Minimum spanning tree and randomized loop edges
//!
//! Prim's algorithm in its simplest form: every step scans the whole edge
//! list for the cheapest edge leaving the tree. The graphs here have a few
//! dozen vertices, so O(V·E) is fine.

use d3_rng::RandomSource;
use hashbrown::HashSet;

use super::Edge;

/// Build a minimum spanning tree of the component containing `start`.
///
/// Ties go to the edge that appears first in `edges`. A disconnected graph
/// yields a partial tree covering only what is reachable from `start`.
pub fn minimum_spanning_tree(edges: &[Edge], start: usize) -> Vec<Edge> {
    let mut open: HashSet<usize> = HashSet::new();
    for edge in edges {
        open.insert(edge.u);
        open.insert(edge.v);
    }

    let mut closed: HashSet<usize> = HashSet::new();
    closed.insert(start);

    let mut results = Vec::new();

    while !open.is_empty() {
        let mut chosen: Option<Edge> = None;
        let mut min_weight = f64::INFINITY;

        for edge in edges {
            // Exactly one endpoint must already be in the tree
            if closed.contains(&edge.u) == closed.contains(&edge.v) {
                continue;
            }
            if edge.distance < min_weight {
                chosen = Some(*edge);
                min_weight = edge.distance;
            }
        }

        let Some(edge) = chosen else {
            break;
        };

        results.push(edge);
        open.remove(&edge.u);
        open.remove(&edge.v);
        closed.insert(edge.u);
        closed.insert(edge.v);
    }

    results
}

/// Add back non-tree edges, each independently with `probability`.
///
/// Returns the tree edges followed by the extra edges, in input order. One
/// random draw is made per candidate edge.
pub fn add_random_connections(
    all_edges: &[Edge],
    mst_edges: &[Edge],
    probability: f64,
    rng: &mut impl RandomSource,
) -> Vec<Edge> {
    let tree: HashSet<Edge> = mst_edges.iter().copied().collect();
    let mut selected: Vec<Edge> = mst_edges.to_vec();

    for edge in all_edges {
        if tree.contains(edge) {
            continue;
        }
        if rng.chance(probability) {
            selected.push(*edge);
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;
    use crate::spatial::Vector3;
    use d3_rng::SequenceRng;

    /// Complete graph over the given points
    fn complete(points: &[(f64, f64, f64)]) -> Vec<Edge> {
        let verts: Vec<Vertex> = points
            .iter()
            .map(|&(x, y, z)| Vertex::at(Vector3::new(x, y, z)))
            .collect();
        let mut edges = Vec::new();
        for u in 0..verts.len() {
            for v in u + 1..verts.len() {
                edges.push(Edge::between(&verts, u, v));
            }
        }
        edges
    }

    fn is_acyclic(edges: &[Edge], n: usize) -> bool {
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &[usize], x: usize) -> usize {
            let mut root = x;
            while parent[root] != root {
                root = parent[root];
            }
            root
        }
        for edge in edges {
            let a = find(&parent, edge.u);
            let b = find(&parent, edge.v);
            if a == b {
                return false;
            }
            parent[a] = b;
        }
        true
    }

    #[test]
    fn test_mst_on_line() {
        let edges = complete(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (3.0, 0.0, 0.0), (6.0, 0.0, 0.0)]);
        let tree = minimum_spanning_tree(&edges, 0);
        assert_eq!(tree.len(), 3);
        let total: f64 = tree.iter().map(|e| e.distance).sum();
        assert_eq!(total, 6.0);
        assert!(is_acyclic(&tree, 4));
    }

    #[test]
    fn test_mst_spans_all_vertices() {
        let edges = complete(&[
            (0.0, 0.0, 0.0),
            (5.0, 1.0, 0.0),
            (2.0, 7.0, 3.0),
            (9.0, 2.0, 8.0),
            (4.0, 4.0, 4.0),
            (1.0, 9.0, 9.0),
        ]);
        let tree = minimum_spanning_tree(&edges, 2);
        assert_eq!(tree.len(), 5);
        assert!(is_acyclic(&tree, 6));
        let mut covered = HashSet::new();
        for e in &tree {
            covered.insert(e.u);
            covered.insert(e.v);
        }
        assert_eq!(covered.len(), 6);
    }

    #[test]
    fn test_mst_disconnected_is_partial() {
        let verts: Vec<Vertex> = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (10.0, 0.0, 0.0), (11.0, 0.0, 0.0)]
            .iter()
            .map(|&(x, y, z)| Vertex::at(Vector3::new(x, y, z)))
            .collect();
        let edges = vec![Edge::between(&verts, 0, 1), Edge::between(&verts, 2, 3)];
        let tree = minimum_spanning_tree(&edges, 0);
        assert_eq!(tree, vec![Edge::between(&verts, 0, 1)]);
    }

    #[test]
    fn test_mst_empty() {
        assert!(minimum_spanning_tree(&[], 0).is_empty());
    }

    #[test]
    fn test_random_connections_keeps_tree() {
        let edges = complete(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (3.0, 0.0, 0.0), (6.0, 0.0, 0.0)]);
        let tree = minimum_spanning_tree(&edges, 0);

        let mut never = SequenceRng::new([0.99]);
        let selected = add_random_connections(&edges, &tree, 0.125, &mut never);
        assert_eq!(selected, tree);
        // One draw per non-tree edge
        assert_eq!(never.position(), edges.len() - tree.len());

        let mut always = SequenceRng::new([0.0]);
        let selected = add_random_connections(&edges, &tree, 0.125, &mut always);
        assert_eq!(selected.len(), edges.len());
        assert_eq!(&selected[..tree.len()], &tree[..]);
    }

    #[test]
    fn test_random_connections_follow_draws() {
        let edges = complete(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (3.0, 0.0, 0.0)]);
        let tree = minimum_spanning_tree(&edges, 0);
        // Only the 0-2 edge is outside the tree
        let mut rng = SequenceRng::new([0.1]);
        let selected = add_random_connections(&edges, &tree, 0.125, &mut rng);
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[2].key(), (0, 2));
    }
}
