//! Axis-aligned integer bounds
//!
//! Plays the role the free-rectangle list plays for a flat level: room
//! footprints and the buffer zones used to keep rooms apart.

use serde::{Deserialize, Serialize};

use super::Vector3Int;

/// An axis-aligned box of grid cells. `max` is exclusive on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundsInt3D {
    pub position: Vector3Int,
    pub size: Vector3Int,
}

impl BoundsInt3D {
    pub const fn new(position: Vector3Int, size: Vector3Int) -> Self {
        Self { position, size }
    }

    /// Inclusive lower corner
    pub fn min(&self) -> Vector3Int {
        self.position
    }

    /// Exclusive upper corner
    pub fn max(&self) -> Vector3Int {
        self.position + self.size
    }

    pub fn x_min(&self) -> i32 {
        self.position.x
    }

    pub fn x_max(&self) -> i32 {
        self.position.x + self.size.x
    }

    pub fn y_min(&self) -> i32 {
        self.position.y
    }

    pub fn y_max(&self) -> i32 {
        self.position.y + self.size.y
    }

    pub fn z_min(&self) -> i32 {
        self.position.z
    }

    pub fn z_max(&self) -> i32 {
        self.position.z + self.size.z
    }

    /// Center cell, rounding down on every axis
    pub fn center(&self) -> Vector3Int {
        Vector3Int::new(
            (2 * self.position.x + self.size.x).div_euclid(2),
            (2 * self.position.y + self.size.y).div_euclid(2),
            (2 * self.position.z + self.size.z).div_euclid(2),
        )
    }

    /// Check if a cell lies inside the bounds
    pub fn contains(&self, pos: Vector3Int) -> bool {
        pos.x >= self.x_min()
            && pos.x < self.x_max()
            && pos.y >= self.y_min()
            && pos.y < self.y_max()
            && pos.z >= self.z_min()
            && pos.z < self.z_max()
    }

    /// Check if `other` lies entirely inside these bounds
    pub fn contains_bounds(&self, other: &BoundsInt3D) -> bool {
        other.x_min() >= self.x_min()
            && other.x_max() <= self.x_max()
            && other.y_min() >= self.y_min()
            && other.y_max() <= self.y_max()
            && other.z_min() >= self.z_min()
            && other.z_max() <= self.z_max()
    }

    /// Check if the two boxes overlap on all three axes
    pub fn intersects(&self, other: &BoundsInt3D) -> bool {
        !(self.x_min() >= other.x_max()
            || self.x_max() <= other.x_min()
            || self.y_min() >= other.y_max()
            || self.y_max() <= other.y_min()
            || self.z_min() >= other.z_max()
            || self.z_max() <= other.z_min())
    }

    /// Grow the box by `margin` on both sides of every axis
    pub fn expanded(&self, margin: Vector3Int) -> Self {
        Self::new(self.position - margin, self.size + margin * 2)
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0 || self.size.z <= 0
    }

    /// Lazily enumerate every cell inside the bounds, x fastest
    pub fn positions(&self) -> impl Iterator<Item = Vector3Int> + use<> {
        let min = self.min();
        let max = self.max();
        (min.z..max.z).flat_map(move |z| {
            (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| Vector3Int::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(p: (i32, i32, i32), s: (i32, i32, i32)) -> BoundsInt3D {
        BoundsInt3D::new(p.into(), s.into())
    }

    #[test]
    fn test_center_floors() {
        assert_eq!(b((2, 0, 2), (3, 1, 4)).center(), Vector3Int::new(3, 0, 4));
        assert_eq!(b((-3, 0, 0), (2, 2, 1)).center(), Vector3Int::new(-2, 1, 0));
    }

    #[test]
    fn test_contains() {
        let bounds = b((1, 1, 1), (2, 2, 2));
        assert!(bounds.contains(Vector3Int::new(1, 1, 1)));
        assert!(bounds.contains(Vector3Int::new(2, 2, 2)));
        assert!(!bounds.contains(Vector3Int::new(3, 2, 2)));
        assert!(!bounds.contains(Vector3Int::new(0, 1, 1)));
    }

    #[test]
    fn test_intersects() {
        let a = b((0, 0, 0), (3, 1, 3));
        // Touching faces do not intersect (max is exclusive)
        assert!(!a.intersects(&b((3, 0, 0), (2, 1, 2))));
        assert!(a.intersects(&b((2, 0, 2), (2, 1, 2))));
        // Stacked directly above does not intersect
        assert!(!a.intersects(&b((0, 1, 0), (3, 1, 3))));
    }

    #[test]
    fn test_expanded() {
        let a = b((2, 2, 2), (1, 1, 1)).expanded(Vector3Int::new(1, 0, 1));
        assert_eq!(a, b((1, 2, 1), (3, 1, 3)));
    }

    #[test]
    fn test_positions() {
        let bounds = b((0, 0, 0), (2, 1, 3));
        let all: Vec<_> = bounds.positions().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Vector3Int::new(0, 0, 0));
        assert_eq!(all[1], Vector3Int::new(1, 0, 0));
        assert!(all.iter().all(|p| bounds.contains(*p)));
        assert_eq!(b((0, 0, 0), (0, 1, 1)).positions().count(), 0);
    }

    #[test]
    fn test_contains_bounds() {
        let grid = b((0, 0, 0), (10, 10, 10));
        assert!(grid.contains_bounds(&b((7, 0, 0), (3, 3, 3))));
        assert!(!grid.contains_bounds(&b((8, 0, 0), (3, 3, 3))));
        assert!(!grid.contains_bounds(&b((-1, 0, 0), (3, 3, 3))));
    }
}
