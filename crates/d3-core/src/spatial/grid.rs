//! Dense 3D grid
//!
//! One flat backing `Vec`, indexed `x + size.x*y + size.x*size.y*z` after the
//! offset has been applied. Logical coordinates may be negative when the
//! offset is non-zero.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::{BoundsInt3D, Vector3Int};
use crate::error::DungeonError;

/// Dense 3D array addressed by `Vector3Int`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawGrid<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Grid3D<T> {
    data: Vec<T>,
    size: Vector3Int,
    offset: Vector3Int,
}

/// Unchecked serialized form of [`Grid3D`]
#[derive(Deserialize)]
struct RawGrid<T> {
    data: Vec<T>,
    size: Vector3Int,
    offset: Vector3Int,
}

impl<T> TryFrom<RawGrid<T>> for Grid3D<T> {
    type Error = DungeonError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let RawGrid { data, size, offset } = raw;
        let non_negative = size.x >= 0 && size.y >= 0 && size.z >= 0;
        if !non_negative || usize::try_from(size.volume()).ok() != Some(data.len()) {
            return Err(DungeonError::MalformedGrid {
                size,
                len: data.len(),
            });
        }
        Ok(Self { data, size, offset })
    }
}

impl<T: Clone> Grid3D<T> {
    /// Create a grid filled with `value`
    pub fn new(size: Vector3Int, offset: Vector3Int, value: T) -> Self {
        let len = Self::checked_len(size);
        Self {
            data: vec![value; len],
            size,
            offset,
        }
    }

    /// Overwrite every cell with `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Clone + Default> Grid3D<T> {
    /// Create a grid filled with `T::default()` and no offset
    pub fn with_size(size: Vector3Int) -> Self {
        Self::new(size, Vector3Int::ZERO, T::default())
    }
}

impl<T> Grid3D<T> {
    /// Create a grid whose cells are produced by `f(position)`
    pub fn from_fn(size: Vector3Int, offset: Vector3Int, mut f: impl FnMut(Vector3Int) -> T) -> Self {
        let len = Self::checked_len(size);
        let mut data = Vec::with_capacity(len);
        for pos in BoundsInt3D::new(offset, size).positions() {
            data.push(f(pos));
        }
        Self { data, size, offset }
    }

    fn checked_len(size: Vector3Int) -> usize {
        assert!(
            size.x >= 0 && size.y >= 0 && size.z >= 0,
            "grid size must be non-negative, got {size}"
        );
        size.volume() as usize
    }

    pub fn size(&self) -> Vector3Int {
        self.size
    }

    pub fn offset(&self) -> Vector3Int {
        self.offset
    }

    /// The logical region covered by the grid
    pub fn bounds(&self) -> BoundsInt3D {
        BoundsInt3D::new(self.offset, self.size)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if a logical position addresses a cell of this grid
    pub fn in_bounds(&self, pos: Vector3Int) -> bool {
        let p = pos - self.offset;
        p.x >= 0 && p.x < self.size.x && p.y >= 0 && p.y < self.size.y && p.z >= 0 && p.z < self.size.z
    }

    /// Flat index of a logical position, or `None` if out of bounds
    pub fn index_of(&self, pos: Vector3Int) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let p = pos - self.offset;
        Some(
            p.x as usize
                + self.size.x as usize * p.y as usize
                + self.size.x as usize * self.size.y as usize * p.z as usize,
        )
    }

    /// Logical position of a flat index
    pub fn position_of(&self, index: usize) -> Vector3Int {
        let sx = self.size.x as usize;
        let sxy = sx * self.size.y as usize;
        let z = index / sxy;
        let rem = index % sxy;
        Vector3Int::new((rem % sx) as i32, (rem / sx) as i32, z as i32) + self.offset
    }

    pub fn get(&self, pos: Vector3Int) -> Option<&T> {
        self.index_of(pos).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, pos: Vector3Int) -> Option<&mut T> {
        self.index_of(pos).map(|i| &mut self.data[i])
    }

    /// Write a cell, failing if `pos` is outside the grid
    pub fn set(&mut self, pos: Vector3Int, value: T) -> Result<(), DungeonError> {
        let size = self.size;
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(DungeonError::OutOfBounds { pos, size }),
        }
    }

    /// Access by flat index
    pub fn at_index(&self, index: usize) -> &T {
        &self.data[index]
    }

    /// Mutable access by flat index
    pub fn at_index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }

    /// Iterate over `(position, value)` pairs in flat-index order
    pub fn iter(&self) -> impl Iterator<Item = (Vector3Int, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, value)| (self.position_of(i), value))
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// In-bounds face neighbors of `pos` (±x, ±y, ±z)
    pub fn neighbors6(&self, pos: Vector3Int) -> impl Iterator<Item = (Vector3Int, &T)> + '_ {
        const FACES: [Vector3Int; 6] = [
            Vector3Int::new(1, 0, 0),
            Vector3Int::new(-1, 0, 0),
            Vector3Int::new(0, 1, 0),
            Vector3Int::new(0, -1, 0),
            Vector3Int::new(0, 0, 1),
            Vector3Int::new(0, 0, -1),
        ];
        FACES
            .into_iter()
            .filter_map(move |d| self.get(pos + d).map(|v| (pos + d, v)))
    }
}

impl<T> Index<Vector3Int> for Grid3D<T> {
    type Output = T;

    fn index(&self, pos: Vector3Int) -> &T {
        match self.index_of(pos) {
            Some(i) => &self.data[i],
            None => panic!(
                "grid position {pos} out of bounds (size {}, offset {})",
                self.size, self.offset
            ),
        }
    }
}

impl<T> IndexMut<Vector3Int> for Grid3D<T> {
    fn index_mut(&mut self, pos: Vector3Int) -> &mut T {
        match self.index_of(pos) {
            Some(i) => &mut self.data[i],
            None => panic!(
                "grid position {pos} out of bounds (size {}, offset {})",
                self.size, self.offset
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_index_layout() {
        let grid: Grid3D<u8> = Grid3D::with_size(Vector3Int::new(4, 3, 2));
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.index_of(Vector3Int::new(1, 0, 0)), Some(1));
        assert_eq!(grid.index_of(Vector3Int::new(0, 1, 0)), Some(4));
        assert_eq!(grid.index_of(Vector3Int::new(0, 0, 1)), Some(12));
        assert_eq!(grid.index_of(Vector3Int::new(3, 2, 1)), Some(23));
        for i in 0..grid.len() {
            assert_eq!(grid.index_of(grid.position_of(i)), Some(i));
        }
    }

    #[test]
    fn test_offset_addressing() {
        let mut grid = Grid3D::new(Vector3Int::new(3, 3, 3), Vector3Int::new(-1, -1, -1), 0u32);
        assert!(grid.in_bounds(Vector3Int::new(-1, -1, -1)));
        assert!(grid.in_bounds(Vector3Int::new(1, 1, 1)));
        assert!(!grid.in_bounds(Vector3Int::new(2, 0, 0)));
        grid[Vector3Int::new(-1, 0, 1)] = 7;
        assert_eq!(grid.get(Vector3Int::new(-1, 0, 1)), Some(&7));
        assert_eq!(grid.position_of(0), Vector3Int::new(-1, -1, -1));
    }

    #[test]
    fn test_checked_set() {
        let mut grid: Grid3D<u8> = Grid3D::with_size(Vector3Int::new(2, 2, 2));
        assert!(grid.set(Vector3Int::new(1, 1, 1), 3).is_ok());
        let err = grid.set(Vector3Int::new(2, 0, 0), 3).unwrap_err();
        assert!(matches!(err, DungeonError::OutOfBounds { .. }));
        assert_eq!(grid.get(Vector3Int::new(-1, 0, 0)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let grid: Grid3D<u8> = Grid3D::with_size(Vector3Int::new(2, 2, 2));
        let _value: u8 = grid[Vector3Int::new(0, 2, 0)];
    }

    #[test]
    fn test_from_fn_matches_positions() {
        let grid = Grid3D::from_fn(Vector3Int::new(2, 2, 2), Vector3Int::ZERO, |p| p);
        for (pos, value) in grid.iter() {
            assert_eq!(pos, *value);
        }
    }

    #[test]
    fn test_neighbors6_at_corner() {
        let grid: Grid3D<u8> = Grid3D::with_size(Vector3Int::new(3, 3, 3));
        assert_eq!(grid.neighbors6(Vector3Int::ZERO).count(), 3);
        assert_eq!(grid.neighbors6(Vector3Int::ONE).count(), 6);
    }

    #[test]
    fn test_json_checks_cell_count() {
        let mut grid: Grid3D<u8> = Grid3D::with_size(Vector3Int::new(2, 1, 2));
        grid[Vector3Int::new(1, 0, 1)] = 5;
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid3D<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let short = r#"{"data":[0,0,0],"size":{"x":2,"y":1,"z":2},"offset":{"x":0,"y":0,"z":0}}"#;
        let err = serde_json::from_str::<Grid3D<u8>>(short).unwrap_err();
        assert!(err.to_string().contains("does not fit size"));

        let negative = r#"{"data":[0],"size":{"x":-1,"y":-1,"z":1},"offset":{"x":0,"y":0,"z":0}}"#;
        assert!(serde_json::from_str::<Grid3D<u8>>(negative).is_err());
    }

    #[test]
    fn test_fill() {
        let mut grid: Grid3D<u8> = Grid3D::with_size(Vector3Int::new(2, 1, 2));
        grid.fill(9);
        assert!(grid.values().iter().all(|&v| v == 9));
    }
}
