//! Rooms

use serde::{Deserialize, Serialize};

use crate::consts::ROOM_BUFFER;
use crate::spatial::{BoundsInt3D, Vector3Int};

/// Index of a room in the generator's room list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub usize);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An axis-aligned box of room cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room3D {
    pub bounds: BoundsInt3D,
}

impl Room3D {
    pub fn new(position: Vector3Int, size: Vector3Int) -> Self {
        Self {
            bounds: BoundsInt3D::new(position, size),
        }
    }

    /// Center cell (rounded down)
    pub fn center(&self) -> Vector3Int {
        self.bounds.center()
    }

    /// Bounds grown by the horizontal buffer used for overlap tests
    pub fn buffered(&self) -> BoundsInt3D {
        self.bounds.expanded(ROOM_BUFFER)
    }

    pub fn intersects(&self, other: &Room3D) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    /// Check if two rooms are too close: their buffered bounds overlap
    pub fn crowds(&self, other: &Room3D) -> bool {
        self.buffered().intersects(&other.buffered())
    }

    pub fn contains(&self, pos: Vector3Int) -> bool {
        self.bounds.contains(pos)
    }

    /// Check if a room cell lies on the center line along x or z
    pub fn is_center_axis(&self, pos: Vector3Int) -> bool {
        let center = self.center();
        pos.x == center.x || pos.z == center.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rounds_down() {
        let room = Room3D::new(Vector3Int::new(2, 0, 4), Vector3Int::new(4, 1, 3));
        assert_eq!(room.center(), Vector3Int::new(4, 0, 5));
    }

    #[test]
    fn test_buffer_is_horizontal_only() {
        let room = Room3D::new(Vector3Int::new(2, 1, 2), Vector3Int::new(2, 1, 2));
        let buffered = room.buffered();
        assert_eq!(buffered.min(), Vector3Int::new(1, 1, 1));
        assert_eq!(buffered.max(), Vector3Int::new(5, 2, 5));
    }

    #[test]
    fn test_stacked_rooms_do_not_crowd() {
        let lower = Room3D::new(Vector3Int::new(0, 0, 0), Vector3Int::new(3, 1, 3));
        let upper = Room3D::new(Vector3Int::new(0, 1, 0), Vector3Int::new(3, 1, 3));
        assert!(!lower.crowds(&upper));
        assert!(!lower.intersects(&upper));
    }

    #[test]
    fn test_neighbors_one_apart_crowd() {
        let a = Room3D::new(Vector3Int::new(0, 0, 0), Vector3Int::new(3, 1, 3));
        let b = Room3D::new(Vector3Int::new(4, 0, 0), Vector3Int::new(3, 1, 3));
        let c = Room3D::new(Vector3Int::new(5, 0, 0), Vector3Int::new(3, 1, 3));
        assert!(!a.intersects(&b));
        assert!(a.crowds(&b));
        assert!(!a.crowds(&c));
    }

    #[test]
    fn test_center_axis() {
        let room = Room3D::new(Vector3Int::ZERO, Vector3Int::new(5, 1, 5));
        assert!(room.is_center_axis(Vector3Int::new(2, 0, 0)));
        assert!(room.is_center_axis(Vector3Int::new(0, 0, 2)));
        assert!(!room.is_center_axis(Vector3Int::new(1, 0, 1)));
    }
}
