//! Staircases carved by hallways

use serde::{Deserialize, Serialize};

use crate::path::stair_footprint;
use crate::spatial::Vector3Int;

/// One staircase: two steps out on the level it leaves and the same two
/// steps on the level it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StairCase {
    /// `[from+h, from+2h, from+v+h, from+v+2h]`
    pub cells: [Vector3Int; 4],
    /// Unit horizontal direction of travel
    pub direction: Vector3Int,
    /// +1 going up, -1 going down
    pub vertical: i32,
}

impl StairCase {
    /// Build the staircase for a path step from `from` to `to`
    pub fn between(from: Vector3Int, to: Vector3Int) -> Self {
        let delta = to - from;
        Self {
            cells: stair_footprint(from, delta),
            direction: delta.horizontal().clamp_unit(),
            vertical: delta.y.signum(),
        }
    }

    /// Check the cells form two horizontally adjacent pairs, one level apart,
    /// along `direction`
    pub fn is_well_formed(&self) -> bool {
        let [a, b, c, d] = self.cells;
        let v = Vector3Int::new(0, self.vertical, 0);
        let unit = self.direction.x.abs() + self.direction.z.abs() == 1 && self.direction.y == 0;
        unit && self.vertical.abs() == 1 && b - a == self.direction && d - c == self.direction && c - a == v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_going_up() {
        let stairs = StairCase::between(Vector3Int::new(1, 0, 1), Vector3Int::new(4, 1, 1));
        assert_eq!(stairs.direction, Vector3Int::new(1, 0, 0));
        assert_eq!(stairs.vertical, 1);
        assert_eq!(
            stairs.cells,
            [
                Vector3Int::new(2, 0, 1),
                Vector3Int::new(3, 0, 1),
                Vector3Int::new(2, 1, 1),
                Vector3Int::new(3, 1, 1),
            ]
        );
        assert!(stairs.is_well_formed());
    }

    #[test]
    fn test_between_going_down() {
        let stairs = StairCase::between(Vector3Int::new(2, 2, 5), Vector3Int::new(2, 1, 2));
        assert_eq!(stairs.direction, Vector3Int::new(0, 0, -1));
        assert_eq!(stairs.vertical, -1);
        assert_eq!(stairs.cells[3], Vector3Int::new(2, 1, 3));
        assert!(stairs.is_well_formed());
    }

    #[test]
    fn test_malformed() {
        let mut stairs = StairCase::between(Vector3Int::ZERO, Vector3Int::new(3, 1, 0));
        stairs.cells[1] = Vector3Int::new(5, 0, 0);
        assert!(!stairs.is_well_formed());
    }
}
