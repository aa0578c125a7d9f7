//! The finished dungeon and its consistency checks

use serde::{Deserialize, Serialize};

use super::{CellType3D, DungeonStats, Room3D, RoomId, StairCase};
use crate::error::DungeonError;
use crate::spatial::Grid3D;

/// Everything one generation run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub seed: String,
    pub grid: Grid3D<CellType3D>,
    pub rooms: Vec<Room3D>,
    pub stair_cases: Vec<StairCase>,
    /// Room pairs selected for hallways
    pub connections: Vec<(RoomId, RoomId)>,
    pub stats: DungeonStats,
}

impl Dungeon {
    /// Check the structural invariants of a generated dungeon.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), DungeonError> {
        self.validate_rooms()?;
        self.validate_stairs()?;
        Ok(())
    }

    fn validate_rooms(&self) -> Result<(), DungeonError> {
        let grid_bounds = self.grid.bounds();

        for (i, room) in self.rooms.iter().enumerate() {
            let id = RoomId(i);
            if room.bounds.is_empty() {
                return Err(violation(format!("room {id} is empty")));
            }
            if !grid_bounds.contains_bounds(&room.bounds) {
                return Err(violation(format!(
                    "room {id} at {} size {} leaves the grid",
                    room.bounds.position, room.bounds.size
                )));
            }
            for (j, other) in self.rooms.iter().enumerate().skip(i + 1) {
                if room.crowds(other) {
                    return Err(violation(format!("rooms {id} and {} crowd each other", RoomId(j))));
                }
            }
            for pos in room.bounds.positions() {
                let expected = if room.is_center_axis(pos) {
                    CellType3D::RoomCenterAxis
                } else {
                    CellType3D::Room
                };
                let found = self.grid[pos];
                if found != expected {
                    return Err(violation(format!(
                        "room {id} cell {pos} is {found}, expected {expected}"
                    )));
                }
            }
        }

        // Room cells outside every room
        let room_volume: i64 = self.rooms.iter().map(|r| r.bounds.size.volume()).sum();
        let room_cells = self.grid.values().iter().filter(|c| c.is_room()).count() as i64;
        if room_cells != room_volume {
            return Err(violation(format!(
                "{room_cells} room cells in grid but rooms cover {room_volume}"
            )));
        }
        Ok(())
    }

    fn validate_stairs(&self) -> Result<(), DungeonError> {
        for (i, stairs) in self.stair_cases.iter().enumerate() {
            if !stairs.is_well_formed() {
                return Err(violation(format!("staircase {i} is malformed: {stairs:?}")));
            }
            for cell in stairs.cells {
                match self.grid.get(cell) {
                    Some(CellType3D::Stairs) => {}
                    Some(other) => {
                        return Err(violation(format!("staircase {i} cell {cell} is {other}")));
                    }
                    None => {
                        return Err(violation(format!("staircase {i} cell {cell} is out of bounds")));
                    }
                }
            }
        }

        let stair_cells = self
            .grid
            .values()
            .iter()
            .filter(|&&c| c == CellType3D::Stairs)
            .count();
        if stair_cells != 4 * self.stair_cases.len() {
            return Err(violation(format!(
                "{stair_cells} stair cells in grid for {} staircases",
                self.stair_cases.len()
            )));
        }
        Ok(())
    }
}

fn violation(message: String) -> DungeonError {
    DungeonError::InvariantViolation(message)
}
