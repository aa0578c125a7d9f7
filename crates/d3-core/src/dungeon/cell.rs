//! Grid cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What occupies one grid cell
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum CellType3D {
    /// Solid rock
    #[default]
    None = 0,
    Room = 1,
    /// Room cell on the room's center line along x or z; door candidate
    RoomCenterAxis = 2,
    Hallway = 3,
    Stairs = 4,
}

impl CellType3D {
    /// ASCII symbol for top-down level maps
    pub const fn symbol(&self) -> char {
        match self {
            CellType3D::None => ' ',
            CellType3D::Room => '.',
            CellType3D::RoomCenterAxis => '+',
            CellType3D::Hallway => '#',
            CellType3D::Stairs => '>',
        }
    }

    /// Anything but rock
    pub const fn is_walkable(&self) -> bool {
        !matches!(self, CellType3D::None)
    }

    /// Part of a room interior
    pub const fn is_room(&self) -> bool {
        matches!(self, CellType3D::Room | CellType3D::RoomCenterAxis)
    }
}
