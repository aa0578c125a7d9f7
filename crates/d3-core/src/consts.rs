//! Generation constants

use crate::spatial::Vector3Int;

/// Room placement attempts per requested room
pub const PLACEMENT_ATTEMPTS_PER_ROOM: usize = 3;

/// Horizontal margin kept around every room when testing for overlap.
/// There is no vertical margin: rooms may stack directly on top of each other.
pub const ROOM_BUFFER: Vector3Int = Vector3Int::new(1, 0, 1);

/// Default share of non-tree edges added back as extra hallways
pub const DEFAULT_EXTRA_CONNECTION_CHANCE: f64 = 0.125;

/// Extra cost of stepping through another room's interior
pub const ROOM_CELL_PENALTY: f64 = 5.0;

/// Extra cost of carving a fresh hallway cell
pub const EMPTY_CELL_PENALTY: f64 = 1.0;

/// Flat cost of a staircase move
pub const STAIR_PENALTY: f64 = 100.0;

/// Horizontal cells a staircase spans
pub const STAIR_RUN: i32 = 3;

/// Squared distance under which two vertices are considered the same
pub const VERTEX_EPSILON_SQ: f64 = 0.01 * 0.01;
