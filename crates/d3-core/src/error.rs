//! Error types

use thiserror::Error;

use crate::spatial::Vector3Int;

/// Errors raised by configuration checks, checked grid access and validation.
///
/// "No solution" outcomes (too few rooms, unreachable hallways, too few
/// vertices to triangulate) are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DungeonError {
    #[error("Invalid grid size {size}: every axis must be at least 1")]
    InvalidSize { size: Vector3Int },

    #[error("Invalid room size range: min {min} max {max}")]
    InvalidRoomSize { min: Vector3Int, max: Vector3Int },

    #[error("Invalid connection probability {value}: must be within [0, 1]")]
    InvalidProbability { value: f64 },

    #[error("Position {pos} is outside grid of size {size}")]
    OutOfBounds { pos: Vector3Int, size: Vector3Int },

    #[error("Grid data has {len} cells, which does not fit size {size}")]
    MalformedGrid { size: Vector3Int, len: usize },

    #[error("Dungeon invariant violated: {0}")]
    InvariantViolation(String),
}
