//! Generator configuration

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_EXTRA_CONNECTION_CHANCE;
use crate::error::DungeonError;
use crate::spatial::Vector3Int;

/// Parameters for one dungeon.
///
/// Missing fields fall back to [`GeneratorConfig::default`] when
/// deserializing, so a config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid dimensions
    pub size: Vector3Int,
    /// Rooms to place; fewer may fit
    pub room_count: usize,
    pub room_min_size: Vector3Int,
    pub room_max_size: Vector3Int,
    /// Seed string; `None` picks a random seed
    pub seed: Option<String>,
    /// Probability of keeping each non-tree connection as an extra hallway
    pub extra_connection_chance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: Vector3Int::new(30, 5, 30),
            room_count: 12,
            room_min_size: Vector3Int::new(2, 1, 2),
            room_max_size: Vector3Int::new(7, 2, 7),
            seed: None,
            extra_connection_chance: DEFAULT_EXTRA_CONNECTION_CHANCE,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, size: Vector3Int) -> Self {
        self.size = size;
        self
    }

    pub fn with_room_count(mut self, room_count: usize) -> Self {
        self.room_count = room_count;
        self
    }

    pub fn with_room_size(mut self, min: Vector3Int, max: Vector3Int) -> Self {
        self.room_min_size = min;
        self.room_max_size = max;
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_extra_connection_chance(mut self, chance: f64) -> Self {
        self.extra_connection_chance = chance;
        self
    }

    /// Reject parameters the generator cannot work with
    pub fn validate(&self) -> Result<(), DungeonError> {
        let size = self.size;
        if size.x < 1 || size.y < 1 || size.z < 1 {
            return Err(DungeonError::InvalidSize { size });
        }

        let min = self.room_min_size;
        let max = self.room_max_size;
        let positive = min.x >= 1 && min.y >= 1 && min.z >= 1;
        let ordered = min.x <= max.x && min.y <= max.y && min.z <= max.z;
        if !positive || !ordered {
            return Err(DungeonError::InvalidRoomSize { min, max });
        }

        let chance = self.extra_connection_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(DungeonError::InvalidProbability { value: chance });
        }

        Ok(())
    }
}
