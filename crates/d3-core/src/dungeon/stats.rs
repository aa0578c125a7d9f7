//! Generation statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::CellType3D;
use crate::spatial::{Grid3D, Vector3Int};

/// Summary of one generated dungeon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DungeonStats {
    pub seed: String,
    pub size: Vector3Int,
    pub requested_rooms: usize,
    pub rooms_placed: usize,
    /// Connections selected for routing (tree plus extras)
    pub connections: usize,
    pub hallways_routed: usize,
    pub hallways_failed: usize,
    pub stair_cases: usize,
    /// Cells per type; every type is listed, zero counts included
    pub cell_counts: BTreeMap<CellType3D, usize>,
}

impl DungeonStats {
    /// Total cells counted, always the grid volume
    pub fn total_cells(&self) -> usize {
        self.cell_counts.values().sum()
    }

    pub fn count(&self, cell: CellType3D) -> usize {
        self.cell_counts.get(&cell).copied().unwrap_or(0)
    }
}

/// Histogram of cell types over the whole grid
pub fn count_cells(grid: &Grid3D<CellType3D>) -> BTreeMap<CellType3D, usize> {
    let mut counts: BTreeMap<CellType3D, usize> = CellType3D::iter().map(|c| (c, 0)).collect();
    for cell in grid.values() {
        *counts.entry(*cell).or_insert(0) += 1;
    }
    counts
}
