//! ASCII level maps

use std::fmt::Write;

use super::CellType3D;
use crate::spatial::{Grid3D, Vector3Int};

/// Render one level as a top-down map, one row per z, one column per x.
///
/// Levels outside the grid render as an empty string.
pub fn render_level(grid: &Grid3D<CellType3D>, y: i32) -> String {
    let bounds = grid.bounds();
    if y < bounds.y_min() || y >= bounds.y_max() {
        return String::new();
    }

    let width = (bounds.x_max() - bounds.x_min()) as usize + 1;
    let mut out = String::with_capacity(width * bounds.size.z.max(0) as usize);
    for z in bounds.z_min()..bounds.z_max() {
        for x in bounds.x_min()..bounds.x_max() {
            let cell = grid
                .get(Vector3Int::new(x, y, z))
                .copied()
                .unwrap_or_default();
            out.push(cell.symbol());
        }
        out.push('\n');
    }
    out
}

/// Render every level, bottom first, each under a `Level N` header
pub fn render_levels(grid: &Grid3D<CellType3D>) -> String {
    let bounds = grid.bounds();
    let mut out = String::new();
    for y in bounds.y_min()..bounds.y_max() {
        let _ = writeln!(out, "Level {y}");
        out.push_str(&render_level(grid, y));
        out.push('\n');
    }
    out
}
