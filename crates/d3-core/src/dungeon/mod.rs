//! Dungeon model and generation

mod cell;
mod config;
mod generator;
mod render;
mod room;
mod stairs;
mod stats;
mod validate;

pub use cell::CellType3D;
pub use config::GeneratorConfig;
pub use generator::{DungeonGenerator3D, generate_dungeon, hallway_cost};
pub use render::{render_level, render_levels};
pub use room::{Room3D, RoomId};
pub use stairs::StairCase;
pub use stats::{DungeonStats, count_cells};
pub use validate::Dungeon;
