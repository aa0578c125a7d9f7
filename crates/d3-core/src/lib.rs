//! 3D procedural dungeon generation
//!
//! Rooms are scattered through a 3D grid, connected along a Delaunay
//! tetrahedralization of their centers (a minimum spanning tree plus a few
//! random loops), and joined by hallways routed with a stair-aware A*.
//!
//! ```no_run
//! use d3_core::{GeneratorConfig, generate_dungeon, render_levels};
//!
//! let dungeon = generate_dungeon(GeneratorConfig::default().with_seed("demo")).unwrap();
//! print!("{}", render_levels(&dungeon.grid));
//! ```

pub mod consts;
pub mod dungeon;
pub mod error;
pub mod graph;
pub mod path;
pub mod spatial;

pub use d3_rng::{RandomSource, SeededRng, SequenceRng};
pub use dungeon::{
    CellType3D, Dungeon, DungeonGenerator3D, DungeonStats, GeneratorConfig, Room3D, RoomId,
    StairCase, generate_dungeon, render_level, render_levels,
};
pub use error::DungeonError;
pub use graph::{Delaunay3D, Edge, Vertex, add_random_connections, minimum_spanning_tree};
pub use path::{DungeonPathfinder3D, GraphNode3D, IndexedPriorityQueue, PathCost};
pub use spatial::{BoundsInt3D, Grid3D, Vector3, Vector3Int};
