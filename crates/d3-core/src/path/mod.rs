//! Grid pathfinding for hallway routing

mod pathfinder;
mod queue;

pub use pathfinder::{DungeonPathfinder3D, GraphNode3D, NEIGHBORS, PathCost, stair_footprint};
pub use queue::IndexedPriorityQueue;
