//! 3D hallway pathfinder
//!
//! A* over the dungeon grid with flat moves and staircase moves. The goal
//! heuristic is not kept separately: callers fold distance-to-goal into the
//! step cost they return, so the search itself runs like Dijkstra over those
//! already-biased costs. Path shapes depend on this, so it stays that way.
//!
//! Every node carries the set of cells already on its best path. Staircases
//! may not cut through any of those cells, which keeps a single hallway from
//! stacking stairs inside its own footprint.

use hashbrown::HashSet;

use super::IndexedPriorityQueue;
use crate::consts::STAIR_RUN;
use crate::spatial::{Grid3D, Vector3Int};

/// Neighbor offsets: 4 flat moves, then 8 staircase moves
pub const NEIGHBORS: [Vector3Int; 12] = [
    Vector3Int::new(1, 0, 0),
    Vector3Int::new(-1, 0, 0),
    Vector3Int::new(0, 0, 1),
    Vector3Int::new(0, 0, -1),
    Vector3Int::new(STAIR_RUN, 1, 0),
    Vector3Int::new(-STAIR_RUN, 1, 0),
    Vector3Int::new(0, 1, STAIR_RUN),
    Vector3Int::new(0, 1, -STAIR_RUN),
    Vector3Int::new(STAIR_RUN, -1, 0),
    Vector3Int::new(-STAIR_RUN, -1, 0),
    Vector3Int::new(0, -1, STAIR_RUN),
    Vector3Int::new(0, -1, -STAIR_RUN),
];

/// The four cells a staircase from `from` along `offset` occupies:
/// one and two steps out, on the starting level and on the level it reaches.
pub fn stair_footprint(from: Vector3Int, offset: Vector3Int) -> [Vector3Int; 4] {
    let horizontal = offset.horizontal().clamp_unit();
    let vertical = Vector3Int::new(0, offset.y, 0);
    [
        from + horizontal,
        from + horizontal * 2,
        from + vertical + horizontal,
        from + vertical + horizontal * 2,
    ]
}

/// Result of a cost query for one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathCost {
    pub traversable: bool,
    pub cost: f64,
    pub is_stairs: bool,
}

impl PathCost {
    /// A step that may not be taken
    pub const BLOCKED: Self = Self {
        traversable: false,
        cost: 0.0,
        is_stairs: false,
    };

    pub fn flat(cost: f64) -> Self {
        Self {
            traversable: true,
            cost,
            is_stairs: false,
        }
    }

    pub fn stairs(cost: f64) -> Self {
        Self {
            traversable: true,
            cost,
            is_stairs: true,
        }
    }
}

/// Per-cell search state
#[derive(Debug, Clone)]
pub struct GraphNode3D {
    pub position: Vector3Int,
    /// Flat index of the node this one was reached from
    pub previous: Option<usize>,
    pub cost: f64,
    /// Cells already on the best path to this node
    pub previous_set: HashSet<Vector3Int>,
}

impl GraphNode3D {
    pub fn new(position: Vector3Int) -> Self {
        Self {
            position,
            previous: None,
            cost: f64::INFINITY,
            previous_set: HashSet::new(),
        }
    }

    /// Forget everything from the previous search
    pub fn reset(&mut self) {
        self.previous = None;
        self.cost = f64::INFINITY;
        self.previous_set.clear();
    }
}

/// Reusable pathfinder. Scratch state is reset at the start of every search,
/// so one instance can serve any number of sequential searches.
#[derive(Debug, Clone)]
pub struct DungeonPathfinder3D {
    grid: Grid3D<GraphNode3D>,
    queue: IndexedPriorityQueue<usize>,
    closed: HashSet<usize>,
}

impl DungeonPathfinder3D {
    pub fn new(size: Vector3Int) -> Self {
        Self::with_offset(size, Vector3Int::ZERO)
    }

    pub fn with_offset(size: Vector3Int, offset: Vector3Int) -> Self {
        let grid = Grid3D::from_fn(size, offset, GraphNode3D::new);
        let cells = grid.len();
        Self {
            grid,
            queue: IndexedPriorityQueue::with_capacity(cells),
            closed: HashSet::with_capacity(cells),
        }
    }

    pub fn size(&self) -> Vector3Int {
        self.grid.size()
    }

    /// Search state left over from the last search
    pub fn node(&self, pos: Vector3Int) -> Option<&GraphNode3D> {
        self.grid.get(pos)
    }

    fn reset(&mut self) {
        for node in self.grid.values_mut() {
            node.reset();
        }
        self.queue.clear();
        self.closed.clear();
    }

    /// Find a route from `start` to `end`, both included.
    ///
    /// `cost_fn(from, to)` prices every step; non-traversable steps are
    /// pruned. Returns `None` if `end` cannot be reached, which is a normal
    /// outcome rather than an error.
    pub fn find_path<F>(
        &mut self,
        start: Vector3Int,
        end: Vector3Int,
        mut cost_fn: F,
    ) -> Option<Vec<Vector3Int>>
    where
        F: FnMut(&GraphNode3D, &GraphNode3D) -> PathCost,
    {
        self.reset();

        let start_idx = self.grid.index_of(start)?;
        self.grid.index_of(end)?;

        self.grid.at_index_mut(start_idx).cost = 0.0;
        self.queue.enqueue(start_idx, 0.0);

        while let Some(current) = self.queue.dequeue() {
            self.closed.insert(current);

            let position = self.grid.at_index(current).position;
            if position == end {
                return Some(self.reconstruct_path(current));
            }

            for offset in NEIGHBORS {
                let Some(next) = self.grid.index_of(position + offset) else {
                    continue;
                };
                if self.closed.contains(&next) {
                    continue;
                }

                let node = self.grid.at_index(current);
                let neighbor = self.grid.at_index(next);
                if node.previous_set.contains(&neighbor.position) {
                    continue;
                }

                let path_cost = cost_fn(node, neighbor);
                if !path_cost.traversable {
                    continue;
                }

                let footprint = path_cost
                    .is_stairs
                    .then(|| stair_footprint(position, offset));
                if let Some(cells) = &footprint {
                    if cells.iter().any(|c| node.previous_set.contains(c)) {
                        continue;
                    }
                }

                let new_cost = node.cost + path_cost.cost;
                if new_cost >= neighbor.cost {
                    continue;
                }

                let mut previous_set = node.previous_set.clone();
                previous_set.insert(position);
                if let Some(cells) = footprint {
                    previous_set.extend(cells);
                }

                let neighbor = self.grid.at_index_mut(next);
                neighbor.previous = Some(current);
                neighbor.cost = new_cost;
                neighbor.previous_set = previous_set;

                self.queue.enqueue(next, new_cost);
            }
        }

        None
    }

    /// Walk `previous` links back to the start, then reverse
    fn reconstruct_path(&self, end: usize) -> Vec<Vector3Int> {
        let mut stack = Vec::new();
        let mut current = Some(end);
        while let Some(index) = current {
            let node = self.grid.at_index(index);
            stack.push(node.position);
            current = node.previous;
        }
        stack.reverse();
        stack
    }
}
