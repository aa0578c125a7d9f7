//! Dungeon generation
//!
//! One forward pass:
//! 1. Scatter rooms at random, rejecting any that crowd an earlier room or
//!    leave the grid.
//! 2. Tetrahedralize the room centers to get candidate connections.
//! 3. Keep a minimum spanning tree of them plus a few random extras so the
//!    layout has loops.
//! 4. Route a hallway for every kept connection, in order. Each route sees
//!    the cells carved by the routes before it.

use d3_rng::{RandomSource, SeededRng};
use log::{debug, trace, warn};

use super::stats::count_cells;
use super::{CellType3D, Dungeon, DungeonStats, GeneratorConfig, Room3D, RoomId, StairCase};
use crate::consts::{
    EMPTY_CELL_PENALTY, PLACEMENT_ATTEMPTS_PER_ROOM, ROOM_CELL_PENALTY, STAIR_PENALTY,
};
use crate::error::DungeonError;
use crate::graph::{Delaunay3D, Vertex, add_random_connections, minimum_spanning_tree};
use crate::path::{DungeonPathfinder3D, GraphNode3D, PathCost, stair_footprint};
use crate::spatial::{Grid3D, Vector3Int};

/// Generate a dungeon in one call
pub fn generate_dungeon(config: GeneratorConfig) -> Result<Dungeon, DungeonError> {
    let mut generator = DungeonGenerator3D::new(config)?;
    generator.generate();
    Ok(generator.into_dungeon())
}

/// Price one hallway step against the current grid.
///
/// `end` is the hallway's goal; distance to it is added to every step.
///
/// - Flat steps may not enter stairs. Entering another room costs
///   [`ROOM_CELL_PENALTY`] extra, carving rock costs [`EMPTY_CELL_PENALTY`]
///   extra, and reusing hallways or room center lines is free.
/// - Staircases start and end on rock or hallway, need all four footprint
///   cells to be in-bounds rock, and cost [`STAIR_PENALTY`] extra.
pub fn hallway_cost(
    grid: &Grid3D<CellType3D>,
    from: &GraphNode3D,
    to: &GraphNode3D,
    end: Vector3Int,
) -> PathCost {
    let delta = to.position - from.position;
    let distance = to.position.distance(end);

    if delta.y == 0 {
        let cost = match grid.get(to.position) {
            None | Some(CellType3D::Stairs) => return PathCost::BLOCKED,
            Some(CellType3D::Room) => distance + ROOM_CELL_PENALTY,
            Some(CellType3D::None) => distance + EMPTY_CELL_PENALTY,
            Some(CellType3D::Hallway | CellType3D::RoomCenterAxis) => distance,
        };
        return PathCost::flat(cost);
    }

    let carvable = |pos: Vector3Int| {
        matches!(grid.get(pos), Some(CellType3D::None | CellType3D::Hallway))
    };
    if !carvable(from.position) || !carvable(to.position) {
        return PathCost::BLOCKED;
    }

    let footprint_clear = stair_footprint(from.position, delta)
        .iter()
        .all(|&cell| grid.get(cell) == Some(&CellType3D::None));
    if !footprint_clear {
        return PathCost::BLOCKED;
    }

    PathCost::stairs(STAIR_PENALTY + distance)
}

/// Builds one dungeon from a [`GeneratorConfig`] and a random source
#[derive(Debug, Clone)]
pub struct DungeonGenerator3D<R = SeededRng> {
    config: GeneratorConfig,
    rng: R,
    seed: String,
    grid: Grid3D<CellType3D>,
    rooms: Vec<Room3D>,
    stair_cases: Vec<StairCase>,
    connections: Vec<(RoomId, RoomId)>,
    hallways_routed: usize,
    hallways_failed: usize,
}

impl DungeonGenerator3D<SeededRng> {
    /// Create a generator seeded from `config.seed`, or from a random seed
    /// if none is set
    pub fn new(config: GeneratorConfig) -> Result<Self, DungeonError> {
        let rng = match &config.seed {
            Some(seed) => SeededRng::new(seed.as_str()),
            None => SeededRng::from_entropy(),
        };
        let seed = rng.seed().to_string();
        Self::build(config, rng, seed)
    }
}

impl<R: RandomSource> DungeonGenerator3D<R> {
    /// Create a generator drawing from a caller-supplied random source.
    ///
    /// The reported seed is `config.seed`, or empty if unset.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self, DungeonError> {
        let seed = config.seed.clone().unwrap_or_default();
        Self::build(config, rng, seed)
    }

    fn build(config: GeneratorConfig, rng: R, seed: String) -> Result<Self, DungeonError> {
        config.validate()?;
        Ok(Self {
            grid: Grid3D::with_size(config.size),
            config,
            rng,
            seed,
            rooms: Vec::new(),
            stair_cases: Vec::new(),
            connections: Vec::new(),
            hallways_routed: 0,
            hallways_failed: 0,
        })
    }

    /// Run every generation phase and return the finished grid.
    ///
    /// Each call starts from an empty grid and keeps drawing from the same
    /// random stream, so a second call yields a different dungeon.
    pub fn generate(&mut self) -> &Grid3D<CellType3D> {
        self.grid.fill(CellType3D::None);
        self.rooms.clear();
        self.stair_cases.clear();
        self.connections.clear();
        self.hallways_routed = 0;
        self.hallways_failed = 0;

        self.place_rooms();
        if self.rooms.len() < 2 {
            warn!(
                "Only {} of {} rooms placed; no hallways generated",
                self.rooms.len(),
                self.config.room_count
            );
            return &self.grid;
        }

        self.connections = self.select_connections();
        self.route_hallways();

        debug!(
            "Generated dungeon '{}': {} rooms, {}/{} hallways, {} staircases",
            self.seed,
            self.rooms.len(),
            self.hallways_routed,
            self.connections.len(),
            self.stair_cases.len()
        );
        &self.grid
    }

    fn place_rooms(&mut self) {
        let size = self.config.size;
        let min = self.config.room_min_size;
        let max = self.config.room_max_size;
        let grid_bounds = self.grid.bounds();

        // A room covers at least one cell, so no more than the volume can fit
        let fit = usize::try_from(size.volume()).unwrap_or(usize::MAX);
        let attempts = self
            .config
            .room_count
            .min(fit)
            .saturating_mul(PLACEMENT_ATTEMPTS_PER_ROOM);

        for _ in 0..attempts {
            if self.rooms.len() >= self.config.room_count {
                break;
            }

            let position = Vector3Int::new(
                self.rng.range(0, size.x),
                self.rng.range(0, size.y),
                self.rng.range(0, size.z),
            );
            let room_size = Vector3Int::new(
                self.rng.uneven_range(min.x, max.x),
                self.rng.uneven_range(min.y, max.y),
                self.rng.uneven_range(min.z, max.z),
            );
            let room = Room3D::new(position, room_size);

            if self.rooms.iter().any(|other| room.crowds(other)) {
                trace!("Room at {position} size {room_size} crowds another room");
                continue;
            }
            if !grid_bounds.contains_bounds(&room.bounds) {
                trace!("Room at {position} size {room_size} leaves the grid");
                continue;
            }

            trace!("Placed room {} at {position} size {room_size}", RoomId(self.rooms.len()));
            self.stamp_room(&room);
            self.rooms.push(room);
        }

        debug!(
            "Placed {} of {} rooms",
            self.rooms.len(),
            self.config.room_count
        );
    }

    fn stamp_room(&mut self, room: &Room3D) {
        for pos in room.bounds.positions() {
            self.grid[pos] = if room.is_center_axis(pos) {
                CellType3D::RoomCenterAxis
            } else {
                CellType3D::Room
            };
        }
    }

    /// Spanning tree over the room centers plus random extra connections
    fn select_connections(&mut self) -> Vec<(RoomId, RoomId)> {
        let vertices = self
            .rooms
            .iter()
            .enumerate()
            .map(|(i, room)| Vertex::new(room.center().to_f64(), RoomId(i)));
        let delaunay = Delaunay3D::triangulate(vertices);

        let tree = minimum_spanning_tree(&delaunay.edges, 0);
        let selected = add_random_connections(
            &delaunay.edges,
            &tree,
            self.config.extra_connection_chance,
            &mut self.rng,
        );

        debug!(
            "{} candidate connections, {} in spanning tree, {} selected",
            delaunay.edges.len(),
            tree.len(),
            selected.len()
        );

        selected
            .iter()
            .map(|edge| (delaunay.vertices[edge.u].data, delaunay.vertices[edge.v].data))
            .collect()
    }

    fn route_hallways(&mut self) {
        let mut pathfinder = DungeonPathfinder3D::new(self.config.size);

        for i in 0..self.connections.len() {
            let (a, b) = self.connections[i];
            let start = self.rooms[a.0].center();
            let end = self.rooms[b.0].center();

            let grid = &self.grid;
            let path = pathfinder.find_path(start, end, |from, to| hallway_cost(grid, from, to, end));

            match path {
                Some(path) => {
                    self.carve_hallway(&path);
                    self.hallways_routed += 1;
                }
                None => {
                    debug!("No hallway route between rooms {a} and {b}");
                    self.hallways_failed += 1;
                }
            }
        }
    }

    /// Turn rock along the path into hallway and stamp a staircase at every
    /// level change
    fn carve_hallway(&mut self, path: &[Vector3Int]) {
        let mut previous: Option<Vector3Int> = None;
        for &pos in path {
            if self.grid[pos] == CellType3D::None {
                self.grid[pos] = CellType3D::Hallway;
            }

            if let Some(prev) = previous {
                if prev.y != pos.y {
                    let stairs = StairCase::between(prev, pos);
                    for cell in stairs.cells {
                        self.grid[cell] = CellType3D::Stairs;
                    }
                    self.stair_cases.push(stairs);
                }
            }
            previous = Some(pos);
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid3D<CellType3D> {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room3D] {
        &self.rooms
    }

    pub fn stair_cases(&self) -> &[StairCase] {
        &self.stair_cases
    }

    /// Room pairs selected for hallways, spanning tree first
    pub fn connections(&self) -> &[(RoomId, RoomId)] {
        &self.connections
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn stats(&self) -> DungeonStats {
        DungeonStats {
            seed: self.seed.clone(),
            size: self.config.size,
            requested_rooms: self.config.room_count,
            rooms_placed: self.rooms.len(),
            connections: self.connections.len(),
            hallways_routed: self.hallways_routed,
            hallways_failed: self.hallways_failed,
            stair_cases: self.stair_cases.len(),
            cell_counts: count_cells(&self.grid),
        }
    }

    pub fn into_dungeon(self) -> Dungeon {
        let stats = self.stats();
        Dungeon {
            seed: self.seed,
            grid: self.grid,
            rooms: self.rooms,
            stair_cases: self.stair_cases,
            connections: self.connections,
            stats,
        }
    }
}
