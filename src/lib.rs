//! # grid_planning
//!
//! Shortest paths on 2D occupancy grids using
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with a Euclidean heuristic. Both
//! planners share a single best-first search that breaks ties by insertion order, so runs are
//! reproducible and their expansion counts can be compared directly. Orthogonal moves cost 1 and
//! diagonal moves sqrt(2).
//!
//! Test maps come from [map_generator], either as uniformly random obstacle fields or as mazes
//! carved by a randomized depth-first walk, and can be stored in a small text format
//! ([map_file]). Paths are scored by length, smoothness and distance to obstacles in [metrics].
pub mod comparison;
pub mod config;
pub mod error;
pub mod map_file;
pub mod map_generator;
pub mod metrics;
pub mod occupancy_grid;
pub mod search;
pub mod solver;

pub use comparison::{compare, compare_endpoints, AlgorithmRun};
pub use config::{MapPreset, PlannerConfig, DEFAULT_SAFETY_RADIUS, DEFAULT_SEED};
pub use error::GridError;
pub use grid_util::point::Point;
pub use map_file::{load_map, save_map};
pub use map_generator::{generate_maze, generate_random_map};
pub use metrics::{evaluate, QualityReport};
pub use occupancy_grid::OccupancyGrid;
pub use solver::{
    astar::AstarSolver, dijkstra::DijkstraSolver, Algorithm, GridSolver, Path, PlanResult,
    SearchStats,
};

/// Cost of a move along one axis.
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal move, equal to its Euclidean length.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

pub const N_SMALLVEC_SIZE: usize = 8;
