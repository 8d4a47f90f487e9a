use crate::config::PlannerConfig;
use crate::error::GridError;
use crate::occupancy_grid::OccupancyGrid;
use crate::search::SearchRecord;
use core::fmt;
use grid_util::point::Point;
use log::{debug, trace};
use std::ops::Deref;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub mod astar;
pub mod dijkstra;

use astar::AstarSolver;
use dijkstra::DijkstraSolver;

/// A start-to-goal sequence of grid points in which consecutive points are one move apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(pub(crate) Vec<Point>);

impl Path {
    pub fn points(&self) -> &[Point] {
        &self.0
    }
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.0
    }
}

/// Statistics of one planner run.
#[derive(Clone, Debug)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub planning_time: Duration,
    /// Expanded points in expansion order.
    pub explored: Vec<Point>,
    /// Cost of the found path, infinite if there is none.
    pub path_cost: f64,
}

/// Outcome of [plan](GridSolver::plan). Not finding a path is a regular outcome with `path`
/// set to [None].
#[derive(Clone, Debug)]
pub struct PlanResult {
    pub path: Option<Path>,
    pub stats: SearchStats,
}

impl PlanResult {
    pub fn success(&self) -> bool {
        self.path.is_some()
    }
}

pub trait GridSolver {
    fn name(&self) -> &'static str;

    fn config(&self) -> &PlannerConfig;

    /// Estimated remaining cost from `point` to `goal`.
    fn estimate(&self, point: &Point, goal: &Point) -> f64;

    /// Computes a cheapest path from `start` to `goal`. Both must be free cells of `grid`,
    /// otherwise a [GridError::Configuration] is returned.
    fn plan(
        &self,
        grid: &OccupancyGrid,
        start: Point,
        goal: Point,
    ) -> Result<PlanResult, GridError> {
        grid.validate_endpoint(start, "start")?;
        grid.validate_endpoint(goal, "goal")?;
        trace!("[{}] plan: start={} goal={}", self.name(), start, goal);

        let config = self.config();
        let timer = Instant::now();
        let start_ix = grid.index(&start);
        let goal_ix = grid.index(&goal);
        let outcome = SearchRecord::new().best_first_search(
            &start_ix,
            |&ix| {
                grid.neighbors(&grid.point(ix), config.allow_diagonal)
                    .into_iter()
                    .map(move |(p, cost)| (grid.index(&p), cost))
            },
            |&ix| self.estimate(&grid.point(ix), &goal),
            |&ix| ix == goal_ix,
            config.max_expansions,
        );
        let planning_time = timer.elapsed();

        let stats = SearchStats {
            nodes_expanded: outcome.expanded.len(),
            planning_time,
            explored: outcome.expanded.iter().map(|&ix| grid.point(ix)).collect(),
            path_cost: outcome.cost.unwrap_or(f64::INFINITY),
        };
        let path = outcome
            .path
            .map(|v| Path(v.into_iter().map(|ix| grid.point(ix)).collect()));
        match &path {
            Some(p) => debug!(
                "[{}] found path of {} points, cost {:.3}, {} nodes expanded",
                self.name(),
                p.len(),
                stats.path_cost,
                stats.nodes_expanded
            ),
            None => debug!(
                "[{}] no path from {} to {} after expanding {} nodes",
                self.name(),
                start,
                goal,
                stats.nodes_expanded
            ),
        }
        Ok(PlanResult { path, stats })
    }

    /// Plans between the start and goal stored on the grid.
    fn plan_endpoints(&self, grid: &OccupancyGrid) -> Result<PlanResult, GridError> {
        let (start, goal) = grid.endpoints()?;
        self.plan(grid, start, goal)
    }
}

/// Selects one of the available planners by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::AStar, Algorithm::Dijkstra];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    pub fn plan(
        &self,
        config: &PlannerConfig,
        grid: &OccupancyGrid,
        start: Point,
        goal: Point,
    ) -> Result<PlanResult, GridError> {
        let config = config.clone();
        match self {
            Algorithm::Dijkstra => DijkstraSolver::with_config(config).plan(grid, start, goal),
            Algorithm::AStar => AstarSolver::with_config(config).plan(grid, start, goal),
        }
    }

    pub fn plan_endpoints(
        &self,
        config: &PlannerConfig,
        grid: &OccupancyGrid,
    ) -> Result<PlanResult, GridError> {
        let (start, goal) = grid.endpoints()?;
        self.plan(config, grid, start, goal)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}
