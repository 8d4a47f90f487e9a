use grid_util::point::Point;

use crate::{config::PlannerConfig, solver::GridSolver};

/// A* with the Euclidean distance to the goal as estimate. Straight-line distance never exceeds
/// the cost of a grid path (orthogonal steps cost 1 and diagonal steps sqrt(2)), so the estimate
/// is admissible and the returned paths are optimal.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub config: PlannerConfig,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }

    pub fn with_config(config: PlannerConfig) -> AstarSolver {
        AstarSolver { config }
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn estimate(&self, point: &Point, goal: &Point) -> f64 {
        f64::from(point.x - goal.x).hypot(f64::from(point.y - goal.y))
    }
}
