use grid_util::point::Point;

use crate::{config::PlannerConfig, solver::GridSolver};

/// Uniform-cost search: the estimate is zero everywhere.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    pub config: PlannerConfig,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::default()
    }

    pub fn with_config(config: PlannerConfig) -> DijkstraSolver {
        DijkstraSolver { config }
    }
}

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn estimate(&self, _: &Point, _: &Point) -> f64 {
        0.0
    }
}
