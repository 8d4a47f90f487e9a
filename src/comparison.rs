use crate::config::PlannerConfig;
use crate::error::GridError;
use crate::metrics::QualityReport;
use crate::occupancy_grid::OccupancyGrid;
use crate::solver::{Algorithm, PlanResult};
use grid_util::point::Point;
use log::info;
use std::thread;

/// One algorithm's result in a [compare] run.
#[derive(Clone, Debug)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    pub result: PlanResult,
    pub report: QualityReport,
}

/// Runs every algorithm in `algorithms` on the same grid, each on its own thread with its own
/// search state, and returns the runs in the order requested. The grid is only read.
pub fn compare(
    grid: &OccupancyGrid,
    start: Point,
    goal: Point,
    algorithms: &[Algorithm],
    config: &PlannerConfig,
) -> Result<Vec<AlgorithmRun>, GridError> {
    let results: Vec<Result<PlanResult, GridError>> = thread::scope(|s| {
        let handles: Vec<_> = algorithms
            .iter()
            .map(|algorithm| s.spawn(move || algorithm.plan(config, grid, start, goal)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    algorithms
        .iter()
        .zip(results)
        .map(|(&algorithm, result)| {
            let result = result?;
            let report = QualityReport::from_plan(&result, grid);
            info!(
                "{}: success={} length={:.2} expanded={} time={:.4}s",
                algorithm,
                report.success,
                report.path_length,
                report.nodes_expanded,
                report.planning_time
            );
            Ok(AlgorithmRun {
                algorithm,
                result,
                report,
            })
        })
        .collect()
}

/// [compare] between the start and goal stored on the grid.
pub fn compare_endpoints(
    grid: &OccupancyGrid,
    algorithms: &[Algorithm],
    config: &PlannerConfig,
) -> Result<Vec<AlgorithmRun>, GridError> {
    let (start, goal) = grid.endpoints()?;
    compare(grid, start, goal, algorithms, config)
}
