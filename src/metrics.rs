//! Path quality metrics.

use crate::config::DEFAULT_SAFETY_RADIUS;
use crate::occupancy_grid::OccupancyGrid;
use crate::solver::{Path, PlanResult};
use grid_util::point::Point;
use itertools::Itertools;
use serde::Serialize;
use std::time::Duration;

/// Summary of a single planner run, ready to be tabulated or plotted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityReport {
    pub path_length: f64,
    /// Sum of turning angles in radians.
    pub smoothness: f64,
    /// Mean distance of the path points to the nearest obstacle.
    pub safety_margin: f64,
    pub nodes_expanded: usize,
    /// Planning time in seconds.
    pub planning_time: f64,
    pub success: bool,
}

impl QualityReport {
    /// Report for a run that found no path.
    pub fn failure(planning_time: Duration, nodes_expanded: usize) -> QualityReport {
        QualityReport {
            path_length: f64::INFINITY,
            smoothness: f64::INFINITY,
            safety_margin: 0.0,
            nodes_expanded,
            planning_time: planning_time.as_secs_f64(),
            success: false,
        }
    }

    pub fn from_plan(result: &PlanResult, grid: &OccupancyGrid) -> QualityReport {
        evaluate(
            result.path.as_ref(),
            grid,
            result.stats.planning_time,
            result.stats.nodes_expanded,
        )
    }
}

fn delta(a: &Point, b: &Point) -> (f64, f64) {
    (f64::from(b.x - a.x), f64::from(b.y - a.y))
}

/// Sum of the Euclidean lengths of all segments.
pub fn path_length(path: &[Point]) -> f64 {
    path.iter()
        .tuple_windows::<(_, _)>()
        .map(|(a, b)| {
            let (dx, dy) = delta(a, b);
            dx.hypot(dy)
        })
        .sum()
}

/// Sum of the turning angles at every interior point. Zero-length segments do not contribute.
pub fn smoothness(path: &[Point]) -> f64 {
    path.iter()
        .tuple_windows::<(_, _, _)>()
        .filter_map(|(a, b, c)| {
            let (x1, y1) = delta(a, b);
            let (x2, y2) = delta(b, c);
            let sq1 = x1 * x1 + y1 * y1;
            let sq2 = x2 * x2 + y2 * y2;
            if sq1 > 0.0 && sq2 > 0.0 {
                // A single square root keeps collinear grid steps at exactly zero.
                let cos_angle = (x1 * x2 + y1 * y2) / (sq1 * sq2).sqrt();
                Some(cos_angle.clamp(-1.0, 1.0).acos())
            } else {
                None
            }
        })
        .sum()
}

/// Mean of [distance_to_nearest_obstacle](OccupancyGrid::distance_to_nearest_obstacle) over the
/// path points. Lies between zero and `search_radius`.
pub fn safety_margin(path: &[Point], grid: &OccupancyGrid, search_radius: u32) -> f64 {
    if path.is_empty() {
        return 0.0;
    }
    let total: f64 = path
        .iter()
        .map(|p| grid.distance_to_nearest_obstacle(p, search_radius))
        .sum();
    total / path.len() as f64
}

/// Scores a path with the default safety radius. A missing path yields
/// [QualityReport::failure].
pub fn evaluate(
    path: Option<&Path>,
    grid: &OccupancyGrid,
    planning_time: Duration,
    nodes_expanded: usize,
) -> QualityReport {
    evaluate_with_radius(
        path,
        grid,
        planning_time,
        nodes_expanded,
        DEFAULT_SAFETY_RADIUS,
    )
}

pub fn evaluate_with_radius(
    path: Option<&Path>,
    grid: &OccupancyGrid,
    planning_time: Duration,
    nodes_expanded: usize,
    search_radius: u32,
) -> QualityReport {
    match path {
        None => QualityReport::failure(planning_time, nodes_expanded),
        Some(path) => QualityReport {
            path_length: path_length(path),
            smoothness: smoothness(path),
            safety_margin: safety_margin(path, grid, search_radius),
            nodes_expanded,
            planning_time: planning_time.as_secs_f64(),
            success: true,
        },
    }
}
