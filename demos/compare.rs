use grid_planning::{compare_endpoints, Algorithm, MapPreset, PlannerConfig, DEFAULT_SEED};

// Generates every map preset and runs both planners on it, printing the quality of each path.
// The maze preset is solved on a 4-grid since its corridors are one cell wide anyway.
fn main() {
    for preset in MapPreset::ALL {
        let grid = preset.generate(DEFAULT_SEED).unwrap();
        let config = match preset {
            MapPreset::Maze => PlannerConfig::four_connected(),
            _ => PlannerConfig::default(),
        };
        let (start, goal) = grid.endpoints().unwrap();
        println!(
            "{preset}: {}x{}, {} obstacles, {start} -> {goal}",
            grid.width(),
            grid.height(),
            grid.obstacle_count()
        );
        let runs = compare_endpoints(&grid, &Algorithm::ALL, &config).unwrap();
        for run in runs {
            let r = &run.report;
            if r.success {
                println!(
                    "  {:<8} length {:>7.2}  smoothness {:>6.2}  safety {:>5.2}  expanded {:>6}  {:.4}s",
                    run.algorithm,
                    r.path_length,
                    r.smoothness,
                    r.safety_margin,
                    r.nodes_expanded,
                    r.planning_time
                );
            } else {
                println!(
                    "  {:<8} no path, expanded {}",
                    run.algorithm, r.nodes_expanded
                );
            }
        }
    }
}
