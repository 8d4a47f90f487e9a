use criterion::{criterion_group, criterion_main, Criterion};
use grid_planning::{
    generate_maze, AstarSolver, DijkstraSolver, GridSolver, MapPreset, OccupancyGrid,
    PlannerConfig, DEFAULT_SEED,
};
use std::hint::black_box;

fn preset_bench_solver<S, FS>(c: &mut Criterion, solver_name: &str, create_solver: FS)
where
    S: GridSolver,
    FS: Fn(PlannerConfig) -> S,
{
    for allow_diagonal in [true, false] {
        let solver = create_solver(PlannerConfig {
            allow_diagonal,
            ..Default::default()
        });
        let diag_str = if allow_diagonal { "8-grid" } else { "4-grid" };
        for preset in MapPreset::ALL {
            let grid = preset.generate(DEFAULT_SEED).unwrap();
            let name = format!("{preset}, {solver_name} {diag_str}");
            bench_grid(c, &name, &solver, &grid);
        }
    }
}

fn bench_grid<S: GridSolver>(c: &mut Criterion, name: &str, solver: &S, grid: &OccupancyGrid) {
    c.bench_function(name, |b| b.iter(|| black_box(solver.plan_endpoints(grid))));
}

fn preset_bench_astar(c: &mut Criterion) {
    preset_bench_solver(c, "Astar", AstarSolver::with_config);
}

fn preset_bench_dijkstra(c: &mut Criterion) {
    preset_bench_solver(c, "Dijkstra", DijkstraSolver::with_config);
}

fn large_maze_bench(c: &mut Criterion) {
    let grid = generate_maze(201, 201, DEFAULT_SEED).unwrap();
    let config = PlannerConfig::four_connected();
    let astar = AstarSolver::with_config(config.clone());
    let dijkstra = DijkstraSolver::with_config(config);
    bench_grid(c, "maze 201, Astar", &astar, &grid);
    bench_grid(c, "maze 201, Dijkstra", &dijkstra, &grid);
}

criterion_group!(
    benches,
    preset_bench_astar,
    preset_bench_dijkstra,
    large_maze_bench,
);
criterion_main!(benches);
