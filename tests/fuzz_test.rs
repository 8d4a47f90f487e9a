/// Fuzzes the planners on many small random grids: paths must exist exactly when the goal is on
/// the start's connected component, Dijkstra must match an exhaustive relaxation, and A* must
/// find equally cheap paths while expanding no more nodes. Both movement settings are tested.
use grid_planning::{
    AstarSolver, DijkstraSolver, GridSolver, OccupancyGrid, PlanResult, PlannerConfig, Point,
};
use rand::prelude::*;
use std::f64::consts::SQRT_2;

fn random_grid(w: i32, h: i32, rng: &mut StdRng, density: f64) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(w, h).unwrap();
    for x in 0..w {
        for y in 0..h {
            if rng.gen_bool(density) {
                grid.set_obstacle(x, y);
            }
        }
    }
    grid
}

/// 5x5 grid with at most three obstacles, never on the corners.
fn sparse_grid(rng: &mut StdRng) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(5, 5).unwrap();
    for _ in 0..rng.gen_range(0..=3) {
        let x = rng.gen_range(0..5);
        let y = rng.gen_range(0..5);
        if (x, y) != (0, 0) && (x, y) != (4, 4) {
            grid.set_obstacle(x, y);
        }
    }
    grid
}

fn visualize_grid(grid: &OccupancyGrid, start: &Point, end: &Point) {
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_obstacle(x, y) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Cheapest cost from `start` to every cell by repeated edge relaxation.
fn exhaustive_costs(grid: &OccupancyGrid, start: &Point, allow_diagonal: bool) -> Vec<f64> {
    let n = grid.cell_count();
    let mut dist = vec![f64::INFINITY; n];
    dist[grid.index(start)] = 0.0;
    let mut changed = true;
    while changed {
        changed = false;
        for p in grid.free_cells() {
            let d = dist[grid.index(&p)];
            if d.is_infinite() {
                continue;
            }
            for (q, c) in grid.neighbors(&p, allow_diagonal) {
                let ix = grid.index(&q);
                if d + c < dist[ix] - 1e-12 {
                    dist[ix] = d + c;
                    changed = true;
                }
            }
        }
    }
    dist
}

fn assert_valid_path(
    grid: &OccupancyGrid,
    result: &PlanResult,
    start: Point,
    goal: Point,
    allow_diagonal: bool,
) {
    let path = result.path.as_ref().unwrap();
    assert_eq!(path[0], start);
    assert_eq!(path[path.len() - 1], goal);
    let mut cost = 0.0;
    for pair in path.windows(2) {
        let (dx, dy) = ((pair[1].x - pair[0].x).abs(), (pair[1].y - pair[0].y).abs());
        assert!(dx <= 1 && dy <= 1 && dx + dy > 0);
        assert!(allow_diagonal || dx + dy == 1);
        assert!(grid.can_move_to(pair[1]));
        cost += if dx + dy == 2 { SQRT_2 } else { 1.0 };
    }
    assert!((cost - result.stats.path_cost).abs() < 1e-9);
}

#[test]
fn fuzz_optimality() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    for allow_diagonal in [false, true] {
        let config = PlannerConfig {
            allow_diagonal,
            ..Default::default()
        };
        let dijkstra = DijkstraSolver::with_config(config.clone());
        let astar = AstarSolver::with_config(config);
        for _ in 0..N_GRIDS {
            let grid = sparse_grid(&mut rng);
            let expected = exhaustive_costs(&grid, &start, allow_diagonal)[grid.index(&goal)];
            let d = dijkstra.plan(&grid, start, goal).unwrap();
            let a = astar.plan(&grid, start, goal).unwrap();
            if expected.is_infinite() {
                assert!(!d.success() && !a.success());
                continue;
            }
            if (d.stats.path_cost - expected).abs() >= 1e-9 {
                visualize_grid(&grid, &start, &goal);
            }
            assert!((d.stats.path_cost - expected).abs() < 1e-9);
            assert!((a.stats.path_cost - expected).abs() < 1e-9);
            assert!(a.stats.nodes_expanded <= d.stats.nodes_expanded);
            assert_valid_path(&grid, &d, start, goal, allow_diagonal);
            assert_valid_path(&grid, &a, start, goal, allow_diagonal);
        }
    }
}

#[test]
fn fuzz_reachability() {
    const N: i32 = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N - 1, N - 1);
    for allow_diagonal in [false, true] {
        let config = PlannerConfig {
            allow_diagonal,
            ..Default::default()
        };
        let dijkstra = DijkstraSolver::with_config(config.clone());
        let astar = AstarSolver::with_config(config);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, N, &mut rng, 0.4);
            grid.set_free(start.x, start.y);
            grid.set_free(end.x, end.y);
            let reachable = grid.reachable(&start, &end, allow_diagonal);
            let d = dijkstra.plan(&grid, start, end).unwrap();
            let a = astar.plan(&grid, start, end).unwrap();
            // Show the grid if a path is not found
            if d.success() != reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(d.success(), reachable);
            assert_eq!(a.success(), reachable);
            if reachable {
                assert!((a.stats.path_cost - d.stats.path_cost).abs() < 1e-9);
                assert!(a.stats.nodes_expanded <= d.stats.nodes_expanded);
                assert_valid_path(&grid, &a, start, end, allow_diagonal);
            } else {
                assert!(d.stats.path_cost.is_infinite());
                assert!(a.stats.path_cost.is_infinite());
            }
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let mut grid = random_grid(15, 15, &mut rng, 0.25);
        let start = Point::new(0, 0);
        let end = Point::new(14, 14);
        grid.set_free(start.x, start.y);
        grid.set_free(end.x, end.y);
        let solver = AstarSolver::new();
        let first = solver.plan(&grid, start, end).unwrap();
        let second = solver.plan(&grid, start, end).unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(first.stats.nodes_expanded, second.stats.nodes_expanded);
        assert_eq!(first.stats.explored, second.stats.explored);
        let solver = DijkstraSolver::new();
        let first = solver.plan(&grid, start, end).unwrap();
        let second = solver.plan(&grid, start, end).unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(first.stats.explored, second.stats.explored);
    }
}
