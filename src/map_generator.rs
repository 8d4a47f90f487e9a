//! Synthetic test maps: uniformly random obstacle fields and carved mazes. Every generator takes
//! its random number generator explicitly, so equal seeds give equal maps.

use crate::error::GridError;
use crate::occupancy_grid::OccupancyGrid;
use grid_util::point::Point;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lattice steps used when carving, two cells at a time.
const CARVE_STEPS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// Generates a random map from `seed`. See [generate_random_map_with_rng].
pub fn generate_random_map(
    width: i32,
    height: i32,
    density: f64,
    seed: u64,
) -> Result<OccupancyGrid, GridError> {
    generate_random_map_with_rng(width, height, density, &mut StdRng::seed_from_u64(seed))
}

/// Places `floor(width * height * density)` obstacles at independently sampled cells and picks
/// a start and goal. Samples may land on the same cell, so `density` is an upper bound on the
/// blocked fraction rather than an exact value. It is not range checked: negative values give an
/// empty map and values above one simply sample more often.
pub fn generate_random_map_with_rng<R: Rng>(
    width: i32,
    height: i32,
    density: f64,
    rng: &mut R,
) -> Result<OccupancyGrid, GridError> {
    let mut grid = OccupancyGrid::new(width, height)?;
    let n_obstacles = (f64::from(width) * f64::from(height) * density) as usize;
    for _ in 0..n_obstacles {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        grid.set_obstacle(x, y);
    }
    add_random_start_goal(&mut grid, rng);
    info!(
        "Generated {}x{} random map with {} obstacles ({} sampled)",
        width,
        height,
        grid.obstacle_count(),
        n_obstacles
    );
    Ok(grid)
}

/// Generates a maze from `seed`. See [generate_maze_with_rng].
pub fn generate_maze(width: i32, height: i32, seed: u64) -> Result<OccupancyGrid, GridError> {
    generate_maze_with_rng(width, height, &mut StdRng::seed_from_u64(seed))
}

/// Carves a maze with a randomized depth-first walk over the cells whose coordinates are both
/// odd. Even dimensions are reduced by one first. The carved cells form a spanning tree, so every
/// free cell can reach every other free cell along exactly one simple path.
pub fn generate_maze_with_rng<R: Rng>(
    width: i32,
    height: i32,
    rng: &mut R,
) -> Result<OccupancyGrid, GridError> {
    let width = if width % 2 == 1 { width } else { width - 1 };
    let height = if height % 2 == 1 { height } else { height - 1 };
    let mut grid = OccupancyGrid::new_blocked(width, height)?;

    if width >= 3 && height >= 3 {
        carve(&mut grid, rng);
        add_random_start_goal(&mut grid, rng);
    } else {
        // Too thin to carve: open a single cell that serves as both start and goal.
        let cell = Point::new(1.min(width - 1), 1.min(height - 1));
        warn!(
            "{}x{} maze is too thin to carve, using {} as start and goal",
            width, height, cell
        );
        grid.set_free(cell.x, cell.y);
        assign_start_goal(&mut grid, cell, cell);
    }
    info!(
        "Generated {}x{} maze with {} free cells",
        width,
        height,
        grid.free_cells().count()
    );
    Ok(grid)
}

fn carve<R: Rng>(grid: &mut OccupancyGrid, rng: &mut R) {
    let (width, height) = (grid.width(), grid.height());
    let origin = Point::new(1, 1);
    grid.set_free(origin.x, origin.y);
    let mut stack = vec![origin];

    while let Some(&current) = stack.last() {
        let candidates: Vec<(Point, Point)> = CARVE_STEPS
            .iter()
            .map(|&(dx, dy)| {
                (
                    Point::new(current.x + dx, current.y + dy),
                    Point::new(current.x + dx / 2, current.y + dy / 2),
                )
            })
            .filter(|(next, _)| {
                0 < next.x
                    && next.x < width - 1
                    && 0 < next.y
                    && next.y < height - 1
                    && grid.is_obstacle(next.x, next.y)
            })
            .collect();

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (next, wall) = candidates[rng.gen_range(0..candidates.len())];
            grid.set_free(wall.x, wall.y);
            grid.set_free(next.x, next.y);
            stack.push(next);
        }
    }
}

/// Picks a random free start and the free cell farthest from it as goal. Maps with fewer than
/// two free cells get two cells near opposite corners cleared instead.
fn add_random_start_goal<R: Rng>(grid: &mut OccupancyGrid, rng: &mut R) {
    let free: Vec<Point> = grid.free_cells().collect();

    let (start, goal) = if free.len() < 2 {
        let start = Point::new(1.min(grid.width() - 1), 1.min(grid.height() - 1));
        let goal = Point::new((grid.width() - 2).max(0), (grid.height() - 2).max(0));
        warn!(
            "Only {} free cells, clearing {} and {} for start and goal",
            free.len(),
            start,
            goal
        );
        grid.set_free(start.x, start.y);
        grid.set_free(goal.x, goal.y);
        (start, goal)
    } else {
        let start = free[rng.gen_range(0..free.len())];
        let mut goal = start;
        let mut best = -1.0;
        for p in &free {
            let d = f64::from(p.x - start.x).hypot(f64::from(p.y - start.y));
            if d > best {
                best = d;
                goal = *p;
            }
        }
        (start, goal)
    };
    assign_start_goal(grid, start, goal);
}

/// Stores endpoints that the caller has already cleared.
fn assign_start_goal(grid: &mut OccupancyGrid, start: Point, goal: Point) {
    let assigned = grid
        .set_start(start.x, start.y)
        .and_then(|_| grid.set_goal(goal.x, goal.y));
    debug_assert!(assigned.is_ok());
}
