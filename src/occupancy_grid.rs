use crate::error::GridError;
use crate::{DIAGONAL_COST, N_SMALLVEC_SIZE, ORTHOGONAL_COST};
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Orthogonal moves followed by diagonal moves. The order is fixed so that searches break ties
/// the same way on every run.
const MOVES: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// [OccupancyGrid] stores the [bool] cell values of a [BoolGrid], where a cell is either blocked
/// ([true]) or free ([false]), together with an optional start and goal. The grid is only mutated
/// while a map is generated or parsed; searches and metrics take it by shared reference.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    grid: BoolGrid,
    width: i32,
    height: i32,
    start: Option<Point>,
    goal: Option<Point>,
}

impl OccupancyGrid {
    /// Creates a grid with every cell free. Both dimensions must be positive and the cell count
    /// must fit in an [i32], so that every row-major index is a valid coordinate product.
    pub fn new(width: i32, height: i32) -> Result<OccupancyGrid, GridError> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(OccupancyGrid {
            grid: BoolGrid::new(width as usize, height as usize, false),
            width,
            height,
            start: None,
            goal: None,
        })
    }

    /// Creates a grid with every cell blocked, the starting point for maze carving.
    pub(crate) fn new_blocked(width: i32, height: i32) -> Result<OccupancyGrid, GridError> {
        let mut grid = OccupancyGrid::new(width, height)?;
        grid.grid = BoolGrid::new(width as usize, height as usize, true);
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Strict bounds test.
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Everything outside the map counts as an obstacle.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        !self.is_valid(x, y) || self.grid.get(x, y)
    }

    pub fn can_move_to(&self, pos: Point) -> bool {
        !self.is_obstacle(pos.x, pos.y)
    }

    /// Marks a cell as blocked. Out of bounds coordinates are ignored.
    pub fn set_obstacle(&mut self, x: i32, y: i32) {
        if self.is_valid(x, y) {
            self.grid.set(x, y, true);
        }
    }

    /// Marks a cell as free. Out of bounds coordinates are ignored.
    pub fn set_free(&mut self, x: i32, y: i32) {
        if self.is_valid(x, y) {
            self.grid.set(x, y, false);
        }
    }

    /// Row-major index of an in-bounds point.
    pub fn index(&self, point: &Point) -> usize {
        debug_assert!(self.is_valid(point.x, point.y));
        point.y as usize * self.width as usize + point.x as usize
    }

    /// Inverse of [index](Self::index).
    pub fn point(&self, index: usize) -> Point {
        let width = self.width as usize;
        Point::new((index % width) as i32, (index / width) as i32)
    }

    /// Reachable neighbours of `point` together with the cost of moving there: 1 for orthogonal
    /// moves and sqrt(2) for diagonal ones. Only the destination cell is checked, so diagonal
    /// moves may cut past blocked corners.
    pub fn neighbors(
        &self,
        point: &Point,
        allow_diagonal: bool,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        let moves = if allow_diagonal {
            &MOVES[..]
        } else {
            &MOVES[..4]
        };
        moves
            .iter()
            .map(|&(dx, dy)| {
                let cost = if dx != 0 && dy != 0 {
                    DIAGONAL_COST
                } else {
                    ORTHOGONAL_COST
                };
                (Point::new(point.x + dx, point.y + dy), cost)
            })
            .filter(|(p, _)| self.can_move_to(*p))
            .collect()
    }

    /// Euclidean distance to the closest blocked or out-of-bounds cell inside the square window
    /// of side `2 * search_radius + 1` centred on `point`. Returns `search_radius` when the window
    /// holds no obstacle, so the result is a bounded approximation rather than an exact query.
    pub fn distance_to_nearest_obstacle(&self, point: &Point, search_radius: u32) -> f64 {
        let r = search_radius as i32;
        let mut min_dist = f64::INFINITY;
        for dy in -r..=r {
            for dx in -r..=r {
                if self.is_obstacle(point.x + dx, point.y + dy) {
                    min_dist = min_dist.min(f64::from(dx).hypot(f64::from(dy)));
                }
            }
        }
        if min_dist.is_finite() {
            min_dist
        } else {
            f64::from(search_radius)
        }
    }

    /// Checks that `point` can serve as a start or goal, i.e. that it is in bounds and free.
    pub fn validate_endpoint(&self, point: Point, role: &'static str) -> Result<(), GridError> {
        let reason = if !self.is_valid(point.x, point.y) {
            "outside the grid"
        } else if self.is_obstacle(point.x, point.y) {
            "cell is blocked"
        } else {
            return Ok(());
        };
        Err(GridError::Configuration {
            role,
            x: point.x,
            y: point.y,
            reason,
        })
    }

    pub fn set_start(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let p = Point::new(x, y);
        self.validate_endpoint(p, "start")?;
        self.start = Some(p);
        Ok(())
    }

    pub fn set_goal(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let p = Point::new(x, y);
        self.validate_endpoint(p, "goal")?;
        self.goal = Some(p);
        Ok(())
    }

    /// The stored start and goal, or a [GridError::Configuration] naming the one that is unset.
    pub fn endpoints(&self) -> Result<(Point, Point), GridError> {
        let missing = |role| GridError::Configuration {
            role,
            x: -1,
            y: -1,
            reason: "not set on the grid",
        };
        let start = self.start.ok_or_else(|| missing("start"))?;
        let goal = self.goal.ok_or_else(|| missing("goal"))?;
        Ok((start, goal))
    }

    /// Free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
            .filter(move |p| self.can_move_to(*p))
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn obstacle_count(&self) -> usize {
        self.cell_count() - self.free_cells().count()
    }

    /// Generates a [UnionFind] structure over cell indices that links up free cells connected
    /// by a single move.
    pub fn connected_components(&self, allow_diagonal: bool) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cell_count());
        for point in self.free_cells() {
            let parent_ix = self.index(&point);
            for (n, _) in self.neighbors(&point, allow_diagonal) {
                components.union(parent_ix, self.index(&n));
            }
        }
        components
    }

    /// Checks if `start` and `goal` are free and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point, allow_diagonal: bool) -> bool {
        if !self.can_move_to(*start) || !self.can_move_to(*goal) {
            return false;
        }
        self.connected_components(allow_diagonal)
            .equiv(self.index(start), self.index(goal))
    }
}
