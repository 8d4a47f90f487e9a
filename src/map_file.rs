//! Plain text map format.
//!
//! ```text
//! # comment lines are ignored
//! <width> <height>
//! START <x> <y>
//! GOAL <x> <y>
//! <height rows of <width> space separated values, 0 = free, 1 = blocked>
//! ```
//!
//! The `START` and `GOAL` lines are optional. Parsing is lenient about short rows and missing
//! trailing rows, which leave the remaining cells free.

use crate::error::GridError;
use crate::occupancy_grid::OccupancyGrid;
use core::fmt;
use grid_util::point::Point;
use std::fs;
use std::str::FromStr;

/// Reads a map from a file.
pub fn load_map<P: AsRef<std::path::Path>>(path: P) -> Result<OccupancyGrid, GridError> {
    fs::read_to_string(path)?.parse()
}

/// Writes a map to a file in the format read by [load_map].
pub fn save_map<P: AsRef<std::path::Path>>(grid: &OccupancyGrid, path: P) -> Result<(), GridError> {
    fs::write(path, grid.to_string())?;
    Ok(())
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# Grid Map {}x{}", self.width(), self.height())?;
        writeln!(f, "{} {}", self.width(), self.height())?;
        if let Some(start) = self.start() {
            writeln!(f, "START {} {}", start.x, start.y)?;
        }
        if let Some(goal) = self.goal() {
            writeln!(f, "GOAL {} {}", goal.x, goal.y)?;
        }
        for y in 0..self.height() {
            let row = (0..self.width())
                .map(|x| if self.is_obstacle(x, y) { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn parse_int(token: Option<&str>, line: usize, what: &str) -> Result<i32, GridError> {
    let token = token.ok_or_else(|| GridError::parse(line, format!("missing {what}")))?;
    token
        .parse::<i32>()
        .map_err(|_| GridError::parse(line, format!("invalid {what} '{token}'")))
}

fn parse_point(rest: &mut std::str::SplitWhitespace, line: usize) -> Result<Point, GridError> {
    let x = parse_int(rest.next(), line, "x coordinate")?;
    let y = parse_int(rest.next(), line, "y coordinate")?;
    if rest.next().is_some() {
        return Err(GridError::parse(line, "trailing values after coordinates"));
    }
    Ok(Point::new(x, y))
}

impl FromStr for OccupancyGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Keep 1-based line numbers for error messages.
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
            .peekable();

        let (dim_line, dims) = lines
            .next()
            .ok_or_else(|| GridError::parse(0, "missing dimension line"))?;
        let mut tokens = dims.split_whitespace();
        let width = parse_int(tokens.next(), dim_line, "width")?;
        let height = parse_int(tokens.next(), dim_line, "height")?;
        if tokens.next().is_some() {
            return Err(GridError::parse(dim_line, "expected '<width> <height>'"));
        }
        let mut grid = OccupancyGrid::new(width, height)?;

        let mut start = None;
        let mut goal = None;
        while let Some(&(line, text)) = lines.peek() {
            if text.starts_with(|c: char| c.is_ascii_digit()) {
                break;
            }
            let mut tokens = text.split_whitespace();
            match tokens.next() {
                Some("START") => start = Some(parse_point(&mut tokens, line)?),
                Some("GOAL") => goal = Some(parse_point(&mut tokens, line)?),
                _ => return Err(GridError::parse(line, format!("unexpected line '{text}'"))),
            }
            lines.next();
        }

        let mut y = 0;
        for (line, text) in lines {
            if y >= height {
                return Err(GridError::parse(
                    line,
                    format!("more than {height} rows of cells"),
                ));
            }
            let mut x = 0;
            for token in text.split_whitespace() {
                if x >= width {
                    return Err(GridError::parse(
                        line,
                        format!("row has more than {width} cells"),
                    ));
                }
                match token {
                    "0" => {}
                    "1" => grid.set_obstacle(x, y),
                    other => {
                        return Err(GridError::parse(
                            line,
                            format!("invalid cell value '{other}'"),
                        ))
                    }
                }
                x += 1;
            }
            y += 1;
        }

        if let Some(p) = start {
            grid.set_start(p.x, p.y)?;
        }
        if let Some(p) = goal {
            grid.set_goal(p.x, p.y)?;
        }
        Ok(grid)
    }
}
