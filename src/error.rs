use thiserror::Error;

/// Errors raised while building, loading or configuring an [OccupancyGrid](crate::OccupancyGrid).
/// A search that finds no path is not an error; see [PlanResult](crate::solver::PlanResult).
#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },
    #[error("{role} ({x}, {y}) is not usable: {reason}")]
    Configuration {
        role: &'static str,
        x: i32,
        y: i32,
        reason: &'static str,
    },
    #[error("map parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GridError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> GridError {
        GridError::Parse {
            line,
            message: message.into(),
        }
    }
}
