//! Planner settings and the named map presets used by demos, benches and tests.

use crate::error::GridError;
use crate::map_generator::{generate_maze, generate_random_map};
use crate::occupancy_grid::OccupancyGrid;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Seed used when nothing else is specified, so that generated maps are reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Window radius used by [safety_margin](crate::metrics::safety_margin) in
/// [evaluate](crate::metrics::evaluate).
pub const DEFAULT_SAFETY_RADIUS: u32 = 10;

/// Settings shared by all planners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Enable 8-directional movement
    pub allow_diagonal: bool,
    /// Give up after expanding this many nodes, reporting a failure
    pub max_expansions: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            allow_diagonal: true,
            max_expansions: None,
        }
    }
}

impl PlannerConfig {
    pub fn four_connected() -> Self {
        PlannerConfig {
            allow_diagonal: false,
            ..Default::default()
        }
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

/// How a preset map is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapKind {
    Random { density: f64 },
    Maze,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapPreset {
    Simple,
    Medium,
    Complex,
    Maze,
    Large,
}

impl MapPreset {
    pub const ALL: [MapPreset; 5] = [
        MapPreset::Simple,
        MapPreset::Medium,
        MapPreset::Complex,
        MapPreset::Maze,
        MapPreset::Large,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MapPreset::Simple => "simple",
            MapPreset::Medium => "medium",
            MapPreset::Complex => "complex",
            MapPreset::Maze => "maze",
            MapPreset::Large => "large",
        }
    }

    /// Requested width and height. Mazes round even sizes down to odd ones.
    pub fn size(&self) -> (i32, i32) {
        match self {
            MapPreset::Maze => (30, 30),
            MapPreset::Large => (100, 100),
            _ => (50, 50),
        }
    }

    pub fn kind(&self) -> MapKind {
        match self {
            MapPreset::Simple => MapKind::Random { density: 0.15 },
            MapPreset::Medium => MapKind::Random { density: 0.25 },
            MapPreset::Complex => MapKind::Random { density: 0.35 },
            MapPreset::Maze => MapKind::Maze,
            MapPreset::Large => MapKind::Random { density: 0.20 },
        }
    }

    /// Generates the preset map, including its start and goal.
    pub fn generate(&self, seed: u64) -> Result<OccupancyGrid, GridError> {
        let (w, h) = self.size();
        match self.kind() {
            MapKind::Random { density } => generate_random_map(w, h, density, seed),
            MapKind::Maze => generate_maze(w, h, seed),
        }
    }
}

impl fmt::Display for MapPreset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MapPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown map preset '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_parse() {
        for preset in MapPreset::ALL {
            assert_eq!(preset.to_string().parse::<MapPreset>(), Ok(preset));
        }
        assert_eq!("MAZE".parse::<MapPreset>(), Ok(MapPreset::Maze));
        assert!("spiral".parse::<MapPreset>().is_err());
    }

    #[test]
    fn presets_generate_with_endpoints() {
        for preset in [MapPreset::Simple, MapPreset::Maze] {
            let grid = preset.generate(DEFAULT_SEED).unwrap();
            assert!(grid.start().is_some());
            assert!(grid.goal().is_some());
        }
        let maze = MapPreset::Maze.generate(DEFAULT_SEED).unwrap();
        assert_eq!((maze.width(), maze.height()), (29, 29));
    }

    #[test]
    fn default_planner_config() {
        let config = PlannerConfig::default();
        assert!(config.allow_diagonal);
        assert_eq!(config.max_expansions, None);
        assert!(!PlannerConfig::four_connected().allow_diagonal);
        let limited = PlannerConfig::default().with_max_expansions(5);
        assert_eq!(limited.max_expansions, Some(5));
    }

    #[test]
    fn planner_config_fills_missing_fields() {
        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        let config: PlannerConfig = serde_json::from_str(r#"{"max_expansions": 100}"#).unwrap();
        assert!(config.allow_diagonal);
        assert_eq!(config.max_expansions, Some(100));
    }

    #[test]
    fn planner_config_round_trips() {
        let config = PlannerConfig::four_connected().with_max_expansions(7);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"allow_diagonal":false,"max_expansions":7}"#);
        let back: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
