//! Obstacle placement constrained by start-to-end reachability.
//!
//! Each candidate cell is tentatively turned into an obstacle and the grid is
//! checked with [`exists_path`]. The obstacle is kept only if the end is
//! still reachable. Running out of attempts is a degraded success: the grid
//! simply holds fewer obstacles than requested.

use rand::{Rng, RngExt};
use thiserror::Error;
use waypath_core::{Cell, CellModel, Grid, GridError, Pos};
use waypath_paths::exists_path;

/// Parameters of a generated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenConfig {
    pub rows: i32,
    pub cols: i32,
    pub obstacle_count: usize,
    /// Placement gives up after `obstacle_count * max_attempt_multiplier`
    /// attempts.
    pub max_attempt_multiplier: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            obstacle_count: 20,
            max_attempt_multiplier: 10,
        }
    }
}

impl GenConfig {
    /// Top-left corner.
    pub fn start(&self) -> Pos {
        Pos::ZERO
    }

    /// Bottom-right corner.
    pub fn end(&self) -> Pos {
        Pos::new(self.rows - 1, self.cols - 1)
    }
}

/// A generated grid and how many of the requested obstacles it holds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generated {
    pub grid: Grid,
    pub start: Pos,
    pub end: Pos,
    pub requested: usize,
    pub placed: usize,
}

impl Generated {
    /// Whether fewer obstacles were placed than requested.
    pub fn is_degraded(&self) -> bool {
        self.placed < self.requested
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
}

/// Obstacle generator driven by an explicit random source.
pub struct ObstacleGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> ObstacleGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Build a code-model grid from `config`, mark its corners as start and
    /// end, and scatter obstacles over it.
    pub fn generate(&mut self, config: &GenConfig) -> Result<Generated, GenError> {
        if config.max_attempt_multiplier == 0 {
            return Err(GenError::InvalidConfig(
                "max_attempt_multiplier must be at least 1".into(),
            ));
        }
        let (start, end) = (config.start(), config.end());
        let mut grid = Grid::with_endpoints(config.rows, config.cols, start, end)?;
        if start == end {
            return Err(GenError::InvalidConfig(format!(
                "a {}x{} grid has no room for distinct start and end",
                config.rows, config.cols
            )));
        }

        let placed = self.place_obstacles(
            &mut grid,
            start,
            end,
            config.obstacle_count,
            config.max_attempt_multiplier,
        );
        Ok(Generated {
            grid,
            start,
            end,
            requested: config.obstacle_count,
            placed,
        })
    }

    /// Turn up to `count` free cells of `grid` into obstacles, never cutting
    /// `start` off from `end`. Returns how many were placed.
    ///
    /// A free cell is walkable and is neither endpoint. At most
    /// `count * multiplier` candidates are tried. A candidate that would
    /// disconnect the endpoints is dropped for good, since further obstacles
    /// can only make that worse.
    pub fn place_obstacles(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        count: usize,
        multiplier: usize,
    ) -> usize {
        let wall = match grid.model() {
            CellModel::Code => Cell::OBSTACLE,
            CellModel::Cost => Cell(0),
        };
        let mut pool: Vec<Pos> = grid
            .iter()
            .map(|(p, _)| p)
            .filter(|&p| p != start && p != end && grid.is_walkable(p))
            .collect();

        let max_attempts = count.saturating_mul(multiplier);
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < max_attempts && !pool.is_empty() {
            attempts += 1;
            let p = pool.swap_remove(self.rng.random_range(0..pool.len()));
            let Some(prev) = grid.at(p) else {
                continue;
            };
            grid.set(p, wall);
            if exists_path(grid, start, end) {
                placed += 1;
            } else {
                grid.set(p, prev);
            }
        }

        if placed < count {
            log::warn!(
                "placed {placed} of {count} obstacles after {attempts} attempts ({} candidates left)",
                pool.len()
            );
        }
        placed
    }
}
