//! Strategy selection.

use std::fmt;
use std::str::FromStr;

use waypath_core::{Grid, Pos};

use crate::astar::AStar;
use crate::dijkstra::Dijkstra;
use crate::error::SearchError;
use crate::jps::Jps;
use crate::trace::PathTrace;

/// A shortest-path strategy over a [`Grid`].
///
/// Implementations validate both endpoints, never mutate the grid and keep
/// all search state private to the call, so one grid can be searched from
/// many threads at once.
pub trait Search {
    /// Find a path from `start` to `end`.
    ///
    /// An unreachable `end` is not an error: the returned trace has an empty
    /// path and records whatever was explored.
    fn search(&self, grid: &Grid, start: Pos, end: Pos) -> Result<PathTrace, SearchError>;
}

/// Which strategy [`find_path`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    Astar,
    JumpPoint,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::Astar, Algorithm::JumpPoint];

    /// The name used in text and JSON.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
            Algorithm::JumpPoint => "jump_point",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Algorithm::from_str`] for an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?}, expected one of dijkstra, astar, jump_point")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::Astar),
            "jump_point" | "jps" => Ok(Algorithm::JumpPoint),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Options for [`find_path`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    pub algorithm: Algorithm,
    /// 8-way movement for A*. Dijkstra is always 4-way and JPS always 8-way.
    pub diagonal: bool,
}

impl SearchOptions {
    pub const fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            diagonal: false,
        }
    }

    pub const fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }
}

/// Run the strategy selected by `options`.
pub fn find_path(
    grid: &Grid,
    start: Pos,
    end: Pos,
    options: &SearchOptions,
) -> Result<PathTrace, SearchError> {
    log::debug!(
        "find_path {start} -> {end} with {} (diagonal: {})",
        options.algorithm,
        options.diagonal
    );
    match options.algorithm {
        Algorithm::Dijkstra => Dijkstra.search(grid, start, end),
        Algorithm::Astar => AStar {
            diagonal: options.diagonal,
        }
        .search(grid, start, end),
        Algorithm::JumpPoint => Jps.search(grid, start, end),
    }
}
