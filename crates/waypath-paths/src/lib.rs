//! Grid pathfinding with replayable exploration traces.
//!
//! Three interchangeable strategies search a [`Grid`](waypath_core::Grid)
//! and all report the same [`PathTrace`] shape:
//!
//! - **Dijkstra** uniform/weighted-cost search ([`Dijkstra`])
//! - **A\*** with Manhattan or octile heuristics ([`AStar`])
//! - **Jump Point Search** with orthogonal path expansion ([`Jps`])
//!
//! [`exists_path`] answers plain connectivity questions and is what the
//! obstacle generator relies on. [`find_path`] selects a strategy from
//! [`SearchOptions`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | reachability |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`GridPather`] implements all three over a grid.

mod astar;
mod dijkstra;
mod distance;
mod error;
mod expand;
mod frontier;
mod jps;
mod pather;
mod reach;
mod search;
mod trace;
mod traits;

pub use astar::AStar;
pub use dijkstra::Dijkstra;
pub use distance::{chebyshev, manhattan, octile};
pub use error::{Endpoint, SearchError};
pub use expand::expand_diagonals;
pub use jps::Jps;
pub use pather::GridPather;
pub use reach::{component, exists_path};
pub use search::{Algorithm, ParseAlgorithmError, Search, SearchOptions, find_path};
pub use trace::{PathTrace, Step, path_cost};
pub use traits::{AstarPather, Pather, WeightedPather};
