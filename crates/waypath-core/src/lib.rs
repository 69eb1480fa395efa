//! **waypath-core**: foundational types for the waypath grid pathfinding
//! engine.
//!
//! This crate provides [`Pos`] (a `(row, col)` grid coordinate), the
//! [`Cell`] code newtype, and [`Grid`], a rectangular read-mostly grid that
//! can be interpreted either as obstacle codes or as per-cell traversal
//! costs (see [`CellModel`]).

pub mod geom;
pub mod grid;

pub use geom::Pos;
pub use grid::{Cell, CellModel, Grid, GridError};
