//! Random obstacle placement for waypath grids.
//!
//! Every grid produced here keeps its start connected to its end. The random
//! source is always passed in, so a fixed seed reproduces the same grid.

pub mod obstacles;

pub use obstacles::{GenConfig, GenError, Generated, ObstacleGen};
