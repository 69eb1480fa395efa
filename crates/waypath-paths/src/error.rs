use std::fmt;

use thiserror::Error;
use waypath_core::{Grid, Pos};

/// Which end of a search an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// A search that could not begin. An unreachable goal is not an error; it
/// yields an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{which} position ({pos}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        which: Endpoint,
        pos: Pos,
        rows: i32,
        cols: i32,
    },

    #[error("{which} position ({pos}) is not walkable")]
    Blocked { which: Endpoint, pos: Pos },
}

/// Reject endpoints that are out of bounds or unwalkable before any search
/// state is allocated.
pub(crate) fn validate_endpoints(grid: &Grid, start: Pos, end: Pos) -> Result<(), SearchError> {
    for (which, pos) in [(Endpoint::Start, start), (Endpoint::End, end)] {
        if !grid.is_in_bounds(pos) {
            let (rows, cols) = grid.dimensions();
            return Err(SearchError::OutOfBounds {
                which,
                pos,
                rows,
                cols,
            });
        }
        if !grid.is_walkable(pos) {
            return Err(SearchError::Blocked { which, pos });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::Cell;

    #[test]
    fn out_of_bounds_is_reported_first_for_start() {
        let g = Grid::new(2, 3).unwrap();
        let err = validate_endpoints(&g, Pos::new(5, 0), Pos::new(9, 9)).unwrap_err();
        assert_eq!(
            err,
            SearchError::OutOfBounds {
                which: Endpoint::Start,
                pos: Pos::new(5, 0),
                rows: 2,
                cols: 3
            }
        );
        assert_eq!(err.to_string(), "start position (5,0) is outside the 2x3 grid");
    }

    #[test]
    fn blocked_end() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set(Pos::new(1, 1), Cell::OBSTACLE);
        let err = validate_endpoints(&g, Pos::new(0, 0), Pos::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            SearchError::Blocked {
                which: Endpoint::End,
                pos: Pos::new(1, 1)
            }
        );
        assert!(validate_endpoints(&g, Pos::new(0, 0), Pos::new(0, 1)).is_ok());
    }
}
