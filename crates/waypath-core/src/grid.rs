//! The rectangular search grid.
//!
//! [`Cell`] is a newtype over `i32`. A [`Grid`] stores cells row-major and
//! is read through one of two [`CellModel`]s: obstacle codes, where only
//! [`Cell::OBSTACLE`] blocks movement and every step costs 1, or per-cell
//! traversal costs, where any positive value is the price of entering it.

use thiserror::Error;

use crate::geom::Pos;

/// A grid cell value.
///
/// Under [`CellModel::Code`] the value is one of the canonical codes below.
/// Under [`CellModel::Cost`] it is the cost of stepping into the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub i32);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const START: Cell = Cell(1);
    pub const END: Cell = Cell(2);
    pub const OBSTACLE: Cell = Cell(6);

    /// Create a new cell with the given value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Cell> for i32 {
    fn from(c: Cell) -> Self {
        c.0
    }
}

/// How the integer values of a [`Grid`] are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CellModel {
    /// Obstacle vs free, unit cost.
    #[default]
    Code,
    /// Positive integer cost per cell; values `<= 0` mean "no cost defined"
    /// and are impassable.
    Cost,
}

/// Errors raised when building a grid from caller data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,

    #[error("grid rows have no columns")]
    NoColumns,

    #[error("grid is not rectangular: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("a {rows}x{cols} grid has more cells than an i32 index can address")]
    TooLarge { rows: usize, cols: usize },
}

/// Dimensions whose every flat index fits in an `i32`.
fn checked_dims(rows: usize, cols: usize) -> Result<(i32, i32), GridError> {
    let too_large = || GridError::TooLarge { rows, cols };
    let r = i32::try_from(rows).map_err(|_| too_large())?;
    let c = i32::try_from(cols).map_err(|_| too_large())?;
    r.checked_mul(c).ok_or_else(too_large)?;
    Ok((r, c))
}

/// A fixed-size rectangular array of [`Cell`]s.
///
/// Searches only ever borrow a grid immutably, so a single grid can back any
/// number of concurrent searches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    model: CellModel,
}

impl Grid {
    /// Create an all-[`EMPTY`](Cell::EMPTY) code-model grid.
    ///
    /// Zero-sized dimensions are rejected the same way [`from_rows`]
    /// rejects empty input.
    ///
    /// [`from_rows`]: Self::from_rows
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 {
            return Err(GridError::Empty);
        }
        if cols <= 0 {
            return Err(GridError::NoColumns);
        }
        checked_dims(rows as usize, cols as usize)?;
        Ok(Self {
            cells: vec![Cell::EMPTY; (rows * cols) as usize],
            rows,
            cols,
            model: CellModel::Code,
        })
    }

    /// Create an empty code-model grid with [`Cell::START`] and
    /// [`Cell::END`] marked at the given positions.
    ///
    /// Out-of-range endpoints are left unmarked; callers validate them when
    /// searching.
    pub fn with_endpoints(rows: i32, cols: i32, start: Pos, end: Pos) -> Result<Self, GridError> {
        let mut g = Self::new(rows, cols)?;
        g.set(start, Cell::START);
        g.set(end, Cell::END);
        Ok(g)
    }

    /// Build a grid from row vectors, validating that it is non-empty and
    /// rectangular.
    pub fn from_rows<T>(rows: &[Vec<T>], model: CellModel) -> Result<Self, GridError>
    where
        T: Copy + Into<i32>,
    {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(GridError::NoColumns);
        }
        let (nrows, ncols) = checked_dims(rows.len(), width)?;
        let mut cells = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&v| Cell(v.into())));
        }
        Ok(Self {
            cells,
            rows: nrows,
            cols: ncols,
            model,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The interpretation applied to cell values.
    #[inline]
    pub fn model(&self) -> CellModel {
        self.model
    }

    #[inline]
    pub fn is_in_bounds(&self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.is_in_bounds(p) {
            return None;
        }
        Some((p.row * self.cols + p.col) as usize)
    }

    /// Position for a flat index produced by [`index`](Self::index).
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let cols = self.cols as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Get the cell at a position, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cell at a position. Does nothing if out of bounds.
    pub fn set(&mut self, p: Pos, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Whether a search may enter `p`.
    #[inline]
    pub fn is_walkable(&self, p: Pos) -> bool {
        match (self.at(p), self.model) {
            (None, _) => false,
            (Some(c), CellModel::Code) => c != Cell::OBSTACLE,
            (Some(c), CellModel::Cost) => c.0 > 0,
        }
    }

    /// Cost of entering `p`: 1 in the code model, the stored value in the
    /// cost model. Meaningful only for walkable positions.
    #[inline]
    pub fn cost_of(&self, p: Pos) -> f64 {
        match self.model {
            CellModel::Code => 1.0,
            CellModel::Cost => self.at(p).map_or(f64::INFINITY, |c| f64::from(c.0)),
        }
    }

    /// Count how many cells equal the given cell.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// First position (row-major) holding `cell`.
    pub fn find(&self, cell: Cell) -> Option<Pos> {
        self.cells.iter().position(|&c| c == cell).map(|i| self.pos(i))
    }

    /// Iterate over `(Pos, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Pos, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &c)| (self.pos(i), c))
    }

    /// Copy of the cell values as row vectors.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.cols as usize)
            .map(|r| r.iter().map(|c| c.0).collect())
            .collect()
    }
}

/// Wire shape of a grid: `{"model": "code", "rows": [[...], ...]}`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    #[serde(default)]
    model: CellModel,
    rows: Vec<Vec<i32>>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        Grid::from_rows(&r.rows, r.model)
    }
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        GridRepr {
            model: g.model,
            rows: g.to_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty_code_grid() {
        let g = Grid::new(3, 4).unwrap();
        assert_eq!(g.dimensions(), (3, 4));
        assert_eq!(g.len(), 12);
        assert_eq!(g.model(), CellModel::Code);
        assert_eq!(g.count(Cell::EMPTY), 12);
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        assert_eq!(Grid::new(0, 5), Err(GridError::Empty));
        assert_eq!(Grid::new(5, 0), Err(GridError::NoColumns));
        let none: Vec<Vec<i32>> = Vec::new();
        assert_eq!(Grid::from_rows(&none, CellModel::Code), Err(GridError::Empty));
        assert_eq!(
            Grid::from_rows(&[Vec::<i32>::new()], CellModel::Code),
            Err(GridError::NoColumns)
        );
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert_eq!(
            Grid::new(50_000, 50_000),
            Err(GridError::TooLarge {
                rows: 50_000,
                cols: 50_000
            })
        );
        assert_eq!(
            Grid::new(i32::MAX, 2),
            Err(GridError::TooLarge {
                rows: i32::MAX as usize,
                cols: 2
            })
        );
    }

    #[test]
    fn oversized_rows_are_rejected() {
        // Zero-sized cells keep these inputs free to allocate.
        #[derive(Clone, Copy)]
        struct Unit;
        impl From<Unit> for i32 {
            fn from(_: Unit) -> i32 {
                0
            }
        }

        let wide = [[Unit].repeat(i32::MAX as usize + 1)];
        assert_eq!(
            Grid::from_rows(&wide, CellModel::Code),
            Err(GridError::TooLarge {
                rows: 1,
                cols: i32::MAX as usize + 1
            })
        );
        let square = vec![[Unit].repeat(50_000); 50_000];
        assert_eq!(
            Grid::from_rows(&square, CellModel::Code),
            Err(GridError::TooLarge {
                rows: 50_000,
                cols: 50_000
            })
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]];
        assert_eq!(
            Grid::from_rows(&rows, CellModel::Code),
            Err(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn endpoints_are_marked() {
        let g = Grid::with_endpoints(4, 4, Pos::new(0, 0), Pos::new(3, 3)).unwrap();
        assert_eq!(g.at(Pos::new(0, 0)), Some(Cell::START));
        assert_eq!(g.at(Pos::new(3, 3)), Some(Cell::END));
        assert_eq!(g.find(Cell::END), Some(Pos::new(3, 3)));
    }

    #[test]
    fn code_model_walkability() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set(Pos::new(1, 0), Cell::OBSTACLE);
        assert!(g.is_walkable(Pos::new(0, 0)));
        assert!(!g.is_walkable(Pos::new(1, 0)));
        assert!(!g.is_walkable(Pos::new(-1, 0)));
        assert!(!g.is_walkable(Pos::new(0, 2)));
        assert_eq!(g.cost_of(Pos::new(1, 1)), 1.0);
        // out of bounds writes are ignored
        g.set(Pos::new(9, 9), Cell::OBSTACLE);
        assert_eq!(g.count(Cell::OBSTACLE), 1);
    }

    #[test]
    fn cost_model_walkability() {
        let g = Grid::from_rows(&[vec![1, 999], vec![0, -3]], CellModel::Cost).unwrap();
        assert!(g.is_walkable(Pos::new(0, 0)));
        assert!(g.is_walkable(Pos::new(0, 1)));
        assert!(!g.is_walkable(Pos::new(1, 0)));
        assert!(!g.is_walkable(Pos::new(1, 1)));
        assert_eq!(g.cost_of(Pos::new(0, 1)), 999.0);
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::new(3, 5).unwrap();
        for (p, _) in g.iter() {
            let i = g.index(p).unwrap();
            assert_eq!(g.pos(i), p);
        }
        assert_eq!(g.index(Pos::new(3, 0)), None);
    }

    #[test]
    fn to_rows_matches_input() {
        let rows = vec![vec![0, 6, 0], vec![1, 0, 2]];
        let g = Grid::from_rows(&rows, CellModel::Code).unwrap();
        assert_eq!(g.to_rows(), rows);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_wire_shape() {
        let g = Grid::with_endpoints(2, 2, Pos::new(0, 0), Pos::new(1, 1)).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"model":"code","rows":[[1,0],[0,2]]}"#);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn ragged_json_is_rejected() {
        let res: Result<Grid, _> = serde_json::from_str(r#"{"rows":[[0,0],[0]]}"#);
        assert!(res.is_err());
    }
}
