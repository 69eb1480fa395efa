use std::f64::consts::SQRT_2;

use waypath_core::{Grid, Pos};

use crate::distance;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// [`AstarPather`] over a [`Grid`], moving 4-way or 8-way.
///
/// A diagonal step is only offered when at least one of its two orthogonal
/// elbow cells is walkable, so every diagonal in a path found through this
/// pather can later be replaced by a walkable orthogonal detour.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'g> {
    grid: &'g Grid,
    diagonal: bool,
}

impl<'g> GridPather<'g> {
    /// 4-directional movement with the Manhattan heuristic.
    pub fn cardinal(grid: &'g Grid) -> Self {
        Self {
            grid,
            diagonal: false,
        }
    }

    /// 8-directional movement with the octile heuristic.
    pub fn octile(grid: &'g Grid) -> Self {
        Self {
            grid,
            diagonal: true,
        }
    }

    /// The underlying grid.
    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Whether diagonal steps are offered.
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.diagonal
    }

    /// At least one elbow of the diagonal step `p -> p + d` is open.
    #[inline]
    fn has_elbow(&self, p: Pos, d: Pos) -> bool {
        self.grid.is_walkable(p.shift(d.row, 0)) || self.grid.is_walkable(p.shift(0, d.col))
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        if !self.diagonal {
            buf.extend(p.neighbors_4().into_iter().filter(|&n| self.grid.is_walkable(n)));
            return;
        }
        for n in p.neighbors_8() {
            if !self.grid.is_walkable(n) {
                continue;
            }
            let d = n - p;
            if d.is_diagonal() && !self.has_elbow(p, d) {
                continue;
            }
            buf.push(n);
        }
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, from: Pos, to: Pos) -> f64 {
        let base = self.grid.cost_of(to);
        if (to - from).is_diagonal() {
            base * SQRT_2
        } else {
            base
        }
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Pos, to: Pos) -> f64 {
        if self.diagonal {
            distance::octile(from, to)
        } else {
            f64::from(distance::manhattan(from, to))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::{Cell, CellModel};

    fn neighbors(p: &impl Pather, at: Pos) -> Vec<Pos> {
        let mut buf = Vec::new();
        p.neighbors(at, &mut buf);
        buf
    }

    #[test]
    fn cardinal_skips_obstacles_and_edges() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set(Pos::new(0, 1), Cell::OBSTACLE);
        let n = neighbors(&GridPather::cardinal(&g), Pos::new(0, 0));
        assert_eq!(n, vec![Pos::new(1, 0)]);
    }

    #[test]
    fn diagonal_needs_an_open_elbow() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set(Pos::new(0, 1), Cell::OBSTACLE);
        g.set(Pos::new(1, 0), Cell::OBSTACLE);
        let n = neighbors(&GridPather::octile(&g), Pos::new(0, 0));
        assert!(n.is_empty(), "pinched diagonal must not be offered: {n:?}");

        g.set(Pos::new(1, 0), Cell::EMPTY);
        let n = neighbors(&GridPather::octile(&g), Pos::new(0, 0));
        assert_eq!(n, vec![Pos::new(1, 0), Pos::new(1, 1)]);
    }

    #[test]
    fn costs_follow_the_entered_cell() {
        let g = Grid::from_rows(&[vec![1, 5], vec![3, 2]], CellModel::Cost).unwrap();
        let p = GridPather::octile(&g);
        assert_eq!(p.cost(Pos::new(0, 0), Pos::new(0, 1)), 5.0);
        assert!((p.cost(Pos::new(0, 0), Pos::new(1, 1)) - 2.0 * SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn heuristic_matches_movement() {
        let g = Grid::new(5, 5).unwrap();
        let (a, b) = (Pos::new(0, 0), Pos::new(3, 4));
        assert_eq!(GridPather::cardinal(&g).estimate(a, b), 7.0);
        assert!((GridPather::octile(&g).estimate(a, b) - distance::octile(a, b)).abs() < 1e-12);
    }
}
