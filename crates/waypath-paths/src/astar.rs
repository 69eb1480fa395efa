use waypath_core::{Grid, Pos};

use crate::error::{SearchError, validate_endpoints};
use crate::expand::expand_diagonals;
use crate::frontier::SearchFrontier;
use crate::pather::GridPather;
use crate::search::Search;
use crate::trace::PathTrace;
use crate::traits::AstarPather;

/// Heuristic-guided search.
///
/// With `diagonal == false` moves are 4-way and the heuristic is Manhattan.
/// With `diagonal == true` moves are 8-way (diagonals cost √2 times the
/// entered cell) under the octile heuristic, and the resulting path is
/// converted to orthogonal steps through walkable elbow cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar {
    pub diagonal: bool,
}

impl AStar {
    pub const fn cardinal() -> Self {
        Self { diagonal: false }
    }

    pub const fn octile() -> Self {
        Self { diagonal: true }
    }
}

impl Search for AStar {
    fn search(&self, grid: &Grid, start: Pos, end: Pos) -> Result<PathTrace, SearchError> {
        validate_endpoints(grid, start, end)?;
        let (rows, cols) = grid.dimensions();
        if !self.diagonal {
            return Ok(astar_trace(&GridPather::cardinal(grid), rows, cols, start, end));
        }

        let mut trace = astar_trace(&GridPather::octile(grid), rows, cols, start, end);
        // GridPather never offers a diagonal without an open elbow, so the
        // expansion cannot fail here.
        match expand_diagonals(grid, &trace.shortest_path) {
            Ok(path) => trace.shortest_path = path,
            Err((a, b)) => log::warn!("astar: diagonal step {a} -> {b} has no open elbow"),
        }
        Ok(trace)
    }
}

/// Run A* from `from` towards `to`.
///
/// A level lists the neighbors whose best cost the finalized node improved.
pub(crate) fn astar_trace<P: AstarPather>(
    pather: &P,
    rows: i32,
    cols: i32,
    from: Pos,
    to: Pos,
) -> PathTrace {
    let mut trace = PathTrace::default();
    let mut frontier = SearchFrontier::new(rows, cols);
    let (Some(start_idx), Some(goal_idx)) = (frontier.idx(from), frontier.idx(to)) else {
        return trace;
    };
    frontier.seed(start_idx, pather.estimate(from, to));

    let mut nbuf = Vec::with_capacity(8);

    let found = 'search: loop {
        let Some(ci) = frontier.pop() else {
            break 'search false;
        };
        if ci == goal_idx {
            break 'search true;
        }

        let current_g = frontier.g(ci);
        let current_point = frontier.pos(ci);

        nbuf.clear();
        pather.neighbors(current_point, &mut nbuf);

        let mut admitted = Vec::new();
        for &np in nbuf.iter() {
            let Some(ni) = frontier.idx(np) else {
                continue;
            };
            let tentative_g = current_g + pather.cost(current_point, np);
            let f = tentative_g + pather.estimate(np, to);
            if frontier.relax(ni, tentative_g, f, ci) {
                admitted.push(np);
            }
        }
        trace.record(current_point, admitted);
    };

    if found {
        trace.shortest_path = frontier.path_to(goal_idx);
    }
    log::debug!(
        "astar {from} -> {to}: {} nodes finalized, path of {} cells",
        frontier.expanded(),
        trace.shortest_path.len()
    );
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::Dijkstra;
    use crate::trace::path_cost;
    use waypath_core::{Cell, CellModel};

    fn grid(rows: &[&str]) -> Grid {
        let rows: Vec<Vec<i32>> = rows
            .iter()
            .map(|r| r.chars().map(|c| if c == '#' { 6 } else { 0 }).collect())
            .collect();
        Grid::from_rows(&rows, CellModel::Code).unwrap()
    }

    fn assert_orthogonal_walkable(g: &Grid, path: &[Pos]) {
        for w in path.windows(2) {
            assert!(w[0].is_adjacent_4(w[1]), "{} -> {} is not orthogonal", w[0], w[1]);
        }
        assert!(path.iter().all(|&p| g.is_walkable(p)));
    }

    #[test]
    fn open_grid_manhattan() {
        let g = Grid::new(5, 5).unwrap();
        let t = AStar::cardinal().search(&g, Pos::new(0, 0), Pos::new(4, 4)).unwrap();
        assert_eq!(t.shortest_path.len(), 9);
        assert_orthogonal_walkable(&g, &t.shortest_path);
    }

    #[test]
    fn matches_dijkstra_cost_around_walls() {
        let g = grid(&[
            ".....#....",
            ".###.#.##.",
            ".#...#..#.",
            ".#.####.#.",
            ".#......#.",
            ".######.#.",
            "........#.",
        ]);
        let (s, e) = (Pos::new(0, 0), Pos::new(6, 9));
        let a = AStar::cardinal().search(&g, s, e).unwrap();
        let d = Dijkstra.search(&g, s, e).unwrap();
        assert!(a.is_found());
        assert_eq!(path_cost(&g, &a.shortest_path), path_cost(&g, &d.shortest_path));
    }

    #[test]
    fn diagonal_path_is_presented_orthogonally() {
        let g = grid(&[
            "......",
            "..#...",
            ".#....",
            "......",
            "....#.",
            "......",
        ]);
        let t = AStar::octile().search(&g, Pos::new(0, 0), Pos::new(5, 5)).unwrap();
        assert_eq!(t.shortest_path.first(), Some(&Pos::new(0, 0)));
        assert_eq!(t.shortest_path.last(), Some(&Pos::new(5, 5)));
        assert_orthogonal_walkable(&g, &t.shortest_path);
    }

    #[test]
    fn diagonal_never_squeezes_between_obstacles() {
        // The only diagonal shortcut is pinched; the detour must go around.
        let g = grid(&["..#", ".#.", "..."]);
        let t = AStar::octile().search(&g, Pos::new(0, 1), Pos::new(1, 2)).unwrap();
        assert!(t.is_found());
        assert_orthogonal_walkable(&g, &t.shortest_path);
        assert!(t.shortest_path.len() > 3);
    }

    #[test]
    fn levels_list_only_improvements() {
        let g = Grid::new(3, 3).unwrap();
        let t = AStar::cardinal().search(&g, Pos::new(0, 0), Pos::new(2, 2)).unwrap();
        for s in &t.steps {
            assert!(!s.admitted.is_empty());
            assert!(!s.admitted.contains(&s.node));
        }
        assert_eq!(t.steps[0].node, Pos::new(0, 0));
        assert_eq!(t.steps[0].admitted, vec![Pos::new(1, 0), Pos::new(0, 1)]);
    }

    #[test]
    fn enclosed_end_yields_empty_path() {
        let mut g = Grid::new(4, 4).unwrap();
        for p in [Pos::new(2, 3), Pos::new(3, 2), Pos::new(2, 2)] {
            g.set(p, Cell::OBSTACLE);
        }
        for astar in [AStar::cardinal(), AStar::octile()] {
            let t = astar.search(&g, Pos::new(0, 0), Pos::new(3, 3)).unwrap();
            assert!(t.shortest_path.is_empty());
            assert!(t.levels() > 0);
        }
    }
}
