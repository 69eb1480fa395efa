//! Jump Point Search (JPS) on uniform-cost grids.
//!
//! JPS is an optimised A* variant for 8-connected grids where every
//! walkable step has the same cost. It "jumps" along straight lines and only
//! adds nodes to the open list at *jump points*: the goal, cells with forced
//! neighbours, and diagonal cells from which an orthogonal scan finds one.
//!
//! Searching is 8-way but the reported path is orthogonal. A diagonal step
//! squeezed between two obstacles cannot be turned into an orthogonal
//! detour; when the best route contains one, that step is remembered as
//! *pinched* and the search runs again without it.

use std::collections::HashSet;
use std::f64::consts::SQRT_2;

use waypath_core::{Grid, Pos};

use crate::distance;
use crate::error::{SearchError, validate_endpoints};
use crate::expand::expand_diagonals;
use crate::frontier::SearchFrontier;
use crate::search::Search;
use crate::trace::PathTrace;

/// Jump Point Search. Cell costs are ignored: every orthogonal step costs 1
/// and every diagonal step √2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jps;

/// Successor found by [`Jumper::jump`].
#[derive(Debug, Clone, PartialEq)]
struct JumpPoint {
    pos: Pos,
    /// Cells walked to get here, excluding the origin, including `pos`.
    segment: Vec<Pos>,
    cost: f64,
}

const ALL_DIRS: [Pos; 8] = [
    Pos::new(1, 0),
    Pos::new(-1, 0),
    Pos::new(0, 1),
    Pos::new(0, -1),
    Pos::new(1, 1),
    Pos::new(1, -1),
    Pos::new(-1, 1),
    Pos::new(-1, -1),
];

impl Search for Jps {
    fn search(&self, grid: &Grid, start: Pos, end: Pos) -> Result<PathTrace, SearchError> {
        validate_endpoints(grid, start, end)?;

        let mut trace = PathTrace::default();
        let mut pinched = HashSet::new();
        let mut passes = 0;
        loop {
            passes += 1;
            let jumper = Jumper {
                grid,
                goal: end,
                pinched: &pinched,
            };
            let Some(raw) = jumper.pass(start, &mut trace) else {
                break;
            };
            match expand_diagonals(grid, &raw) {
                Ok(path) => {
                    trace.shortest_path = path;
                    break;
                }
                Err((a, b)) => {
                    log::trace!("jps: diagonal {a} -> {b} is pinched, searching again");
                    pinched.insert((a, b));
                    pinched.insert((b, a));
                }
            }
        }
        log::debug!(
            "jps {start} -> {end}: {passes} pass(es), {} levels, path of {} cells",
            trace.levels(),
            trace.shortest_path.len()
        );
        Ok(trace)
    }
}

struct Jumper<'a> {
    grid: &'a Grid,
    goal: Pos,
    pinched: &'a HashSet<(Pos, Pos)>,
}

impl Jumper<'_> {
    /// One full best-first search. Levels are appended to `trace`. Returns
    /// the raw (possibly diagonal) cell path, or `None` when the frontier is
    /// exhausted.
    fn pass(&self, start: Pos, trace: &mut PathTrace) -> Option<Vec<Pos>> {
        let goal = self.goal;
        let mut frontier = SearchFrontier::new(self.grid.rows(), self.grid.cols());
        let start_idx = frontier.idx(start)?;
        let goal_idx = frontier.idx(goal)?;
        // Cells walked by the jump that produced each node's current parent.
        let mut segments: Vec<Vec<Pos>> = vec![Vec::new(); self.grid.len()];

        frontier.seed(start_idx, distance::octile(start, goal));

        loop {
            let ci = frontier.pop()?;
            if ci == goal_idx {
                break;
            }
            let cp = frontier.pos(ci);
            let cur_g = frontier.g(ci);

            let dirs = match frontier.parent(ci) {
                None => ALL_DIRS.to_vec(),
                Some(pi) => self.prune_directions(cp, frontier.pos(pi).dir_to(cp)),
            };

            let mut admitted = Vec::new();
            for dir in dirs {
                let Some(jp) = self.jump(cp, dir) else {
                    continue;
                };
                let Some(ji) = frontier.idx(jp.pos) else {
                    continue;
                };
                let g = cur_g + jp.cost;
                if frontier.relax(ji, g, g + distance::octile(jp.pos, goal), ci) {
                    admitted.push(jp.pos);
                    segments[ji] = jp.segment;
                }
            }
            trace.record(cp, admitted);
        }

        let mut path = vec![start];
        for i in frontier.chain(goal_idx).into_iter().skip(1) {
            path.extend_from_slice(&segments[i]);
        }
        Some(path)
    }

    #[inline]
    fn walkable(&self, p: Pos) -> bool {
        self.grid.is_walkable(p)
    }

    /// Neighbours of `p` that become reachable only through `p` when
    /// travelling in `dir`, because an adjacent cell is blocked.
    fn forced_neighbors(&self, p: Pos, dir: Pos) -> Vec<Pos> {
        let mut forced = Vec::with_capacity(2);
        let mut check = |blocked: Pos, open: Pos| {
            if !self.walkable(blocked) && self.walkable(open) {
                forced.push(open);
            }
        };
        if dir.is_diagonal() {
            check(p.shift(-dir.row, 0), p.shift(-dir.row, dir.col));
            check(p.shift(0, -dir.col), p.shift(dir.row, -dir.col));
        } else if dir.row != 0 {
            // Vertical
            check(p.shift(0, -1), p.shift(dir.row, -1));
            check(p.shift(0, 1), p.shift(dir.row, 1));
        } else {
            // Horizontal
            check(p.shift(-1, 0), p.shift(-1, dir.col));
            check(p.shift(1, 0), p.shift(1, dir.col));
        }
        forced
    }

    /// Directions worth jumping from `p` after arriving in direction `dir`:
    /// the natural continuations plus one per forced neighbour.
    fn prune_directions(&self, p: Pos, dir: Pos) -> Vec<Pos> {
        let mut dirs = Vec::with_capacity(5);
        if dir.is_diagonal() {
            for d in [Pos::new(0, dir.col), Pos::new(dir.row, 0), dir] {
                if self.walkable(p + d) {
                    dirs.push(d);
                }
            }
        } else if self.walkable(p + dir) {
            dirs.push(dir);
        }
        dirs.extend(self.forced_neighbors(p, dir).into_iter().map(|n| n - p));
        dirs
    }

    /// Whether the step `from -> from + dir` was found unexpandable.
    #[inline]
    fn is_pinched(&self, from: Pos, dir: Pos) -> bool {
        dir.is_diagonal() && self.pinched.contains(&(from, from + dir))
    }

    /// Walk from `from` in `dir` until a jump point is found.
    ///
    /// Fails at a blocked cell, the grid edge, or a pinched diagonal step.
    /// Diagonal travel additionally stops wherever an orthogonal scan along
    /// either component direction finds a jump point.
    fn jump(&self, from: Pos, dir: Pos) -> Option<JumpPoint> {
        let step_cost = if dir.is_diagonal() { SQRT_2 } else { 1.0 };
        let mut cur = from;
        let mut segment = Vec::new();
        let mut cost = 0.0;

        loop {
            if self.is_pinched(cur, dir) {
                return None;
            }
            let next = cur + dir;
            if !self.walkable(next) {
                return None;
            }
            cur = next;
            segment.push(cur);
            cost += step_cost;

            let stop = cur == self.goal
                || !self.forced_neighbors(cur, dir).is_empty()
                || (dir.is_diagonal()
                    && [Pos::new(dir.row, 0), Pos::new(0, dir.col)]
                        .into_iter()
                        .any(|d| self.scan(cur, d)));
            if stop {
                return Some(JumpPoint {
                    pos: cur,
                    segment,
                    cost,
                });
            }
        }
    }

    /// Orthogonal jump that only reports whether a jump point lies ahead.
    fn scan(&self, from: Pos, dir: Pos) -> bool {
        let mut cur = from + dir;
        while self.walkable(cur) {
            if cur == self.goal || !self.forced_neighbors(cur, dir).is_empty() {
                return true;
            }
            cur = cur + dir;
        }
        false
    }
}
