//! Start-to-end connectivity checks.

use waypath_core::{Grid, Pos};

use crate::pather::GridPather;
use crate::traits::Pather;

/// Whether `end` can be reached from `start` moving 4-way over walkable
/// cells.
///
/// Iterative depth-first traversal with a visited set sized to the grid;
/// stops at the first sight of `end`.
pub fn exists_path(grid: &Grid, start: Pos, end: Pos) -> bool {
    if !grid.is_walkable(start) || !grid.is_walkable(end) {
        return false;
    }
    if start == end {
        return true;
    }
    let mut found = false;
    dfs(grid, start, |p| {
        found = p == end;
        found
    });
    found
}

/// Every walkable cell 4-connected to `start`, in discovery order.
pub fn component(grid: &Grid, start: Pos) -> Vec<Pos> {
    let mut cells = Vec::new();
    if grid.is_walkable(start) {
        cells.push(start);
        dfs(grid, start, |p| {
            cells.push(p);
            false
        });
    }
    cells
}

/// Visit newly discovered cells until `visit` returns `true`.
fn dfs(grid: &Grid, start: Pos, mut visit: impl FnMut(Pos) -> bool) {
    let Some(si) = grid.index(start) else {
        return;
    };
    let pather = GridPather::cardinal(grid);
    let mut visited = vec![false; grid.len()];
    let mut stack = vec![start];
    let mut nbuf = Vec::with_capacity(4);
    visited[si] = true;

    while let Some(p) = stack.pop() {
        nbuf.clear();
        pather.neighbors(p, &mut nbuf);
        for &n in nbuf.iter() {
            let Some(ni) = grid.index(n) else {
                continue;
            };
            if visited[ni] {
                continue;
            }
            visited[ni] = true;
            if visit(n) {
                return;
            }
            stack.push(n);
        }
    }
}
