use waypath_core::{Grid, Pos};

use crate::error::{SearchError, validate_endpoints};
use crate::frontier::SearchFrontier;
use crate::pather::GridPather;
use crate::search::Search;
use crate::trace::PathTrace;
use crate::traits::WeightedPather;

/// Uniform/weighted-cost search over 4-directional moves.
///
/// Each step is charged the cost of the cell entered, so on a cost-model
/// grid the result is the cheapest route rather than the shortest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Search for Dijkstra {
    fn search(&self, grid: &Grid, start: Pos, end: Pos) -> Result<PathTrace, SearchError> {
        validate_endpoints(grid, start, end)?;
        let (rows, cols) = grid.dimensions();
        Ok(dijkstra_trace(&GridPather::cardinal(grid), rows, cols, start, end))
    }
}

/// Run Dijkstra from `from` until `to` is finalized or the frontier runs
/// dry.
///
/// Every finalized node records a level listing all of its non-closed
/// neighbors, whether or not their cost improved.
pub(crate) fn dijkstra_trace<P: WeightedPather>(
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
    frontier.seed(start_idx, 0.0);

    let mut nbuf = Vec::with_capacity(8);

    let found = loop {
        let Some(ci) = frontier.pop() else {
            break false;
        };
        if ci == goal_idx {
            break true;
        }

        let cp = frontier.pos(ci);
        let current_g = frontier.g(ci);

        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        let mut admitted = Vec::with_capacity(nbuf.len());
        for &np in nbuf.iter() {
            let Some(ni) = frontier.idx(np) else {
                continue;
            };
            if frontier.is_closed(ni) {
                continue;
            }
            admitted.push(np);
            let tentative = current_g + pather.cost(cp, np);
            frontier.relax(ni, tentative, tentative, ci);
        }
        trace.record(cp, admitted);
    };

    if found {
        trace.shortest_path = frontier.path_to(goal_idx);
    }
    log::debug!(
        "dijkstra {from} -> {to}: {} nodes finalized, path of {} cells",
        frontier.expanded(),
        trace.shortest_path.len()
    );
    trace
}
