//! Open list and node arena shared by every strategy.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use waypath_core::Pos;

/// Parent index of a root node.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Node arena
// ---------------------------------------------------------------------------

/// Search-tree record for one grid cell.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Best known cost-to-reach.
    pub(crate) g: f64,
    pub(crate) parent: usize,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

/// Heap entry, ordered by `key` then by insertion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) key: OrderedFloat<f64>,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key first; equal
        // keys pop in insertion order.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchFrontier
// ---------------------------------------------------------------------------

/// Priority-ordered frontier plus the closed set and cost map of one search
/// run.
///
/// Entries are never updated in place: an improved cost pushes a fresh
/// entry and the superseded one is dropped when it surfaces on an already
/// closed node.
pub(crate) struct SearchFrontier {
    rows: i32,
    cols: i32,
    nodes: Vec<Node>,
    open: BinaryHeap<NodeRef>,
    seq: u64,
    expanded: usize,
}

impl SearchFrontier {
    pub(crate) fn new(rows: i32, cols: i32) -> Self {
        let len = (rows.max(0) as usize) * (cols.max(0) as usize);
        Self {
            rows,
            cols,
            nodes: vec![Node::default(); len],
            open: BinaryHeap::new(),
            seq: 0,
            expanded: 0,
        }
    }

    /// Convert a `Pos` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> Option<usize> {
        if p.row < 0 || p.row >= self.rows || p.col < 0 || p.col >= self.cols {
            return None;
        }
        Some((p.row * self.cols + p.col) as usize)
    }

    /// Convert a flat index back to a `Pos`.
    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Pos {
        let cols = self.cols as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Start a search at `idx` with cost 0.
    pub(crate) fn seed(&mut self, idx: usize, key: f64) {
        let n = &mut self.nodes[idx];
        n.g = 0.0;
        n.parent = NO_PARENT;
        self.push(idx, key);
    }

    fn push(&mut self, idx: usize, key: f64) {
        self.open.push(NodeRef {
            idx,
            key: OrderedFloat(key),
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Pop the cheapest open node and close it. Stale entries are skipped.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        while let Some(cur) = self.open.pop() {
            let n = &mut self.nodes[cur.idx];
            if n.closed {
                continue;
            }
            n.closed = true;
            self.expanded += 1;
            return Some(cur.idx);
        }
        None
    }

    /// Offer cost `g` for `idx` via `parent`. Records the improvement and
    /// pushes a new entry with priority `key` only if `idx` is still open
    /// and `g` beats its best known cost.
    pub(crate) fn relax(&mut self, idx: usize, g: f64, key: f64, parent: usize) -> bool {
        let n = &mut self.nodes[idx];
        if n.closed || g >= n.g {
            return false;
        }
        n.g = g;
        n.parent = parent;
        self.push(idx, key);
        true
    }

    #[inline]
    pub(crate) fn g(&self, idx: usize) -> f64 {
        self.nodes[idx].g
    }

    #[inline]
    pub(crate) fn is_closed(&self, idx: usize) -> bool {
        self.nodes[idx].closed
    }

    #[inline]
    pub(crate) fn parent(&self, idx: usize) -> Option<usize> {
        match self.nodes[idx].parent {
            NO_PARENT => None,
            p => Some(p),
        }
    }

    /// Number of nodes finalized so far.
    #[inline]
    pub(crate) fn expanded(&self) -> usize {
        self.expanded
    }

    /// Arena indices from the root of `goal`'s tree down to `goal`.
    pub(crate) fn chain(&self, goal: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            chain.push(ci);
            ci = self.nodes[ci].parent;
        }
        chain.reverse();
        chain
    }

    /// Positions from the root of `goal`'s tree down to `goal`.
    pub(crate) fn path_to(&self, goal: usize) -> Vec<Pos> {
        self.chain(goal).into_iter().map(|i| self.pos(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_cheapest_first_and_fifo_on_ties() {
        let mut f = SearchFrontier::new(1, 4);
        f.seed(0, 0.0);
        assert_eq!(f.pop(), Some(0));
        assert!(f.relax(3, 2.0, 2.0, 0));
        assert!(f.relax(1, 1.0, 1.0, 0));
        assert!(f.relax(2, 1.0, 1.0, 0));
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(2));
        assert_eq!(f.pop(), Some(3));
        assert_eq!(f.pop(), None);
        assert_eq!(f.expanded(), 4);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut f = SearchFrontier::new(1, 3);
        f.seed(0, 0.0);
        f.pop();
        assert!(f.relax(2, 5.0, 5.0, 0));
        assert!(f.relax(1, 1.0, 1.0, 0));
        assert!(f.relax(2, 2.0, 2.0, 1));
        assert!(!f.relax(2, 3.0, 3.0, 0), "worse cost must not be recorded");
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(2));
        // the 5.0 entry for node 2 is stale
        assert_eq!(f.pop(), None);
        assert_eq!(f.g(2), 2.0);
        assert_eq!(f.parent(2), Some(1));
    }

    #[test]
    fn closed_nodes_reject_relaxation() {
        let mut f = SearchFrontier::new(2, 2);
        f.seed(0, 0.0);
        f.pop();
        assert!(f.is_closed(0));
        assert!(!f.relax(0, -1.0, -1.0, 3));
    }

    #[test]
    fn path_follows_parents() {
        let mut f = SearchFrontier::new(2, 2);
        f.seed(0, 0.0);
        f.pop();
        f.relax(1, 1.0, 1.0, 0);
        f.pop();
        f.relax(3, 2.0, 2.0, 1);
        assert_eq!(f.path_to(3), vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1)]);
        assert_eq!(f.idx(Pos::new(1, 1)), Some(3));
        assert_eq!(f.idx(Pos::new(2, 0)), None);
    }
}
