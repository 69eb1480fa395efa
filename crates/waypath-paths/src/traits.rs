use waypath_core::Pos;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the walkable neighbors of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Pos, to: Pos) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible) and must not drop
    /// by more than the edge cost between neighbors (consistent).
    fn estimate(&self, from: Pos, to: Pos) -> f64;
}
