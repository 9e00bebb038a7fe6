use umbra_core::Point;

/// Neighbor enumeration for a search domain.
pub trait Pather {
    /// Append the neighbors of `p` into `buf`. The caller clears `buf`
    /// before calling. Out-of-bounds positions yield no neighbors.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A search domain with weighted edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to the adjacent `to`: non-negative, or
    /// [`UNREACHABLE`](crate::UNREACHABLE) for an edge that must never be
    /// taken.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// A weighted domain with an admissible heuristic, usable by A*.
pub trait AstarPather: WeightedPather {
    /// Estimate of the cost from `from` to `to`. Must never overestimate.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
