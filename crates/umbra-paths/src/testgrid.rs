//! A small walled grid domain shared by the search tests.

use std::collections::HashSet;

use umbra_core::{Point, Range};

use crate::{AstarPather, Pather, UNREACHABLE, WeightedPather, manhattan};

pub(crate) struct TestGrid {
    pub(crate) range: Range,
    pub(crate) walls: HashSet<Point>,
    /// Cost of stepping onto a wall; `None` means walls are not neighbors.
    pub(crate) wall_cost: Option<i32>,
}

impl TestGrid {
    pub(crate) fn open(w: i32, h: i32) -> Self {
        Self {
            range: Range::new(0, 0, w, h),
            walls: HashSet::new(),
            wall_cost: None,
        }
    }

    pub(crate) fn with_walls(mut self, walls: &[(i32, i32)]) -> Self {
        self.walls = walls.iter().map(|&(x, y)| Point::new(x, y)).collect();
        self
    }

    pub(crate) fn path_cost(&self, path: &[Point]) -> i32 {
        path.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }
}

impl Pather for TestGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if !self.range.contains(p) {
            return;
        }
        for q in p.neighbors_4() {
            if !self.range.contains(q) {
                continue;
            }
            if self.wall_cost.is_none() && self.walls.contains(&q) {
                continue;
            }
            buf.push(q);
        }
    }
}

impl WeightedPather for TestGrid {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        if self.walls.contains(&to) {
            self.wall_cost.unwrap_or(UNREACHABLE)
        } else {
            1
        }
    }
}

impl AstarPather for TestGrid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
