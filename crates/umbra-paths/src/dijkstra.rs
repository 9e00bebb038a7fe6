use std::collections::BinaryHeap;

use umbra_core::Point;

use crate::PathRange;
use crate::pathrange::{NodeRef, PathNode, UNREACHABLE};
use crate::traits::WeightedPather;

impl PathRange {
    /// Multi-source Dijkstra cost map.
    ///
    /// Every source starts at cost 0. Cells whose cumulative cost would
    /// exceed `max_cost` are not reached, and [`UNREACHABLE`] edges are
    /// skipped. Returns the reached nodes in nondecreasing cost order.
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: i32,
    ) -> &[PathNode] {
        self.dijkstra_map.fill(UNREACHABLE);
        self.dijkstra_results.clear();

        self.dijkstra_generation = self.dijkstra_generation.wrapping_add(1);
        let cur_gen = self.dijkstra_generation;
        let mut seq: u32 = 0;

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                let n = &mut self.dijkstra_nodes[si];
                n.g = 0;
                n.f = 0;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[si] = 0;
                seq = seq.wrapping_add(1);
                open.push(NodeRef { idx: si, f: 0, seq });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.dijkstra_nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.dijkstra_nodes[ci].open = false;

            let cp = self.point(ci);
            self.dijkstra_results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let step = pather.cost(cp, np);
                if step == UNREACHABLE {
                    continue;
                }
                let tentative = current_g.saturating_add(step);
                if tentative > max_cost {
                    continue;
                }

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.f = tentative;
                n.open = true;
                self.dijkstra_map[ni] = tentative;
                seq = seq.wrapping_add(1);
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    seq,
                });
            }
        }

        self.nbuf = nbuf;
        &self.dijkstra_results
    }

    /// Cost at `p` in the last Dijkstra map, [`UNREACHABLE`] if not reached
    /// or out of range.
    pub fn dijkstra_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dijkstra_map[i],
            None => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testgrid::TestGrid;

    #[test]
    fn costs_grow_from_nearest_source() {
        let g = TestGrid::open(10, 3);
        let mut pr = PathRange::new(g.range);
        let nodes = pr.dijkstra_map(&g, &[Point::new(0, 1), Point::new(9, 1)], 100);
        assert_eq!(nodes.len(), 30);
        assert!(nodes.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert_eq!(pr.dijkstra_at(Point::new(4, 1)), 4);
        assert_eq!(pr.dijkstra_at(Point::new(6, 0)), 4);
        assert_eq!(pr.dijkstra_at(Point::new(10, 1)), UNREACHABLE);
    }

    #[test]
    fn max_cost_bounds_expansion() {
        let mut g = TestGrid::open(9, 9).with_walls(&[(5, 4)]);
        g.wall_cost = Some(4);
        let mut pr = PathRange::new(g.range);
        let nodes = pr.dijkstra_map(&g, &[Point::new(4, 4)], 2);
        assert!(nodes.iter().all(|n| n.cost <= 2));
        assert_eq!(pr.dijkstra_at(Point::new(5, 4)), UNREACHABLE);
        assert_eq!(pr.dijkstra_at(Point::new(6, 4)), UNREACHABLE);
        pr.dijkstra_map(&g, &[Point::new(4, 4)], 10);
        assert_eq!(pr.dijkstra_at(Point::new(5, 4)), 4);
        assert_eq!(pr.dijkstra_at(Point::new(6, 4)), 4);
    }
}
