use std::collections::VecDeque;

use umbra_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Multi-source breadth-first flood.
    ///
    /// Each step has cost 1 and no cell farther than `max_dist` is reached.
    /// Every reachable cell appears exactly once in the result, in
    /// nondecreasing distance order.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_results.clear();

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            let Some(si) = self.idx(src) else {
                continue;
            };
            if self.bfs_map[si] != UNREACHABLE {
                continue;
            }
            self.bfs_map[si] = 0;
            queue.push_back(si);
            self.bfs_results.push(PathNode { pos: src, cost: 0 });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let nd = self.bfs_map[ci] + 1;
            if nd > max_dist {
                continue;
            }
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = nd;
                queue.push_back(ni);
                self.bfs_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Distance at `p` in the last flood, [`UNREACHABLE`] if not reached or
    /// out of range.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }
}
