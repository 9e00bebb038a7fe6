//! Cost-bounded ray propagation for field of vision and lighting.
//!
//! Propagation expands in growing square rings around a source. Each cell
//! takes the cheaper of at most two parents (see [`umbra_core::parents`]),
//! so every ray is a straight or bent-once line. Terrain weighting comes
//! from a [`Lighter`]; cells whose accumulated cost exceeds the lighter's
//! maximum are not admitted and do not propagate further.

use umbra_core::{Point, Range, parents};

/// A cell reached by propagation, with its accumulated cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightNode {
    pub pos: Point,
    pub cost: i32,
}

/// Cost model for propagation.
pub trait Lighter {
    /// Cost of light passing from `from` to the adjacent `to`, for a ray
    /// originating at `src`.
    fn cost(&self, src: Point, from: Point, to: Point) -> i32;

    /// Largest accumulated cost admitted for rays from `src`.
    fn max_cost(&self, src: Point) -> i32;
}

#[derive(Clone, Copy)]
enum Update {
    Vision,
    Light,
}

/// Field of vision and light map computation over a fixed rectangle.
pub struct FOV {
    range: Range,
    /// Stored value is cost + 1, so 0 means "not reached".
    costs: Vec<i32>,
    /// Nodes reached by the last `vision_map`/`light_map` call.
    lighted: Vec<LightNode>,
    ray_cache: Vec<LightNode>,
    /// Source of the last single-source computation.
    src: Point,
}

impl FOV {
    pub fn new(range: Range) -> Self {
        Self {
            range,
            costs: vec![0; range.len()],
            lighted: Vec::new(),
            ray_cache: Vec::new(),
            src: Point::ZERO,
        }
    }

    /// The rectangle of valid positions.
    pub fn range(&self) -> Range {
        self.range
    }

    fn idx(&self, p: Point) -> usize {
        let q = p - self.range.min;
        (q.y * self.range.width() + q.x) as usize
    }

    // ── Single-source vision ───────────────────────────────────────

    /// Propagate from `src` and return every admitted node, source first
    /// with cost 0. Values can also be consulted with [`at`](Self::at).
    ///
    /// An out-of-range source yields no nodes.
    pub fn vision_map(&mut self, lt: &impl Lighter, src: Point) -> &[LightNode] {
        self.lighted.clear();
        self.costs.fill(0);
        if !src.in_range(&self.range) {
            return &self.lighted;
        }
        self.lighted.push(LightNode { pos: src, cost: 0 });
        self.propagate(lt, src, Update::Vision);
        &self.lighted
    }

    fn propagate(&mut self, lt: &impl Lighter, src: Point, mode: Update) {
        self.src = src;
        let src_idx = self.idx(src);
        self.costs[src_idx] = 1;

        let max_cost = lt.max_cost(src);
        for d in 1..=max_cost {
            let r = self.range;
            if src.x - d < r.min.x && src.x + d >= r.max.x && src.y - d < r.min.y && src.y + d >= r.max.y {
                break;
            }
            // Rows span the ring's full width, columns skip the row cells.
            let rows = r.intersect(Range::new(src.x - d, src.y - d, src.x + d + 1, src.y + d + 1));
            let cols = r.intersect(Range::new(src.x - d, src.y - d + 1, src.x + d + 1, src.y + d));
            for y in [src.y + d, src.y - d] {
                if y < self.range.min.y || y >= self.range.max.y {
                    continue;
                }
                for x in rows.min.x..rows.max.x {
                    self.update(lt, Point::new(x, y), mode);
                }
            }
            for x in [src.x + d, src.x - d] {
                if x < self.range.min.x || x >= self.range.max.x {
                    continue;
                }
                for y in cols.min.y..cols.max.y {
                    self.update(lt, Point::new(x, y), mode);
                }
            }
        }
    }

    fn update(&mut self, lt: &impl Lighter, to: Point, mode: Update) {
        let Some(n) = self.from_internal(lt, to) else {
            return;
        };
        if n.cost - 1 > lt.max_cost(self.src) {
            return;
        }
        let idx = self.idx(to);
        match mode {
            Update::Vision => {
                self.costs[idx] = n.cost;
                self.lighted.push(LightNode {
                    pos: to,
                    cost: n.cost - 1,
                });
            }
            Update::Light => {
                let cur = self.costs[idx];
                if cur == 0 || n.cost < cur {
                    self.costs[idx] = n.cost;
                }
            }
        }
    }

    /// Cheapest reached parent of `to`, with the stored (cost + 1) value.
    /// On equal costs the diagonal-or-axis parent wins.
    fn from_internal(&self, lt: &impl Lighter, to: Point) -> Option<LightNode> {
        parents(to, self.src)
            .into_iter()
            .flatten()
            .filter_map(|p| {
                let c = self.costs[self.idx(p)];
                (c > 0).then(|| LightNode {
                    pos: p,
                    cost: c.saturating_add(lt.cost(self.src, p, to)),
                })
            })
            .reduce(|a, b| if a.cost <= b.cost { a } else { b })
    }

    /// Accumulated cost at `p` from the last computation, `None` if not
    /// reached.
    pub fn at(&self, p: Point) -> Option<i32> {
        if !p.in_range(&self.range) {
            return None;
        }
        let cost = self.costs[self.idx(p)];
        if cost <= 0 { None } else { Some(cost - 1) }
    }

    /// Nodes reached by the last computation.
    pub fn iter_lighted(&self) -> impl Iterator<Item = LightNode> + '_ {
        self.lighted.iter().copied()
    }

    /// Previous position on the ray to `to` from the last
    /// [`vision_map`](Self::vision_map), with the accumulated cost at `to`.
    /// `None` for the source or for unreached cells.
    pub fn from(&self, lt: &impl Lighter, to: Point) -> Option<LightNode> {
        self.at(to)?;
        let ln = self.from_internal(lt, to)?;
        Some(LightNode {
            pos: ln.pos,
            cost: ln.cost - 1,
        })
    }

    /// The whole ray from the source to `to`, both included.
    pub fn ray(&mut self, lt: &impl Lighter, to: Point) -> Option<&[LightNode]> {
        let cost = self.at(to)?;
        self.ray_cache.clear();
        self.ray_cache.push(LightNode { pos: to, cost });
        let mut cur = to;
        while cur != self.src {
            let n = self.from_internal(lt, cur)?;
            cur = n.pos;
            let cost = self.at(cur)?;
            self.ray_cache.push(LightNode { pos: cur, cost });
        }
        self.ray_cache.reverse();
        Some(&self.ray_cache)
    }

    // ── Multi-source light map ─────────────────────────────────────

    /// Propagate from every source, keeping the minimum cost per cell.
    /// Returns the reached nodes in row-major order.
    pub fn light_map(&mut self, lt: &impl Lighter, srcs: &[Point]) -> &[LightNode] {
        self.costs.fill(0);
        for &src in srcs {
            if src.in_range(&self.range) {
                self.propagate(lt, src, Update::Light);
            }
        }
        self.lighted.clear();
        for p in self.range {
            let c = self.costs[self.idx(p)];
            if c > 0 {
                self.lighted.push(LightNode { pos: p, cost: c - 1 });
            }
        }
        &self.lighted
    }
}
