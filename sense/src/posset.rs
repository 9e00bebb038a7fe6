//! Grid-backed position sets.

use umbra_core::{Point, Range};

/// A set of positions inside a fixed rectangle.
///
/// Inserting an out-of-range position is a no-op, so a set never holds a
/// position outside its bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosSet {
    range: Range,
    bits: Vec<bool>,
    len: usize,
}

/// Cells currently seen by an agent.
pub type VisibilitySet = PosSet;
/// Cells where something was heard this turn.
pub type NoiseSet = PosSet;
/// Cells avoided by automatic travel.
pub type ExclusionMask = PosSet;

impl PosSet {
    pub fn new(range: Range) -> Self {
        Self {
            range,
            bits: vec![false; range.len()],
            len: 0,
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let q = p - self.range.min;
        Some((q.y * self.range.width() + q.x) as usize)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.bits[i])
    }

    /// Adds `p`, returning whether it was newly inserted.
    pub fn insert(&mut self, p: Point) -> bool {
        self.set(p, true)
    }

    /// Removes `p`, returning whether it was present.
    pub fn remove(&mut self, p: Point) -> bool {
        self.set(p, false)
    }

    /// Sets membership of `p`, returning whether it changed.
    pub fn set(&mut self, p: Point, on: bool) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        if self.bits[i] == on {
            return false;
        }
        self.bits[i] = on;
        if on {
            self.len += 1;
        } else {
            self.len -= 1;
        }
        true
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.range
            .iter()
            .zip(self.bits.iter())
            .filter_map(|(p, &b)| b.then_some(p))
    }
}

impl Extend<Point> for PosSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}
