use umbra_core::Point;

/// Append to `buf` the cardinal neighbors of `p` (north, east, south,
/// west) for which `keep` holds. Suited to [`Pather`](crate::Pather)
/// implementations, which fill a caller-provided buffer.
pub fn push_cardinal(p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
    buf.extend(p.neighbors_4().into_iter().filter(|&q| keep(q)));
}

/// Reusable neighbor enumeration with a keep predicate.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Cardinal neighbors of `p` (north, east, south, west) for which `keep`
    /// holds.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        push_cardinal(p, &mut self.buf, keep);
        &self.buf
    }

    /// All eight neighbors of `p` for which `keep` holds.
    pub fn all(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf.extend(p.neighbors_8().into_iter().filter(|&q| keep(q)));
        &self.buf
    }
}
