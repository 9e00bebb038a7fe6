use umbra_core::{Point, Range};

/// A position with its accumulated cost from the sources of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

// ---------------------------------------------------------------------------
// Internal node for A*/Dijkstra priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `f` and then by insertion
/// sequence, so that equal-`f` entries pop first-in first-out.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost sentinel: an edge that must not be taken, or a cell not reached.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Owner of the search caches for one grid rectangle.
///
/// Queries outside the rectangle return no result rather than failing.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // Dijkstra caches
    pub(crate) dijkstra_nodes: Vec<Node>,
    pub(crate) dijkstra_generation: u32,
    pub(crate) dijkstra_results: Vec<PathNode>,
    pub(crate) dijkstra_map: Vec<i32>,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_results: Vec<PathNode>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            dijkstra_nodes: vec![Node::default(); len],
            dijkstra_generation: 0,
            dijkstra_results: Vec::new(),
            dijkstra_map: vec![UNREACHABLE; len],
            bfs_map: vec![UNREACHABLE; len],
            bfs_results: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Flat index of `p`, `None` when out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

/// Only the rectangle is persisted; caches come back empty.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = Range::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn pathrange_restores_with_fresh_caches() {
        let rng = Range::new(1, 2, 10, 20);
        let pr = PathRange::new(rng);
        let json = serde_json::to_string(&pr).unwrap();
        let back: PathRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back.range(), rng);
        assert_eq!(back.astar_generation, 0);
        assert_eq!(back.bfs_map.len(), rng.len());
    }
}
