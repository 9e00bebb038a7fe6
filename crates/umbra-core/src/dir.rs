//! The 16-sector compass used for facing, view cones and corner tests.

use std::fmt;

use crate::geom::Point;

/// One of sixteen compass sectors, counter-clockwise from east.
///
/// Directions classify the offset between two positions; they are never used
/// to enumerate movement, which is always 4- or 8-way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    E,
    ENE,
    NE,
    NNE,
    N,
    NNW,
    NW,
    WNW,
    W,
    WSW,
    SW,
    SSW,
    S,
    SSE,
    SE,
    ESE,
}

impl Direction {
    /// All sectors in compass order.
    pub const ALL: [Direction; 16] = [
        Direction::E,
        Direction::ENE,
        Direction::NE,
        Direction::NNE,
        Direction::N,
        Direction::NNW,
        Direction::NW,
        Direction::WNW,
        Direction::W,
        Direction::WSW,
        Direction::SW,
        Direction::SSW,
        Direction::S,
        Direction::SSE,
        Direction::SE,
        Direction::ESE,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(i: usize) -> Direction {
        Self::ALL[i % 16]
    }

    /// Sector of `to` as seen from `from`, or `None` when they coincide.
    ///
    /// Equal magnitudes give the exact diagonal, a dominant axis gives the
    /// near sector (ENE rather than NE).
    pub fn of(from: Point, to: Point) -> Option<Direction> {
        use Direction::*;
        let d = to - from;
        let (ax, ay) = (d.x.abs(), d.y.abs());
        let pick = |wide, diag, tall| {
            if ax > ay {
                wide
            } else if ax == ay {
                diag
            } else {
                tall
            }
        };
        let dir = match (d.x.signum(), d.y.signum()) {
            (0, 0) => return None,
            (1, 0) => E,
            (-1, 0) => W,
            (0, -1) => N,
            (0, 1) => S,
            (1, -1) => pick(ENE, NE, NNE),
            (-1, -1) => pick(WNW, NW, NNW),
            (-1, 1) => pick(WSW, SW, SSW),
            _ => pick(ESE, SE, SSE),
        };
        Some(dir)
    }

    /// The antipodal sector.
    #[inline]
    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 8)
    }

    /// Rotate 45° counter-clockwise.
    #[inline]
    pub fn left(self) -> Direction {
        Self::from_index(self.index() + 2)
    }

    /// Rotate 45° clockwise.
    #[inline]
    pub fn right(self) -> Direction {
        Self::from_index(self.index() + 14)
    }

    /// Number of sector steps between two directions around the compass.
    #[inline]
    pub fn ring_distance(self, other: Direction) -> usize {
        let d = self.index().abs_diff(other.index());
        d.min(16 - d)
    }

    /// Whether the direction is one of the four exact diagonals.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NE | Direction::NW | Direction::SW | Direction::SE
        )
    }

    /// Unit offset of a principal direction (the four cardinals and four
    /// diagonals). Intermediate sectors have no single-cell offset.
    pub fn delta(self) -> Option<Point> {
        use Direction::*;
        let p = match self {
            E => Point::new(1, 0),
            NE => Point::new(1, -1),
            N => Point::new(0, -1),
            NW => Point::new(-1, -1),
            W => Point::new(-1, 0),
            SW => Point::new(-1, 1),
            S => Point::new(0, 1),
            SE => Point::new(1, 1),
            _ => return None,
        };
        Some(p)
    }

    /// The neighbour of `pos` one step toward this sector. Intermediate
    /// sectors step along their dominant axis.
    pub fn step(self, pos: Point) -> Point {
        use Direction::*;
        let d = match self {
            ENE | ESE => E,
            NNE | NNW => N,
            WNW | WSW => W,
            SSW | SSE => S,
            d => d,
        };
        d.delta().map_or(pos, |q| pos + q)
    }

    /// Whether an agent at `from` facing `self` has `to` in its view cone.
    ///
    /// For a principal facing the cone spans one principal step (two
    /// sectors) on each side; an intermediate facing covers only its own
    /// sector. Anything within melee distance is always in the cone.
    pub fn in_view_cone(self, from: Point, to: Point) -> bool {
        let d = (to - from).abs();
        if d.x + d.y <= 1 {
            return true;
        }
        match Direction::of(from, to) {
            Some(dir) if self.delta().is_some() => self.ring_distance(dir) <= 2,
            Some(dir) => dir == self,
            None => true,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The two orthogonal cells flanking a diagonal step that arrived at `to`
/// going `dir`. Returns `None` for non-diagonal directions.
///
/// For a north-east step into `to`, these are the cells south and west of
/// `to`.
pub fn corner_neighbors(to: Point, dir: Direction) -> Option<[Point; 2]> {
    if !dir.is_diagonal() {
        return None;
    }
    let s = dir.delta()?;
    Some([to.shift(0, -s.y), to.shift(-s.x, 0)])
}

/// The cells adjacent to `pos` that a ray from `src` may have come
/// through: first the diagonal (or axis) step toward `src`, then, when the
/// offset is neither axial nor diagonal, the orthogonal step along the
/// dominant axis. Both are `None` when `pos == src`.
pub fn parents(pos: Point, src: Point) -> [Option<Point>; 2] {
    let q = src - pos;
    if q == Point::ZERO {
        return [None, None];
    }
    let r = q.signum();
    let a = q.abs();
    let second = if q.x == 0 || q.y == 0 || a.x == a.y {
        None
    } else if a.x > a.y {
        Some(pos.shift(r.x, 0))
    } else {
        Some(pos.shift(0, r.y))
    };
    [Some(pos + r), second]
}
