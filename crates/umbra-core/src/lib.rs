//! **umbra-core**: grid geometry shared by the umbra crates.
//!
//! Positions and rectangles live in [`geom`]; the 16-sector compass with
//! its view-cone, corner and ray-parent helpers lives in [`dir`].

pub mod dir;
pub mod geom;

pub use dir::{Direction, corner_neighbors, parents};
pub use geom::{Point, Range, RangeIter};
