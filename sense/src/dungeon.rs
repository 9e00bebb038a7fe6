//! The dungeon grid: terrain plus the explored flag per cell.

use umbra_core::{Point, Range};

use crate::error::MapError;
use crate::terrain::Terrain;

/// Default dungeon width.
pub const DUNGEON_WIDTH: i32 = 80;
/// Default dungeon height.
pub const DUNGEON_HEIGHT: i32 = 21;

/// One dungeon cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: Terrain,
    pub explored: bool,
}

/// Fixed-size grid of cells. Out-of-range queries answer as an unexplored
/// wall.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    range: Range,
    cells: Vec<Cell>,
}

impl Default for Dungeon {
    fn default() -> Self {
        Self::new(DUNGEON_WIDTH, DUNGEON_HEIGHT)
    }
}

impl Dungeon {
    /// A `w × h` dungeon made only of walls.
    pub fn new(w: i32, h: i32) -> Self {
        let range = Range::new(0, 0, w, h);
        Self {
            range,
            cells: vec![Cell::default(); range.len()],
        }
    }

    /// A `w × h` dungeon made only of terrain `t`.
    pub fn filled(w: i32, h: i32, t: Terrain) -> Self {
        let mut d = Self::new(w, h);
        for c in &mut d.cells {
            c.terrain = t;
        }
        d
    }

    /// Parse a map drawn with terrain runes, one string per row.
    pub fn from_rows(rows: &[&str]) -> Result<Dungeon, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let expected = first.chars().count();
        if expected == 0 {
            return Err(MapError::Empty);
        }
        let mut d = Dungeon::new(expected as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != expected {
                return Err(MapError::Ragged {
                    row: y,
                    width,
                    expected,
                });
            }
            for (x, rune) in row.chars().enumerate() {
                let t = Terrain::from_rune(rune).ok_or(MapError::UnknownRune { rune, x, y })?;
                d.set_terrain(Point::new(x as i32, y as i32), t);
            }
        }
        Ok(d)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn valid(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.valid(p) {
            return None;
        }
        Some((p.y * self.range.width() + p.x) as usize)
    }

    pub fn cell(&self, p: Point) -> Cell {
        self.idx(p).map_or_else(Cell::default, |i| self.cells[i])
    }

    pub fn terrain(&self, p: Point) -> Terrain {
        self.cell(p).terrain
    }

    pub fn explored(&self, p: Point) -> bool {
        self.cell(p).explored
    }

    pub fn set_terrain(&mut self, p: Point, t: Terrain) {
        if let Some(i) = self.idx(p) {
            self.cells[i].terrain = t;
        }
    }

    pub fn set_explored(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.cells[i].explored = true;
        }
    }

    /// Number of walls in the square of radius `r` around `p`, the center
    /// included. Out-of-range cells count as walls.
    pub fn wall_area_count(&self, p: Point, r: i32) -> i32 {
        let mut n = 0;
        for y in p.y - r..=p.y + r {
            for x in p.x - r..=p.x + r {
                if self.terrain(Point::new(x, y)).is_wall() {
                    n += 1;
                }
            }
        }
        n
    }

    /// Render the map back to rune rows.
    pub fn rows(&self) -> Vec<String> {
        (0..self.range.height())
            .map(|y| {
                (0..self.range.width())
                    .map(|x| self.terrain(Point::new(x, y)).rune())
                    .collect()
            })
            .collect()
    }
}
