//! Events raised by perception for the game to narrate.
//!
//! Every signal marks something worth interrupting automatic movement for.

use umbra_core::Point;

use crate::entity::{MonsterId, MonsterKind, NoiseKind};
use crate::terrain::Terrain;

/// How a remembered cell turned out to differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainChange {
    /// A remembered wall is gone.
    WallGone,
    /// Remembered foliage or door is on fire.
    Flames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    /// Notable terrain discovered, with its walking distance over known
    /// ground when one exists.
    NotableSeen {
        pos: Point,
        terrain: Terrain,
        distance: Option<usize>,
    },
    TerrainChanged { pos: Point, change: TerrainChange },
    MonsterFirstSeen {
        id: MonsterId,
        kind: MonsterKind,
        notable: bool,
    },
    /// A monster seen before came back into sight.
    MonsterReacquired { id: MonsterId },
    Noise { pos: Point, kind: NoiseKind },
}
