//! Error types.
//!
//! Perception and path queries never fail: unreachable or out-of-bounds
//! input yields empty results. Errors only arise when building a session
//! from bad configuration or a malformed map.

use crate::entity::MonsterKind;

/// Invalid [`SenseConfig`](crate::config::SenseConfig) values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The listening draw needs at least one outcome.
    #[error("noise listen range must be at least 1, got {0}")]
    ListenRange(i32),

    #[error("hearing cloak bonus must not be negative, got {0}")]
    HearingBonus(i32),

    /// Walls must cost at least as much as open ground.
    #[error("dungeon wall cost must be at least 1, got {0}")]
    WallCost(i32),

    #[error("noise profile for {0:?} is given more than once")]
    DuplicateProfile(MonsterKind),
}

/// Malformed textual map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {width}, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("unknown terrain rune {rune:?} at ({x}, {y})")]
    UnknownRune { rune: char, x: usize, y: usize },
}
