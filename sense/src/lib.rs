//! Umbra sense: what the player and monsters see, hear and reach in a grid
//! dungeon.
//!
//! A [`Session`] owns the [`World`] and the grid-wide maps derived from it.
//! Once per player action, [`Session::perceive`] runs, in order:
//!
//! 1. light from lamps and butterflies ([`Session::compute_light`]),
//! 2. the player's field of view and map knowledge
//!    ([`Session::compute_player_vision`]), including the sight of every
//!    monster in view,
//! 3. mutual detection ([`Session::compute_mutual_detection`]),
//! 4. noise from monsters out of sight ([`Session::compute_noise`]).
//!
//! Path queries ([`Session::find_path`]) are independent of that cycle and
//! may be issued at any time.

mod config;
mod detection;
mod dungeon;
mod entity;
mod error;
mod light;
mod lighter;
mod noise;
mod pathers;
mod posset;
mod session;
mod signal;
mod terrain;
mod travel;
mod vision;
mod world;

pub use config::{NoiseConfig, SenseConfig};
pub use detection::Detection;
pub use dungeon::{Cell, DUNGEON_HEIGHT, DUNGEON_WIDTH, Dungeon};
pub use entity::{
    Cloak, Monster, MonsterId, MonsterKind, MonsterState, MonsterStatus, NoiseKind, NoiseProfile,
    Player, PlayerStatus,
};
pub use error::{ConfigError, MapError};
pub use light::LightMap;
pub use lighter::{
    DEFAULT_LOS_RANGE, DEFAULT_MONSTER_LOS_RANGE, FILTER_ENTRY_COST, LIGHT_RANGE, RayStyle,
    SightLighter, TREE_RANGE,
};
pub use pathers::{
    AutoexplorePather, DungeonPather, GridPather, JumpPather, MappingPather, MonsterPather,
    NoisePather, PlayerPather, TunnelPather, TunnelPlan,
};
pub use posset::{ExclusionMask, NoiseSet, PosSet, VisibilitySet};
pub use session::Session;
pub use signal::{Signal, TerrainChange};
pub use terrain::{Cloud, Terrain};
pub use travel::PathKind;
pub use world::{Knowledge, World};

pub use umbra_core::{Direction, Point, Range};
