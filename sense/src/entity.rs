//! Player and monster records as seen by the perception engine.

use bitflags::bitflags;
use umbra_core::{Direction, Point};

use crate::posset::VisibilitySet;
use crate::terrain::Terrain;

/// Index into [`World::monsters`](crate::world::World::monsters).
pub type MonsterId = usize;

/// Monster species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterKind {
    Guard,
    HighGuard,
    MadNixe,
    Ocre,
    Vampire,
    Worm,
    AcidMound,
    Dog,
    BlinkingFrog,
    HazeCat,
    CrazyImp,
    Spider,
    WingedMilfid,
    TinyHarpy,
    EarthDragon,
    TreeMushroom,
    Yack,
    SatowalgaPlant,
    Butterfly,
    MirrorSpecter,
}

impl MonsterKind {
    /// Never hostile: does not watch for the player.
    pub fn peaceful(self) -> bool {
        matches!(self, MonsterKind::Butterfly | MonsterKind::EarthDragon)
    }

    /// Keeps to normal patrol ways unless hunting.
    pub fn patrolling(self) -> bool {
        matches!(self, MonsterKind::Guard | MonsterKind::HighGuard)
    }

    pub fn flying(self) -> bool {
        use MonsterKind::*;
        matches!(self, WingedMilfid | TinyHarpy | Butterfly)
    }

    /// Worth a journal entry when first seen.
    pub fn notable(self) -> bool {
        use MonsterKind::*;
        matches!(self, HighGuard | Vampire | EarthDragon | MirrorSpecter)
    }

    /// What the player hears when this species moves out of sight.
    pub fn default_noise(self) -> NoiseProfile {
        use MonsterKind::*;
        use NoiseKind::*;
        match self {
            SatowalgaPlant | Butterfly => NoiseProfile::Silent,
            MirrorSpecter => NoiseProfile::HearingCloakOnly(AirMovement),
            WingedMilfid | TinyHarpy => NoiseProfile::Audible(Wings),
            EarthDragon | TreeMushroom | Yack => NoiseProfile::Audible(HeavyFootsteps),
            Worm | AcidMound => NoiseProfile::Audible(Creep),
            Dog | BlinkingFrog | HazeCat | CrazyImp | Spider => {
                NoiseProfile::Audible(LightFootsteps)
            }
            _ => NoiseProfile::Audible(Footsteps),
        }
    }
}

/// Sound made by a moving monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseKind {
    AirMovement,
    Wings,
    HeavyFootsteps,
    Creep,
    LightFootsteps,
    Footsteps,
}

/// How a species can be heard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseProfile {
    Silent,
    Audible(NoiseKind),
    /// Heard only by a player wearing the hearing cloak.
    HearingCloakOnly(NoiseKind),
}

/// Monster mind state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterState {
    #[default]
    Resting,
    Watching,
    Wandering,
    Hunting,
}

bitflags! {
    /// Temporary monster conditions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MonsterStatus: u8 {
        const CONFUSED  = 1 << 0;
        const PARALYSED = 1 << 1;
        const LIGNIFIED = 1 << 2;
        const SLOWED    = 1 << 3;
    }
}

bitflags! {
    /// Player conditions. `HIDDEN`, `UNHIDDEN` and `LIGHT` are written by
    /// mutual detection; the others are set by gameplay.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PlayerStatus: u8 {
        const LEVITATION  = 1 << 0;
        const DIG         = 1 << 1;
        const SHADOWS     = 1 << 2;
        const ILLUMINATED = 1 << 3;
        const TRANSPARENT = 1 << 4;
        const HIDDEN      = 1 << 5;
        const UNHIDDEN    = 1 << 6;
        const LIGHT       = 1 << 7;
    }
}

/// Body armour affecting perception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cloak {
    /// Widens the listening draw.
    Hear,
    /// Shortens the range at which monsters notice the player in the dark.
    Shadows,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Point,
    pub status: PlayerStatus,
    pub cloak: Option<Cloak>,
}

impl Player {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            status: PlayerStatus::empty(),
            cloak: None,
        }
    }

    pub fn has(&self, st: PlayerStatus) -> bool {
        self.status.contains(st)
    }
}

#[derive(Debug, Clone)]
pub struct Monster {
    pub kind: MonsterKind,
    pub pos: Point,
    /// Facing, `None` before the first move.
    pub dir: Option<Direction>,
    pub state: MonsterState,
    pub status: MonsterStatus,
    pub alive: bool,
    /// Seen by the player at least once.
    pub seen: bool,
    pub last_known_pos: Option<Point>,
    pub last_seen_state: MonsterState,
    /// Own field of view, allocated on first computation.
    pub los: Option<VisibilitySet>,
}

impl Monster {
    pub fn new(kind: MonsterKind, pos: Point) -> Self {
        Self {
            kind,
            pos,
            dir: None,
            state: MonsterState::default(),
            status: MonsterStatus::empty(),
            alive: true,
            seen: false,
            last_known_pos: None,
            last_seen_state: MonsterState::default(),
            los: None,
        }
    }

    pub fn with_dir(mut self, dir: Direction) -> Self {
        self.dir = Some(dir);
        self
    }

    pub fn with_state(mut self, state: MonsterState) -> Self {
        self.state = state;
        self
    }

    pub fn exists(&self) -> bool {
        self.alive
    }

    pub fn has(&self, st: MonsterStatus) -> bool {
        self.status.contains(st)
    }

    /// Whether `to` lies in the monster's view cone. Without a facing only
    /// adjacent cells are in view.
    pub fn in_view_cone(&self, to: Point) -> bool {
        match self.dir {
            Some(dir) => dir.in_view_cone(self.pos, to),
            None => {
                let d = (to - self.pos).abs();
                d.x + d.y <= 1
            }
        }
    }

    /// Whether the monster can walk on terrain `t`.
    pub fn can_walk(&self, t: Terrain) -> bool {
        t.passable() || self.kind.flying() && t == Terrain::Chasm
    }

    /// Whether the monster can walk on `t` or smash its way through it.
    pub fn can_walk_destruct(&self, t: Terrain) -> bool {
        self.can_walk(t) || self.kind == MonsterKind::EarthDragon && t.destructible()
    }

    /// Whether the monster is in sight range of `p` at all.
    pub fn sees_cell(&self, p: Point) -> bool {
        self.los.as_ref().is_some_and(|los| los.contains(p))
    }
}
