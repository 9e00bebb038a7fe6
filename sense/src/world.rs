//! The read-mostly world model consulted by every cost model.

use std::collections::{BTreeSet, HashMap, HashSet};

use umbra_core::{Direction, Point, Range, corner_neighbors};

use crate::dungeon::Dungeon;
use crate::entity::{Monster, MonsterId, MonsterState, Player, PlayerStatus};
use crate::posset::{ExclusionMask, PosSet};
use crate::terrain::{Cloud, Terrain};

/// What the player remembers about places out of sight.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    /// Terrain as last seen, where it may differ from the real one.
    pub terrain: HashMap<Point, Terrain>,
    /// Monster last seen at each position.
    pub last_monster_at: HashMap<Point, MonsterId>,
    /// Magical barriers the player believes in, with the terrain underneath.
    pub magical_barriers: HashMap<Point, Terrain>,
    /// Positions where an illusory noise was heard.
    pub noise_illusions: HashSet<Point>,
}

/// Dungeon, agents and transient effects.
#[derive(Debug, Clone)]
pub struct World {
    pub dungeon: Dungeon,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub clouds: HashMap<Point, Cloud>,
    /// Light fixtures and whether they are on.
    pub lights: HashMap<Point, bool>,
    pub knowledge: Knowledge,
    /// Cells avoided by travel and autoexplore.
    pub exclusions: ExclusionMask,
    /// Centers of the active exclusion zones.
    pub exclusion_zones: BTreeSet<Point>,
}

impl World {
    pub fn new(dungeon: Dungeon, player_pos: Point) -> Self {
        let range = dungeon.range();
        Self {
            dungeon,
            player: Player::new(player_pos),
            monsters: Vec::new(),
            clouds: HashMap::new(),
            lights: HashMap::new(),
            knowledge: Knowledge::default(),
            exclusions: PosSet::new(range),
            exclusion_zones: BTreeSet::new(),
        }
    }

    pub fn range(&self) -> Range {
        self.dungeon.range()
    }

    #[inline]
    pub fn valid(&self, p: Point) -> bool {
        self.dungeon.valid(p)
    }

    pub fn add_monster(&mut self, m: Monster) -> MonsterId {
        self.monsters.push(m);
        self.monsters.len() - 1
    }

    /// Id of the living monster standing at `p`.
    pub fn monster_id_at(&self, p: Point) -> Option<MonsterId> {
        self.monsters.iter().position(|m| m.exists() && m.pos == p)
    }

    pub fn monster_at(&self, p: Point) -> Option<&Monster> {
        self.monster_id_at(p).map(|id| &self.monsters[id])
    }

    /// Terrain as the player believes it to be.
    pub fn known_terrain(&self, p: Point) -> Terrain {
        self.knowledge
            .terrain
            .get(&p)
            .copied()
            .unwrap_or_else(|| self.dungeon.terrain(p))
    }

    /// A fire cloud the player would not knowingly walk into. Remembered
    /// foliage and doors are expected to burn.
    pub fn fire_blocks_travel(&self, p: Point) -> bool {
        if self.clouds.get(&p) != Some(&Cloud::Fire) {
            return false;
        }
        !matches!(
            self.knowledge.terrain.get(&p),
            Some(Terrain::Foliage | Terrain::Door)
        )
    }

    /// Whether the player would plan a trip through `p`, judging from what
    /// they know and the abilities they have.
    pub fn travel_passable(&self, p: Point) -> bool {
        if !self.valid(p) || !self.dungeon.explored(p) || self.fire_blocks_travel(p) {
            return false;
        }
        let t = self.known_terrain(p);
        t.player_passable()
            || self.player.has(PlayerStatus::LEVITATION)
                && matches!(t, Terrain::Barrier | Terrain::Chasm)
            || self.player.has(PlayerStatus::DIG) && t.diggable()
    }

    /// Whether autoexplore may walk onto `p`.
    pub fn autoexplore_passable(&self, p: Point) -> bool {
        if !self.valid(p) || self.fire_blocks_travel(p) || self.exclusions.contains(p) {
            return false;
        }
        self.dungeon.terrain(p).player_passable() && !self.known_terrain(p).is_wall()
    }

    /// Whether the player could legally occupy `p` right now.
    pub fn player_can_pass(&self, p: Point) -> bool {
        if !self.valid(p) || self.monster_at(p).is_some() {
            return false;
        }
        let t = self.dungeon.terrain(p);
        t.player_passable() || self.player.has(PlayerStatus::LEVITATION) && t == Terrain::Chasm
    }

    /// Whether monster `id` can move onto `p`, smashing terrain if able.
    pub fn monster_can_pass_destruct(&self, id: MonsterId, p: Point) -> bool {
        self.valid(p)
            && self
                .monsters
                .get(id)
                .is_some_and(|m| m.can_walk_destruct(self.dungeon.terrain(p)))
    }

    /// A monster that may be heard moving: neither resting nor watching.
    pub fn monster_is_moving(&self, m: &Monster) -> bool {
        m.exists() && !matches!(m.state, MonsterState::Resting | MonsterState::Watching)
    }

    fn diagonal_flanks(from: Point, to: Point) -> Option<[Point; 2]> {
        corner_neighbors(to, Direction::of(from, to)?)
    }

    /// A diagonal step between two opaque flanks: sight cannot slip
    /// through the corner.
    pub fn diagonal_opaque(&self, from: Point, to: Point) -> bool {
        let Some(flanks) = Self::diagonal_flanks(from, to) else {
            return false;
        };
        let count = flanks
            .iter()
            .filter(|&&p| {
                self.clouds.contains_key(&p)
                    || self.valid(p)
                        && matches!(
                            self.dungeon.terrain(p),
                            Terrain::Wall | Terrain::HoledWall | Terrain::Window
                        )
            })
            .count();
        count > 1
    }

    /// A diagonal step between two flanks that hinder sight, which
    /// shortens the ray.
    pub fn diagonal_difficult(&self, from: Point, to: Point) -> bool {
        let Some(flanks) = Self::diagonal_flanks(from, to) else {
            return false;
        };
        let count = flanks
            .iter()
            .filter(|&&p| {
                self.valid(p)
                    && (self.clouds.contains_key(&p)
                        || matches!(
                            self.dungeon.terrain(p),
                            Terrain::Wall | Terrain::Foliage | Terrain::HoledWall
                        ))
            })
            .count();
        count > 1
    }
}
