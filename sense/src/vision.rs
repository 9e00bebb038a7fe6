//! Light, player sight, monster sight and what the player learns from
//! them.

use umbra_core::Point;
use umbra_paths::{Neighbors, PathRange};
use umbra_rl::FOV;

use crate::entity::MonsterId;
use crate::light::LightMap;
use crate::lighter::{
    DEFAULT_LOS_RANGE, DEFAULT_MONSTER_LOS_RANGE, RayStyle, SightLighter, TREE_RANGE,
};
use crate::pathers::MappingPather;
use crate::posset::PosSet;
use crate::session::Session;
use crate::signal::{Signal, TerrainChange};
use crate::terrain::{Cloud, Terrain};

impl Session {
    /// Recompute the light map.
    pub fn compute_light(&mut self) -> &LightMap {
        self.light.compute(&self.world);
        &self.light
    }

    /// Recompute the player's field of view, then update map knowledge
    /// and the monsters in sight.
    ///
    /// From a tree the player also sees illuminated cells up to
    /// [`TREE_RANGE`]; lit walls are kept only next to some lit open cell
    /// within that range. The light map should be current.
    pub fn compute_player_vision(&mut self) -> Vec<Signal> {
        self.player_los.clear();
        let lt = SightLighter::player(&self.world);
        let canopy = lt.style == RayStyle::PlayerCanopy;
        let nodes = self
            .player_fov
            .vision_map(&lt, self.world.player.pos)
            .to_vec();
        let mut nb = Neighbors::new();
        for n in nodes {
            let cost = lt.range_cost(n.pos, n.cost);
            if cost <= DEFAULT_LOS_RANGE {
                self.player_los.insert(n.pos);
                continue;
            }
            if !canopy || cost > TREE_RANGE || !self.light.illuminated(n.pos) {
                continue;
            }
            if self.world.dungeon.terrain(n.pos).is_wall() {
                let lit_open = nb.all(n.pos, |q| {
                    self.world.valid(q)
                        && self.light.illuminated(q)
                        && !self.world.dungeon.terrain(q).is_wall()
                        && self.player_fov.at(q).is_some_and(|c| c < TREE_RANGE)
                });
                if lit_open.is_empty() {
                    continue;
                }
            }
            self.player_los.insert(n.pos);
        }
        log::debug!(
            "player vision from {} ({:?}): {} cells",
            self.world.player.pos,
            lt.style,
            self.player_los.len()
        );

        let mut signals = Vec::new();
        let seen: Vec<Point> = self.player_los.iter().collect();
        for pos in seen {
            self.see_position(pos, &mut signals);
        }
        for id in 0..self.world.monsters.len() {
            let m = &self.world.monsters[id];
            if !m.exists() || !self.player_los.contains(m.pos) {
                continue;
            }
            self.compute_monster_vision(id);
            self.update_monster_knowledge(id);
            let m = &mut self.world.monsters[id];
            if m.seen {
                signals.push(Signal::MonsterReacquired { id });
            } else {
                m.seen = true;
                signals.push(Signal::MonsterFirstSeen {
                    id,
                    kind: m.kind,
                    notable: m.kind.notable(),
                });
            }
        }
        signals
    }

    /// Bring the player's knowledge of a visible cell up to date.
    fn see_position(&mut self, pos: Point, signals: &mut Vec<Signal>) {
        let w = &mut self.world;
        let t = w.dungeon.terrain(pos);
        let known = w.knowledge.terrain.get(&pos).copied();
        if !w.dungeon.explored(pos) {
            w.dungeon.set_explored(pos);
            if t.notable() {
                let from = w.player.pos;
                let mp = MappingPather { world: &*w };
                let distance = notable_distance(&mut self.pr, &mp, from, pos);
                signals.push(Signal::NotableSeen {
                    pos,
                    terrain: t,
                    distance,
                });
            }
            self.autoexplore_rebuild = true;
        } else {
            if known == Some(Terrain::Wall) && !t.is_wall() {
                signals.push(Signal::TerrainChanged {
                    pos,
                    change: TerrainChange::WallGone,
                });
                self.autoexplore_rebuild = true;
            }
            if w.clouds.get(&pos) == Some(&Cloud::Fire)
                && matches!(known, Some(Terrain::Foliage | Terrain::Door))
            {
                signals.push(Signal::TerrainChanged {
                    pos,
                    change: TerrainChange::Flames,
                });
                self.autoexplore_rebuild = true;
            }
        }
        if known.is_some() {
            w.knowledge.terrain.remove(&pos);
            if t.player_passable() {
                w.knowledge.magical_barriers.remove(&pos);
            }
        }
        if let Some(&id) = w.knowledge.last_monster_at.get(&pos) {
            let m = &mut w.monsters[id];
            if m.pos != pos || !m.exists() {
                w.knowledge.last_monster_at.remove(&pos);
                m.last_known_pos = None;
            }
        }
        w.knowledge.noise_illusions.remove(&pos);
    }

    /// Recompute the field of view of monster `id`. Peaceful species do
    /// not watch, so their set is left as is and `None` is returned.
    ///
    /// A monster cannot see over barrels, nor the cell right behind
    /// something that hides (a barrel, a table or a tree).
    pub fn compute_monster_vision(&mut self, id: MonsterId) -> Option<&PosSet> {
        let range = self.world.range();
        let m = self.world.monsters.get_mut(id)?;
        if !m.exists() || m.kind.peaceful() {
            return None;
        }
        let src = m.pos;
        let mut los = m.los.take().unwrap_or_else(|| PosSet::new(range));
        los.clear();
        let fov = self.monster_fov.get_or_insert_with(|| FOV::new(range));
        let lt = SightLighter::new(&self.world, RayStyle::Monster);
        let nodes = fov.vision_map(&lt, src).to_vec();
        for n in nodes {
            if n.pos == src {
                los.insert(n.pos);
                continue;
            }
            if lt.range_cost(n.pos, n.cost) > DEFAULT_MONSTER_LOS_RANGE
                || self.world.dungeon.terrain(n.pos) == Terrain::Barrel
            {
                continue;
            }
            let behind_cover = fov
                .from(&lt, n.pos)
                .is_some_and(|p| self.world.dungeon.terrain(p.pos).hides());
            if !behind_cover {
                los.insert(n.pos);
            }
        }
        log::trace!("monster {id} vision from {src}: {} cells", los.len());
        let m = &mut self.world.monsters[id];
        m.los = Some(los);
        m.los.as_ref()
    }

    /// Record that monster `id` was just seen where it stands.
    fn update_monster_knowledge(&mut self, id: MonsterId) {
        let w = &mut self.world;
        let pos = w.monsters[id].pos;
        if let Some(&other) = w.knowledge.last_monster_at.get(&pos) {
            w.monsters[other].last_known_pos = None;
        }
        if let Some(lp) = w.monsters[id].last_known_pos {
            w.knowledge.last_monster_at.remove(&lp);
        }
        w.knowledge.last_monster_at.insert(pos, id);
        let m = &mut w.monsters[id];
        m.last_seen_state = m.state;
        m.last_known_pos = Some(pos);
    }

    /// The player's sight ray to `to`, starting next to the player and
    /// ending at `to`. Empty when `to` is not reached.
    pub fn cast_ray(&mut self, to: Point) -> Vec<Point> {
        let lt = SightLighter::player(&self.world);
        self.player_fov.vision_map(&lt, self.world.player.pos);
        match self.player_fov.ray(&lt, to) {
            Some(nodes) => nodes.iter().skip(1).map(|n| n.pos).collect(),
            None => Vec::new(),
        }
    }
}

/// Walking distance over known ground, in steps.
fn notable_distance(
    pr: &mut PathRange,
    mp: &MappingPather<'_>,
    from: Point,
    to: Point,
) -> Option<usize> {
    pr.astar_path(mp, from, to).map(|path| path.len() - 1)
}
