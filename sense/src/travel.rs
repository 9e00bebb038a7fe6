//! Path queries, exclusion zones and autoexplore.

use rand::Rng;
use umbra_core::Point;
use umbra_paths::{UNREACHABLE, manhattan};

use crate::entity::MonsterId;
use crate::lighter::DEFAULT_LOS_RANGE;
use crate::pathers::{
    AutoexplorePather, DungeonPather, GridPather, JumpPather, MappingPather, MonsterPather,
    PlayerPather, TunnelPather, TunnelPlan,
};
use crate::session::Session;

/// Which mover a path is for.
#[derive(Debug, Clone, Copy)]
pub enum PathKind<'a> {
    /// Whole dungeon, walls at the configured cost.
    Dungeon,
    /// Terrain ignored.
    Grid,
    /// Over the player's map knowledge.
    Mapping,
    /// Player travel to a destination.
    Player,
    Autoexplore,
    Tunnel(&'a TunnelPlan),
    Monster(MonsterId),
    /// A random route of cells the player may occupy.
    Jump,
}

impl Session {
    /// Shortest path for `kind` from `from` to `to`, both included. Empty
    /// when unreachable or out of bounds.
    pub fn find_path<R: Rng + ?Sized>(
        &mut self,
        kind: PathKind<'_>,
        from: Point,
        to: Point,
        rng: &mut R,
    ) -> Vec<Point> {
        let w = &self.world;
        let pr = &mut self.pr;
        let path = match kind {
            PathKind::Dungeon => {
                let dp = DungeonPather {
                    dungeon: &w.dungeon,
                    wall_cost: self.config.dungeon_wall_cost,
                };
                pr.astar_path(&dp, from, to)
            }
            PathKind::Grid => pr.astar_path(&GridPather { dungeon: &w.dungeon }, from, to),
            PathKind::Mapping => pr.astar_path(&MappingPather { world: w }, from, to),
            PathKind::Player => pr.astar_path(&PlayerPather { world: w, goal: to }, from, to),
            PathKind::Autoexplore => pr.astar_path(&AutoexplorePather { world: w }, from, to),
            PathKind::Tunnel(plan) => {
                let tp = TunnelPather {
                    dungeon: &w.dungeon,
                    plan,
                };
                pr.astar_path(&tp, from, to)
            }
            PathKind::Monster(id) => {
                MonsterPather::new(w, id, rng).and_then(|mp| pr.astar_path(&mp, from, to))
            }
            PathKind::Jump => pr.astar_path(&JumpPather::new(w, rng), from, to),
        };
        let path = path.unwrap_or_default();
        log::trace!("{kind:?} path {from} -> {to}: {} cells", path.len());
        path
    }

    /// `positions` that can reach `to` without crossing walls, nearest
    /// first by path length. Ties keep their input order.
    pub fn rank_by_path_distance(&mut self, positions: &[Point], to: Point) -> Vec<Point> {
        let dp = DungeonPather {
            dungeon: &self.world.dungeon,
            wall_cost: UNREACHABLE,
        };
        let mut ranked: Vec<(Point, usize)> = positions
            .iter()
            .filter_map(|&p| self.pr.astar_path(&dp, p, to).map(|path| (p, path.len())))
            .collect();
        ranked.sort_by_key(|&(_, len)| len);
        ranked.into_iter().map(|(p, _)| p).collect()
    }

    /// Toggle the exclusion zone centered on `pos`: a diamond of the sight
    /// range. Returns whether the zone is now active, or `None` when `pos`
    /// is outside the dungeon or unexplored.
    ///
    /// The mask is the union of the active zones, so removing a zone keeps
    /// the cells still covered by another one.
    pub fn toggle_exclusion(&mut self, pos: Point) -> Option<bool> {
        let w = &mut self.world;
        if !w.valid(pos) || !w.dungeon.explored(pos) {
            return None;
        }
        let active = if w.exclusion_zones.remove(&pos) {
            false
        } else {
            w.exclusion_zones.insert(pos)
        };
        w.exclusions.clear();
        let range = w.range();
        for &c in &w.exclusion_zones {
            w.exclusions.extend(
                range
                    .around(c, DEFAULT_LOS_RANGE)
                    .iter()
                    .filter(|&p| manhattan(p, c) <= DEFAULT_LOS_RANGE),
            );
        }
        self.autoexplore_rebuild = true;
        log::debug!(
            "exclusion at {pos} {}: {} cells excluded",
            if active { "on" } else { "off" },
            w.exclusions.len()
        );
        Some(active)
    }

    /// Next autoexplore step from the player's position toward the nearest
    /// unexplored cell, `None` when nothing reachable is left.
    pub fn autoexplore_step(&mut self) -> Option<Point> {
        if self.autoexplore_rebuild {
            self.rebuild_autoexplore_map();
        }
        let ppos = self.world.player.pos;
        let here = *self.autoexplore_map.get(&ppos)?;
        ppos.neighbors_4()
            .into_iter()
            .filter(|&q| self.world.autoexplore_passable(q))
            .filter_map(|q| self.autoexplore_map.get(&q).map(|&c| (q, c)))
            .filter(|&(_, c)| c < here)
            .min_by_key(|&(_, c)| c)
            .map(|(q, _)| q)
    }

    fn rebuild_autoexplore_map(&mut self) {
        let w = &self.world;
        let sources: Vec<Point> = w
            .range()
            .iter()
            .filter(|&p| !w.dungeon.explored(p) && !w.exclusions.contains(p))
            .collect();
        let ap = AutoexplorePather { world: w };
        let nodes = self.pr.dijkstra_map(&ap, &sources, UNREACHABLE);
        self.autoexplore_map = nodes.iter().map(|n| (n.pos, n.cost)).collect();
        self.autoexplore_rebuild = false;
        log::debug!(
            "autoexplore map: {} frontier cells, {} reached",
            sources.len(),
            self.autoexplore_map.len()
        );
    }
}
