//! Light map: minimum light cost per cell from every active source.

use umbra_core::{Point, Range};
use umbra_paths::manhattan;
use umbra_rl::FOV;

use crate::entity::{MonsterKind, MonsterStatus};
use crate::lighter::{DEFAULT_LOS_RANGE, LIGHT_RANGE, RayStyle, SightLighter};
use crate::terrain::Terrain;
use crate::world::World;

pub struct LightMap {
    fov: FOV,
    sources: Vec<Point>,
}

impl LightMap {
    pub fn new(range: Range) -> Self {
        Self {
            fov: FOV::new(range),
            sources: Vec::new(),
        }
    }

    /// Light cost at `p`, `None` when no light reaches it.
    pub fn cost(&self, p: Point) -> Option<i32> {
        self.fov.at(p)
    }

    pub fn illuminated(&self, p: Point) -> bool {
        self.cost(p).is_some_and(|c| c <= LIGHT_RANGE)
    }

    /// Sources used by the last computation.
    pub fn sources(&self) -> &[Point] {
        &self.sources
    }

    /// Lit cells, row-major.
    pub fn lit(&self) -> impl Iterator<Item = Point> + '_ {
        self.fov
            .iter_lighted()
            .filter(|n| n.cost <= LIGHT_RANGE)
            .map(|n| n.pos)
    }

    /// Recompute from the lamps that are on and from calm butterflies.
    /// Far sources are skipped unless the player stands on a tree.
    pub fn compute(&mut self, world: &World) {
        let ppos = world.player.pos;
        let on_tree = world.dungeon.terrain(ppos) == Terrain::Tree;
        let near = |p: Point| on_tree || manhattan(p, ppos) <= DEFAULT_LOS_RANGE + LIGHT_RANGE;

        self.sources.clear();
        let mut lamps: Vec<Point> = world
            .lights
            .iter()
            .filter(|&(&p, &on)| on && near(p))
            .map(|(&p, _)| p)
            .collect();
        lamps.sort();
        self.sources.extend(lamps);
        self.sources.extend(
            world
                .monsters
                .iter()
                .filter(|m| {
                    m.exists()
                        && m.kind == MonsterKind::Butterfly
                        && !m.status.intersects(MonsterStatus::CONFUSED | MonsterStatus::PARALYSED)
                        && near(m.pos)
                })
                .map(|m| m.pos),
        );
        let lt = SightLighter::new(world, RayStyle::Light);
        let n = self.fov.light_map(&lt, &self.sources).len();
        log::debug!("light: {} sources, {} cells reached", self.sources.len(), n);
    }
}
