//! The per-level perception and navigation state.

use std::collections::HashMap;

use rand::Rng;
use umbra_core::Point;
use umbra_paths::PathRange;
use umbra_rl::FOV;

use crate::config::SenseConfig;
use crate::error::ConfigError;
use crate::light::LightMap;
use crate::posset::{NoiseSet, PosSet, VisibilitySet};
use crate::signal::Signal;
use crate::world::World;

/// Owns the world and every grid-wide map derived from it: the player's
/// field of view, the light map, the cells watched by monsters and the
/// noise heard this turn. Search caches are reused across queries.
///
/// Call [`perceive`](Self::perceive) once per player action.
pub struct Session {
    pub world: World,
    pub(crate) config: SenseConfig,
    pub(crate) pr: PathRange,
    pub(crate) player_fov: FOV,
    pub(crate) monster_fov: Option<FOV>,
    pub(crate) light: LightMap,
    pub(crate) player_los: VisibilitySet,
    pub(crate) monster_los: VisibilitySet,
    pub(crate) noise: NoiseSet,
    pub(crate) autoexplore_rebuild: bool,
    pub(crate) autoexplore_map: HashMap<Point, i32>,
}

impl Session {
    pub fn new(world: World) -> Self {
        let range = world.range();
        Self {
            world,
            config: SenseConfig::default(),
            pr: PathRange::new(range),
            player_fov: FOV::new(range),
            monster_fov: None,
            light: LightMap::new(range),
            player_los: PosSet::new(range),
            monster_los: PosSet::new(range),
            noise: PosSet::new(range),
            autoexplore_rebuild: true,
            autoexplore_map: HashMap::new(),
        }
    }

    pub fn with_config(world: World, config: SenseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut s = Self::new(world);
        s.config = config;
        Ok(s)
    }

    pub fn config(&self) -> &SenseConfig {
        &self.config
    }

    /// Cells the player currently sees.
    pub fn player_los(&self) -> &VisibilitySet {
        &self.player_los
    }

    /// Cells of the player's view that some visible monster notices.
    pub fn monster_los(&self) -> &VisibilitySet {
        &self.monster_los
    }

    /// Cells where a monster was heard this turn.
    pub fn noise(&self) -> &NoiseSet {
        &self.noise
    }

    pub fn light(&self) -> &LightMap {
        &self.light
    }

    pub fn illuminated(&self, p: Point) -> bool {
        self.light.illuminated(p)
    }

    /// Whether the player sees `p`.
    pub fn sees(&self, p: Point) -> bool {
        self.player_los.contains(p)
    }

    /// Set when newly explored or changed terrain invalidates the
    /// autoexplore map.
    pub fn autoexplore_needs_rebuild(&self) -> bool {
        self.autoexplore_rebuild
    }

    /// Full perception pass for one player action: light, player sight
    /// with knowledge updates, monster sight, mutual detection and noise.
    pub fn perceive<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Signal> {
        self.compute_light();
        let mut signals = self.compute_player_vision();
        let det = self.compute_mutual_detection();
        signals.extend(self.compute_noise(rng));
        log::debug!(
            "perceive: {} cells seen, hidden {}, lit {}, {} watchers, {} signals",
            self.player_los.len(),
            det.hidden,
            det.lit,
            det.watchers.len(),
            signals.len()
        );
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Dungeon;
    use crate::entity::{Monster, MonsterKind, MonsterState, PlayerStatus};
    use crate::terrain::Terrain;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use umbra_core::Direction;

    #[test]
    fn invalid_config_is_rejected() {
        let w = World::new(Dungeon::default(), Point::new(1, 1));
        let mut cfg = SenseConfig::default();
        cfg.noise.listen_range = 0;
        assert!(matches!(
            Session::with_config(w.clone(), cfg),
            Err(ConfigError::ListenRange(0))
        ));
        let s = Session::with_config(w, SenseConfig::default()).expect("valid config");
        assert_eq!(s.config().dungeon_wall_cost, 4);
    }

    #[test]
    fn perceive_runs_every_step() {
        let d = Dungeon::filled(20, 5, Terrain::Ground);
        let mut w = World::new(d, Point::new(2, 2));
        w.lights.insert(Point::new(2, 1), true);
        let guard = w.add_monster(
            Monster::new(MonsterKind::Guard, Point::new(6, 2))
                .with_dir(Direction::W)
                .with_state(MonsterState::Hunting),
        );
        let mut s = Session::new(w);
        let mut rng = StdRng::seed_from_u64(9);
        let signals = s.perceive(&mut rng);

        assert!(s.illuminated(Point::new(2, 2)));
        assert!(s.sees(Point::new(6, 2)));
        assert!(signals.contains(&Signal::MonsterFirstSeen {
            id: guard,
            kind: MonsterKind::Guard,
            notable: false,
        }));
        assert!(s.world.player.has(PlayerStatus::UNHIDDEN | PlayerStatus::LIGHT));
        assert!(s.monster_los().contains(Point::new(2, 2)));
        assert!(s.noise().is_empty());
    }
}
