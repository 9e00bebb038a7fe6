//! Hearing monsters that move out of sight.

use rand::{Rng, RngExt};

use crate::entity::{Cloak, NoiseProfile};
use crate::lighter::DEFAULT_LOS_RANGE;
use crate::pathers::NoisePather;
use crate::session::Session;
use crate::signal::Signal;

impl Session {
    /// Flood sound from the player through non-wall cells and listen for
    /// moving monsters out of sight.
    ///
    /// Each candidate costs one draw from `rng`; a monster on always-heard
    /// terrain is heard whatever the draw.
    pub fn compute_noise<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Signal> {
        self.noise.clear();
        let w = &self.world;
        let np = NoisePather { dungeon: &w.dungeon };
        let nodes = self
            .pr
            .bfs_map(&np, &[w.player.pos], DEFAULT_LOS_RANGE)
            .to_vec();
        let cfg = &self.config.noise;
        let hear_cloak = w.player.cloak == Some(Cloak::Hear);
        let listen = cfg.listen_range + if hear_cloak { cfg.hearing_cloak_bonus } else { 0 };

        let mut signals = Vec::new();
        for n in nodes {
            if self.player_los.contains(n.pos) {
                continue;
            }
            let Some(m) = w.monster_at(n.pos) else {
                continue;
            };
            if !w.monster_is_moving(m) {
                continue;
            }
            let heard = rng.random_range(0..listen) > 0
                || cfg.always_heard.contains(&w.dungeon.terrain(m.pos));
            if !heard {
                continue;
            }
            let kind = match cfg.profile(m.kind) {
                NoiseProfile::Silent => continue,
                NoiseProfile::Audible(k) => k,
                NoiseProfile::HearingCloakOnly(k) if hear_cloak => k,
                NoiseProfile::HearingCloakOnly(_) => continue,
            };
            self.noise.insert(n.pos);
            signals.push(Signal::Noise { pos: n.pos, kind });
        }
        log::debug!("noise: {} monsters heard", signals.len());
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Dungeon;
    use crate::entity::{Monster, MonsterKind, MonsterState, NoiseKind};
    use crate::world::World;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use umbra_core::Point;

    const HIDDEN_SPOT: Point = Point::new(0, 2);

    /// The player at (0, 0); (0, 2) is out of sight behind a wall but
    /// reachable by sound around it.
    fn session(kind: MonsterKind, state: MonsterState, terrain: char) -> Session {
        let row2 = format!("{terrain}.....");
        let d = Dungeon::from_rows(&["......", "####.#", &row2]).expect("valid map");
        let mut w = World::new(d, Point::new(0, 0));
        w.add_monster(Monster::new(kind, HIDDEN_SPOT).with_state(state));
        let mut s = Session::new(w);
        s.compute_player_vision();
        assert!(!s.sees(HIDDEN_SPOT));
        s
    }

    #[test]
    fn resting_monsters_are_never_heard() {
        for seed in 0..32 {
            let mut s = session(MonsterKind::Guard, MonsterState::Resting, 'Q');
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(s.compute_noise(&mut rng).is_empty());
            assert!(s.noise().is_empty());
        }
    }

    #[test]
    fn queen_rock_is_always_heard() {
        for seed in 0..32 {
            let mut s = session(MonsterKind::Guard, MonsterState::Wandering, 'Q');
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                s.compute_noise(&mut rng),
                vec![Signal::Noise {
                    pos: HIDDEN_SPOT,
                    kind: NoiseKind::Footsteps
                }]
            );
            assert!(s.noise().contains(HIDDEN_SPOT));
        }
    }

    #[test]
    fn ordinary_ground_is_heard_sometimes() {
        let mut heard = 0;
        for seed in 0..64 {
            let mut s = session(MonsterKind::Worm, MonsterState::Hunting, '.');
            let mut rng = StdRng::seed_from_u64(seed);
            if !s.compute_noise(&mut rng).is_empty() {
                heard += 1;
            }
        }
        assert!(heard > 0 && heard < 64, "heard {heard} times");
    }

    #[test]
    fn silent_species_need_the_hearing_cloak() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = session(MonsterKind::Butterfly, MonsterState::Wandering, 'Q');
        assert!(s.compute_noise(&mut rng).is_empty());

        let mut s = session(MonsterKind::MirrorSpecter, MonsterState::Wandering, 'Q');
        assert!(s.compute_noise(&mut rng).is_empty());
        s.world.player.cloak = Some(Cloak::Hear);
        assert_eq!(
            s.compute_noise(&mut rng),
            vec![Signal::Noise {
                pos: HIDDEN_SPOT,
                kind: NoiseKind::AirMovement
            }]
        );
    }

    #[test]
    fn visible_monsters_make_no_noise_signal() {
        let d = Dungeon::filled(6, 3, crate::terrain::Terrain::QueenRock);
        let mut w = World::new(d, Point::new(0, 0));
        w.add_monster(
            Monster::new(MonsterKind::Dog, Point::new(3, 1)).with_state(MonsterState::Hunting),
        );
        let mut s = Session::new(w);
        s.compute_player_vision();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(s.compute_noise(&mut rng).is_empty());
    }
}
