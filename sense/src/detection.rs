//! Who notices whom: monster sight of the cells the player sees.

use umbra_core::Point;
use umbra_paths::manhattan;

use crate::entity::{Cloak, MonsterId, MonsterKind, MonsterState, PlayerStatus};
use crate::lighter::DEFAULT_MONSTER_LOS_RANGE;
use crate::posset::PosSet;
use crate::session::Session;
use crate::terrain::Terrain;

/// Distance within which monsters notice what stands in the dark.
const DARK_RANGE: i32 = 4;
/// Distance within which monsters notice what stands on a table.
const TABLE_RANGE: i32 = 1;

/// Outcome of mutual detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// No visible monster notices the player's cell.
    pub hidden: bool,
    /// The player stands in light that reveals them.
    pub lit: bool,
    /// Visible monsters that notice the player.
    pub watchers: Vec<MonsterId>,
}

impl Session {
    /// Whether monster `id` would notice something at `pos`.
    ///
    /// The cell must be in the monster's own field of view and in its
    /// view cone (spiders look everywhere). Resting monsters only notice
    /// adjacent cells. Dark or unlit-able cells are noticed only within a
    /// short range, tables only when adjacent, and a transparent player
    /// standing in light only when adjacent.
    pub fn monster_sees(&self, id: MonsterId, pos: Point) -> bool {
        let Some(m) = self.world.monsters.get(id) else {
            return false;
        };
        let player = &self.world.player;
        let mut dark_range = if m.kind == MonsterKind::HazeCat {
            DEFAULT_MONSTER_LOS_RANGE
        } else {
            DARK_RANGE
        };
        if player.cloak == Some(Cloak::Shadows) {
            dark_range -= 1;
        }
        if player.has(PlayerStatus::SHADOWS) {
            dark_range = 1;
        }
        if !m.sees_cell(pos) || !(m.in_view_cone(pos) || m.kind == MonsterKind::Spider) {
            return false;
        }
        let d = manhattan(m.pos, pos);
        if m.state == MonsterState::Resting && d > 1 {
            return false;
        }
        let t = self.world.dungeon.terrain(pos);
        let lit = self.light.illuminated(pos);
        if (!lit && !player.has(PlayerStatus::ILLUMINATED) || !t.illuminable()) && d > dark_range {
            return false;
        }
        if t == Terrain::Table && d > TABLE_RANGE {
            return false;
        }
        if player.has(PlayerStatus::TRANSPARENT) && lit && d > 1 {
            return false;
        }
        true
    }

    /// Cells of the player's view that monster `id` would notice.
    pub fn monster_cone(&self, id: MonsterId) -> PosSet {
        let mut cone = PosSet::new(self.world.range());
        cone.extend(self.player_los.iter().filter(|&p| self.monster_sees(id, p)));
        cone
    }

    /// Compute which of the player's visible cells are watched by the
    /// monsters in sight, and update the player's hidden and light
    /// statuses.
    pub fn compute_mutual_detection(&mut self) -> Detection {
        self.monster_los.clear();
        let ppos = self.world.player.pos;
        let cells: Vec<Point> = self.player_los.iter().collect();
        let mut watchers = Vec::new();
        for (id, m) in self.world.monsters.iter().enumerate() {
            if !m.exists() || !self.player_los.contains(m.pos) {
                continue;
            }
            for &p in &cells {
                if self.monster_sees(id, p) {
                    self.monster_los.insert(p);
                    if p == ppos {
                        watchers.push(id);
                    }
                }
            }
        }

        let hidden = !self.monster_los.contains(ppos);
        let status = &mut self.world.player.status;
        status.set(PlayerStatus::UNHIDDEN, !hidden);
        status.set(PlayerStatus::HIDDEN, hidden);
        let lit = self.light.illuminated(ppos) && self.world.dungeon.terrain(ppos).illuminable();
        self.world.player.status.set(PlayerStatus::LIGHT, lit);
        log::debug!(
            "detection: hidden {hidden}, lit {lit}, watched cells {}",
            self.monster_los.len()
        );
        Detection {
            hidden,
            lit,
            watchers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Dungeon;
    use crate::entity::Monster;
    use crate::world::World;
    use umbra_core::Direction;

    /// A 16 × 3 open room with the player at (2, 1) and one monster
    /// facing west.
    fn setup(kind: MonsterKind, at: i32, lamp: bool) -> (Session, MonsterId) {
        let d = Dungeon::filled(16, 3, Terrain::Ground);
        let mut w = World::new(d, Point::new(2, 1));
        let id = w.add_monster(
            Monster::new(kind, Point::new(at, 1))
                .with_dir(Direction::W)
                .with_state(MonsterState::Wandering),
        );
        if lamp {
            w.lights.insert(Point::new(3, 1), true);
        }
        (Session::new(w), id)
    }

    fn detect(s: &mut Session) -> Detection {
        s.compute_light();
        s.compute_player_vision();
        s.compute_mutual_detection()
    }

    #[test]
    fn lit_player_is_seen() {
        let (mut s, id) = setup(MonsterKind::Guard, 8, true);
        let det = detect(&mut s);
        assert_eq!(
            det,
            Detection {
                hidden: false,
                lit: true,
                watchers: vec![id]
            }
        );
        assert!(s.world.player.has(PlayerStatus::UNHIDDEN | PlayerStatus::LIGHT));
        assert!(!s.world.player.has(PlayerStatus::HIDDEN));
        assert!(s.monster_los().contains(Point::new(2, 1)));
    }

    #[test]
    fn darkness_hides_beyond_short_range() {
        let (mut s, _) = setup(MonsterKind::Guard, 8, false);
        let det = detect(&mut s);
        assert!(det.hidden && !det.lit && det.watchers.is_empty());
        assert!(s.world.player.has(PlayerStatus::HIDDEN));
        // cells near the guard are still watched
        assert!(s.monster_los().contains(Point::new(5, 1)));
        assert!(!s.monster_los().contains(Point::new(3, 1)));

        let (mut s, _) = setup(MonsterKind::Guard, 6, false);
        assert!(!detect(&mut s).hidden);

        let (mut s, _) = setup(MonsterKind::HazeCat, 8, false);
        assert!(!detect(&mut s).hidden);
    }

    #[test]
    fn shadows_and_illumination_change_dark_range() {
        let (mut s, _) = setup(MonsterKind::Guard, 6, false);
        s.world.player.cloak = Some(Cloak::Shadows);
        assert!(detect(&mut s).hidden);

        let (mut s, _) = setup(MonsterKind::Guard, 4, false);
        s.world.player.status |= PlayerStatus::SHADOWS;
        assert!(detect(&mut s).hidden);

        let (mut s, _) = setup(MonsterKind::Guard, 8, false);
        s.world.player.status |= PlayerStatus::ILLUMINATED;
        assert!(!detect(&mut s).hidden);
    }

    #[test]
    fn transparency_works_in_light() {
        let (mut s, _) = setup(MonsterKind::Guard, 8, true);
        s.world.player.status |= PlayerStatus::TRANSPARENT;
        assert!(detect(&mut s).hidden);
    }

    #[test]
    fn resting_monsters_notice_only_adjacent_cells() {
        let (mut s, id) = setup(MonsterKind::Guard, 4, true);
        s.world.monsters[id].state = MonsterState::Resting;
        assert!(detect(&mut s).hidden);
        s.world.monsters[id].pos = Point::new(3, 1);
        assert!(!detect(&mut s).hidden);
    }

    #[test]
    fn tables_conceal_beyond_adjacency() {
        let (mut s, _) = setup(MonsterKind::Guard, 5, true);
        s.world.dungeon.set_terrain(Point::new(2, 1), Terrain::Table);
        assert!(detect(&mut s).hidden);
    }

    #[test]
    fn view_cone_limits_all_but_spiders() {
        let (mut s, id) = setup(MonsterKind::Guard, 5, true);
        s.world.monsters[id].dir = Some(Direction::E);
        assert!(detect(&mut s).hidden);

        let (mut s, id) = setup(MonsterKind::Spider, 5, true);
        s.world.monsters[id].dir = Some(Direction::E);
        assert!(!detect(&mut s).hidden);
    }

    #[test]
    fn cone_preview_matches_detection() {
        let (mut s, id) = setup(MonsterKind::Guard, 8, true);
        detect(&mut s);
        let cone = s.monster_cone(id);
        assert_eq!(&cone, s.monster_los());
        assert!(s.monster_cone(42).is_empty());
    }
}
