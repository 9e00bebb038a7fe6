//! Search domains for every kind of mover.
//!
//! All domains move in the four cardinal directions, stay inside the
//! dungeon and use the Manhattan distance as A* estimate.

use std::cell::RefCell;

use rand::Rng;
use rand::seq::SliceRandom;
use umbra_core::Point;
use umbra_paths::{
    AstarPather, Pather, UNREACHABLE, WeightedPather, chebyshev, manhattan, push_cardinal,
};

use crate::dungeon::Dungeon;
use crate::entity::{Monster, MonsterId, MonsterKind, MonsterState, MonsterStatus};
use crate::posset::PosSet;
use crate::terrain::Terrain;
use crate::world::World;

// ---------------------------------------------------------------------------
// Plain grid domains
// ---------------------------------------------------------------------------

/// Whole-dungeon domain where walls are just expensive.
pub struct DungeonPather<'a> {
    pub dungeon: &'a Dungeon,
    /// Cost of entering a wall; [`UNREACHABLE`] forbids walls.
    pub wall_cost: i32,
}

impl Pather for DungeonPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |q| self.dungeon.valid(q));
    }
}

impl WeightedPather for DungeonPather<'_> {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        if self.dungeon.terrain(to).is_wall() {
            return self.wall_cost;
        }
        1
    }
}

/// Terrain-blind domain.
pub struct GridPather<'a> {
    pub dungeon: &'a Dungeon,
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |q| self.dungeon.valid(q));
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

/// Distance as the player's map knows it: walls can be reached but not
/// crossed.
pub struct MappingPather<'a> {
    pub world: &'a World,
}

impl Pather for MappingPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.world.known_terrain(p).is_wall() {
            return;
        }
        push_cardinal(p, buf, |q| self.world.valid(q));
    }
}

impl WeightedPather for MappingPather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

// ---------------------------------------------------------------------------
// Player travel
// ---------------------------------------------------------------------------

/// Travel to a chosen destination through explored, known-passable cells.
pub struct PlayerPather<'a> {
    pub world: &'a World,
    pub goal: Point,
}

impl Pather for PlayerPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |q| self.world.travel_passable(q));
        buf.sort_by_key(|&q| chebyshev(q, self.goal));
    }
}

impl WeightedPather for PlayerPather<'_> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        let ex = &self.world.exclusions;
        if !ex.contains(from) && ex.contains(to) {
            return UNREACHABLE;
        }
        1
    }
}

/// Flood toward the unexplored frontier, avoiding excluded areas.
pub struct AutoexplorePather<'a> {
    pub world: &'a World,
}

impl Pather for AutoexplorePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.world.exclusions.contains(p) {
            return;
        }
        push_cardinal(p, buf, |q| self.world.autoexplore_passable(q));
    }
}

impl WeightedPather for AutoexplorePather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

/// Random path for a jump: any cell the player may occupy.
pub struct JumpPather<'a, R: Rng + ?Sized> {
    pub world: &'a World,
    pub rng: RefCell<&'a mut R>,
}

impl<'a, R: Rng + ?Sized> JumpPather<'a, R> {
    pub fn new(world: &'a World, rng: &'a mut R) -> Self {
        Self {
            world,
            rng: RefCell::new(rng),
        }
    }
}

impl<R: Rng + ?Sized> Pather for JumpPather<'_, R> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |q| self.world.player_can_pass(q));
        buf.shuffle(&mut **self.rng.borrow_mut());
    }
}

impl<R: Rng + ?Sized> WeightedPather for JumpPather<'_, R> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

/// Sound propagation: anything but walls.
pub struct NoisePather<'a> {
    pub dungeon: &'a Dungeon,
}

impl Pather for NoisePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |q| self.dungeon.valid(q) && !self.dungeon.terrain(q).is_wall());
    }
}

// ---------------------------------------------------------------------------
// Dungeon construction
// ---------------------------------------------------------------------------

/// Room and tunnel masks of a dungeon under construction.
#[derive(Debug, Clone)]
pub struct TunnelPlan {
    pub room: PosSet,
    pub tunnel: PosSet,
}

impl TunnelPlan {
    pub fn new(dungeon: &Dungeon) -> Self {
        Self {
            room: PosSet::new(dungeon.range()),
            tunnel: PosSet::new(dungeon.range()),
        }
    }
}

/// Digging a corridor: keeps out of rooms, follows existing tunnels and
/// prefers cutting through thin walls.
pub struct TunnelPather<'a> {
    pub dungeon: &'a Dungeon,
    pub plan: &'a TunnelPlan,
}

impl Pather for TunnelPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |q| self.dungeon.valid(q));
    }
}

impl WeightedPather for TunnelPather<'_> {
    fn cost(&self, from: Point, _to: Point) -> i32 {
        let in_room = self.plan.room.contains(from);
        let in_tunnel = self.plan.tunnel.contains(from);
        if in_room && !in_tunnel {
            return 50;
        }
        let t = self.dungeon.terrain(from);
        let mut cost = 1;
        if in_room {
            cost += 7;
        } else if !in_tunnel && t != Terrain::Ground {
            cost += 1;
        }
        if t.passable() {
            return cost;
        }
        (cost + 8 - self.dungeon.wall_area_count(from, 1)).max(1)
    }
}

// ---------------------------------------------------------------------------
// Monster movement
// ---------------------------------------------------------------------------

/// Movement of one monster, with randomized neighbor order.
pub struct MonsterPather<'a, R: Rng + ?Sized> {
    world: &'a World,
    monster: &'a Monster,
    rng: RefCell<&'a mut R>,
}

impl<'a, R: Rng + ?Sized> MonsterPather<'a, R> {
    /// Domain of monster `id`, `None` when there is no such monster.
    pub fn new(world: &'a World, id: MonsterId, rng: &'a mut R) -> Option<Self> {
        let monster = world.monsters.get(id)?;
        Some(Self {
            world,
            monster,
            rng: RefCell::new(rng),
        })
    }
}

impl<R: Rng + ?Sized> Pather for MonsterPather<'_, R> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let w = self.world;
        push_cardinal(p, buf, |q| {
            w.valid(q) && self.monster.can_walk_destruct(w.dungeon.terrain(q))
        });
        buf.shuffle(&mut **self.rng.borrow_mut());
    }
}

impl<R: Rng + ?Sized> WeightedPather for MonsterPather<'_, R> {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        let w = self.world;
        let m = self.monster;
        if let Some(other) = w.monster_at(to) {
            if other.status.intersects(MonsterStatus::LIGNIFIED | MonsterStatus::SLOWED) {
                return 8;
            }
            return 6;
        }
        let t = w.dungeon.terrain(to);
        let dragon = m.kind == MonsterKind::EarthDragon;
        if dragon && t.destructible() && !m.has(MonsterStatus::CONFUSED) {
            return 5;
        }
        if to == w.player.pos && m.kind.peaceful() {
            return if dragon { 1 } else { 4 };
        }
        if m.kind.patrolling() && m.state != MonsterState::Hunting && !t.normal_patrol_way() {
            return 4;
        }
        1
    }
}

impl AstarPather for DungeonPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarPather for MappingPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarPather for PlayerPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarPather for AutoexplorePather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl AstarPather for TunnelPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl<R: Rng + ?Sized> AstarPather for JumpPather<'_, R> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl<R: Rng + ?Sized> AstarPather for MonsterPather<'_, R> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use umbra_paths::PathRange;

    fn world(rows: &[&str]) -> World {
        World::new(Dungeon::from_rows(rows).expect("valid map"), Point::new(0, 0))
    }

    fn neighbors(p: &impl Pather, at: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        p.neighbors(at, &mut buf);
        buf
    }

    #[test]
    fn dungeon_walls_cost_more() {
        let w = world(&["..#.."]);
        let dp = DungeonPather {
            dungeon: &w.dungeon,
            wall_cost: 4,
        };
        assert_eq!(dp.cost(Point::new(1, 0), Point::new(2, 0)), 4);
        assert_eq!(dp.cost(Point::new(2, 0), Point::new(3, 0)), 1);
        let mut pr = PathRange::new(w.range());
        let path = pr.astar_path(&dp, Point::new(0, 0), Point::new(4, 0));
        assert_eq!(path.map(|p| p.len()), Some(5));
        let dp = DungeonPather {
            dungeon: &w.dungeon,
            wall_cost: UNREACHABLE,
        };
        assert_eq!(pr.astar_path(&dp, Point::new(0, 0), Point::new(4, 0)), None);
    }

    #[test]
    fn grid_path_ignores_terrain() {
        let w = world(&["#####", "#####", "#####"]);
        let gp = GridPather { dungeon: &w.dungeon };
        let mut pr = PathRange::new(w.range());
        let path = pr
            .astar_path(&gp, Point::new(0, 0), Point::new(4, 2))
            .expect("open grid");
        assert_eq!(path.len() as i32 - 1, manhattan(Point::new(0, 0), Point::new(4, 2)));
    }

    #[test]
    fn mapping_path_stops_at_walls() {
        let w = world(&[".#.", "..."]);
        let mp = MappingPather { world: &w };
        assert!(neighbors(&mp, Point::new(1, 0)).is_empty());
        assert!(neighbors(&mp, Point::new(0, 0)).contains(&Point::new(1, 0)));
    }

    #[test]
    fn player_travel_orders_by_goal_and_respects_exclusions() {
        let mut w = world(&["...", "...", "..."]);
        for p in w.range() {
            w.dungeon.set_explored(p);
        }
        let pp = PlayerPather {
            world: &w,
            goal: Point::new(2, 1),
        };
        let nb = neighbors(&pp, Point::new(1, 1));
        assert_eq!(nb[0], Point::new(2, 1));
        assert_eq!(nb.len(), 4);

        w.exclusions.insert(Point::new(2, 1));
        let pp = PlayerPather {
            world: &w,
            goal: Point::new(2, 1),
        };
        assert_eq!(pp.cost(Point::new(1, 1), Point::new(2, 1)), UNREACHABLE);
        w.exclusions.insert(Point::new(1, 1));
        let pp = PlayerPather {
            world: &w,
            goal: Point::new(2, 1),
        };
        assert_eq!(pp.cost(Point::new(1, 1), Point::new(2, 1)), 1);
    }

    #[test]
    fn unexplored_cells_are_not_travelled() {
        let w = world(&["..."]);
        let pp = PlayerPather {
            world: &w,
            goal: Point::new(2, 0),
        };
        assert!(neighbors(&pp, Point::new(1, 0)).is_empty());
    }

    #[test]
    fn autoexplore_avoids_exclusions() {
        let mut w = world(&["...#"]);
        w.exclusions.insert(Point::new(2, 0));
        let ap = AutoexplorePather { world: &w };
        assert_eq!(neighbors(&ap, Point::new(1, 0)), vec![Point::new(0, 0)]);
        assert!(neighbors(&ap, Point::new(2, 0)).is_empty());
    }

    #[test]
    fn tunnel_costs() {
        let d = Dungeon::from_rows(&["#####", "#...#", "#####"]).expect("valid map");
        let mut plan = TunnelPlan::new(&d);
        plan.room.insert(Point::new(1, 1));
        plan.room.insert(Point::new(2, 1));
        plan.tunnel.insert(Point::new(2, 1));
        let tp = TunnelPather {
            dungeon: &d,
            plan: &plan,
        };
        let to = Point::new(0, 0);
        assert_eq!(tp.cost(Point::new(1, 1), to), 50);
        assert_eq!(tp.cost(Point::new(2, 1), to), 8);
        assert_eq!(tp.cost(Point::new(3, 1), to), 1);
        // out-of-bounds cells count as walls
        assert_eq!(tp.cost(Point::new(2, 0), to), 2 + 8 - 6);
        assert_eq!(tp.cost(Point::new(0, 0), to), 2 + 8 - 8);
    }

    #[test]
    fn monster_costs() {
        let mut w = world(&["..\"..", "....."]);
        w.player.pos = Point::new(4, 1);
        let guard = w.add_monster(Monster::new(MonsterKind::Guard, Point::new(0, 0)));
        let dragon = w.add_monster(Monster::new(MonsterKind::EarthDragon, Point::new(0, 1)));
        let mut rng = StdRng::seed_from_u64(42);
        let mp = MonsterPather::new(&w, guard, &mut rng).expect("guard exists");
        assert_eq!(mp.cost(Point::new(1, 0), Point::new(2, 0)), 4);
        assert_eq!(mp.cost(Point::new(1, 0), Point::new(1, 1)), 1);
        assert_eq!(mp.cost(Point::new(1, 1), Point::new(0, 1)), 6);
        let empty = mp.cost(Point::new(1, 1), Point::new(2, 1));
        assert!(mp.cost(Point::new(1, 0), Point::new(0, 1)) >= empty);

        let mut rng = StdRng::seed_from_u64(42);
        let mp = MonsterPather::new(&w, dragon, &mut rng).expect("dragon exists");
        assert_eq!(mp.cost(Point::new(3, 1), Point::new(4, 1)), 1);
        let mut nb = neighbors(&mp, Point::new(1, 1));
        nb.sort();
        assert_eq!(
            nb,
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(2, 1)]
        );
    }

    #[test]
    fn lignified_occupants_cost_most() {
        let mut w = world(&["...."]);
        let a = w.add_monster(Monster::new(MonsterKind::Dog, Point::new(0, 0)));
        let mut other = Monster::new(MonsterKind::Dog, Point::new(2, 0));
        other.status |= MonsterStatus::LIGNIFIED;
        w.add_monster(other);
        let mut rng = StdRng::seed_from_u64(1);
        let mp = MonsterPather::new(&w, a, &mut rng).expect("dog exists");
        assert_eq!(mp.cost(Point::new(1, 0), Point::new(2, 0)), 8);
    }

    #[test]
    fn slowed_occupants_cost_like_lignified() {
        let mut w = world(&["....."]);
        let a = w.add_monster(Monster::new(MonsterKind::Dog, Point::new(0, 0)));
        w.add_monster(Monster::new(MonsterKind::Dog, Point::new(2, 0)));
        let mut slowed = Monster::new(MonsterKind::Dog, Point::new(3, 0));
        slowed.status |= MonsterStatus::SLOWED;
        w.add_monster(slowed);
        let mut rng = StdRng::seed_from_u64(1);
        let mp = MonsterPather::new(&w, a, &mut rng).expect("dog exists");
        assert_eq!(mp.cost(Point::new(1, 0), Point::new(2, 0)), 6);
        assert_eq!(mp.cost(Point::new(4, 0), Point::new(3, 0)), 8);
    }

    #[test]
    fn unknown_monster_has_no_domain() {
        let w = world(&["..."]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(MonsterPather::new(&w, 0, &mut rng).is_none());
        assert!(!w.monster_can_pass_destruct(0, Point::new(1, 0)));
    }

    #[test]
    fn shuffled_neighbors_keep_the_same_cells() {
        let w = world(&["...", "...", "..."]);
        let mut rng = StdRng::seed_from_u64(7);
        let jp = JumpPather::new(&w, &mut rng);
        let mut nb = neighbors(&jp, Point::new(1, 1));
        nb.sort();
        assert_eq!(nb, {
            let mut v = Point::new(1, 1).neighbors_4().to_vec();
            v.sort();
            v
        });
    }

    #[test]
    fn noise_flows_around_walls() {
        let w = world(&["...", ".#.", "..."]);
        let np = NoisePather { dungeon: &w.dungeon };
        let mut pr = PathRange::new(w.range());
        pr.bfs_map(&np, &[Point::new(0, 0)], 12);
        assert_eq!(pr.bfs_at(Point::new(2, 2)), 4);
        assert_eq!(pr.bfs_at(Point::new(1, 1)), UNREACHABLE);
    }
}
