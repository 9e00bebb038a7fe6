//! The terrain-weighted cost model shared by sight and light.

use umbra_core::Point;
use umbra_paths::manhattan;
use umbra_rl::Lighter;

use crate::terrain::Terrain;
use crate::world::World;

/// Light range: a cell is illuminated when its light cost is at most this.
pub const LIGHT_RANGE: i32 = 6;
/// Player sight range in normal conditions.
pub const DEFAULT_LOS_RANGE: i32 = 12;
pub const DEFAULT_MONSTER_LOS_RANGE: i32 = 12;
/// Sight range from the top of a tree, for illuminated cells.
pub const TREE_RANGE: i32 = 50;
/// Extra cost paid by sight rays on entering foliage or a holed wall. The
/// filter cell itself is still seen at the same range as open ground.
pub const FILTER_ENTRY_COST: i32 = 1;

/// Which kind of ray is being cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RayStyle {
    PlayerNormal,
    /// The player sees from a tree canopy: over foliage and far into lit
    /// areas.
    PlayerCanopy,
    Monster,
    Light,
}

impl RayStyle {
    pub fn max_cost(self) -> i32 {
        match self {
            RayStyle::PlayerCanopy => TREE_RANGE + 1,
            RayStyle::Monster => DEFAULT_MONSTER_LOS_RANGE + 1,
            RayStyle::Light => LIGHT_RANGE,
            RayStyle::PlayerNormal => DEFAULT_LOS_RANGE + 1,
        }
    }
}

/// [`Lighter`] over a [`World`] for one [`RayStyle`].
pub struct SightLighter<'a> {
    pub world: &'a World,
    pub style: RayStyle,
}

impl<'a> SightLighter<'a> {
    pub fn new(world: &'a World, style: RayStyle) -> Self {
        Self { world, style }
    }

    /// Player ray style for the current player position.
    pub fn player(world: &'a World) -> Self {
        let style = if world.dungeon.terrain(world.player.pos) == Terrain::Tree {
            RayStyle::PlayerCanopy
        } else {
            RayStyle::PlayerNormal
        };
        Self::new(world, style)
    }

    fn canopy(&self) -> bool {
        self.style == RayStyle::PlayerCanopy
    }

    /// Entry cost charged on stepping into `p`. Light rays and canopy
    /// views over foliage pay none.
    pub fn entry_cost(&self, p: Point) -> i32 {
        match (self.style, self.world.dungeon.terrain(p)) {
            (RayStyle::Light, _) => 0,
            (RayStyle::PlayerCanopy, Terrain::Foliage) => 0,
            (_, Terrain::Foliage | Terrain::HoledWall) => FILTER_ENTRY_COST,
            _ => 0,
        }
    }

    /// Cost at which `p` is compared against a range, given its
    /// accumulated ray cost: the cell's own entry cost only weighs on the
    /// cells behind it.
    pub fn range_cost(&self, p: Point, cost: i32) -> i32 {
        cost - self.entry_cost(p)
    }

    /// Step length plus the entry cost of `to`.
    fn step(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to) + self.entry_cost(to)
    }
}

impl Lighter for SightLighter<'_> {
    fn cost(&self, src: Point, from: Point, to: Point) -> i32 {
        let w = self.world;
        let wall = self.max_cost(src);
        if w.diagonal_opaque(from, to) {
            return wall;
        }
        if src == from {
            if !self.canopy() && w.diagonal_difficult(from, to) {
                return wall - 1;
            }
            return self.step(from, to);
        }
        let t = w.dungeon.terrain(from);
        if t == Terrain::Wall || w.clouds.contains_key(&from) {
            return wall;
        }
        if t == Terrain::Door && w.monster_at(from).is_none() && from != w.player.pos {
            return wall;
        }
        match t {
            Terrain::Foliage if self.canopy() => {}
            Terrain::Foliage | Terrain::HoledWall => {
                return wall + manhattan(from, to) - 3 - self.entry_cost(from);
            }
            _ => {}
        }
        if !self.canopy() && w.diagonal_difficult(from, to) {
            return (wall - manhattan(from, src) - 1).max(1);
        }
        if self.canopy() && t == Terrain::Window && manhattan(src, from) >= DEFAULT_LOS_RANGE {
            return wall - manhattan(src, from) - 1;
        }
        self.step(from, to)
    }

    fn max_cost(&self, _src: Point) -> i32 {
        self.style.max_cost()
    }
}
