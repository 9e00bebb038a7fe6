//! Terrain kinds, transient clouds and their predicates.

/// What a dungeon cell is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Wall,
    Ground,
    Door,
    Foliage,
    /// A wall pierced with small holes: filters sight like foliage.
    HoledWall,
    /// Transparent but impassable.
    Window,
    /// Climbable canopy giving elevated sight.
    Tree,
    Barrel,
    Table,
    Chasm,
    /// A magical barrier.
    Barrier,
    /// Resonating rock: anything walking on it is heard.
    QueenRock,
    /// A light fixture.
    Light,
    Stair,
    FakeStair,
    Item,
    Magara,
    Story,
}

impl Terrain {
    /// Passable for ordinary walking creatures.
    pub fn passable(self) -> bool {
        use Terrain::*;
        matches!(
            self,
            Ground | Door | Foliage | Tree | Table | QueenRock | Stair | FakeStair | Item | Magara | Story
        )
    }

    /// Passable for the player, who can also hide in barrels.
    pub fn player_passable(self) -> bool {
        self.passable() || self == Terrain::Barrel
    }

    pub fn is_wall(self) -> bool {
        self == Terrain::Wall
    }

    /// Can be dug through with a digging ability.
    pub fn diggable(self) -> bool {
        matches!(self, Terrain::Wall | Terrain::HoledWall | Terrain::Window)
    }

    /// Can be smashed by a burrowing creature.
    pub fn destructible(self) -> bool {
        use Terrain::*;
        matches!(self, Wall | HoledWall | Window | Door | Barrel | Table)
    }

    /// Conceals what lies directly behind it from monster sight.
    pub fn hides(self) -> bool {
        matches!(self, Terrain::Barrel | Terrain::Table | Terrain::Tree)
    }

    /// Receives light, so that a creature standing there can be lit.
    pub fn illuminable(self) -> bool {
        !matches!(self, Terrain::Tree | Terrain::Barrel)
    }

    /// Worth reporting when first discovered.
    pub fn notable(self) -> bool {
        use Terrain::*;
        matches!(self, Stair | FakeStair | Item | Magara | Story | QueenRock)
    }

    /// Part of the ordinary routes patrolling guards keep to.
    pub fn normal_patrol_way(self) -> bool {
        self.passable() && !matches!(self, Terrain::Foliage | Terrain::Table | Terrain::Tree)
    }

    /// Character used in map dumps.
    pub fn rune(self) -> char {
        use Terrain::*;
        match self {
            Wall => '#',
            Ground => '.',
            Door => '+',
            Foliage => '"',
            HoledWall => 'o',
            Window => '=',
            Tree => '&',
            Barrel => 'B',
            Table => 'T',
            Chasm => ':',
            Barrier => 'X',
            QueenRock => 'Q',
            Light => 'L',
            Stair => '>',
            FakeStair => 'S',
            Item => '!',
            Magara => '/',
            Story => '?',
        }
    }

    /// Inverse of [`rune`](Self::rune).
    pub fn from_rune(c: char) -> Option<Terrain> {
        use Terrain::*;
        const ALL: [Terrain; 18] = [
            Wall, Ground, Door, Foliage, HoledWall, Window, Tree, Barrel, Table, Chasm, Barrier,
            QueenRock, Light, Stair, FakeStair, Item, Magara, Story,
        ];
        ALL.into_iter().find(|t| t.rune() == c)
    }
}

/// A transient cloud covering a cell. Any cloud is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cloud {
    Fog,
    Night,
    Fire,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runes_round_trip() {
        for c in "#.+\"o=&BT:XQL>S!/?".chars() {
            let t = Terrain::from_rune(c).expect("known rune");
            assert_eq!(t.rune(), c);
        }
        assert_eq!(Terrain::from_rune('z'), None);
    }

    #[test]
    fn passability() {
        assert!(Terrain::Ground.passable());
        assert!(!Terrain::Wall.passable());
        assert!(!Terrain::Barrel.passable());
        assert!(Terrain::Barrel.player_passable());
        assert!(!Terrain::Chasm.player_passable());
        assert!(Terrain::Wall.diggable() && Terrain::Wall.destructible());
        assert!(!Terrain::Foliage.normal_patrol_way());
        assert!(Terrain::Door.normal_patrol_way());
    }
}
