use rand::SeedableRng;
use rand::rngs::StdRng;
use umbra_sense::{
    Direction, Dungeon, Monster, MonsterKind, MonsterState, PathKind, Point, Session, Signal,
    Terrain, World,
};

fn session(rows: &[&str], player: Point) -> Session {
    let d = Dungeon::from_rows(rows).expect("valid map");
    Session::new(World::new(d, player))
}

#[test]
fn explore_a_small_level() {
    let mut s = session(
        &[
            "##########",
            "#........#",
            "#........#",
            "####+#####",
            "#.......>#",
            "##########",
        ],
        Point::new(2, 1),
    );
    let mut rng = StdRng::seed_from_u64(1);
    s.perceive(&mut rng);
    assert!(s.sees(Point::new(4, 3)));
    assert!(!s.sees(Point::new(4, 4)));

    let mut found_stair = false;
    for _ in 0..40 {
        let Some(next) = s.autoexplore_step() else {
            break;
        };
        s.world.player.pos = next;
        let signals = s.perceive(&mut rng);
        found_stair |= signals
            .iter()
            .any(|sig| matches!(sig, Signal::NotableSeen { terrain: Terrain::Stair, .. }));
    }
    assert!(found_stair);
    assert!(s.world.dungeon.explored(Point::new(8, 4)));
    assert_eq!(s.autoexplore_step(), None);
}

#[test]
fn guard_watches_a_lit_corridor() {
    let mut s = session(&["............"], Point::new(0, 0));
    s.world.lights.insert(Point::new(1, 0), true);
    s.world.add_monster(
        Monster::new(MonsterKind::Guard, Point::new(6, 0))
            .with_dir(Direction::W)
            .with_state(MonsterState::Wandering),
    );
    let mut rng = StdRng::seed_from_u64(2);
    s.perceive(&mut rng);
    let det = s.compute_mutual_detection();
    assert!(!det.hidden);
    assert_eq!(det.watchers, vec![0]);

    s.world.lights.clear();
    s.perceive(&mut rng);
    assert!(s.compute_mutual_detection().hidden);
}

#[test]
fn travel_around_an_exclusion_zone() {
    let rows = vec![".".repeat(40); 3];
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let mut s = session(&rows, Point::new(0, 1));
    for p in s.world.range() {
        s.world.dungeon.set_explored(p);
    }
    let mut rng = StdRng::seed_from_u64(3);
    let (from, to) = (Point::new(0, 1), Point::new(39, 1));
    assert_eq!(s.find_path(PathKind::Player, from, to, &mut rng).len(), 40);

    assert_eq!(s.toggle_exclusion(Point::new(20, 1)), Some(true));
    assert!(s.autoexplore_needs_rebuild());
    assert!(s.find_path(PathKind::Player, from, to, &mut rng).is_empty());
    assert_eq!(
        s.rank_by_path_distance(&[Point::new(30, 1), Point::new(3, 1)], from),
        vec![Point::new(3, 1), Point::new(30, 1)]
    );

    assert_eq!(s.toggle_exclusion(Point::new(20, 1)), Some(false));
    assert!(s.world.exclusions.is_empty());
    assert_eq!(s.find_path(PathKind::Player, from, to, &mut rng).len(), 40);
}
