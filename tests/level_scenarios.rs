//! End-to-end scenarios over generated levels.

use std::collections::HashMap;
use std::collections::HashSet;

use rand::Rng as _;
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

use hanshack::actor::Species;
use hanshack::config::CombatRule;
use hanshack::config::Config;
use hanshack::config::FovAlgorithm;
use hanshack::config::View;
use hanshack::geo::Dir;
use hanshack::geo::Point;
use hanshack::geo::Rect;
use hanshack::level::visible_tiles;
use hanshack::map::gen::room_fits;
use hanshack::level::Action;
use hanshack::level::TurnOutcome;
use hanshack::LevelState;

fn generate(config: &Config, seed: u64) -> LevelState {
  let mut rng = ChaCha8Rng::seed_from_u64(seed);
  hanshack::generate_level(config, &mut rng).unwrap()
}

fn explored(level: &LevelState) -> HashSet<Point> {
  let grid = level.grid();
  grid.points().filter(|&p| grid.tile(p).is_explored()).collect()
}

fn room(x: i64, y: i64, w: i64, h: i64) -> Rect {
  Rect::with_dims(w, h) + Point::new(x, y)
}

#[test]
fn touching_rooms_are_never_both_accepted() {
  let rooms = [room(0, 0, 5, 5)];
  assert!(room_fits(&[], rooms[0]));
  assert!(!room_fits(&rooms, room(4, 4, 5, 5)));
  assert!(!room_fits(&rooms, room(5, 0, 5, 5)));
  assert!(room_fits(&rooms, room(6, 0, 5, 5)));
  assert!(room_fits(&rooms, room(10, 10, 5, 5)));

  for seed in 0..20 {
    let level = generate(&Config::default(), seed);
    let rooms = level.rooms();
    assert!(!rooms.is_empty());
    for (i, r) in rooms.iter().enumerate() {
      assert!(room_fits(&rooms[..i], *r));
    }
  }
}

#[test]
fn random_walk_keeps_invariants() {
  for &(seed, algorithm) in &[
    (7, FovAlgorithm::Symmetric),
    (8, FovAlgorithm::Basic),
    (9, FovAlgorithm::Symmetric),
  ] {
    let config = Config {
      view: View {
        algorithm,
        ..View::default()
      },
      ..Config::default()
    };
    let mut level = generate(&config, seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0xdead_beef);
    let radius = config.view.radius;

    let mut seen = HashSet::new();
    for _ in 0..300 {
      let dir = Dir::all()[rng.gen_range(0..8)];
      let before = level.player().pos;
      let monsters: HashMap<_, _> =
        level.entities().iter().map(|e| (e.id(), e.pos)).collect();

      let outcome = level.resolve_turn(Action::Step(dir));
      assert!(outcome.took_turn());
      let after = level.player().pos;
      match &outcome {
        TurnOutcome::Moved => assert_eq!(after, before + dir.to_point::<i64>()),
        TurnOutcome::Attacked(_) | TurnOutcome::Blocked => {
          assert_eq!(after, before)
        }
        TurnOutcome::NotATurn => unreachable!(),
      }
      level.take_monster_turns();

      // Narrated combat never moves or removes anybody but the player.
      for e in level.entities() {
        if e.id() != level.player_id() {
          assert_eq!(monsters.get(&e.id()), Some(&e.pos));
        }
      }
      assert_eq!(level.entities().len(), monsters.len());

      assert!(!level.grid().is_blocked(after));
      let visible = level.visible().clone();
      for &p in &visible {
        assert!(level.grid().contains(p));
        assert!((p - after).norm_at_most(radius));
      }

      let now = explored(&level);
      assert!(now.is_superset(&seen));
      assert!(now.is_superset(&visible));
      seen = now;
    }
  }
}

#[test]
fn visibility_is_deterministic() {
  let level = generate(&Config::default(), 31);
  let origin = level.player().pos;
  let view = level.view();

  let mut grid = level.grid().clone();
  let first = visible_tiles(&mut grid, origin, &view);
  let second = visible_tiles(&mut grid, origin, &view);
  assert_eq!(first, second);
  assert!(first.contains(&origin));
}

#[test]
fn symmetric_visibility_on_a_real_level() {
  let config = Config {
    width: 40,
    height: 30,
    max_rooms: 12,
    max_monsters: 0,
    ..Config::default()
  };
  let level = generate(&config, 5);
  let view = View {
    light_walls: false,
    ..View::default()
  };

  let mut grid = level.grid().clone();
  let floor: Vec<Point> = level.grid().carved().collect();
  let fovs: HashMap<Point, HashSet<Point>> = floor
    .iter()
    .map(|&p| (p, visible_tiles(&mut grid, p, &view)))
    .collect();

  for &a in &floor {
    for &b in &fovs[&a] {
      assert!(
        fovs[&b].contains(&a),
        "{:?} sees {:?} but not the other way around",
        a,
        b
      );
    }
  }
}

#[test]
fn lethal_combat_clears_the_way() {
  let config = Config {
    combat: CombatRule::Lethal,
    ..Config::default()
  };
  let mut level = generate(&config, 77);
  let count = level.entities().len();

  let start = level.player().pos;
  let (dir, target) = Dir::all()
    .iter()
    .map(|&d| (d, start + d.to_point::<i64>()))
    .find(|&(_, p)| level.entities().iter().all(|e| e.pos != p))
    .unwrap();
  let orc = level.spawn(&Species::orc().blueprint, target);

  // An orc has 10 health and no defense against the player's 5 power.
  for _ in 0..2 {
    assert_eq!(
      level.resolve_turn(Action::Step(dir)),
      TurnOutcome::Attacked("orc".into())
    );
    assert_eq!(level.player().pos, start);
  }
  assert!(level.entity(orc).is_none());
  assert_eq!(level.entities().len(), count);
  assert!(level.entities().iter().all(|e| e.pos != target));
  assert!(level.drain_messages().contains(&"The Orc dies!".to_string()));
}
