//! Rooms-and-corridors dungeon generation.
//!
//! Room placement is attempted a fixed number of times. A candidate that
//! touches any accepted room is dropped rather than retried, so a level may
//! end up with fewer rooms than it asked for. Every accepted room after the
//! first is joined to the one accepted before it by an L-shaped corridor.

use rand::distributions::Distribution as _;
use rand::distributions::Uniform;
use rand::distributions::WeightedIndex;
use rand::Rng;

use crate::config::Config;
use crate::config::ConfigError;
use crate::geo::Point;
use crate::geo::Rect;
use crate::level::LevelState;
use crate::map::Grid;

/// Generates a fresh level from `config`, drawing all randomness from `rng`.
///
/// The configuration is validated before anything is built. If no room is
/// accepted, the player stands at the origin of an entirely solid map.
pub fn generate_level<R: Rng + ?Sized>(
  config: &Config,
  rng: &mut R,
) -> Result<LevelState, ConfigError> {
  config.validate()?;
  let species = config.species_index()?;

  let mut level = LevelState::new(
    Grid::new(config.width, config.height),
    &config.player,
    Point::zero(),
    config.view,
    config.combat,
  );

  let size = Uniform::new_inclusive(config.room_min, config.room_max);
  for attempt in 0..config.max_rooms {
    let w = size.sample(rng);
    let h = size.sample(rng);
    // Keep the far edge of the room on the map.
    let x = rng.gen_range(0..=config.width - w - 1);
    let y = rng.gen_range(0..=config.height - h - 1);
    let room = Rect::with_dims(w, h) + Point::new(x, y);

    if !room_fits(level.rooms(), room) {
      log::trace!("attempt {}: rejected {:?}", attempt, room);
      continue;
    }
    log::trace!("attempt {}: accepted {:?}", attempt, room);

    level.grid_mut().carve_room(room);
    match level.rooms().last().copied() {
      None => level.place_player(room.center()),
      Some(prev) => {
        let horizontal_first = rng.gen_bool(0.5);
        let grid = level.grid_mut();
        connect(grid, prev.center(), room.center(), horizontal_first)
      }
    }

    if let Some(species) = &species {
      populate(&mut level, room, config, species, rng);
    }
    level.push_room(room);
  }

  log::debug!(
    "generated {}x{} level: {} rooms, {} monsters, player at {:?}",
    config.width,
    config.height,
    level.rooms().len(),
    level.entities().len() - 1,
    level.player().pos,
  );
  Ok(level)
}

/// Returns whether `candidate` can join the already accepted `rooms`.
///
/// Rooms that share so much as a corner do not fit together.
pub fn room_fits(rooms: &[Rect], candidate: Rect) -> bool {
  rooms.iter().all(|r| !r.intersects(candidate))
}

/// Carves an L-shaped corridor between `from` and `to`.
///
/// With `horizontal_first`, the corridor runs along `from`'s row and then
/// down `to`'s column; otherwise it runs along `from`'s column and then
/// `to`'s row. Either way both endpoints end up joined.
pub fn connect(
  grid: &mut Grid,
  from: Point,
  to: Point,
  horizontal_first: bool,
) {
  if horizontal_first {
    grid.carve_horizontal(from.x(), to.x(), from.y());
    grid.carve_vertical(from.y(), to.y(), to.x());
  } else {
    grid.carve_vertical(from.y(), to.y(), from.x());
    grid.carve_horizontal(from.x(), to.x(), to.y());
  }
}

/// Scatters monsters over `room`.
///
/// Spots are drawn from the whole rectangle, walls included; a monster whose
/// spot is blocked is simply not placed.
fn populate<R: Rng + ?Sized>(
  level: &mut LevelState,
  room: Rect,
  config: &Config,
  species: &WeightedIndex<u32>,
  rng: &mut R,
) {
  let (min, max) = room.corners();
  let count = rng.gen_range(0..=config.max_monsters);
  for _ in 0..count {
    let p = Point::new(
      rng.gen_range(min.x()..=max.x()),
      rng.gen_range(min.y()..=max.y()),
    );
    if level.is_blocked(p) {
      log::trace!("no room for a monster at {:?}", p);
      continue;
    }

    let blueprint = &config.species[species.sample(rng)].blueprint;
    level.spawn(blueprint, p);
  }
}
