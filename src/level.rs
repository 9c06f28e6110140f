//! The state of a level in play.
//!
//! A [`LevelState`] owns everything about the running level: the map, the
//! entities on it (the player included), the player's field of view, and the
//! messages produced along the way. Every game operation goes through it;
//! there is no other shared state.

use std::collections::HashSet;
use std::mem;

use crate::actor::ai::Ai;
use crate::actor::ai::Effect;
use crate::actor::Blueprint;
use crate::actor::Entity;
use crate::actor::EntityId;
use crate::config::CombatRule;
use crate::config::FovAlgorithm;
use crate::config::View;
use crate::geo::fov;
use crate::geo::Dir;
use crate::geo::Point;
use crate::geo::Rect;
use crate::map::Grid;
use crate::map::Tile;

/// Something the player asked to do.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
  /// Step one tile, attacking whatever stands there.
  Step(Dir),
  /// Input that doesn't correspond to any game action.
  Other,
}

/// What came of an [`Action`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TurnOutcome {
  /// The player moved.
  Moved,
  /// The player attacked the named entity.
  Attacked(String),
  /// The player walked into something and stayed put.
  Blocked,
  /// Nothing happened, and no time passed.
  NotATurn,
}

impl TurnOutcome {
  /// Returns whether this outcome used up the player's turn, meaning the
  /// monsters get to act.
  pub fn took_turn(&self) -> bool {
    !matches!(self, TurnOutcome::NotATurn)
  }
}

/// A level in play.
pub struct LevelState {
  grid: Grid,
  // Invariant: entities[0] is the player, and is never removed.
  entities: Vec<Entity>,
  player: EntityId,
  rooms: Vec<Rect>,

  visible: HashSet<Point>,
  fov_dirty: bool,
  view: View,
  combat: CombatRule,

  messages: Vec<String>,
  next_id: u32,
}

impl LevelState {
  /// Creates a new level around `grid`, with the player described by
  /// `player` standing at `start`.
  ///
  /// The player is the first entity, and is always drawn and iterated over
  /// first.
  pub fn new(
    grid: Grid,
    player: &Blueprint,
    start: Point,
    view: View,
    combat: CombatRule,
  ) -> Self {
    let mut level = Self {
      grid,
      entities: Vec::new(),
      player: EntityId(0),
      rooms: Vec::new(),
      visible: HashSet::new(),
      fov_dirty: true,
      view,
      combat,
      messages: Vec::new(),
      next_id: 0,
    };
    level.player = level.spawn(player, start);
    level
  }

  /// Adds a new entity built from `blueprint` at `pos`.
  ///
  /// No collision checks are done; see [`LevelState::is_blocked()`].
  pub fn spawn(&mut self, blueprint: &Blueprint, pos: Point) -> EntityId {
    let id = EntityId(self.next_id);
    self.next_id += 1;
    self.entities.push(Entity::from_blueprint(id, blueprint, pos));
    id
  }

  /// Returns the map.
  #[inline]
  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  #[inline]
  pub(crate) fn grid_mut(&mut self) -> &mut Grid {
    self.fov_dirty = true;
    &mut self.grid
  }

  /// Returns every entity, in the order they were added.
  #[inline]
  pub fn entities(&self) -> &[Entity] {
    &self.entities
  }

  /// Looks up an entity by id.
  pub fn entity(&self, id: EntityId) -> Option<&Entity> {
    self.entities.iter().find(|e| e.id() == id)
  }

  /// Looks up an entity by id, for mutation.
  pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
    self.entities.iter_mut().find(|e| e.id() == id)
  }

  /// Returns the player's id.
  #[inline]
  pub fn player_id(&self) -> EntityId {
    self.player
  }

  /// Returns the player.
  #[inline]
  pub fn player(&self) -> &Entity {
    &self.entities[0]
  }

  /// Returns the rooms carved into the map, in the order they were accepted.
  #[inline]
  pub fn rooms(&self) -> &[Rect] {
    &self.rooms
  }

  pub(crate) fn push_room(&mut self, room: Rect) {
    self.rooms.push(room);
  }

  pub(crate) fn place_player(&mut self, pos: Point) {
    self.entities[0].pos = pos;
    self.fov_dirty = true;
  }

  /// Returns the player's view settings.
  #[inline]
  pub fn view(&self) -> View {
    self.view
  }

  /// Removes an entity from the level, returning it.
  ///
  /// The player cannot be removed.
  pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
    if id == self.player {
      return None;
    }
    let idx = self.entities.iter().position(|e| e.id() == id)?;
    Some(self.entities.remove(idx))
  }

  /// Returns whether `p` is impassable: either the tile itself is blocked,
  /// or an entity that blocks movement stands on it.
  ///
  /// Points off the map are impassable.
  pub fn is_blocked(&self, p: Point) -> bool {
    self.grid.is_blocked(p)
      || self.entities.iter().any(|e| e.blocks_movement && e.pos == p)
  }

  /// Returns the state of the tile at `p`.
  ///
  /// # Panics
  ///
  /// Panics if `p` is not on the map.
  #[inline]
  pub fn tile_state(&self, p: Point) -> Tile {
    self.grid.tile(p)
  }

  /// Moves an entity by `delta`, unless its destination is blocked.
  ///
  /// Returns whether the entity moved.
  pub fn move_entity(&mut self, id: EntityId, delta: Point) -> bool {
    let dest = match self.entity(id) {
      Some(e) => e.pos + delta,
      None => return false,
    };
    if self.is_blocked(dest) {
      return false;
    }

    if let Some(e) = self.entity_mut(id) {
      e.translate(delta);
    }
    if id == self.player {
      self.fov_dirty = true;
    }
    true
  }

  /// Resolves one player action.
  ///
  /// Stepping onto an occupied tile attacks the first entity found there;
  /// otherwise the player tries to move.
  pub fn resolve_turn(&mut self, action: Action) -> TurnOutcome {
    let dir = match action {
      Action::Step(dir) => dir,
      Action::Other => return TurnOutcome::NotATurn,
    };

    let delta = dir.to_point::<i64>();
    let target = self.player().pos + delta;
    let occupant = self.entities[1..]
      .iter()
      .find(|e| e.pos == target)
      .map(Entity::id);

    if let Some(id) = occupant {
      return self.attack(id);
    }

    if self.move_entity(self.player, delta) {
      log::debug!("player moved to {:?}", target);
      TurnOutcome::Moved
    } else {
      log::debug!("player bumped into {:?}", target);
      TurnOutcome::Blocked
    }
  }

  fn attack(&mut self, target: EntityId) -> TurnOutcome {
    let name = match self.entity(target) {
      Some(e) => e.name.clone(),
      None => return TurnOutcome::Blocked,
    };
    log::debug!("player attacks {} ({:?})", name, target);

    match self.combat {
      CombatRule::Narrate => self.narrate(format!(
        "The {} laughs at your puny efforts to attack him",
        title_case(&name)
      )),
      CombatRule::Lethal => self.strike(target),
    }
    TurnOutcome::Attacked(name)
  }

  /// Deals the player's damage to `target`, removing it if it dies.
  fn strike(&mut self, target: EntityId) {
    let attacker = self.player().fighter.clone();
    let outcome = self.entity_mut(target).map(|victim| {
      let name = title_case(&victim.name);
      let hit = match (attacker, victim.fighter.as_mut()) {
        (Some(a), Some(d)) => {
          let damage = a.damage_against(d);
          Some((damage, d.take_damage(damage), d.owner()))
        }
        _ => None,
      };
      (name, hit)
    });

    match outcome {
      None => {}
      Some((name, None)) => {
        self.narrate(format!("The {} is unharmed.", name))
      }
      Some((name, Some((damage, dead, owner)))) => {
        self.narrate(format!("The {} takes {} damage.", name, damage));
        if dead {
          self.remove(owner);
          self.narrate(format!("The {} dies!", name));
        }
      }
    }
  }

  /// Lets every entity with an [`Ai`] take a turn, in order.
  ///
  /// Visibility is brought up to date first, since some behaviors depend on
  /// whether the player can see them.
  pub fn take_monster_turns(&mut self) {
    self.refresh_visibility();

    let actors: Vec<Ai> =
      self.entities.iter().filter_map(|e| e.ai.clone()).collect();
    for ai in actors {
      if let Effect::Narrate(msg) = ai.take_turn(self) {
        self.narrate(msg);
      }
    }
  }

  /// Recomputes the player's field of view if it is out of date.
  ///
  /// Returns whether a recomputation happened.
  pub fn refresh_visibility(&mut self) -> bool {
    if !self.fov_dirty {
      return false;
    }
    let origin = self.player().pos;
    self.visible = visible_tiles(&mut self.grid, origin, &self.view);
    self.fov_dirty = false;
    true
  }

  /// Returns the set of points the player can currently see.
  pub fn visible(&mut self) -> &HashSet<Point> {
    self.refresh_visibility();
    &self.visible
  }

  /// Returns whether `p` was in view as of the last refresh.
  #[inline]
  pub fn is_visible(&self, p: Point) -> bool {
    self.visible.contains(&p)
  }

  /// Appends a line to the message log.
  pub fn narrate(&mut self, msg: String) {
    log::info!("{}", msg);
    self.messages.push(msg);
  }

  /// Returns messages produced since the last drain.
  #[inline]
  pub fn messages(&self) -> &[String] {
    &self.messages
  }

  /// Takes all pending messages out of the log.
  pub fn drain_messages(&mut self) -> Vec<String> {
    mem::take(&mut self.messages)
  }
}

/// Computes the points visible from `origin`, marking each one explored.
///
/// Only points on the map are returned. A point is see-through if it is on
/// the map and neither blocked nor sight-blocking.
pub fn visible_tiles(
  grid: &mut Grid,
  origin: Point,
  view: &View,
) -> HashSet<Point> {
  let mut visible = HashSet::new();
  {
    let grid = &*grid;
    let mut is_opaque = |p: Point| !grid.is_transparent(p);
    let mut ignite = |p: Point| {
      if grid.contains(p) {
        visible.insert(p);
      }
    };

    let (radius, light_walls) = (view.radius, view.light_walls);
    match view.algorithm {
      FovAlgorithm::Symmetric => fov::shadowcast(
        origin,
        radius,
        light_walls,
        &mut is_opaque,
        &mut ignite,
      ),
      FovAlgorithm::Basic => {
        fov::basic(origin, radius, light_walls, &mut is_opaque, &mut ignite)
      }
    }
  }

  for &p in &visible {
    grid.mark_explored(p);
  }
  visible
}

/// Capitalizes the first letter of every word, lowercasing the rest.
fn title_case(s: &str) -> String {
  let mut prev_alpha = false;
  s.chars()
    .flat_map(|c| {
      let upper = !prev_alpha;
      prev_alpha = c.is_alphabetic();
      let mapped: Vec<char> = if upper {
        c.to_uppercase().collect()
      } else {
        c.to_lowercase().collect()
      };
      mapped
    })
    .collect()
}
