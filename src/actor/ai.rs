//! Actor AI components.
//!
//! Monsters don't pathfind or act on the world yet; each [`Behavior`] only
//! decides whether the monster has something to say on its turn.

use crate::actor::Entity;
use crate::actor::EntityId;
use crate::level::LevelState;

/// What a monster does on its turn.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Behavior {
  /// Growls every turn, whether or not anyone is watching.
  Idle,
  /// Glares at the player, but only while in the player's view.
  Aggressive,
  /// Does nothing at all.
  Stationary,
}

/// The result of an actor's turn.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Effect {
  /// Nothing observable happened.
  Nothing,
  /// A line of flavor text for the message log.
  Narrate(String),
}

impl Behavior {
  /// Runs one turn of this behavior for `actor`.
  pub fn take_turn(self, actor: &Entity, level: &LevelState) -> Effect {
    match self {
      Behavior::Idle => Effect::Narrate(format!("The {} growls!", actor.name)),
      Behavior::Aggressive if level.is_visible(actor.pos) => {
        Effect::Narrate(format!("The {} glares at you!", actor.name))
      }
      Behavior::Aggressive | Behavior::Stationary => Effect::Nothing,
    }
  }
}

/// Component: An actor that takes turns.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Ai {
  owner: EntityId,
  /// What the actor does on its turn.
  pub behavior: Behavior,
}

impl Ai {
  /// Creates a new `Ai`.
  pub fn new(owner: EntityId, behavior: Behavior) -> Self {
    Self { owner, behavior }
  }

  /// Returns the entity this component belongs to.
  pub fn owner(&self) -> EntityId {
    self.owner
  }

  /// Runs one turn for this component's owner.
  ///
  /// An owner that is no longer on the level does nothing.
  pub fn take_turn(&self, level: &LevelState) -> Effect {
    match level.entity(self.owner) {
      Some(actor) => self.behavior.take_turn(actor, level),
      None => Effect::Nothing,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::actor::Blueprint;
  use crate::actor::Species;
  use crate::config::CombatRule;
  use crate::config::View;
  use crate::geo::Point;
  use crate::map::Grid;

  fn open_level() -> LevelState {
    let mut grid = Grid::new(30, 30);
    for p in grid.points().collect::<Vec<_>>() {
      grid.carve(p);
    }
    LevelState::new(
      grid,
      &Blueprint::player(),
      Point::new(5, 5),
      View::default(),
      CombatRule::Narrate,
    )
  }

  #[test]
  fn idle_monsters_always_growl() {
    let mut level = open_level();
    let orc = level.spawn(&Species::orc().blueprint, Point::new(29, 29));
    level.refresh_visibility();
    assert!(!level.is_visible(Point::new(29, 29)));

    let ai = level.entity(orc).and_then(|e| e.ai.clone()).unwrap();
    assert_eq!(
      ai.take_turn(&level),
      Effect::Narrate("The orc growls!".into())
    );
  }

  #[test]
  fn aggressive_monsters_need_an_audience() {
    let mut level = open_level();
    let near = level.spawn(&Species::dragon().blueprint, Point::new(7, 5));
    let far = level.spawn(&Species::dragon().blueprint, Point::new(29, 29));
    level.refresh_visibility();

    let turn = |id| {
      let ai = level.entity(id).and_then(|e| e.ai.clone()).unwrap();
      ai.take_turn(&level)
    };
    assert_eq!(turn(near), Effect::Narrate("The dragon glares at you!".into()));
    assert_eq!(turn(far), Effect::Nothing);
  }

  #[test]
  fn stationary_and_orphaned_ai_do_nothing() {
    let level = open_level();
    let player = level.player();
    assert_eq!(
      Behavior::Stationary.take_turn(player, &level),
      Effect::Nothing
    );

    let orphan = Ai::new(EntityId(999), Behavior::Idle);
    assert_eq!(orphan.take_turn(&level), Effect::Nothing);
  }
}
