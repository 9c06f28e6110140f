//! Actors: the player, monsters, and the capabilities they carry.
//!
//! Every actor is an [`Entity`] owned by a [`crate::level::LevelState`].
//! Entities are created from a [`Blueprint`], which is everything about an
//! actor that is known before it is placed on a map. Capabilities refer back
//! to their owner by [`EntityId`] only, so they never keep it alive.

use crate::geo::Point;
use crate::render::texel::colors;
use crate::render::texel::Texel;

pub mod ai;

use ai::Ai;
use ai::Behavior;

/// A stable handle to an entity within a level.
///
/// Ids are never reused within a level, so a handle to a removed entity simply
/// stops resolving.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct EntityId(pub(crate) u32);

/// Base combat statistics.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Stats {
  pub max_hp: i32,
  pub defense: i32,
  pub power: i32,
}

/// Component: An entity that can fight and be hurt.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Fighter {
  owner: EntityId,
  /// Maximum and starting health.
  pub max_hp: i32,
  /// Current health.
  pub hp: i32,
  /// Subtracted from incoming attack power.
  pub defense: i32,
  /// Damage dealt before the target's defense.
  pub power: i32,
}

impl Fighter {
  /// Creates a new `Fighter` at full health.
  pub fn new(owner: EntityId, stats: Stats) -> Self {
    Self {
      owner,
      max_hp: stats.max_hp,
      hp: stats.max_hp,
      defense: stats.defense,
      power: stats.power,
    }
  }

  /// Returns the entity this component belongs to.
  pub fn owner(&self) -> EntityId {
    self.owner
  }

  /// Returns the damage this fighter deals to `target`.
  ///
  /// Defense can soak up a whole attack, but never heals.
  pub fn damage_against(&self, target: &Fighter) -> i32 {
    (self.power - target.defense).max(0)
  }

  /// Subtracts `damage` from this fighter's health.
  ///
  /// Returns whether the fighter died.
  pub fn take_damage(&mut self, damage: i32) -> bool {
    self.hp -= damage;
    self.hp <= 0
  }
}

/// The description of an actor before it is placed on a map.
#[derive(Clone, PartialEq, Debug)]
pub struct Blueprint {
  /// Display name, lowercase (e.g. "orc").
  pub name: String,
  /// Glyph and color.
  pub sprite: Texel,
  /// Whether other actors may share its tile.
  pub blocks_movement: bool,
  /// Combat statistics, if it can fight.
  pub stats: Option<Stats>,
  /// What it does on its turn, if anything.
  pub behavior: Option<Behavior>,
}

impl Blueprint {
  /// The player character.
  pub fn player() -> Self {
    Self {
      name: "player".into(),
      sprite: Texel::new('@').with_fg(colors::WHITE),
      blocks_movement: true,
      stats: Some(Stats {
        max_hp: 30,
        defense: 2,
        power: 5,
      }),
      behavior: None,
    }
  }
}

/// A monster kind, together with how often it is picked during generation.
#[derive(Clone, PartialEq, Debug)]
pub struct Species {
  /// What members of this species look like when spawned.
  pub blueprint: Blueprint,
  /// Relative chance of being picked.
  pub weight: u32,
}

impl Species {
  /// A common, weak monster.
  pub fn orc() -> Self {
    Self {
      blueprint: Blueprint {
        name: "orc".into(),
        sprite: Texel::new('o').with_fg(colors::SEAGREEN),
        blocks_movement: true,
        stats: Some(Stats {
          max_hp: 10,
          defense: 0,
          power: 3,
        }),
        behavior: Some(Behavior::Idle),
      },
      weight: 80,
    }
  }

  /// A rare, tough monster.
  pub fn dragon() -> Self {
    Self {
      blueprint: Blueprint {
        name: "dragon".into(),
        sprite: Texel::new('D').with_fg(colors::DARKRED),
        blocks_movement: true,
        stats: Some(Stats {
          max_hp: 30,
          defense: 1,
          power: 4,
        }),
        behavior: Some(Behavior::Aggressive),
      },
      weight: 20,
    }
  }
}

/// An actor on the map.
#[derive(Clone, PartialEq, Debug)]
pub struct Entity {
  id: EntityId,
  /// Where it stands.
  pub pos: Point,
  /// Glyph and color.
  pub sprite: Texel,
  /// Display name.
  pub name: String,
  /// Whether other actors may share its tile.
  pub blocks_movement: bool,
  /// Combat capability.
  pub fighter: Option<Fighter>,
  /// Turn-taking capability.
  pub ai: Option<Ai>,
}

impl Entity {
  /// Builds the entity described by `blueprint`, standing at `pos`.
  pub fn from_blueprint(
    id: EntityId,
    blueprint: &Blueprint,
    pos: Point,
  ) -> Self {
    Self {
      id,
      pos,
      sprite: blueprint.sprite,
      name: blueprint.name.clone(),
      blocks_movement: blueprint.blocks_movement,
      fighter: blueprint.stats.map(|s| Fighter::new(id, s)),
      ai: blueprint.behavior.map(|b| Ai::new(id, b)),
    }
  }

  /// Returns this entity's id.
  #[inline]
  pub fn id(&self) -> EntityId {
    self.id
  }

  /// Shifts this entity by `delta`, without any collision checks.
  ///
  /// See [`crate::level::LevelState::move_entity()`] for the checked version.
  #[inline]
  pub fn translate(&mut self, delta: Point) {
    self.pos += delta;
  }
}
