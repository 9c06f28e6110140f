//! Level generation and play settings.

use rand::distributions::WeightedError;
use rand::distributions::WeightedIndex;
use thiserror::Error;

use crate::actor::Blueprint;
use crate::actor::Species;

/// Errors from validating a [`Config`].
///
/// These are all surfaced before generation begins; nothing about a valid
/// configuration can fail halfway through building a level.
#[derive(Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum ConfigError {
  #[error("map dimensions must be positive, got {width}x{height}")]
  InvalidDimensions { width: i64, height: i64 },

  #[error("room sizes must satisfy 2 <= min <= max, got {min}..={max}")]
  InvalidRoomSize { min: i64, max: i64 },

  #[error("rooms of size {max} do not fit on a {width}x{height} map")]
  RoomTooLarge { max: i64, width: i64, height: i64 },

  #[error("view radius must be within 0..={max}, got {radius}")]
  InvalidRadius { radius: i64, max: i64 },

  #[error("monsters were requested but no species are configured")]
  NoSpecies,

  #[error("species weights are unusable: {0}")]
  SpeciesWeights(#[from] WeightedError),
}

/// The largest view radius a [`Config`] accepts.
///
/// A radius may reach past the map edge, which simply shows the whole map.
pub const MAX_RADIUS: i64 = 1_000;

/// Which field-of-view sweep to run.
///
/// See [`crate::geo::fov`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FovAlgorithm {
  /// Symmetric shadowcasting.
  Symmetric,
  /// Rays cast to the perimeter of the view square.
  Basic,
}

/// What happens when the player bumps into another entity.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CombatRule {
  /// The attack is narrated and nothing else changes.
  Narrate,
  /// Damage is dealt and dead entities are removed from the level.
  Lethal,
}

/// Field-of-view settings for the player.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct View {
  /// How far the player sees, in tiles.
  pub radius: i64,
  /// Whether walls bordering the visible area are themselves visible.
  pub light_walls: bool,
  /// The sweep used to compute visibility.
  pub algorithm: FovAlgorithm,
}

impl Default for View {
  fn default() -> Self {
    Self {
      radius: 10,
      light_walls: true,
      algorithm: FovAlgorithm::Symmetric,
    }
  }
}

/// Everything needed to generate and play one level.
#[derive(Clone, Debug)]
pub struct Config {
  /// Map width, in tiles.
  pub width: i64,
  /// Map height, in tiles.
  pub height: i64,
  /// Smallest room side length.
  pub room_min: i64,
  /// Largest room side length.
  pub room_max: i64,
  /// How many room placements are attempted. Rejected attempts are not
  /// retried, so fewer rooms may end up on the map.
  pub max_rooms: usize,
  /// Upper bound on monsters placed in each room.
  pub max_monsters: usize,
  /// Player field-of-view settings.
  pub view: View,
  /// How attacks resolve.
  pub combat: CombatRule,
  /// What the player looks like and fights with.
  pub player: Blueprint,
  /// Monster species, picked by weight.
  pub species: Vec<Species>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      width: 80,
      height: 45,
      room_min: 6,
      room_max: 10,
      max_rooms: 26,
      max_monsters: 3,
      view: View::default(),
      combat: CombatRule::Narrate,
      player: Blueprint::player(),
      species: vec![Species::orc(), Species::dragon()],
    }
  }
}

impl Config {
  /// Checks that a level can be generated from this configuration.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.width < 1 || self.height < 1 {
      return Err(ConfigError::InvalidDimensions {
        width: self.width,
        height: self.height,
      });
    }

    if self.room_min < 2 || self.room_min > self.room_max {
      return Err(ConfigError::InvalidRoomSize {
        min: self.room_min,
        max: self.room_max,
      });
    }

    // A room needs a one-tile border inside the map on its far side.
    if self.max_rooms > 0
      && (self.room_max >= self.width || self.room_max >= self.height)
    {
      return Err(ConfigError::RoomTooLarge {
        max: self.room_max,
        width: self.width,
        height: self.height,
      });
    }

    if self.view.radius < 0 || self.view.radius > MAX_RADIUS {
      return Err(ConfigError::InvalidRadius {
        radius: self.view.radius,
        max: MAX_RADIUS,
      });
    }

    if self.max_rooms > 0 && self.max_monsters > 0 && self.species.is_empty()
    {
      return Err(ConfigError::NoSpecies);
    }

    self.species_index().map(drop)
  }

  /// Builds the weighted table used to pick a species for each monster.
  ///
  /// Returns `None` if there are no species at all.
  pub fn species_index(
    &self,
  ) -> Result<Option<WeightedIndex<u32>>, ConfigError> {
    if self.species.is_empty() {
      return Ok(None);
    }
    let index = WeightedIndex::new(self.species.iter().map(|s| s.weight))?;
    Ok(Some(index))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_valid() {
    assert_eq!(Config::default().validate(), Ok(()));
  }

  #[test]
  fn rejects_inverted_room_sizes() {
    let config = Config {
      room_min: 8,
      room_max: 6,
      ..Config::default()
    };
    assert_eq!(
      config.validate(),
      Err(ConfigError::InvalidRoomSize { min: 8, max: 6 })
    );
  }

  #[test]
  fn rejects_rooms_larger_than_map() {
    let config = Config {
      width: 10,
      height: 40,
      ..Config::default()
    };
    assert_eq!(
      config.validate(),
      Err(ConfigError::RoomTooLarge {
        max: 10,
        width: 10,
        height: 40
      })
    );
  }

  #[test]
  fn tiny_map_is_fine_without_rooms() {
    let config = Config {
      width: 1,
      height: 1,
      max_rooms: 0,
      ..Config::default()
    };
    assert_eq!(config.validate(), Ok(()));
  }

  #[test]
  fn rejects_bad_dimensions_and_radius() {
    let config = Config {
      width: 0,
      ..Config::default()
    };
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidDimensions { .. })
    ));

    let mut config = Config::default();
    config.view.radius = -1;
    assert_eq!(
      config.validate(),
      Err(ConfigError::InvalidRadius {
        radius: -1,
        max: MAX_RADIUS
      })
    );
  }

  #[test]
  fn huge_radius_is_rejected() {
    let mut config = Config::default();
    config.view.radius = 4_000_000_000;
    assert_eq!(
      config.validate(),
      Err(ConfigError::InvalidRadius {
        radius: 4_000_000_000,
        max: MAX_RADIUS
      })
    );

    config.view.radius = MAX_RADIUS;
    assert_eq!(config.validate(), Ok(()));
  }

  #[test]
  fn rejects_missing_or_weightless_species() {
    let config = Config {
      species: Vec::new(),
      ..Config::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NoSpecies));

    let mut config = Config::default();
    for s in &mut config.species {
      s.weight = 0;
    }
    assert!(matches!(
      config.validate(),
      Err(ConfigError::SpeciesWeights(_))
    ));
  }
}
