//! Primitive level-rendering engine.
//!
//! Rendering happens in two steps. First a [`LevelState`] is composed into a
//! [`Frame`], a plain grid of [`Texel`]s that knows nothing about terminals.
//! Then the [`Renderer`] draws that frame, skipping every cell that is
//! unchanged since the last frame it drew.

use crate::level::LevelState;
use crate::map::Tile;
use crate::render::texel::Rgb;
use crate::render::texel::Texel;

pub mod curses;
pub mod texel;

/// The background shade of a map tile.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Shade {
  DarkWall,
  LightWall,
  DarkGround,
  LightGround,
}

impl Shade {
  /// Picks the shade for `tile`.
  ///
  /// Tiles outside the player's view are dark, and tiles that were never
  /// seen have no shade at all. Walls are told apart from floor by whether
  /// they block sight.
  pub fn of(tile: Tile, visible: bool) -> Option<Shade> {
    if !visible && !tile.is_explored() {
      return None;
    }
    let shade = match (visible, tile.blocks_sight()) {
      (false, true) => Shade::DarkWall,
      (false, false) => Shade::DarkGround,
      (true, true) => Shade::LightWall,
      (true, false) => Shade::LightGround,
    };
    Some(shade)
  }

  /// Returns the color of this shade.
  pub fn rgb(self) -> Rgb {
    let (r, g, b) = match self {
      Shade::DarkWall => (0, 0, 100),
      Shade::LightWall => (130, 110, 50),
      Shade::DarkGround => (50, 50, 150),
      Shade::LightGround => (200, 180, 50),
    };
    Rgb::new(r, g, b)
  }
}

/// Returns how a tile should look.
pub fn tile_texel(tile: Tile, visible: bool) -> Texel {
  match Shade::of(tile, visible) {
    Some(shade) => Texel::empty().with_bg(shade.rgb()),
    None => Texel::empty(),
  }
}

/// A rectangular block of texels, in row-major order.
#[derive(Clone, PartialEq, Debug)]
pub struct Frame {
  rows: usize,
  cols: usize,
  data: Vec<Texel>,
}

impl Frame {
  /// Creates a new blank `Frame`.
  pub fn new(rows: usize, cols: usize) -> Self {
    Self {
      rows,
      cols,
      data: vec![Texel::empty(); rows * cols],
    }
  }

  /// Returns this frame's dimensions, as rows and columns.
  pub fn dims(&self) -> (usize, usize) {
    (self.rows, self.cols)
  }

  /// Returns the texel at the given cell, if it is in the frame.
  pub fn get(&self, row: usize, col: usize) -> Option<Texel> {
    if row >= self.rows || col >= self.cols {
      return None;
    }
    Some(self.data[row * self.cols + col])
  }

  /// Returns the texel at the given cell for mutation, if it is in the frame.
  pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Texel> {
    if row >= self.rows || col >= self.cols {
      return None;
    }
    Some(&mut self.data[row * self.cols + col])
  }

  /// Writes `text` starting at the given cell, clipping at the right edge.
  pub fn print(&mut self, row: usize, col: usize, text: &str, tx: Texel) {
    for (i, c) in text.chars().enumerate() {
      match self.get_mut(row, col + i) {
        Some(slot) => *slot = tx.add_layer(Texel::new(c)),
        None => break,
      }
    }
  }
}

/// Lays out `level` and the most recent `log` lines in a frame of the given
/// size.
///
/// The map occupies the top of the frame, starting at its upper-left
/// corner; as many log lines as fit go in the rows below it, newest last.
/// Entities are only drawn where the player can see them, in the order
/// the level stores them.
pub fn compose(
  level: &LevelState,
  log: &[String],
  rows: usize,
  cols: usize,
) -> Frame {
  let mut frame = Frame::new(rows, cols);

  let grid = level.grid();
  for p in grid.points() {
    let visible = level.is_visible(p);
    if let Some(slot) = frame.get_mut(p.y() as usize, p.x() as usize) {
      *slot = tile_texel(grid.tile(p), visible);
    }
  }

  for e in level.entities() {
    if !level.is_visible(e.pos) || !grid.contains(e.pos) {
      continue;
    }
    if let Some(slot) = frame.get_mut(e.pos.y() as usize, e.pos.x() as usize) {
      *slot = slot.add_layer(e.sprite);
    }
  }

  let top = (grid.height() as usize + 1).min(rows);
  let lines = rows - top;
  let skip = log.len().saturating_sub(lines);
  for (i, msg) in log[skip..].iter().enumerate() {
    frame.print(top + i, 0, msg, Texel::empty());
  }

  frame
}

/// A global rendering context.
///
/// This type draws frames, remembering the last one so that only changed
/// cells are sent to the terminal.
pub struct Renderer {
  baked: Option<Frame>,
}

impl Renderer {
  /// Creates a new `Renderer`.
  pub fn new() -> Self {
    Self { baked: None }
  }

  /// Draws `frame` onto `window`, flushing it.
  ///
  /// Returns how many cells were drawn.
  pub fn draw<W: std::io::Write>(
    &mut self,
    frame: Frame,
    window: &mut curses::Curses<W>,
  ) -> crossterm::Result<usize> {
    let baked = self.baked.take().filter(|old| old.dims() == frame.dims());

    let mut drawn = 0;
    for (i, &texel) in frame.data.iter().enumerate() {
      if let Some(old) = &baked {
        if old.data[i] == texel {
          continue;
        }
      }
      window.draw(curses::DrawCall {
        row: i / frame.cols,
        col: i % frame.cols,
        texel,
      })?;
      drawn += 1;
    }
    window.flush()?;

    self.baked = Some(frame);
    Ok(drawn)
  }
}

impl Default for Renderer {
  fn default() -> Self {
    Self::new()
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
  use crate::geo::Rect;
  use crate::map::Grid;
  use crate::render::texel::Color;

  fn small_level() -> LevelState {
    let mut grid = Grid::new(30, 12);
    grid.carve_room(Rect::with_dims(6, 6));
    let mut level = LevelState::new(
      grid,
      &Blueprint::player(),
      Point::new(2, 2),
      View::default(),
      CombatRule::Narrate,
    );
    level.spawn(&Species::orc().blueprint, Point::new(3, 3));
    level.spawn(&Species::orc().blueprint, Point::new(25, 10));
    level.refresh_visibility();
    level
  }

  #[test]
  fn tile_colors() {
    let wall = Tile::wall();
    let floor = Tile::new(false, None);
    assert_eq!(tile_texel(wall, false), Texel::empty());
    assert_eq!(Shade::of(wall, true), Some(Shade::LightWall));
    assert_eq!(Shade::of(floor, true), Some(Shade::LightGround));

    let seen = floor | Tile::EXPLORED;
    assert_eq!(Shade::of(seen, false), Some(Shade::DarkGround));
    assert_eq!(
      tile_texel(seen, false).bg(),
      Color::Rgb(Rgb::new(50, 50, 150))
    );
  }

  #[test]
  fn only_visible_entities_are_drawn() {
    let level = small_level();
    let frame = compose(&level, &[], 15, 30);

    assert_eq!(frame.get(2, 2).and_then(Texel::glyph), Some('@'));
    assert_eq!(frame.get(3, 3).and_then(Texel::glyph), Some('o'));
    assert_eq!(
      frame.get(3, 3).map(Texel::bg),
      Some(Color::Rgb(Shade::LightGround.rgb()))
    );
    assert_eq!(frame.get(10, 25), Some(Texel::empty()));
  }

  #[test]
  fn log_goes_below_the_map() {
    let level = small_level();
    let log: Vec<String> = (0..5).map(|i| format!("msg {}", i)).collect();
    let frame = compose(&level, &log, 15, 30);

    // Rows 13 and 14 are left for messages; only the newest two fit.
    let row = |r| {
      (0..5)
        .filter_map(|c| frame.get(r, c).and_then(Texel::glyph))
        .collect::<String>()
    };
    assert_eq!(row(12), "");
    assert_eq!(row(13), "msg 3");
    assert_eq!(row(14), "msg 4");
  }

  #[test]
  fn tiny_frames_clip() {
    let level = small_level();
    let frame = compose(&level, &["hello".to_string()], 3, 3);
    assert_eq!(frame.dims(), (3, 3));
    assert_eq!(frame.get(2, 2).and_then(Texel::glyph), Some('@'));
    assert_eq!(frame.get(3, 0), None);
  }
}
