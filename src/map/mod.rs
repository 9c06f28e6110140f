//! Dungeon maps.
//!
//! A [`Grid`] is a fixed-size field of [`Tile`]s. Everything starts out as
//! solid rock; the generator in [`gen`] carves rooms and corridors into it.

use crate::geo::Point;
use crate::geo::Rect;

pub mod gen;

bitflags::bitflags! {
  /// The state of a single map cell.
  pub struct Tile: u8 {
    /// Impassable to movement.
    const BLOCKED = 1 << 0;
    /// Opaque to vision.
    const BLOCKS_SIGHT = 1 << 1;
    /// Has been in view at some point.
    const EXPLORED = 1 << 2;
  }
}

impl Tile {
  /// Creates a new unexplored tile.
  ///
  /// If `blocks_sight` is not given, it matches `blocked`.
  pub fn new(blocked: bool, blocks_sight: impl Into<Option<bool>>) -> Self {
    let mut tile = Tile::empty();
    tile.set(Tile::BLOCKED, blocked);
    tile.set(Tile::BLOCKS_SIGHT, blocks_sight.into().unwrap_or(blocked));
    tile
  }

  /// Creates a solid, unexplored wall.
  #[inline]
  pub fn wall() -> Self {
    Tile::BLOCKED | Tile::BLOCKS_SIGHT
  }

  /// Returns whether this tile stops movement.
  #[inline]
  pub fn is_blocked(self) -> bool {
    self.contains(Tile::BLOCKED)
  }

  /// Returns whether this tile stops vision.
  #[inline]
  pub fn blocks_sight(self) -> bool {
    self.contains(Tile::BLOCKS_SIGHT)
  }

  /// Returns whether this tile has ever been seen.
  #[inline]
  pub fn is_explored(self) -> bool {
    self.contains(Tile::EXPLORED)
  }

  /// Returns whether vision passes through this tile.
  ///
  /// Blocked tiles are treated as opaque even if they don't block sight on
  /// their own.
  #[inline]
  pub fn is_transparent(self) -> bool {
    !self.intersects(Tile::BLOCKED | Tile::BLOCKS_SIGHT)
  }
}

/// A fixed-size map of [`Tile`]s.
///
/// Points outside of `(0, 0)..(width, height)` are not on the map. Accessors
/// that return a [`Tile`] directly panic on them; the predicate accessors
/// treat them as solid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
  width: i64,
  height: i64,
  tiles: Box<[Tile]>,
}

impl Grid {
  /// Creates a new `Grid` filled with walls.
  ///
  /// # Panics
  ///
  /// Panics if either dimension is not positive.
  pub fn new(width: i64, height: i64) -> Self {
    assert!(
      width > 0 && height > 0,
      "grid dimensions must be positive, got {}x{}",
      width,
      height
    );
    Self {
      width,
      height,
      tiles: vec![Tile::wall(); (width * height) as usize].into_boxed_slice(),
    }
  }

  /// Returns the width of this `Grid`.
  #[inline]
  pub fn width(&self) -> i64 {
    self.width
  }

  /// Returns the height of this `Grid`.
  #[inline]
  pub fn height(&self) -> i64 {
    self.height
  }

  /// Returns the rectangle of valid points, corners included.
  pub fn bounds(&self) -> Rect {
    Rect::new(Point::zero(), Point::new(self.width - 1, self.height - 1))
  }

  /// Returns whether `p` is on the map.
  #[inline]
  pub fn contains(&self, p: Point) -> bool {
    (0..self.width).contains(&p.x()) && (0..self.height).contains(&p.y())
  }

  /// Returns an iterator over every point on the map, in row-major order.
  pub fn points(&self) -> impl Iterator<Item = Point> {
    self.bounds().points()
  }

  fn index(&self, p: Point) -> Option<usize> {
    if !self.contains(p) {
      return None;
    }
    Some((p.x() + p.y() * self.width) as usize)
  }

  fn index_or_panic(&self, p: Point) -> usize {
    match self.index(p) {
      Some(i) => i,
      None => panic!(
        "{:?} is outside of a {}x{} grid",
        p, self.width, self.height
      ),
    }
  }

  /// Returns the tile at `p`, if it is on the map.
  #[inline]
  pub fn get(&self, p: Point) -> Option<Tile> {
    self.index(p).map(|i| self.tiles[i])
  }

  /// Returns the tile at `p`.
  ///
  /// # Panics
  ///
  /// Panics if `p` is not on the map.
  #[inline]
  pub fn tile(&self, p: Point) -> Tile {
    self.tiles[self.index_or_panic(p)]
  }

  /// Returns whether `p` stops movement; off-map points always do.
  #[inline]
  pub fn is_blocked(&self, p: Point) -> bool {
    self.get(p).map(Tile::is_blocked).unwrap_or(true)
  }

  /// Returns whether `p` stops vision; off-map points always do.
  #[inline]
  pub fn blocks_sight(&self, p: Point) -> bool {
    self.get(p).map(Tile::blocks_sight).unwrap_or(true)
  }

  /// Returns whether vision passes through `p`; off-map points never let it.
  #[inline]
  pub fn is_transparent(&self, p: Point) -> bool {
    self.get(p).map(Tile::is_transparent).unwrap_or(false)
  }

  /// Opens up the tile at `p`, making it passable and transparent.
  ///
  /// # Panics
  ///
  /// Panics if `p` is not on the map.
  pub fn carve(&mut self, p: Point) {
    let i = self.index_or_panic(p);
    self.tiles[i].remove(Tile::BLOCKED | Tile::BLOCKS_SIGHT);
  }

  /// Marks the tile at `p` as explored. This is never undone.
  ///
  /// # Panics
  ///
  /// Panics if `p` is not on the map.
  pub fn mark_explored(&mut self, p: Point) {
    let i = self.index_or_panic(p);
    self.tiles[i].insert(Tile::EXPLORED);
  }

  /// Carves out the interior of `room`, leaving its outermost ring as wall.
  pub fn carve_room(&mut self, room: Rect) {
    if let Some(inner) = room.interior() {
      for p in inner.points() {
        self.carve(p);
      }
    }
  }

  /// Carves a horizontal run at row `y`, between `x1` and `x2` inclusive.
  pub fn carve_horizontal(&mut self, x1: i64, x2: i64, y: i64) {
    for x in x1.min(x2)..=x1.max(x2) {
      self.carve(Point::new(x, y));
    }
  }

  /// Carves a vertical run at column `x`, between `y1` and `y2` inclusive.
  pub fn carve_vertical(&mut self, y1: i64, y2: i64, x: i64) {
    for y in y1.min(y2)..=y1.max(y2) {
      self.carve(Point::new(x, y));
    }
  }

  /// Returns an iterator over every passable point.
  pub fn carved(&self) -> impl Iterator<Item = Point> + '_ {
    self.points().filter(move |&p| !self.tile(p).is_blocked())
  }
}
