//! Field-of-view algorithms.
//!
//! Both algorithms share the same calling convention: the observer stands at
//! `origin`, sees out to a Euclidean `radius`, and asks `is_opaque` about any
//! point it wants to look through. Every point in view is handed to `ignite`,
//! possibly more than once. Nothing here knows about map bounds; `is_opaque`
//! is expected to report out-of-bounds points as opaque, and `ignite` must
//! discard them, since candidates are generated from the radius alone.
//!
//! With `light_walls` set, opaque points at the edge of vision are ignited
//! too, so that rays stopped by walls illuminate them.

use num::Integer;

use crate::geo::Point;

/// Computes the field-of-view from a given point using symmetric
/// shadowcasting.
///
/// The plane is split into four quadrants around `origin`, each scanned row
/// by row moving away from the observer. Floor tiles are only lit when they
/// lie within the sector bounded by the row's start and end slopes measured
/// at their center, which makes the result symmetric: if a transparent `b`
/// is lit from a transparent `a`, then `a` is lit from `b`.
///
/// See https://www.albertford.com/shadowcasting/
pub fn shadowcast(
  origin: Point<i64>,
  radius: i64,
  light_walls: bool,
  is_opaque: &mut dyn FnMut(Point<i64>) -> bool,
  ignite: &mut dyn FnMut(Point<i64>),
) {
  /// A slope in the plane, represented as a rational number `num/den` giving
  /// the column offset per row of depth.
  ///
  /// This is used instead of `Rational64` since we never need reduction.
  // Invariant: den > 0.
  #[derive(Copy, Clone, Debug)]
  struct Slope {
    num: i64,
    den: i64,
  }

  impl Slope {
    /// The slope through the left edge of the tile at (`depth`, `col`).
    fn left_edge(depth: i64, col: i64) -> Self {
      Slope {
        num: 2 * col - 1,
        den: 2 * depth,
      }
    }

    /// The first column this slope covers at `depth`, rounding ties up.
    fn min_col(self, depth: i64) -> i64 {
      Integer::div_floor(&(2 * depth * self.num + self.den), &(2 * self.den))
    }

    /// The last column this slope covers at `depth`, rounding ties down.
    fn max_col(self, depth: i64) -> i64 {
      -Integer::div_floor(&(self.den - 2 * depth * self.num), &(2 * self.den))
    }
  }

  /// State for the algorithm that is not tracked by recursion frames.
  struct State<'a, 'b> {
    origin: Point<i64>,
    radius: i64,
    light_walls: bool,
    is_opaque: &'a mut dyn FnMut(Point<i64>) -> bool,
    ignite: &'b mut dyn FnMut(Point<i64>),
    quadrant: u8,
  }

  impl State<'_, '_> {
    /// Transform quadrant coordinates into map coordinates.
    ///
    /// Quadrant coordinates are (depth, col), where depth counts rows away
    /// from the origin and col runs across the row:
    ///
    /// ```text
    ///  \ 0 /
    ///   \ /
    /// 3  o  2   +-> x
    ///   / \     |
    ///  / 1 \    v y
    /// ```
    fn quad2map(&self, depth: i64, col: i64) -> Point<i64> {
      let [ox, oy] = self.origin.coords();
      match self.quadrant {
        0 => Point::new(ox + col, oy - depth),
        1 => Point::new(ox + col, oy + depth),
        2 => Point::new(ox + depth, oy + col),
        _ => Point::new(ox - depth, oy + col),
      }
    }

    fn is_opaque(&mut self, depth: i64, col: i64) -> bool {
      let p = self.quad2map(depth, col);
      (self.is_opaque)(p)
    }

    fn reveal(&mut self, depth: i64, col: i64, opaque: bool) {
      if opaque && !self.light_walls {
        return;
      }
      if !Point::new(depth, col).norm_at_most(self.radius) {
        return;
      }
      let p = self.quad2map(depth, col);
      (self.ignite)(p)
    }

    /// Scans one row of the current quadrant, recursing into the rows behind
    /// it for every run of transparent tiles.
    fn scan(&mut self, depth: i64, mut start: Slope, end: Slope) {
      if depth > self.radius {
        return;
      }

      let mut prev_opaque = None;
      for col in start.min_col(depth)..=end.max_col(depth) {
        let opaque = self.is_opaque(depth, col);

        let symmetric = col * start.den >= depth * start.num
          && col * end.den <= depth * end.num;
        if opaque || symmetric {
          self.reveal(depth, col, opaque);
        }

        match (prev_opaque, opaque) {
          // Leaving a wall: the sector now starts at this tile's left edge.
          (Some(true), false) => start = Slope::left_edge(depth, col),
          // Entering a wall: the part of the sector above it continues on
          // into the next row.
          (Some(false), true) => {
            self.scan(depth + 1, start, Slope::left_edge(depth, col))
          }
          _ => {}
        }
        prev_opaque = Some(opaque);
      }

      if prev_opaque == Some(false) {
        self.scan(depth + 1, start, end);
      }
    }
  }

  ignite(origin);
  #[rustfmt::skip]
  let mut state = State { origin, radius, light_walls, is_opaque, ignite, quadrant: 0 };

  for quadrant in 0..4 {
    state.quadrant = quadrant;
    state.scan(1, Slope { num: -1, den: 1 }, Slope { num: 1, den: 1 });
  }
}

/// Computes the field-of-view from a given point by casting a ray to every
/// point on the perimeter of the square enclosing the view radius.
///
/// A ray stops at the first opaque point or once it leaves the radius. This
/// is cheap and covers open ground completely, but unlike [`shadowcast()`] it
/// is not symmetric around pillars and corners.
pub fn basic(
  origin: Point<i64>,
  radius: i64,
  light_walls: bool,
  is_opaque: &mut dyn FnMut(Point<i64>) -> bool,
  ignite: &mut dyn FnMut(Point<i64>),
) {
  /// Divides, rounding halves away from zero. `den` must be positive.
  fn div_round(num: i64, den: i64) -> i64 {
    if num >= 0 {
      (2 * num + den) / (2 * den)
    } else {
      -((-2 * num + den) / (2 * den))
    }
  }

  ignite(origin);
  if radius <= 0 {
    return;
  }

  let mut cast = |target: Point<i64>| {
    let steps = target.x().abs().max(target.y().abs());
    for step in 1..=steps {
      let rel = Point::new(
        div_round(step * target.x(), steps),
        div_round(step * target.y(), steps),
      );
      if !rel.norm_at_most(radius) {
        break;
      }

      let p = origin + rel;
      let opaque = is_opaque(p);
      if !opaque || light_walls {
        ignite(p);
      }
      if opaque {
        break;
      }
    }
  };

  for i in -radius..=radius {
    cast(Point::new(i, -radius));
    cast(Point::new(i, radius));
    cast(Point::new(-radius, i));
    cast(Point::new(radius, i));
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  type Fov = fn(
    Point<i64>,
    i64,
    bool,
    &mut dyn FnMut(Point<i64>) -> bool,
    &mut dyn FnMut(Point<i64>),
  );

  const ALGORITHMS: [(&str, Fov); 2] =
    [("shadowcast", shadowcast), ("basic", basic)];

  /// Runs `fov` over a map drawn with `#` for walls and anything else for
  /// floor. Points outside the drawing are opaque and never reported.
  fn run(
    fov: Fov,
    map: &[&str],
    origin: Point<i64>,
    radius: i64,
    light_walls: bool,
  ) -> HashSet<Point<i64>> {
    let tile = |p: Point<i64>| -> Option<u8> {
      if p.x() < 0 || p.y() < 0 {
        return None;
      }
      map
        .get(p.y() as usize)
        .and_then(|row| row.as_bytes().get(p.x() as usize))
        .copied()
    };

    let mut lit = HashSet::new();
    fov(
      origin,
      radius,
      light_walls,
      &mut |p| tile(p).map(|t| t == b'#').unwrap_or(true),
      &mut |p| {
        if tile(p).is_some() {
          lit.insert(p);
        }
      },
    );
    lit
  }

  fn open_field(width: usize, height: usize) -> Vec<String> {
    vec![".".repeat(width); height]
  }

  #[test]
  fn open_field_is_exactly_the_disc() {
    let rows = open_field(40, 30);
    let map: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
    let origin = Point::new(10i64, 10);

    let disc: HashSet<_> = (0..30i64)
      .flat_map(|y| (0..40i64).map(move |x| Point::new(x, y)))
      .filter(|&p| (p - origin).norm_at_most(10))
      .collect();

    for &(name, fov) in &ALGORITHMS {
      let lit = run(fov, &map, origin, 10, true);
      assert_eq!(lit, disc, "{} disagrees with the radius disc", name);
      assert!(lit.contains(&Point::new(0, 10)), "{}", name);
      assert!(!lit.contains(&Point::new(0, 9)), "{}", name);
    }
  }

  #[test]
  fn zero_radius_sees_only_origin() {
    let map = ["...", "...", "..."];
    for &(name, fov) in &ALGORITHMS {
      let lit = run(fov, &map, Point::new(1, 1), 0, true);
      assert_eq!(lit.len(), 1, "{}", name);
      assert!(lit.contains(&Point::new(1, 1)), "{}", name);
    }
  }

  #[test]
  fn walls_cast_shadows() {
    let map = ["..#.."];
    for &(name, fov) in &ALGORITHMS {
      let lit = run(fov, &map, Point::new(0, 0), 10, true);
      assert!(lit.contains(&Point::new(1, 0)), "{}", name);
      assert!(lit.contains(&Point::new(2, 0)), "{}", name);
      assert!(!lit.contains(&Point::new(3, 0)), "{}", name);
      assert!(!lit.contains(&Point::new(4, 0)), "{}", name);

      let dark = run(fov, &map, Point::new(0, 0), 10, false);
      assert!(dark.contains(&Point::new(1, 0)), "{}", name);
      assert!(!dark.contains(&Point::new(2, 0)), "{}", name);
    }
  }

  #[test]
  fn room_walls_are_lit() {
    let map = [
      "#######", //
      "#.....#", //
      "#.....#", //
      "#.....#", //
      "#######", //
    ];
    for &(name, fov) in &ALGORITHMS {
      let lit = run(fov, &map, Point::new(3, 2), 10, true);
      assert_eq!(lit.len(), 35, "{} should see the whole room", name);

      let dark = run(fov, &map, Point::new(3, 2), 10, false);
      assert_eq!(dark.len(), 15, "{} should only see floor", name);
    }
  }

  #[test]
  fn shadowcast_is_symmetric_around_pillars() {
    let map = [
      "..........", //
      "...#......", //
      "......#...", //
      "..#.......", //
      ".....#..#.", //
      "..........", //
      ".#....#...", //
      "..........", //
    ];
    let floor: Vec<_> = (0..8i64)
      .flat_map(|y| (0..10i64).map(move |x| Point::new(x, y)))
      .filter(|p| map[p.y() as usize].as_bytes()[p.x() as usize] != b'#')
      .collect();

    for &a in &floor {
      let from_a = run(shadowcast, &map, a, 6, false);
      for &b in &floor {
        let from_b = run(shadowcast, &map, b, 6, false);
        assert_eq!(
          from_a.contains(&b),
          from_b.contains(&a),
          "{:?} and {:?} disagree",
          a,
          b
        );
      }
    }
  }
}
