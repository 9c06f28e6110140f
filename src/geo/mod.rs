//! Geometry and math library.

use std::mem;
use std::ops::Add;
use std::ops::Mul;
use std::ops::RangeInclusive;

use num::Integer;
use num::Signed;
use num::Zero;

mod impls;

pub mod fov;

/// A direction on the plane.
///
/// We use the following convention for coordinates: x increases to the right
/// direction, and y in the downwards direction.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[allow(missing_docs)]
#[rustfmt::skip]
pub enum Dir {
  N, S, E, W, Nw, Ne, Sw, Se,
}

impl Dir {
  /// Returns every direction, cardinals first.
  #[inline]
  pub fn all() -> [Dir; 8] {
    [
      Dir::N,
      Dir::S,
      Dir::E,
      Dir::W,
      Dir::Nw,
      Dir::Ne,
      Dir::Sw,
      Dir::Se,
    ]
  }

  /// Returns the unit step for this direction.
  pub fn to_point<T: Signed>(self) -> Point<T> {
    let (o, l) = (T::zero, T::one);
    let (x, y) = match self {
      Dir::N => (o(), -l()),
      Dir::S => (o(), l()),
      Dir::E => (l(), o()),
      Dir::W => (-l(), o()),
      Dir::Nw => (-l(), -l()),
      Dir::Ne => (l(), -l()),
      Dir::Sw => (-l(), l()),
      Dir::Se => (l(), l()),
    };
    Point::new(x, y)
  }
}

/// A two-dimensional point.
///
/// `Point<T>` values may be added and subtracted componentwise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Point<T = i64>([T; 2]);

impl<T> Point<T> {
  /// Creates a new `Point` with the given coordinates.
  #[inline]
  pub fn new(x: T, y: T) -> Self {
    Self([x, y])
  }

  /// Creates a new `Point` representing the origin.
  #[inline]
  pub fn zero() -> Self
  where
    T: Zero,
  {
    Self([T::zero(), T::zero()])
  }

  /// Returns this `Point`'s coordinates as an array.
  #[inline]
  pub fn coords(self) -> [T; 2] {
    self.0
  }

  /// Returns the `x` coordinate.
  #[inline]
  pub fn x(self) -> T
  where
    T: Copy,
  {
    self.0[0]
  }

  /// Returns the `y` coordinate.
  #[inline]
  pub fn y(self) -> T
  where
    T: Copy,
  {
    self.0[1]
  }

  /// Computes the dot product of `self` and `other`.
  pub fn dot<U>(self, other: Point<U>) -> <T::Output as Add>::Output
  where
    T: Mul<U> + Copy,
    U: Copy,
    T::Output: Add<Output = T::Output>,
  {
    self.x() * other.x() + self.y() * other.y()
  }

  /// Componentwise orders the coordinates of `self` and `other`.
  ///
  /// Returns a pair of points whose coordinates are the minima and maxima in
  /// each coordinate, respectively.
  #[inline]
  pub fn sort_coords(mut self, mut other: Self) -> (Self, Self)
  where
    T: PartialOrd,
  {
    for i in 0..2 {
      if self[i] > other[i] {
        mem::swap(&mut self[i], &mut other[i])
      }
    }
    (self, other)
  }

  /// Returns whether the Euclidean norm of `self` is at most `z`.
  pub fn norm_at_most(self, z: T) -> bool
  where
    T: Mul<Output = T> + Add<Output = T> + PartialOrd + Copy,
  {
    self.dot(self) <= z * z
  }
}

/// A rectangle, represented as a pair of opposing corner [`Point`] values.
///
/// Unlike a half-open range, both corners belong to the rectangle: a `Rect`
/// built from a width `w` spans `w + 1` columns. This matches how rooms are
/// laid out, where the outermost ring is wall and only [`Rect::interior()`]
/// is carved.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Rect<T = i64>(Point<T>, Point<T>);

// Invariant: rect.0.x <= rect.1.x and rect.0.y <= rect.1.y.
impl<T: Integer + Copy> Rect<T> {
  /// Creates a new `Rect` with the given [`Point`] values as opposing corners.
  #[inline]
  pub fn new(p1: Point<T>, p2: Point<T>) -> Self {
    let (min, max) = Point::sort_coords(p1, p2);
    Self(min, max)
  }

  /// Creates a new `Rect` of the given dimensions with one corner at the
  /// origin.
  ///
  /// Negative dimensions are mirrored through the origin.
  #[inline]
  pub fn with_dims(width: T, height: T) -> Self {
    Self::new(Point::zero(), Point::new(width, height))
  }

  /// Returns the upper-left and lower-right corners of this `Rect`.
  #[inline]
  pub fn corners(self) -> (Point<T>, Point<T>) {
    (self.0, self.1)
  }

  /// Returns the center of this `Rect`, rounding towards negative infinity.
  #[inline]
  pub fn center(self) -> Point<T> {
    let two = T::one() + T::one();
    Point::new(
      (self.0.x() + self.1.x()).div_floor(&two),
      (self.0.y() + self.1.y()).div_floor(&two),
    )
  }

  /// Returns whether this `Rect` contains a given point, corners included.
  #[inline]
  pub fn contains(self, p: Point<T>) -> bool {
    (0..2).all(|i| self.0[i] <= p[i] && p[i] <= self.1[i])
  }

  /// Returns whether `self` and `other` share at least one point.
  ///
  /// Rectangles that merely touch along an edge or corner intersect.
  #[inline]
  pub fn intersects(self, other: Rect<T>) -> bool {
    self.0.x() <= other.1.x()
      && self.1.x() >= other.0.x()
      && self.0.y() <= other.1.y()
      && self.1.y() >= other.0.y()
  }

  /// Returns this `Rect` shrunk by one unit on every side.
  ///
  /// Returns `None` if nothing is left after shrinking.
  pub fn interior(self) -> Option<Self> {
    let one = Point::new(T::one(), T::one());
    let (min, max) = (self.0 + one, self.1 - one);
    if min.x() > max.x() || min.y() > max.y() {
      return None;
    }
    Some(Self(min, max))
  }

  /// Returns an iterator over all points in this rectangle.
  ///
  /// Points are traversed in row-major order.
  pub fn points(self) -> impl Iterator<Item = Point<T>>
  where
    RangeInclusive<T>: Iterator<Item = T>,
  {
    let [x1, y1] = self.0.coords();
    let [x2, y2] = self.1.coords();

    (y1..=y2).flat_map(move |y| (x1..=x2).map(move |x| Point::new(x, y)))
  }
}
