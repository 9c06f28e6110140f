//! Operator overloads.

use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Deref;
use std::ops::DerefMut;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use crate::geo::Point;
use crate::geo::Rect;

impl<T> Deref for Point<T> {
  type Target = [T; 2];
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T> DerefMut for Point<T> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl<T> From<(T, T)> for Point<T> {
  #[inline]
  fn from((x, y): (T, T)) -> Self {
    Self::new(x, y)
  }
}

impl<T> From<[T; 2]> for Point<T> {
  #[inline]
  fn from(xs: [T; 2]) -> Self {
    Self(xs)
  }
}

impl<T: Neg> Neg for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn neg(self) -> Self::Output {
    let [x, y] = self.0;
    Point([-x, -y])
  }
}

impl<T: Add<U>, U> Add<Point<U>> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn add(self, other: Point<U>) -> Self::Output {
    let ([x1, y1], [x2, y2]) = (self.0, other.0);
    Point([x1 + x2, y1 + y2])
  }
}

impl<T: Sub<U>, U> Sub<Point<U>> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn sub(self, other: Point<U>) -> Self::Output {
    let ([x1, y1], [x2, y2]) = (self.0, other.0);
    Point([x1 - x2, y1 - y2])
  }
}

impl<T: Mul<U>, U: Copy> Mul<U> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn mul(self, other: U) -> Self::Output {
    let [x, y] = self.0;
    Point([x * other, y * other])
  }
}

impl<T: AddAssign<U>, U: Copy> AddAssign<Point<U>> for Point<T> {
  #[inline]
  fn add_assign(&mut self, other: Point<U>) {
    for (i, x) in self.iter_mut().enumerate() {
      *x += other[i];
    }
  }
}

impl<T: SubAssign<U>, U: Copy> SubAssign<Point<U>> for Point<T> {
  #[inline]
  fn sub_assign(&mut self, other: Point<U>) {
    for (i, x) in self.iter_mut().enumerate() {
      *x -= other[i];
    }
  }
}

impl<T: Add<U>, U: Copy> Add<Point<U>> for Rect<T> {
  type Output = Rect<T::Output>;
  #[inline]
  fn add(self, other: Point<U>) -> Self::Output {
    Rect(self.0 + other, self.1 + other)
  }
}

impl<T: Sub<U>, U: Copy> Sub<Point<U>> for Rect<T> {
  type Output = Rect<T::Output>;
  #[inline]
  fn sub(self, other: Point<U>) -> Self::Output {
    Rect(self.0 - other, self.1 - other)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arithmetic() {
    let mut p = Point::new(3, -4);
    assert_eq!(p + Point::new(1, 1), Point::new(4, -3));
    assert_eq!(p - Point::new(1, 1), Point::new(2, -5));
    assert_eq!(p * 2, Point::new(6, -8));
    assert_eq!(-p, Point::new(-3, 4));

    p += Point::new(1, 0);
    p -= Point::new(0, 1);
    assert_eq!(p, Point::new(4, -5));
    assert_eq!(Point::from((4, -5)), p);
  }

  #[test]
  fn translate_rect() {
    let r = Rect::with_dims(2, 3) + Point::new(5, 5);
    assert_eq!(r.corners(), (Point::new(5, 5), Point::new(7, 8)));
    assert_eq!((r - Point::new(5, 5)).corners().0, Point::zero());
  }
}
