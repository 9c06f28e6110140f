//! Texels, terminal elements.
//!
//! A *texel* is the abstraction for a cell in a terminal: a glyph together
//! with the colors it is drawn in. See the [`Texel`] type for more info.

pub use palette::named as colors;

/// An RGB value used by a [`Texel`].
pub type Rgb = palette::Srgb<u8>;

/// A foreground or background color for a [`Texel`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Color {
  /// A solid RGB value.
  Rgb(Rgb),

  /// The "default" value, i.e., reset to whatever the terminal's default colors
  /// are.
  Reset,
}

impl From<Rgb> for Color {
  fn from(rgb: Rgb) -> Self {
    Self::Rgb(rgb)
  }
}

/// A "terminal element", analogous to a pixel or voxel.
///
/// A texel consists of an optional glyph (a printable character), a
/// foreground color, and a background color. A texel without a glyph draws
/// as a space in its background color.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Texel {
  glyph: Option<char>,
  fg: Color,
  bg: Color,
}

impl Texel {
  /// Creates a new blank texel in the terminal's default colors.
  #[inline]
  pub fn empty() -> Self {
    Self {
      glyph: None,
      fg: Color::Reset,
      bg: Color::Reset,
    }
  }

  /// Creates a new colorless texel with the given glyph.
  #[inline]
  pub fn new(glyph: char) -> Self {
    Self {
      glyph: Some(glyph),
      ..Self::empty()
    }
  }

  /// Returns this texel's glyph.
  #[inline]
  pub fn glyph(self) -> Option<char> {
    self.glyph
  }

  /// Returns this texel's foreground color.
  #[inline]
  pub fn fg(self) -> Color {
    self.fg
  }

  /// Returns a copy of this texel with the given foreground color.
  #[inline]
  pub fn with_fg(mut self, color: impl Into<Color>) -> Self {
    self.fg = color.into();
    self
  }

  /// Returns this texel's background color.
  #[inline]
  pub fn bg(self) -> Color {
    self.bg
  }

  /// Returns a copy of this texel with the given background color.
  #[inline]
  pub fn with_bg(mut self, color: impl Into<Color>) -> Self {
    self.bg = color.into();
    self
  }

  /// Layers `other` over this `Texel`.
  ///
  /// The glyph is replaced only if `other` has one; colors are replaced only
  /// if `other` sets them.
  #[inline]
  pub fn add_layer(mut self, other: Texel) -> Self {
    if let Some(glyph) = other.glyph {
      self.glyph = Some(glyph);
    }
    if other.fg != Color::Reset {
      self.fg = other.fg;
    }
    if other.bg != Color::Reset {
      self.bg = other.bg;
    }
    self
  }
}
