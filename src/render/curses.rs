//! `curses` helper library.
//!
//! Note that this module doesn't *actually* use `libcurses`, and merely
//! emulates its behavior at a high level in terms of `crossterm`.

use std::io;

use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::style;

use crate::render::texel;
use crate::render::texel::Texel;

/// Returns the current dimensions of the terminal window, as rows and
/// columns.
pub fn dims() -> crossterm::Result<(usize, usize)> {
  let (cols, rows) = crossterm::terminal::size()?;
  Ok((rows as _, cols as _))
}

/// A low-level curses context.
///
/// While a `Curses` is alive, the terminal is in raw mode on the alternate
/// screen. Dropping it restores the terminal.
pub struct Curses<W: io::Write = io::Stdout> {
  w: W,
  active: bool,
}

impl Curses {
  /// Initializes the `curses` environment on `stdout`.
  pub fn init() -> crossterm::Result<Curses> {
    Curses::with(io::stdout())
  }
}

/// Arguments for a draw call.
///
/// See [`Curses::draw()`].
#[allow(missing_docs)]
pub struct DrawCall {
  pub row: usize,
  pub col: usize,
  pub texel: Texel,
}

fn to_crossterm(color: texel::Color) -> style::Color {
  match color {
    texel::Color::Rgb(rgb) => style::Color::Rgb {
      r: rgb.red,
      g: rgb.green,
      b: rgb.blue,
    },
    texel::Color::Reset => style::Color::Reset,
  }
}

impl<W: io::Write> Curses<W> {
  /// Initializes the `curses` environment for `w`.
  pub fn with(mut w: W) -> crossterm::Result<Curses<W>> {
    crossterm::execute!(
      w,
      crossterm::terminal::EnterAlternateScreen,
      crossterm::cursor::Hide,
      crossterm::terminal::DisableLineWrap,
      crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
    )?;
    crossterm::terminal::enable_raw_mode()?;

    Ok(Curses { w, active: true })
  }

  /// Queues a draw of a single texel. Nothing is shown until
  /// [`Curses::flush()`] is called.
  pub fn draw(&mut self, call: DrawCall) -> crossterm::Result<()> {
    crossterm::queue!(
      self.w,
      crossterm::cursor::MoveTo(call.col as _, call.row as _),
      style::SetColors(style::Colors {
        foreground: Some(to_crossterm(call.texel.fg())),
        background: Some(to_crossterm(call.texel.bg())),
      }),
      style::Print(call.texel.glyph().unwrap_or(' ')),
    )
  }

  /// Pushes all queued draws to the terminal.
  pub fn flush(&mut self) -> crossterm::Result<()> {
    self.w.flush()?;
    Ok(())
  }

  /// Blocks until a key is pressed, discarding any other events.
  pub fn wait_key(&mut self) -> crossterm::Result<KeyEvent> {
    loop {
      if let Event::Key(e) = crossterm::event::read()? {
        return Ok(e);
      }
    }
  }

  /// Restores the terminal to the state it was in before [`Curses::with()`].
  ///
  /// Calling this more than once does nothing.
  pub fn cleanup(&mut self) -> crossterm::Result<()> {
    if !self.active {
      return Ok(());
    }
    self.active = false;

    crossterm::execute!(
      self.w,
      style::ResetColor,
      crossterm::terminal::LeaveAlternateScreen,
      crossterm::cursor::Show,
      crossterm::terminal::EnableLineWrap,
    )?;
    crossterm::terminal::disable_raw_mode()?;
    self.flush()
  }
}

impl<W: io::Write> Drop for Curses<W> {
  fn drop(&mut self) {
    if let Err(e) = self.cleanup() {
      log::error!("failed to restore terminal: {}", e);
    }
  }
}
