//! Input processing utilties.
//!
//! Due to the nature of teletype terminals, the only inputs we can really
//! capture are key-presses as recorded by the VT100 emulator. Each one is
//! classified into a [`Command`] on its own; there is no key-chording.

use crate::geo::Dir;
use crate::level::Action;

pub use crossterm::event::KeyCode;
pub use crossterm::event::KeyEvent;
pub use crossterm::event::KeyModifiers;

/// What a key press asks for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
  /// Leave the game.
  Quit,
  /// Do something in the game.
  Act(Action),
}

/// Classifies a key press.
///
/// Arrow keys step in the four cardinal directions. The letters around `s`
/// on a QWERTY keyboard step in all eight: `w`, `a`, `s`, `d` for cardinals
/// and `q`, `e`, `z`, `c` for diagonals. Escape and Ctrl-C quit. Anything
/// else is [`Action::Other`].
pub fn classify(key: KeyEvent) -> Command {
  if key.code == KeyCode::Esc
    || (key.code == KeyCode::Char('c')
      && key.modifiers.contains(KeyModifiers::CONTROL))
  {
    return Command::Quit;
  }

  let dir = match key.code {
    KeyCode::Up => Dir::N,
    KeyCode::Down => Dir::S,
    KeyCode::Left => Dir::W,
    KeyCode::Right => Dir::E,
    KeyCode::Char(c) => match c.to_ascii_lowercase() {
      'w' => Dir::N,
      's' => Dir::S,
      'a' => Dir::W,
      'd' => Dir::E,
      'q' => Dir::Nw,
      'e' => Dir::Ne,
      'z' => Dir::Sw,
      'c' => Dir::Se,
      _ => return Command::Act(Action::Other),
    },
    _ => return Command::Act(Action::Other),
  };
  Command::Act(Action::Step(dir))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
    }
  }

  #[test]
  fn arrows_and_letters_step() {
    let step = |d| Command::Act(Action::Step(d));
    assert_eq!(classify(key(KeyCode::Up)), step(Dir::N));
    assert_eq!(classify(key(KeyCode::Right)), step(Dir::E));
    assert_eq!(classify(key(KeyCode::Char('a'))), step(Dir::W));
    assert_eq!(classify(key(KeyCode::Char('Z'))), step(Dir::Sw));
    assert_eq!(classify(key(KeyCode::Char('c'))), step(Dir::Se));
  }

  #[test]
  fn quitting() {
    assert_eq!(classify(key(KeyCode::Esc)), Command::Quit);
    let ctrl_c = KeyEvent {
      code: KeyCode::Char('c'),
      modifiers: KeyModifiers::CONTROL,
    };
    assert_eq!(classify(ctrl_c), Command::Quit);
  }

  #[test]
  fn everything_else_is_not_a_turn() {
    for &code in &[KeyCode::Enter, KeyCode::Char('x'), KeyCode::F(1)] {
      assert_eq!(classify(key(code)), Command::Act(Action::Other));
    }
  }
}
