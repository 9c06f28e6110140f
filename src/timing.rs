//! Timing primitives.

use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use chashmap::CHashMap;

/// A timer for measuring the time spent on each phase of the game, such as
/// generation or field-of-view updates, for computing debug timings.
///
/// This timer can keep track of several different phases, each of which is
/// tracked by a string "tag", such as `fov`.
pub struct SystemTimer {
  table: CHashMap<&'static str, TimerInner>,
  keys: Mutex<Vec<&'static str>>,
}

/// Accumulated timings for one phase.
///
/// See [`SystemTimer::report()`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Timing {
  /// The phase's tag.
  pub phase: &'static str,
  /// How many measurements were taken.
  pub count: u32,
  /// The sum of all measurements.
  pub total: Duration,
}

impl Timing {
  /// Returns the mean measurement.
  pub fn average(&self) -> Duration {
    match self.count {
      0 => Duration::default(),
      n => self.total / n,
    }
  }
}

impl SystemTimer {
  /// Creates a new `SystemTimer`.
  pub fn new() -> Self {
    Self {
      table: CHashMap::new(),
      keys: Mutex::new(Vec::new()),
    }
  }

  /// Starts a timing measurement for `phase`.
  ///
  /// The measurement is completed when the returned guard value is dropped,
  /// which will then be added to the running total.
  #[must_use]
  pub fn start(&self, phase: &'static str) -> SystemTimerGuard<'_> {
    let keys = &self.keys;
    self.table.upsert(
      phase,
      move || {
        if let Ok(mut keys) = keys.lock() {
          keys.push(phase);
        }
        TimerInner::new()
      },
      |v| v.last_start = Instant::now(),
    );
    SystemTimerGuard(self, phase)
  }

  /// Runs `f`, timing it as `phase`.
  pub fn time<T>(&self, phase: &'static str, f: impl FnOnce() -> T) -> T {
    let _t = self.start(phase);
    f()
  }

  /// Returns the total time measured by this timer for `phase`.
  pub fn total_time(&self, phase: &'static str) -> Duration {
    self
      .table
      .get(phase)
      .map(|s| s.total_time)
      .unwrap_or_default()
  }

  /// Returns the accumulated timings of every phase, in the order each was
  /// first started.
  pub fn report(&self) -> Vec<Timing> {
    let keys = match self.keys.lock() {
      Ok(keys) => keys.clone(),
      Err(_) => return Vec::new(),
    };
    keys
      .into_iter()
      .filter_map(|phase| {
        let inner = self.table.get(phase)?;
        Some(Timing {
          phase,
          count: inner.measurements,
          total: inner.total_time,
        })
      })
      .collect()
  }
}

impl Default for SystemTimer {
  fn default() -> Self {
    Self::new()
  }
}

struct TimerInner {
  last_start: Instant,
  total_time: Duration,
  measurements: u32,
}

impl TimerInner {
  fn new() -> Self {
    Self {
      last_start: Instant::now(),
      total_time: Duration::default(),
      measurements: 0,
    }
  }
}

/// A guard for a [`SystemTimer::start()`] call.
pub struct SystemTimerGuard<'a>(&'a SystemTimer, &'static str);

impl SystemTimerGuard<'_> {
  /// Finishes a timing early.
  pub fn finish(self) {}
}

impl Drop for SystemTimerGuard<'_> {
  fn drop(&mut self) {
    if let Some(mut inner) = self.0.table.get_mut(self.1) {
      let elapsed = inner.last_start.elapsed();
      inner.total_time += elapsed;
      inner.measurements += 1;
    }
  }
}
