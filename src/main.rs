//! HansHack: explore a freshly dug dungeon in the terminal.

use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

use hanshack::config::CombatRule;
use hanshack::config::Config;
use hanshack::config::FovAlgorithm;
use hanshack::config::View;
use hanshack::input;
use hanshack::input::Command;
use hanshack::render;
use hanshack::render::curses::Curses;
use hanshack::timing::SystemTimer;
use hanshack::LevelState;

/// Field-of-view algorithm names accepted on the command line.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fov {
  Symmetric,
  Basic,
}

impl From<Fov> for FovAlgorithm {
  fn from(fov: Fov) -> Self {
    match fov {
      Fov::Symmetric => FovAlgorithm::Symmetric,
      Fov::Basic => FovAlgorithm::Basic,
    }
  }
}

/// Explore a freshly dug dungeon.
#[derive(Parser, Debug)]
#[command(name = "hanshack", version)]
struct Args {
  /// Seed for level generation; picked at random if omitted
  #[arg(long)]
  seed: Option<u64>,

  /// Map width, in tiles
  #[arg(long, default_value_t = 80)]
  width: i64,

  /// Map height, in tiles
  #[arg(long, default_value_t = 45)]
  height: i64,

  /// How many room placements to attempt
  #[arg(long, default_value_t = 26)]
  max_rooms: usize,

  /// Smallest room side length
  #[arg(long, default_value_t = 6)]
  min_room: i64,

  /// Largest room side length
  #[arg(long, default_value_t = 10)]
  max_room: i64,

  /// Most monsters placed in a single room
  #[arg(long, default_value_t = 3)]
  monsters: usize,

  /// How far the player can see
  #[arg(long, default_value_t = 10)]
  radius: i64,

  /// Field-of-view algorithm
  #[arg(long, value_enum, default_value_t = Fov::Symmetric)]
  fov: Fov,

  /// Don't show walls at the edge of vision
  #[arg(long)]
  no_light_walls: bool,

  /// Make attacks deal damage and kill
  #[arg(long)]
  lethal: bool,
}

impl Args {
  fn config(&self) -> Config {
    Config {
      width: self.width,
      height: self.height,
      room_min: self.min_room,
      room_max: self.max_room,
      max_rooms: self.max_rooms,
      max_monsters: self.monsters,
      view: View {
        radius: self.radius,
        light_walls: !self.no_light_walls,
        algorithm: self.fov.into(),
      },
      combat: if self.lethal {
        CombatRule::Lethal
      } else {
        CombatRule::Narrate
      },
      ..Config::default()
    }
  }
}

/// How many log lines are kept around for display.
const LOG_LINES: usize = 64;

fn play(level: &mut LevelState, timer: &SystemTimer) -> Result<()> {
  let mut window = Curses::init().context("failed to set up the terminal")?;
  let mut renderer = render::Renderer::new();
  let mut messages = Vec::new();

  loop {
    timer.time("fov", || level.refresh_visibility());

    messages.extend(level.drain_messages());
    if messages.len() > LOG_LINES {
      messages.drain(..messages.len() - LOG_LINES);
    }

    let (rows, cols) = render::curses::dims()?;
    let t = timer.start("render");
    let frame = render::compose(level, &messages, rows, cols);
    renderer.draw(frame, &mut window)?;
    t.finish();

    let action = match input::classify(window.wait_key()?) {
      Command::Quit => break,
      Command::Act(action) => action,
    };

    let outcome = timer.time("turn", || {
      let outcome = level.resolve_turn(action);
      if outcome.took_turn() {
        level.take_monster_turns();
      }
      outcome
    });
    log::debug!("{:?} -> {:?}", action, outcome);
  }

  window.cleanup()?;
  Ok(())
}

fn main() -> Result<()> {
  env_logger::init();
  let args = Args::parse();
  let config = args.config();

  let seed = args.seed.unwrap_or_else(rand::random);
  log::info!("generating level with seed {}", seed);
  let mut rng = ChaCha8Rng::seed_from_u64(seed);

  let timer = SystemTimer::new();
  let mut level = timer
    .time("generate", || hanshack::generate_level(&config, &mut rng))
    .context("invalid level configuration")?;

  let result = play(&mut level, &timer);

  for t in timer.report() {
    log::debug!(
      "{}: {} runs, {:.3}ms average, {:.3}ms total",
      t.phase,
      t.count,
      t.average().as_secs_f64() * 1000.0,
      t.total.as_secs_f64() * 1000.0,
    );
  }
  result
}
