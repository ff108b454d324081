//! Lava Platformer entry point
//!
//! Headless runner: plays a level pack with a fixed set of held keys and
//! prints what the text display shows.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lava_platformer::sim::{Direction, KeyState};
use lava_platformer::{LevelPack, Progress, Session, Settings, TextDisplay, renderer};

#[derive(Parser)]
#[command(name = "lava-platformer")]
#[command(about = "Collect every coin, don't touch the lava")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Level pack file (JSON), overrides the settings file
    #[arg(long, global = true)]
    levels: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the level pack with keys held down
    Run {
        /// Held keys, comma separated (left, right, up)
        #[arg(long, value_delimiter = ',')]
        keys: Vec<Direction>,
        /// Simulated seconds to run for
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,
        /// Frames per simulated second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print the display every N frames (0 = only at the end)
        #[arg(long, default_value_t = 0)]
        print_every: u64,
    },
    /// Print a level as text
    Show {
        /// Zero-based level index
        #[arg(default_value_t = 0)]
        level: usize,
    },
    /// Write the level pack as JSON to stdout
    Export,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.settings.as_deref())
        .context("Failed to load settings")?;
    if cli.levels.is_some() {
        settings.level_pack = cli.levels.clone();
    }
    let pack = match &settings.level_pack {
        Some(path) => LevelPack::load(path)
            .with_context(|| format!("Failed to load level pack {}", path.display()))?,
        None => LevelPack::builtin(),
    };

    match cli.command {
        Commands::Run {
            keys,
            seconds,
            fps,
            print_every,
        } => run(&pack, &settings, &keys, seconds, fps, print_every),
        Commands::Show { level } => {
            let level = pack
                .build(level, settings.physics, settings.seed)
                .with_context(|| format!("Failed to build level {level}"))?;
            println!("{}", renderer::render_level(&level));
            Ok(())
        }
        Commands::Export => {
            println!("{}", pack.to_json()?);
            Ok(())
        }
    }
}

fn run(
    pack: &LevelPack,
    settings: &Settings,
    keys: &[Direction],
    seconds: f32,
    fps: u32,
    print_every: u64,
) -> Result<()> {
    anyhow::ensure!(fps > 0, "fps must be positive");
    let mut session =
        Session::new(pack, settings, TextDisplay::new()).context("Failed to start session")?;
    let held: Vec<&str> = keys.iter().map(Direction::as_str).collect();
    let keys = KeyState::pressed(keys);
    let dt = 1.0 / fps as f32;
    let frames = (seconds.max(0.0) * fps as f32).round() as u64;

    log::info!(
        "Running {} frames at {} fps with keys [{}]",
        frames,
        fps,
        held.join(", ")
    );

    for frame in 1..=frames {
        match session.frame(dt, &keys) {
            Progress::Running => {}
            Progress::Restarted { level } => {
                println!("[frame {frame}] level {} lost, restarting", level + 1)
            }
            Progress::Advanced { level } => {
                println!("[frame {frame}] level won, on to level {}", level + 1)
            }
            Progress::Completed => {
                println!("[frame {frame}] all levels won!");
                break;
            }
        }
        if print_every > 0 && frame % print_every == 0 {
            println!("{}\n", session.display().frame());
        }
    }

    let level = session.level();
    println!("{}", renderer::render_level(level));
    println!(
        "level {}/{} | attempt {} | coins left {} | status {:?}",
        session.level_index() + 1,
        session.level_count(),
        session.attempts(),
        level.coins_remaining(),
        level.status()
    );
    Ok(())
}
