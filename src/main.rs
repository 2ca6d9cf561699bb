mod input;
mod render;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pacman_turns::{load_map, Game, GameState};
use render::{Renderer, Theme};

#[derive(Parser)]
#[command(name = "pacman")]
#[command(about = "Turn-based Pacman in the terminal")]
#[command(version)]
struct Cli {
    /// Map file: '#' wall, '.' pellet, 'G' Pacman, 'X' ghost (three of them)
    #[arg(env = "PACMAN_MAP", default_value = "pacman_board.txt")]
    map: PathBuf,

    /// Seed for the ghosts' random choices
    #[arg(long, env = "PACMAN_SEED")]
    seed: Option<u64>,

    /// Draw the board with emoji
    #[arg(long, env = "PACMAN_EMOJI")]
    emoji: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let map = load_map(&cli.map)
        .with_context(|| format!("failed to load map {}", cli.map.display()))?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let theme = if cli.emoji { Theme::Emoji } else { Theme::Ascii };
    let renderer = Renderer::new(theme);
    let mut game = Game::new(map);
    info!("starting on {}", cli.map.display());

    let mut stdout = io::stdout();
    println!("--- WELCOME TO PACMAN GAME! ---");
    let state = game
        .play(
            |board| {
                renderer.draw(&mut stdout, board)?;
                input::read_dir(&mut stdout)
            },
            &mut rng,
        )
        .context("terminal input failed")?;

    renderer.draw(&mut stdout, &game)?;
    match state {
        GameState::Won => println!("\n----- Pacman wins! -----\n"),
        GameState::Lost => println!("\n----- Ghosts win! -----\n"),
        GameState::Running => {}
    }
    Ok(())
}
