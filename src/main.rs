use std::fs::{self, File};
use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use grid_snake::config::{AppConfig, GRID};
use grid_snake::error::AppError;
use grid_snake::game::Game;
use grid_snake::game_loop::{SessionEnd, run_session};
use grid_snake::input::TerminalInput;
use grid_snake::prompt::read_player_name;
use grid_snake::renderer;
use grid_snake::score::{HighScoreEntry, HighScoreStore};
use grid_snake::snake::Collision;
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};

/// Classic Snake on a 10x10 board, with a top-5 leaderboard.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a game. Arrow keys or WASD steer, q quits.
    Play,
    /// Show the high-score table.
    Highscore,
    /// Clear the high-score table.
    Reset,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    init_logging(&config);
    install_panic_hook();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> Result<(), AppError> {
    let store = HighScoreStore::new(config.scores_path.clone());

    match command {
        Command::Play => play(config, &store),
        Command::Highscore => {
            print!("{}", store.load());
            Ok(())
        }
        Command::Reset => {
            store.reset()?;
            println!("High scores cleared.");
            Ok(())
        }
    }
}

fn play(config: &AppConfig, store: &HighScoreStore) -> Result<(), AppError> {
    let mut game = Game::new(GRID);

    // The session is dropped before any line-based I/O so the tick loop is
    // stopped and the terminal restored.
    let outcome = {
        let mut session = TerminalSession::enter().map_err(AppError::Terminal)?;
        let mut input = TerminalInput;
        run_session(&mut game, &mut input, config.tick_interval, |game| {
            session
                .terminal_mut()
                .draw(|frame| renderer::render(frame, game))
                .map(|_| ())
        })
        .map_err(AppError::Terminal)?
    };

    let SessionEnd::GameOver { score } = outcome else {
        info!("quit without recording a score");
        return Ok(());
    };

    println!("Game over! {}", death_message(game.death_reason));
    println!("Score: {score}");
    if store.load().would_rank(score) {
        println!("New high score!");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let name = read_player_name(&mut stdin.lock(), &mut stdout).map_err(AppError::Prompt)?;

    let table = store.record(HighScoreEntry::new(name, score, Utc::now()))?;
    println!();
    print!("{table}");
    stdout.flush().map_err(AppError::Terminal)?;

    Ok(())
}

fn death_message(reason: Option<Collision>) -> &'static str {
    match reason {
        Some(Collision::Wall) => "You hit the wall.",
        Some(Collision::SelfBite) => "You bit yourself.",
        None => "The board is full.",
    }
}

fn init_logging(config: &AppConfig) {
    if config.log_level == LevelFilter::Off {
        return;
    }

    if let Some(parent) = config.log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match File::create(&config.log_path) {
        Ok(file) => file,
        Err(error) => {
            eprintln!(
                "warning: logging disabled, cannot open {}: {error}",
                config.log_path.display()
            );
            return;
        }
    };

    if let Err(error) = WriteLogger::init(config.log_level, Config::default(), file) {
        eprintln!("warning: logging disabled: {error}");
    }
}
