pub mod config;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod grid;
pub mod input;
pub mod prompt;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
