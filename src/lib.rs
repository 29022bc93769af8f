//! Galaxy Shooter: a terminal arcade shooter with levels, bosses and menus.
//!
//! The core (`entities`, `level`, `compute`, `menu`, `game`) is pure and
//! frame-stepped; `display` and the binary's input loop are the only parts
//! that touch the terminal.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod menu;

pub use config::Config;
pub use error::{GameError, Result};
pub use game::{Game, GameState};
