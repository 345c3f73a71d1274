//! A classic falling-block puzzle: a playfield grid, rotating figures,
//! line clearing, scoring, pause and a next-figure preview.
//!
//! The game logic ([`field`], [`figure`], [`play_area`], [`score`]) never
//! touches the window; [`controls`] and [`render`] bridge it to macroquad.

pub mod config;
pub mod controls;
pub mod error;
pub mod field;
pub mod figure;
pub mod menu;
pub mod play_area;
pub mod render;
pub mod score;

pub use config::Settings;
pub use controls::{Command, Controls};
pub use error::ConfigError;
pub use field::{Field, Landing};
pub use figure::{Figure, FigureType, Square};
pub use play_area::{PlayArea, SessionState};
pub use score::{ScoreEvent, Scoreboard};
