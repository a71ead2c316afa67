//! Core logic for an N-dimensional Sokoban variant.
//!
//! A player token moves one axis at a time through a hyper-grid of 2 to 6
//! dimensions, pushing boxes onto goals. The crate provides the grid model
//! ([`Level`]), the move state machine ([`Engine`]) and a seeded level
//! generator; rendering and input handling live elsewhere.
//!
//! Levels travel as nested JSON arrays of cell state codes, with the
//! highest-numbered axis outermost:
//!
//! ```
//! use hyperban::{Axis, Difficulty, Direction, Engine};
//!
//! let mut engine = Engine::new(Difficulty::Easy);
//! engine.load_level("[[3,1],[3,4],[3,5]]").unwrap();
//! engine.move_player(Axis::Y, Direction::Positive);
//! assert!(engine.level().game_won());
//! assert_eq!(engine.move_count(), 1);
//! ```

mod axis;
mod cell;
mod engine;
mod error;
mod generator;
mod level;

pub use axis::{ALL_AXES, Axis, MAX_DIMENSIONS, MIN_DIMENSIONS};
pub use cell::CellState;
pub use engine::{Difficulty, Direction, Engine};
pub use error::Error;
pub use generator::generate_level;
pub use level::{Coordinates, Level, MAX_AXIS_SIZE, MIN_AXIS_SIZE};
