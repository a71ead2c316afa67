use crate::axis::Axis;
use crate::cell::CellState;
use crate::error::Error;
use crate::level::{Coordinates, Level};

/// Whether failed move attempts still cost a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

/// Direction of travel along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn offset(&self) -> isize {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }
}

/// A single puzzle session: one level, a move counter, and the serialized
/// snapshot the grid rolls back to on restart.
#[derive(Debug, Clone)]
pub struct Engine {
    level: Level,
    initial_state: String,
    move_count: u32,
    difficulty: Difficulty,
}

impl Engine {
    pub fn new(difficulty: Difficulty) -> Self {
        let level = Level::starter();
        let initial_state = level.serialize();
        Engine {
            level,
            initial_state,
            move_count: 0,
            difficulty,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Replace the current level and restart snapshot. The new level must be
    /// ready to play; on failure the previous level and snapshot survive.
    pub fn load_level(&mut self, text: &str) -> Result<(), Error> {
        let level = Level::from_serialized(text)?;
        level.check_ready()?;
        self.level = level;
        self.initial_state = text.to_string();
        Ok(())
    }

    /// Discard all moves made since the level was loaded.
    pub fn restart(&mut self) {
        self.move_count = 0;
        self.level
            .load(&self.initial_state)
            .expect("initial state snapshot re-parses");
    }

    /// Move the player one cell along `axis`, pushing an adjacent box when
    /// the cell beyond it is open. Never fails: blocked and out-of-range
    /// attempts are absorbed as no-ops, though on `Hard` they still cost a
    /// move.
    pub fn move_player(&mut self, axis: Axis, direction: Direction) {
        let moved = self.try_move(axis, direction).unwrap_or(false);
        if moved || self.difficulty == Difficulty::Hard {
            self.move_count += 1;
        }
    }

    // Out-of-range targets surface as index errors from the level; the
    // caller absorbs them as "did not move".
    fn try_move(&mut self, axis: Axis, direction: Direction) -> Result<bool, Error> {
        let Some(start) = self.level.find_player() else {
            return Ok(false);
        };
        let start_state = self.level.get_state(&start)?;
        let vacated = if start_state == CellState::PlayerOnGoal {
            CellState::Goal
        } else {
            CellState::Maze
        };

        let Some(target) = shift(&start, axis, direction) else {
            return Ok(false);
        };
        let target_state = self.level.get_state(&target)?;

        match target_state {
            CellState::Maze | CellState::Goal => {
                self.level.set_state(&target, occupy(target_state))?;
                self.level.set_state(&start, vacated)?;
                Ok(true)
            }
            CellState::Box | CellState::FilledGoal => {
                // The box's destination is exactly one cell past the
                // player's destination, along the same axis and direction.
                let Some(beyond) = shift(&target, axis, direction) else {
                    return Ok(false);
                };
                let beyond_state = self.level.get_state(&beyond)?;
                if !beyond_state.is_open() {
                    return Ok(false);
                }
                let freed = if target_state == CellState::FilledGoal {
                    CellState::PlayerOnGoal
                } else {
                    CellState::Player
                };
                self.level.set_state(&beyond, settle(beyond_state))?;
                self.level.set_state(&target, freed)?;
                self.level.set_state(&start, vacated)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// `coords` with the `axis` component shifted one step, or `None` when the
/// shift leaves the coordinate space entirely (below zero, or an axis the
/// level does not have).
fn shift(coords: &Coordinates, axis: Axis, direction: Direction) -> Option<Coordinates> {
    let mut next = coords.clone();
    let component = next.get_mut(axis.index())?;
    *component = component.checked_add_signed(direction.offset())?;
    Some(next)
}

fn occupy(state: CellState) -> CellState {
    if state == CellState::Goal {
        CellState::PlayerOnGoal
    } else {
        CellState::Player
    }
}

fn settle(state: CellState) -> CellState {
    if state == CellState::Goal {
        CellState::FilledGoal
    } else {
        CellState::Box
    }
}
