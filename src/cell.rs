/// Occupant/terrain marker of a single grid cell.
///
/// The discriminants are the numeric codes used by the serialized grid
/// format and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CellState {
    /// Outside the playable area / unset.
    Void = 0,
    Player = 1,
    PlayerOnGoal = 2,
    /// Open floor.
    Maze = 3,
    Box = 4,
    Goal = 5,
    /// A goal cell currently holding a box.
    FilledGoal = 6,
}

impl CellState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<CellState> {
        match code {
            0 => Some(CellState::Void),
            1 => Some(CellState::Player),
            2 => Some(CellState::PlayerOnGoal),
            3 => Some(CellState::Maze),
            4 => Some(CellState::Box),
            5 => Some(CellState::Goal),
            6 => Some(CellState::FilledGoal),
            _ => None,
        }
    }

    /// A cell the player, or a pushed box, may enter.
    pub fn is_open(self) -> bool {
        matches!(self, CellState::Maze | CellState::Goal)
    }

    pub fn is_box(self) -> bool {
        matches!(self, CellState::Box | CellState::FilledGoal)
    }

    pub fn is_player(self) -> bool {
        matches!(self, CellState::Player | CellState::PlayerOnGoal)
    }
}
