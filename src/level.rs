use crate::axis::{Axis, MAX_DIMENSIONS, MIN_DIMENSIONS, axis_name};
use crate::cell::CellState;
use crate::error::Error;
use arrayvec::ArrayVec;
use serde_json::Value;
use std::fmt;

/// Maximum extent of the grid along any single axis.
pub const MAX_AXIS_SIZE: usize = 30;

/// Minimum extent of the grid along any single axis.
pub const MIN_AXIS_SIZE: usize = 2;

/// Axis-order coordinates of a single cell (axis 0 = X).
pub type Coordinates = ArrayVec<usize, MAX_DIMENSIONS>;

/// An N-dimensional grid of cell states, 2 <= N <= 6.
///
/// Public coordinate parameters are always in axis order. The serialized
/// form nests arrays with the highest-numbered axis outermost; `offset` and
/// `coordinates_of` are the only places aware of that layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    dimension_count: usize,
    dimension_sizes: Coordinates,
    cells: Vec<CellState>,
}

impl Level {
    /// Build a grid filled with [`CellState::Void`]. `dimension_sizes` is in
    /// axis order and its length must equal `dimension_count`.
    pub fn new(dimension_count: usize, dimension_sizes: &[usize]) -> Result<Self, Error> {
        if dimension_sizes.len() != dimension_count {
            return Err(Error::SizeCountMismatch {
                declared: dimension_count,
                got: dimension_sizes.len(),
            });
        }
        if !(MIN_DIMENSIONS..=MAX_DIMENSIONS).contains(&dimension_count) {
            return Err(Error::DimensionCount(dimension_count));
        }
        for (i, &size) in dimension_sizes.iter().enumerate() {
            if !(MIN_AXIS_SIZE..=MAX_AXIS_SIZE).contains(&size) {
                return Err(Error::AxisSize {
                    axis: axis_name(dimension_count, dimension_count - 1 - i),
                    size,
                });
            }
        }
        Ok(Level {
            dimension_count,
            dimension_sizes: dimension_sizes.iter().copied().collect(),
            cells: vec![CellState::Void; dimension_sizes.iter().product()],
        })
    }

    /// The ready-to-play 2x2 arrangement every new engine starts with.
    pub(crate) fn starter() -> Self {
        Level {
            dimension_count: 2,
            dimension_sizes: [2, 2].into_iter().collect(),
            cells: vec![
                CellState::Maze,
                CellState::Player,
                CellState::Goal,
                CellState::Box,
            ],
        }
    }

    pub fn dimension_count(&self) -> usize {
        self.dimension_count
    }

    /// Extents in axis order.
    pub fn dimension_sizes(&self) -> &[usize] {
        &self.dimension_sizes
    }

    /// Extent along `axis`, or `None` when the grid has no such axis.
    pub fn axis_size(&self, axis: Axis) -> Option<usize> {
        self.dimension_sizes.get(axis.index()).copied()
    }

    fn validate_indices(&self, indices: &[usize]) -> Result<(), Error> {
        if indices.len() != self.dimension_count {
            return Err(Error::IndexCount {
                dimensions: self.dimension_count,
                got: indices.len(),
            });
        }
        for (i, (&index, &size)) in indices.iter().zip(&self.dimension_sizes).enumerate() {
            if index >= size {
                return Err(Error::IndexRange {
                    axis: axis_name(self.dimension_count, self.dimension_count - 1 - i),
                    index,
                    max: size - 1,
                });
            }
        }
        Ok(())
    }

    // Row-major offset of axis-order `indices` in the flat cell vector. The
    // widest stride belongs to the highest-numbered axis, matching the
    // nesting order of the serialized form.
    fn offset(&self, indices: &[usize]) -> usize {
        indices
            .iter()
            .zip(&self.dimension_sizes)
            .rev()
            .fold(0, |acc, (&index, &size)| acc * size + index)
    }

    fn coordinates_of(&self, mut offset: usize) -> Coordinates {
        let mut coords = Coordinates::new();
        for &size in &self.dimension_sizes {
            coords.push(offset % size);
            offset /= size;
        }
        coords
    }

    pub fn get_state(&self, indices: &[usize]) -> Result<CellState, Error> {
        self.validate_indices(indices)?;
        Ok(self.cells[self.offset(indices)])
    }

    pub fn set_state(&mut self, indices: &[usize], state: CellState) -> Result<(), Error> {
        self.validate_indices(indices)?;
        let offset = self.offset(indices);
        self.cells[offset] = state;
        Ok(())
    }

    /// Overwrite every cell with `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Canonical textual encoding: nested JSON arrays of cell state codes,
    /// highest-numbered axis outermost.
    pub fn serialize(&self) -> String {
        nest(&self.cells, &self.dimension_sizes).to_string()
    }

    /// Parse a serialized grid. The dimension count and sizes are re-derived
    /// from the structure's actual shape by drilling into element 0 until a
    /// leaf value, then validated against the supported ranges; the whole
    /// structure must match the derived shape exactly.
    pub fn from_serialized(text: &str) -> Result<Self, Error> {
        let root: Value = serde_json::from_str(text)?;

        // Discovery order is outer-to-inner, i.e. reversed axis order.
        let mut outer_sizes: Vec<usize> = Vec::new();
        let mut cursor = &root;
        while let Value::Array(items) = cursor {
            outer_sizes.push(items.len());
            match items.first() {
                Some(item) => cursor = item,
                None => break,
            }
        }

        let dimension_count = outer_sizes.len();
        if !(MIN_DIMENSIONS..=MAX_DIMENSIONS).contains(&dimension_count) {
            return Err(Error::DimensionCount(dimension_count));
        }
        for (position, &size) in outer_sizes.iter().enumerate() {
            if !(MIN_AXIS_SIZE..=MAX_AXIS_SIZE).contains(&size) {
                return Err(Error::AxisSize {
                    axis: axis_name(dimension_count, position),
                    size,
                });
            }
        }

        let mut cells = Vec::with_capacity(outer_sizes.iter().product());
        flatten(&root, &outer_sizes, 0, &mut cells)?;

        Ok(Level {
            dimension_count,
            dimension_sizes: outer_sizes.iter().rev().copied().collect(),
            cells,
        })
    }

    /// Replace this grid with the parsed form of `text`. On failure the
    /// current grid is left untouched.
    pub fn load(&mut self, text: &str) -> Result<(), Error> {
        *self = Level::from_serialized(text)?;
        Ok(())
    }

    fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    pub fn count_boxes(&self) -> usize {
        self.count(CellState::Box)
    }

    /// Goals still waiting for a box, including the one under the player.
    pub fn count_goals(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| matches!(cell, CellState::Goal | CellState::PlayerOnGoal))
            .count()
    }

    pub fn count_filled_goals(&self) -> usize {
        self.count(CellState::FilledGoal)
    }

    pub fn count_players(&self) -> usize {
        self.count(CellState::Player)
    }

    /// Axis-order coordinates of the first player cell in nested traversal
    /// order, or `None` when the grid holds no player.
    pub fn find_player(&self) -> Option<Coordinates> {
        self.cells
            .iter()
            .position(|cell| cell.is_player())
            .map(|offset| self.coordinates_of(offset))
    }

    /// Why this grid is not ready to play, if it is not.
    pub fn check_ready(&self) -> Result<(), Error> {
        if self.count_boxes() != self.count_goals() {
            return Err(Error::Unplayable("box count does not match goal count"));
        }
        let players = self.cells.iter().filter(|cell| cell.is_player()).count();
        if players != 1 {
            return Err(Error::Unplayable("the map must contain exactly one player"));
        }
        if self.count_filled_goals() != 0 {
            return Err(Error::Unplayable("a goal is already filled"));
        }
        Ok(())
    }

    /// Whether the grid is accepted as a playable level.
    pub fn game_ready(&self) -> bool {
        self.check_ready().is_ok()
    }

    /// Every box sits on a goal and at least one goal has been filled.
    pub fn game_won(&self) -> bool {
        self.count_boxes() == 0 && self.count_goals() == 0 && self.count_filled_goals() > 0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self
            .dimension_sizes
            .iter()
            .map(|size| size.to_string())
            .collect();
        write!(
            f,
            "{} dimensional map of size [ {} ]",
            self.dimension_count,
            sizes.join(" x ")
        )
    }
}

// `sizes` is in axis order; the outermost array corresponds to its last
// element.
fn nest(cells: &[CellState], sizes: &[usize]) -> Value {
    match sizes.split_last() {
        Some((_, inner)) if !inner.is_empty() => {
            let chunk: usize = inner.iter().product();
            Value::Array(cells.chunks(chunk).map(|run| nest(run, inner)).collect())
        }
        _ => Value::Array(cells.iter().map(|cell| Value::from(cell.code())).collect()),
    }
}

// Depth-first walk appending leaves in nested traversal order, enforcing the
// derived shape at every level.
fn flatten(
    value: &Value,
    outer_sizes: &[usize],
    depth: usize,
    out: &mut Vec<CellState>,
) -> Result<(), Error> {
    if depth == outer_sizes.len() {
        let code = value
            .as_u64()
            .ok_or_else(|| Error::InvalidCell(value.clone()))?;
        let state = u8::try_from(code)
            .ok()
            .and_then(CellState::from_code)
            .ok_or(Error::UnknownCellCode(code))?;
        out.push(state);
        return Ok(());
    }
    match value {
        Value::Array(items) => {
            if items.len() != outer_sizes[depth] {
                return Err(Error::RaggedShape {
                    depth,
                    expected: outer_sizes[depth],
                    found: items.len(),
                });
            }
            for item in items {
                flatten(item, outer_sizes, depth + 1, out)?;
            }
            Ok(())
        }
        _ => Err(Error::NotNested(depth)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_with_void() {
        let level = Level::new(3, &[2, 3, 4]).unwrap();
        assert_eq!(level.dimension_count(), 3);
        assert_eq!(level.dimension_sizes(), &[2, 3, 4]);
        assert_eq!(level.get_state(&[1, 2, 3]).unwrap(), CellState::Void);
        assert_eq!(level.count_boxes(), 0);
    }

    #[test]
    fn test_new_size_count_mismatch() {
        let err = Level::new(3, &[2, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeCountMismatch {
                declared: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_new_dimension_count_out_of_range() {
        assert!(matches!(
            Level::new(1, &[5]).unwrap_err(),
            Error::DimensionCount(1)
        ));
        assert!(matches!(
            Level::new(7, &[2, 2, 2, 2, 2, 2, 2]).unwrap_err(),
            Error::DimensionCount(7)
        ));
    }

    #[test]
    fn test_new_axis_size_out_of_range() {
        let err = Level::new(2, &[2, 31]).unwrap_err();
        assert!(matches!(err, Error::AxisSize { axis: 'Y', size: 31 }));

        let err = Level::new(2, &[1, 5]).unwrap_err();
        assert!(matches!(err, Error::AxisSize { axis: 'X', size: 1 }));
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut level = Level::new(3, &[3, 4, 5]).unwrap();
        level.set_state(&[2, 1, 4], CellState::Box).unwrap();
        assert_eq!(level.get_state(&[2, 1, 4]).unwrap(), CellState::Box);
        // Neighbours along every axis stay untouched.
        assert_eq!(level.get_state(&[1, 1, 4]).unwrap(), CellState::Void);
        assert_eq!(level.get_state(&[2, 2, 4]).unwrap(), CellState::Void);
        assert_eq!(level.get_state(&[2, 1, 3]).unwrap(), CellState::Void);
    }

    #[test]
    fn test_index_validation_symmetry() {
        let mut level = Level::new(2, &[2, 3]).unwrap();
        for x in 0..2 {
            for y in 0..3 {
                assert!(level.get_state(&[x, y]).is_ok());
                assert!(level.set_state(&[x, y], CellState::Maze).is_ok());
            }
        }
        assert!(matches!(
            level.get_state(&[2, 0]).unwrap_err(),
            Error::IndexRange {
                axis: 'X',
                index: 2,
                max: 1
            }
        ));
        assert!(matches!(
            level.get_state(&[0, 3]).unwrap_err(),
            Error::IndexRange {
                axis: 'Y',
                index: 3,
                max: 2
            }
        ));
        assert!(matches!(
            level.get_state(&[0, 0, 0]).unwrap_err(),
            Error::IndexCount {
                dimensions: 2,
                got: 3
            }
        ));
        assert!(matches!(
            level.set_state(&[0], CellState::Maze).unwrap_err(),
            Error::IndexCount {
                dimensions: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_each_axis_checked_against_its_own_size() {
        // Sizes differ per axis, so an index valid on one axis is invalid on
        // another.
        let level = Level::new(3, &[2, 4, 3]).unwrap();
        assert!(level.get_state(&[1, 3, 2]).is_ok());
        assert!(level.get_state(&[3, 0, 0]).is_err());
        assert!(level.get_state(&[0, 0, 3]).is_err());
        assert!(level.get_state(&[0, 3, 0]).is_ok());
    }

    #[test]
    fn test_serialize_starter() {
        assert_eq!(Level::starter().serialize(), "[[3,1],[5,4]]");
    }

    #[test]
    fn test_serialize_nesting_order() {
        // Axis X is the innermost array, axis Z the outermost.
        let mut level = Level::new(3, &[2, 2, 2]).unwrap();
        level.set_state(&[1, 0, 0], CellState::Player).unwrap();
        level.set_state(&[0, 1, 0], CellState::Box).unwrap();
        level.set_state(&[0, 0, 1], CellState::Goal).unwrap();
        assert_eq!(level.serialize(), "[[[0,1],[4,0]],[[5,0],[0,0]]]");
    }

    #[test]
    fn test_round_trip_every_dimension_count() {
        let shapes: [&[usize]; 5] = [
            &[2, 3],
            &[2, 3, 4],
            &[2, 2, 3, 2],
            &[2, 2, 2, 2, 3],
            &[2, 2, 2, 2, 2, 2],
        ];
        for sizes in shapes {
            let mut level = Level::new(sizes.len(), sizes).unwrap();
            level.fill(CellState::Maze);
            let mut first = vec![0; sizes.len()];
            let mut last: Vec<usize> = sizes.iter().map(|&s| s - 1).collect();
            level.set_state(&first, CellState::Player).unwrap();
            level.set_state(&last, CellState::Box).unwrap();
            first[0] = 1;
            last[0] = 0;
            level.set_state(&first, CellState::Goal).unwrap();
            level.set_state(&last, CellState::FilledGoal).unwrap();

            let reloaded = Level::from_serialized(&level.serialize()).unwrap();
            assert_eq!(reloaded, level, "round trip failed for {:?}", sizes);
        }
    }

    #[test]
    fn test_load_replaces_prior_shape() {
        let mut level = Level::new(4, &[2, 2, 2, 2]).unwrap();
        level.load("[[3,1,3],[5,4,3]]").unwrap();
        assert_eq!(level.dimension_count(), 2);
        assert_eq!(level.dimension_sizes(), &[3, 2]);
        assert_eq!(level.get_state(&[1, 0]).unwrap(), CellState::Player);
        assert_eq!(level.get_state(&[0, 1]).unwrap(), CellState::Goal);
    }

    #[test]
    fn test_load_failure_keeps_prior_state() {
        let mut level = Level::starter();
        let before = level.clone();
        assert!(level.load("[[3,1],[5").is_err());
        assert!(level.load("[[3,9],[5,4]]").is_err());
        assert_eq!(level, before);
    }

    #[test]
    fn test_load_rejects_malformed_text() {
        assert!(matches!(
            Level::from_serialized("not json").unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn test_load_rejects_bad_dimension_counts() {
        assert!(matches!(
            Level::from_serialized("[1,2]").unwrap_err(),
            Error::DimensionCount(1)
        ));
        assert!(matches!(
            Level::from_serialized("7").unwrap_err(),
            Error::DimensionCount(0)
        ));
        let seven = "[[[[[[[0,0]]]]]]]";
        assert!(matches!(
            Level::from_serialized(seven).unwrap_err(),
            Error::DimensionCount(7)
        ));
    }

    #[test]
    fn test_load_rejects_bad_sizes() {
        let wide = format!("[{0},{0}]", "[3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3,3]");
        assert!(matches!(
            Level::from_serialized(&wide).unwrap_err(),
            Error::AxisSize { axis: 'X', size: 31 }
        ));
        assert!(matches!(
            Level::from_serialized("[[],[]]").unwrap_err(),
            Error::AxisSize { axis: 'X', size: 0 }
        ));
    }

    #[test]
    fn test_load_rejects_ragged_shapes() {
        assert!(matches!(
            Level::from_serialized("[[3,1],[5]]").unwrap_err(),
            Error::RaggedShape {
                depth: 1,
                expected: 2,
                found: 1
            }
        ));
        // A leaf where a nested array was expected.
        assert!(matches!(
            Level::from_serialized("[[3,1],4]").unwrap_err(),
            Error::NotNested(1)
        ));
        // A nested array where a leaf was expected.
        assert!(matches!(
            Level::from_serialized("[[3,1],[5,[4]]]").unwrap_err(),
            Error::InvalidCell(_)
        ));
    }

    #[test]
    fn test_load_rejects_bad_cell_values() {
        assert!(matches!(
            Level::from_serialized("[[3,9],[5,4]]").unwrap_err(),
            Error::UnknownCellCode(9)
        ));
        assert!(matches!(
            Level::from_serialized("[[3,-1],[5,4]]").unwrap_err(),
            Error::InvalidCell(_)
        ));
        assert!(matches!(
            Level::from_serialized("[[3,\"1\"],[5,4]]").unwrap_err(),
            Error::InvalidCell(_)
        ));
    }

    #[test]
    fn test_counts() {
        let level = Level::from_serialized("[[1,4,5],[6,2,4],[5,3,0]]").unwrap();
        assert_eq!(level.count_boxes(), 2);
        assert_eq!(level.count_goals(), 3); // two goals plus player-on-goal
        assert_eq!(level.count_filled_goals(), 1);
        assert_eq!(level.count_players(), 1);
    }

    #[test]
    fn test_find_player() {
        let level = Level::from_serialized("[[3,3],[3,1]]").unwrap();
        assert_eq!(level.find_player().unwrap().as_slice(), &[1, 1]);

        let on_goal = Level::from_serialized("[[3,3],[2,3]]").unwrap();
        assert_eq!(on_goal.find_player().unwrap().as_slice(), &[0, 1]);

        let empty = Level::new(2, &[2, 2]).unwrap();
        assert_eq!(empty.find_player(), None);
    }

    #[test]
    fn test_find_player_at_origin() {
        // Coordinate 0 is a legitimate location, not a missing player.
        let level = Level::from_serialized("[[1,3],[3,3]]").unwrap();
        assert_eq!(level.find_player().unwrap().as_slice(), &[0, 0]);
    }

    #[test]
    fn test_game_ready() {
        assert!(Level::starter().game_ready());
        // Box/goal count mismatch.
        assert!(!Level::from_serialized("[[3,1],[5,3]]").unwrap().game_ready());
        // No player.
        assert!(!Level::from_serialized("[[3,3],[5,4]]").unwrap().game_ready());
        // Two players.
        assert!(!Level::from_serialized("[[1,1],[5,4]]").unwrap().game_ready());
        // Filled goal present.
        assert!(!Level::from_serialized("[[6,1],[5,4]]").unwrap().game_ready());
    }

    #[test]
    fn test_game_won() {
        assert!(Level::from_serialized("[[3,1],[6,3]]").unwrap().game_won());
        // A box still off its goal.
        assert!(!Level::from_serialized("[[4,1],[6,5]]").unwrap().game_won());
        // No filled goal at all.
        assert!(!Level::from_serialized("[[3,1],[3,3]]").unwrap().game_won());
    }

    #[test]
    fn test_axis_size() {
        let level = Level::new(3, &[2, 3, 4]).unwrap();
        assert_eq!(level.axis_size(Axis::X), Some(2));
        assert_eq!(level.axis_size(Axis::Y), Some(3));
        assert_eq!(level.axis_size(Axis::Z), Some(4));
        assert_eq!(level.axis_size(Axis::T), None);
    }

    #[test]
    fn test_display() {
        let level = Level::new(3, &[2, 3, 4]).unwrap();
        assert_eq!(level.to_string(), "3 dimensional map of size [ 2 x 3 x 4 ]");
    }
}
