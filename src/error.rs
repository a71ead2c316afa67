use thiserror::Error;

/// Errors raised by level construction, coordinate access, serialization
/// and loading. Every failure is reported at the offending call and leaves
/// prior state unmodified.
#[derive(Debug, Error)]
pub enum Error {
    /// The serialized grid text is not valid JSON.
    #[error("invalid map data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Length of the size list does not match the declared dimension count.
    #[error("length of the size list ({got}) must equal the dimension count ({declared})")]
    SizeCountMismatch { declared: usize, got: usize },

    #[error("map has {0} dimensions, outside the valid range [2-6]")]
    DimensionCount(usize),

    #[error("map has invalid size {size} for dimension {axis} (valid range is [2-30])")]
    AxisSize { axis: char, size: usize },

    /// The nested structure deviates from the shape derived from its first
    /// elements.
    #[error("ragged map: expected {expected} elements at depth {depth}, found {found}")]
    RaggedShape {
        depth: usize,
        expected: usize,
        found: usize,
    },

    #[error("ragged map: expected a nested array at depth {0}")]
    NotNested(usize),

    #[error("value {0} is not a cell state code")]
    UnknownCellCode(u64),

    #[error("expected a cell state code, found {0}")]
    InvalidCell(serde_json::Value),

    #[error("indices of length {got} can not index a {dimensions} dimensional map")]
    IndexCount { dimensions: usize, got: usize },

    #[error("index {index} is outside the valid range 0-{max} for dimension {axis}")]
    IndexRange { axis: char, index: usize, max: usize },

    /// A structurally valid grid that fails the playability check.
    #[error("not a valid, playable level: {0}")]
    Unplayable(&'static str),

    /// Level generation asked for more occupants than the grid has cells.
    #[error("can not place {needed} occupants in a grid of {cells} cells")]
    Capacity { needed: usize, cells: usize },
}
