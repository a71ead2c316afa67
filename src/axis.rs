use std::fmt;

/// Maximum number of spatial dimensions a level may have.
pub const MAX_DIMENSIONS: usize = 6;

/// Minimum number of spatial dimensions a level may have.
pub const MIN_DIMENSIONS: usize = 2;

/// One of the up-to-six independent directions of movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
    T,
    U,
    V,
}

pub const ALL_AXES: [Axis; MAX_DIMENSIONS] = [Axis::X, Axis::Y, Axis::Z, Axis::T, Axis::U, Axis::V];

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::T => 3,
            Axis::U => 4,
            Axis::V => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Axis> {
        ALL_AXES.get(index).copied()
    }

    pub fn name(&self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::T => 'T',
            Axis::U => 'U',
            Axis::V => 'V',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Name of the axis at `position` in the grid's internal outer-to-inner
/// addressing order: the axis-name list is sliced to `dimension_count` and
/// read in reverse, so position 0 names the highest-numbered axis.
pub(crate) fn axis_name(dimension_count: usize, position: usize) -> char {
    ALL_AXES[dimension_count - 1 - position].name()
}
