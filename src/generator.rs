use crate::cell::CellState;
use crate::error::Error;
use crate::level::{Coordinates, Level};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a ready-to-play level: `box_count` boxes, `box_count` goals and
/// one player scattered over an open grid. The same seed always yields the
/// same layout.
pub fn generate_level(
    dimension_sizes: &[usize],
    box_count: usize,
    seed: u64,
) -> Result<Level, Error> {
    let mut level = Level::new(dimension_sizes.len(), dimension_sizes)?;
    level.fill(CellState::Maze);

    let cells: usize = dimension_sizes.iter().product();
    let needed = 2 * box_count + 1;
    if needed > cells {
        return Err(Error::Capacity { needed, cells });
    }

    // Seeded PRNG for reproducible layouts.
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut free = all_coordinates(dimension_sizes);

    for _ in 0..box_count {
        let spot = pick(&mut rng, &mut free);
        level.set_state(&spot, CellState::Goal)?;
    }
    for _ in 0..box_count {
        let spot = pick(&mut rng, &mut free);
        level.set_state(&spot, CellState::Box)?;
    }
    let spot = pick(&mut rng, &mut free);
    level.set_state(&spot, CellState::Player)?;

    Ok(level)
}

fn pick(rng: &mut ChaCha8Rng, free: &mut Vec<Coordinates>) -> Coordinates {
    let index = rng.gen_range(0..free.len());
    free.swap_remove(index)
}

// Every coordinate of a grid with the given axis-order sizes, enumerated
// odometer-style with axis 0 varying fastest.
fn all_coordinates(sizes: &[usize]) -> Vec<Coordinates> {
    let total: usize = sizes.iter().product();
    let mut coords = Vec::with_capacity(total);
    let mut current: Coordinates = sizes.iter().map(|_| 0).collect();
    for _ in 0..total {
        coords.push(current.clone());
        for (component, &size) in current.iter_mut().zip(sizes) {
            *component += 1;
            if *component < size {
                break;
            }
            *component = 0;
        }
    }
    coords
}
