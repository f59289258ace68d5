use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Random samples drawn before falling back to a scan of the grid.
pub const MAX_SPAWN_ATTEMPTS: usize = 256;

/// Collects the cells covered by the given entities into one lookup set.
#[must_use]
pub fn occupied_cells<I>(cells: I) -> HashSet<Position>
where
    I: IntoIterator<Item = Position>,
{
    cells.into_iter().collect()
}

/// Picks a uniformly random grid cell that is not in `occupied`.
///
/// Samples up to [`MAX_SPAWN_ATTEMPTS`] cells, then scans the grid from a
/// random offset so a crowded board still terminates. Returns `None` only
/// when every cell is taken.
#[must_use]
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let total = bounds.total_cells();
    if total == 0 {
        return None;
    }

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }

    let offset = rng.gen_range(0..total);
    (0..total)
        .map(|step| cell_at_index((offset + step) % total, bounds))
        .find(|cell| !occupied.contains(cell))
}

fn cell_at_index(index: usize, bounds: GridSize) -> Position {
    let width = usize::from(bounds.width);
    Position {
        x: (index % width) as i32,
        y: (index / width) as i32,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::snake::Position;

    use super::{occupied_cells, random_free_cell};

    #[test]
    fn spawn_never_returns_an_occupied_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };
        let taken = [
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 2, y: 0 },
            Position { x: 5, y: 5 },
        ];
        let occupied = occupied_cells(taken);

        for _ in 0..200 {
            let cell = random_free_cell(&mut rng, bounds, &occupied)
                .expect("board has free cells");
            assert!(!occupied.contains(&cell));
            assert!(cell.is_within_bounds(bounds));
        }
    }

    #[test]
    fn nearly_full_board_falls_back_to_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize {
            width: 20,
            height: 20,
        };
        let free = Position { x: 13, y: 17 };
        let occupied: HashSet<Position> = (0..20)
            .flat_map(|y| (0..20).map(move |x| Position { x, y }))
            .filter(|cell| *cell != free)
            .collect();

        assert_eq!(random_free_cell(&mut rng, bounds, &occupied), Some(free));
    }

    #[test]
    fn full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let occupied: HashSet<Position> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(|(x, y)| Position { x, y })
            .collect();

        assert_eq!(random_free_cell(&mut rng, bounds, &occupied), None);
    }
}
