//! Maze generation module.
//!
//! This module contains the randomized recursive backtracker that carves a perfect maze out of a
//! solid grid. Cells are visited two steps apart so that every carved cell keeps a wall between
//! itself and its neighbours, and the wall in between is carved on each step.

use rand::{rngs::StdRng, seq::SliceRandom as _, Rng, SeedableRng as _};
use tracing::{info, trace, warn};

use crate::maze::{Cell, Coord, Grid, DIRECTIONS};

/// Smallest side length a maze can be generated with.
///
/// Anything below this is raised to it before generation. With a side of five the bottom-right
/// interior cell is distinct from the top-left one, so the start and end cells never coincide.
pub const MIN_SIDE: usize = 5;

/// Largest side length a maze can be generated with.
///
/// Anything above this is lowered to it before generation. The value is odd, so coercing a
/// clamped side to odd never pushes it past the bound, and a maze of this size still has its
/// rows and terminal columns addressable by `u16` screen coordinates.
pub const MAX_SIDE: usize = 255;

/// Maze generator.
///
/// This structure wraps the random source used to break ties between candidate neighbours during
/// generation. Injecting the random source keeps generation deterministic under a seeded
/// generator.
#[derive(Debug)]
pub struct Generator<R> {
    /// Random source used to shuffle candidate neighbours.
    rng: R,
    /// Number of walkable cells carved during the last generation.
    visited_count: usize,
}

impl Generator<StdRng> {
    /// Builds a generator from an optional seed.
    ///
    /// When a seed is given the whole sequence of mazes produced by the generator is
    /// reproducible. Otherwise the generator is seeded from system entropy.
    #[must_use]
    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64))
    }
}

impl<R: Rng> Generator<R> {
    /// Builds a generator around a random source.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            visited_count: 0,
        }
    }

    /// Returns the number of walkable cells carved during the last call to
    /// [`generate`](Generator::generate), endpoints included.
    pub const fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Generates a new perfect maze.
    ///
    /// The requested sides are first clamped between [`MIN_SIDE`] and [`MAX_SIDE`] and then made
    /// odd by incrementing even values. The maze is carved from `(1, 1)`, which becomes the start
    /// cell, and the bottom-right interior cell becomes the end cell. The outer ring of the grid is
    /// always wall.
    pub fn generate(&mut self, height: usize, width: usize) -> Grid {
        let height = effective_side(height);
        let width = effective_side(width);

        let mut cells = vec![Cell::Wall; height * width];
        let origin = Coord::new(1, 1);
        let mut frontier = vec![origin];
        carve(&mut cells, width, origin);
        self.visited_count = 1;

        while let Some(&current) = frontier.last() {
            let mut candidates = unvisited_neighbours(&cells, height, width, current);

            if candidates.is_empty() {
                // Dead end, backtrack
                let _ = frontier.pop();
                continue;
            }

            candidates.shuffle(&mut self.rng);
            if let Some(&(next, between)) = candidates.first() {
                trace!(from = %current, to = %next, "carving corridor");
                carve(&mut cells, width, between);
                carve(&mut cells, width, next);
                self.visited_count += 2;
                frontier.push(next);
            }
        }

        let end = Coord::new(height - 2, width - 2);
        set(&mut cells, width, origin, Cell::Start);
        set(&mut cells, width, end, Cell::End);

        info!(
            height,
            width,
            carved = self.visited_count,
            "generated maze"
        );

        Grid::from_parts(height, width, cells, origin, end)
    }
}

/// Clamps a requested side between [`MIN_SIDE`] and [`MAX_SIDE`] and forces it odd.
fn effective_side(requested: usize) -> usize {
    let side = if requested < MIN_SIDE {
        warn!(requested, minimum = MIN_SIDE, "maze side too small, clamping");
        MIN_SIDE
    } else if requested > MAX_SIDE {
        warn!(requested, maximum = MAX_SIDE, "maze side too large, clamping");
        MAX_SIDE
    } else {
        requested
    };

    if side % 2 == 0 {
        side + 1
    } else {
        side
    }
}

/// Returns the still-walled cells two steps away from a coordinate, each paired with the wall
/// cell lying between them. Cells on the outer ring are never candidates.
fn unvisited_neighbours(
    cells: &[Cell],
    height: usize,
    width: usize,
    at: Coord,
) -> Vec<(Coord, Coord)> {
    DIRECTIONS
        .iter()
        .filter_map(|&(delta_row, delta_col)| {
            let next = at.offset(delta_row * 2, delta_col * 2)?;
            let between = at.offset(delta_row, delta_col)?;
            let interior = next.row > 0
                && next.row < height - 1
                && next.col > 0
                && next.col < width - 1;

            (interior && cells.get(next.row * width + next.col) == Some(&Cell::Wall))
                .then_some((next, between))
        })
        .collect()
}

/// Marks a cell as carved path.
fn carve(cells: &mut [Cell], width: usize, at: Coord) {
    set(cells, width, at, Cell::Path);
}

/// Overwrites the state of a cell, ignoring out of range coordinates.
fn set(cells: &mut [Cell], width: usize, at: Coord, state: Cell) {
    if let Some(cell) = cells.get_mut(at.row * width + at.col) {
        *cell = state;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Generates a maze with a fixed seed, returning it along with the carved count.
    fn generate_seeded(height: usize, width: usize, seed: u64) -> (Grid, usize) {
        let mut generator = Generator::seeded(Some(seed));
        let grid = generator.generate(height, width);
        (grid, generator.visited_count())
    }

    /// Counts the undirected edges between orthogonally adjacent walkable cells.
    fn open_edges(grid: &Grid) -> usize {
        grid.cells()
            .filter(|(_, cell)| cell.is_open())
            .map(|(at, _)| {
                [at.offset(0, 1), at.offset(1, 0)]
                    .into_iter()
                    .flatten()
                    .filter(|next| grid.is_open(*next))
                    .count()
            })
            .sum()
    }

    #[test]
    fn test_effective_side() {
        assert_eq!(effective_side(15), 15, "odd sides are kept");
        assert_eq!(effective_side(16), 17, "even sides are incremented");
        assert_eq!(effective_side(5), 5, "minimum side is kept");
        assert_eq!(effective_side(4), 5, "small sides are clamped");
        assert_eq!(effective_side(0), 5, "zero is clamped");
        assert_eq!(effective_side(MAX_SIDE), MAX_SIDE, "maximum side is kept");
        assert_eq!(effective_side(MAX_SIDE + 1), MAX_SIDE, "large sides are clamped");
        assert_eq!(effective_side(usize::MAX), MAX_SIDE, "huge sides are clamped");
    }

    #[test]
    fn test_huge_dimensions_are_clamped() {
        let (grid, _) = generate_seeded(usize::MAX, 7, 1);

        assert_eq!(grid.height(), MAX_SIDE, "height clamped");
        assert_eq!(grid.width(), 7, "width kept");
        assert_eq!(
            grid.end(),
            Coord::new(MAX_SIDE - 2, 5),
            "end follows the clamped size"
        );
    }

    #[test]
    fn test_five_by_five() {
        let (grid, _) = generate_seeded(5, 5, 7);

        assert_eq!(grid.height(), 5, "height");
        assert_eq!(grid.width(), 5, "width");
        assert_eq!(grid.start(), Coord::new(1, 1), "start in the top-left interior");
        assert_eq!(grid.end(), Coord::new(3, 3), "end in the bottom-right interior");
        assert!(
            grid.cells()
                .filter(|(at, _)| grid.is_border(*at))
                .all(|(_, cell)| cell == Cell::Wall),
            "outer ring is all wall"
        );
    }

    #[test]
    fn test_even_dimensions_are_made_odd() {
        let (grid, _) = generate_seeded(10, 20, 3);

        assert_eq!(grid.height(), 11, "even height is incremented");
        assert_eq!(grid.width(), 21, "even width is incremented");
        assert_eq!(grid.end(), Coord::new(9, 19), "end follows the effective size");
    }

    #[test]
    fn test_degenerate_dimensions_are_clamped() {
        let (grid, _) = generate_seeded(1, 2, 11);

        assert_eq!(grid.height(), MIN_SIDE, "height clamped");
        assert_eq!(grid.width(), MIN_SIDE, "width clamped");
        assert_ne!(grid.start(), grid.end(), "start and end stay distinct");
    }

    #[test]
    fn test_perfectness() {
        for seed in 0..32 {
            for (height, width) in [(5, 5), (7, 13), (15, 15), (21, 9), (30, 30)] {
                let (grid, visited) = generate_seeded(height, width, seed);
                let cell_rows = (grid.height() - 1) / 2;
                let cell_cols = (grid.width() - 1) / 2;

                assert_eq!(grid.open_count(), visited, "open cells equal carved cells");
                assert_eq!(
                    visited,
                    2 * cell_rows * cell_cols - 1,
                    "every odd cell visited, one corridor per visit"
                );
                assert_eq!(
                    grid.reachable_from(grid.start()).len(),
                    visited,
                    "flood fill from start reaches every open cell"
                );
                assert_eq!(open_edges(&grid), visited - 1, "carved graph has no cycles");
            }
        }
    }

    #[test]
    fn test_single_start_and_end() {
        for seed in 0..16 {
            let (grid, _) = generate_seeded(11, 17, seed);
            let starts = grid.cells().filter(|(_, cell)| *cell == Cell::Start).count();
            let ends = grid.cells().filter(|(_, cell)| *cell == Cell::End).count();

            assert_eq!(starts, 1, "exactly one start");
            assert_eq!(ends, 1, "exactly one end");
            assert_ne!(grid.start(), grid.end(), "start and end differ");
        }
    }

    #[test]
    fn test_border_closure() {
        for seed in 0..16 {
            let (grid, _) = generate_seeded(9, 23, seed);

            assert!(
                grid.cells()
                    .filter(|(at, _)| grid.is_border(*at))
                    .all(|(_, cell)| cell == Cell::Wall),
                "border is closed for seed {seed}"
            );
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let (first, _) = generate_seeded(21, 21, 42);
        let (second, _) = generate_seeded(21, 21, 42);

        assert_eq!(first, second, "seeded generation is deterministic");
    }

    #[test]
    fn test_seeded_stream_varies_between_mazes() {
        let mut generator = Generator::seeded(Some(5));
        let mazes: HashSet<String> = (0..8)
            .map(|_| generator.generate(21, 21).to_string())
            .collect();

        assert!(mazes.len() > 1, "regenerating draws fresh mazes from the stream");
    }

    #[test]
    fn test_only_odd_cells_are_junctions() {
        let (grid, _) = generate_seeded(15, 15, 9);

        for (at, cell) in grid.cells() {
            if cell.is_open() {
                assert!(
                    at.row % 2 == 1 || at.col % 2 == 1,
                    "carved cell {at} lies on an odd row or column"
                );
            }
        }
    }
}
