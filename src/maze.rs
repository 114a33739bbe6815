//! Maze grid model.
//!
//! This module contains the [`Grid`] type holding the state of every cell of a labyrinth, along
//! with the [`Cell`] states and the [`Coord`] type used to address them. It also provides the
//! digit text form of a grid, used for fixtures and debug output.

use std::{collections::HashSet, fmt, str::FromStr};

use color_eyre::eyre::{bail, eyre, OptionExt as _, Report, Result};

/// State of a single cell of the labyrinth.
///
/// Each cell is either a wall, a walkable path cell or one of the two designated endpoints of the
/// puzzle. The start and end cells are walkable too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Solid cell that cannot be traced through.
    Wall,
    /// Walkable cell carved out by the generator.
    Path,
    /// Walkable cell where every trace must begin.
    Start,
    /// Walkable cell that wins the game once reached.
    End,
}

impl Cell {
    /// Returns whether the cell can be traced through.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Returns the digit used for this cell in the text form of a grid.
    const fn digit(self) -> char {
        match self {
            Self::Start => '1',
            Self::Wall => '2',
            Self::Path => '3',
            Self::End => '4',
        }
    }

    /// Parses a digit of the text form back into a cell state.
    const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Start),
            '2' => Some(Self::Wall),
            '3' => Some(Self::Path),
            '4' => Some(Self::End),
            _ => None,
        }
    }
}

/// Position of a cell inside a [`Grid`], as a row and column pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Zero-based row index, growing downwards.
    pub row: usize,
    /// Zero-based column index, growing rightwards.
    pub col: usize,
}

impl Coord {
    /// Builds a coordinate from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the Manhattan distance between two coordinates.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns whether both coordinates are orthogonal neighbours, that is, whether their
    /// Manhattan distance is exactly one.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }

    /// Offsets the coordinate by a signed delta, returning [`None`] when it would leave the
    /// non-negative quadrant.
    #[must_use]
    pub fn offset(self, delta_row: isize, delta_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(delta_row)?,
            col: self.col.checked_add_signed(delta_col)?,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal unit steps, as `(delta_row, delta_col)` pairs.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Labyrinth grid.
///
/// The grid stores one [`Cell`] per position in row-major order. It is created wholesale by the
/// generator or by parsing its text form, and is never mutated from outside this crate, so the
/// positions of the start and end cells are cached at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    height: usize,
    /// Number of columns.
    width: usize,
    /// Row-major cell states.
    cells: Vec<Cell>,
    /// Position of the single [`Cell::Start`].
    start: Coord,
    /// Position of the single [`Cell::End`].
    end: Coord,
}

impl Grid {
    /// Builds a grid from its dimensions and row-major cells, checking the start and end
    /// invariants.
    ///
    /// # Errors
    ///
    /// This function returns an error when the cell count does not match the dimensions, or when
    /// there is not exactly one start and exactly one end cell.
    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != height * width {
            bail!(
                "expected {} cells for a {height}x{width} grid, got {}",
                height * width,
                cells.len()
            );
        }

        let mut start = None;
        let mut end = None;
        for (idx, cell) in cells.iter().enumerate() {
            let slot = match cell {
                Cell::Start => &mut start,
                Cell::End => &mut end,
                Cell::Wall | Cell::Path => continue,
            };
            if slot.is_some() {
                bail!("grid holds more than one {cell:?} cell");
            }
            *slot = Some(Coord::new(idx / width, idx % width));
        }

        Ok(Self {
            height,
            width,
            cells,
            start: start.ok_or_eyre("grid holds no start cell")?,
            end: end.ok_or_eyre("grid holds no end cell")?,
        })
    }

    /// Builds a grid from already validated parts.
    ///
    /// The caller guarantees that `start` and `end` are the only endpoint cells of `cells`.
    pub(crate) const fn from_parts(
        height: usize,
        width: usize,
        cells: Vec<Cell>,
        start: Coord,
        end: Coord,
    ) -> Self {
        Self {
            height,
            width,
            cells,
            start,
            end,
        }
    }

    /// Returns the number of rows of the grid.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of columns of the grid.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the position of the start cell.
    #[must_use]
    pub const fn start(&self) -> Coord {
        self.start
    }

    /// Returns the position of the end cell.
    #[must_use]
    pub const fn end(&self) -> Coord {
        self.end
    }

    /// Returns whether a coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, at: Coord) -> bool {
        at.row < self.height && at.col < self.width
    }

    /// Returns whether a coordinate lies on the outermost ring of the grid.
    #[must_use]
    pub const fn is_border(&self, at: Coord) -> bool {
        at.row == 0 || at.col == 0 || at.row + 1 == self.height || at.col + 1 == self.width
    }

    /// Returns the state of the cell at a coordinate, or [`None`] when out of bounds.
    #[must_use]
    pub fn get(&self, at: Coord) -> Option<Cell> {
        if self.contains(at) {
            self.cells.get(at.row * self.width + at.col).copied()
        } else {
            None
        }
    }

    /// Returns whether the cell at a coordinate exists and can be walked on.
    #[must_use]
    pub fn is_open(&self, at: Coord) -> bool {
        self.get(at).is_some_and(Cell::is_open)
    }

    /// Iterates over every cell along with its coordinate, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Coord::new(idx / width, idx % width), *cell))
    }

    /// Returns the walkable orthogonal neighbours of a coordinate.
    #[must_use]
    pub fn open_neighbours(&self, at: Coord) -> Vec<Coord> {
        DIRECTIONS
            .iter()
            .filter_map(|&(delta_row, delta_col)| at.offset(delta_row, delta_col))
            .filter(|next| self.is_open(*next))
            .collect()
    }

    /// Counts the walkable cells of the grid, endpoints included.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_open()).count()
    }

    /// Returns every walkable cell reachable from a coordinate through orthogonal moves.
    ///
    /// The flood fill is iterative, so it is safe on arbitrarily large grids. An empty set is
    /// returned when the origin itself is not walkable.
    #[must_use]
    pub fn reachable_from(&self, origin: Coord) -> HashSet<Coord> {
        let mut seen = HashSet::new();
        if !self.is_open(origin) {
            return seen;
        }

        let mut pending = vec![origin];
        let _ = seen.insert(origin);
        while let Some(current) = pending.pop() {
            for next in self.open_neighbours(current) {
                if seen.insert(next) {
                    pending.push(next);
                }
            }
        }

        seen
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.cells.chunks(self.width).enumerate() {
            if row > 0 {
                writeln!(formatter)?;
            }
            for cell in line {
                write!(formatter, "{}", cell.digit())?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Report;

    /// Parses the digit text form of a grid.
    ///
    /// The format uses one line per row and one digit per cell: `1` for the start, `2` for walls,
    /// `3` for paths and `4` for the end. The board must be at least 3x3, rectangular and fully
    /// walled on its outer ring.
    fn from_str(input: &str) -> Result<Self> {
        let lines: Vec<&str> = input.trim().lines().map(str::trim_end).collect();

        // Must have at least 3x3 to form a proper walled maze
        let height = lines.len();
        if height < 3 {
            bail!("a grid needs at least 3 rows, got {height}");
        }
        let width = lines.first().map_or(0, |line| line.chars().count());
        if width < 3 {
            bail!("a grid needs at least 3 columns, got {width}");
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                bail!("row {row} is not {width} cells wide");
            }
            for (col, digit) in line.chars().enumerate() {
                let cell = Cell::from_digit(digit)
                    .ok_or_else(|| eyre!("invalid cell {digit:?} at ({row}, {col})"))?;
                cells.push(cell);
            }
        }

        let grid = Self::from_cells(height, width, cells)?;
        if let Some((at, _)) = grid
            .cells()
            .find(|(at, cell)| grid.is_border(*at) && cell.is_open())
        {
            bail!("border cell {at} is not a wall");
        }

        Ok(grid)
    }
}
