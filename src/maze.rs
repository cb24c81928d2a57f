//! Grid model of a maze.
//!
//! This module contains the [`Maze`] struct, the doubled-grid representation every generator writes
//! into and every search reads from. A logical `N x N` maze is stored as a `(2N+1) x (2N+1)` matrix
//! of [`Tile`]s: odd/odd positions are the logical cells and the positions between them are wall
//! slots that become passages once carved.

use std::{collections::HashSet, fmt};

use crate::{
    error::{MazeError, Result},
    types::{Cell, Coord, Direction, Tile},
};

/// This structure holds a maze in its doubled-grid form, together with the fixed positions every
/// search starts from and tries to reach.
///
/// Mutation is reserved to the generators inside this crate. Once a maze is handed out it can only
/// be inspected, so a search can never observe a grid that changes under it. The outer ring of the
/// grid is never opened by any generator, which is what keeps every search inside the matrix
/// without extra bounds checks on the caller's side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// This field holds the logical side length `N`, that is, the number of rooms along each side.
    size: usize,
    /// This field holds the side length of the doubled grid, which is always `2N + 1`.
    width: usize,
    /// This field holds the tiles of the doubled grid in row-major order. A fresh maze starts with
    /// every tile set to a wall and the generators open them one by one.
    tiles: Vec<Tile>,
    /// This field holds the start position, the grid coordinate of logical cell `(0, 0)`.
    start: Coord,
    /// This field holds the end position, the grid coordinate of logical cell `(N - 1, N - 1)`. It
    /// equals `start` for a single-cell maze.
    end: Coord,
}

impl Maze {
    /// Builds an all-wall grid for an `N x N` logical maze.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidSize`] if `size` is zero or so large that the doubled grid cannot
    /// be addressed.
    pub(crate) fn walled(size: usize) -> Result<Self> {
        let width = size
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .filter(|_| size > 0)
            .ok_or(MazeError::InvalidSize(size))?;
        let area = width
            .checked_mul(width)
            .ok_or(MazeError::InvalidSize(size))?;

        Ok(Self {
            size,
            width,
            tiles: vec![Tile::Wall; area],
            start: Cell::new(0, 0).to_coord(),
            end: Cell::new(size - 1, size - 1).to_coord(),
        })
    }

    /// Logical side length `N` of the maze.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of columns of the doubled grid.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows of the doubled grid. Mazes are square, so this equals [`Maze::width`].
    #[must_use]
    pub const fn height(&self) -> usize {
        self.width
    }

    /// Grid coordinate where every search starts.
    #[must_use]
    pub const fn start(&self) -> Coord {
        self.start
    }

    /// Grid coordinate every search tries to reach.
    #[must_use]
    pub const fn end(&self) -> Coord {
        self.end
    }

    /// Row-major index of a coordinate, if it lies inside the grid.
    const fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.width && coord.col < self.width {
            Some(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    /// Whether a grid coordinate lies inside the matrix.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Whether a logical cell lies inside the `N x N` logical space.
    #[must_use]
    pub const fn contains_cell(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Tile at a grid coordinate, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Option<Tile> {
        self.tiles.get(self.index(coord)?).copied()
    }

    /// Whether the tile at `coord` is open.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] if the coordinate falls outside the matrix.
    pub fn is_open(&self, coord: Coord) -> Result<bool> {
        self.tile(coord)
            .map(|tile| tile == Tile::Open)
            .ok_or(MazeError::OutOfBounds {
                coord,
                width: self.width,
            })
    }

    /// Logical neighbours of a cell in up, right, down, left order, without wrap-around.
    #[must_use]
    pub fn neighbors4(&self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| cell.step(direction))
            .filter(|neighbor| self.contains_cell(*neighbor))
            .collect()
    }

    /// Grid coordinate of the wall slot between two axis-adjacent logical cells.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] if either cell is outside the logical space and
    /// [`MazeError::InvalidNeighbor`] if the cells do not differ by exactly one step along one axis.
    pub fn wall_between(&self, first: Cell, second: Cell) -> Result<Coord> {
        for cell in [first, second] {
            if !self.contains_cell(cell) {
                return Err(MazeError::OutOfBounds {
                    coord: cell.to_coord(),
                    width: self.width,
                });
            }
        }

        if first.row.abs_diff(second.row) + first.col.abs_diff(second.col) != 1 {
            return Err(MazeError::InvalidNeighbor(first, second));
        }

        Ok(Coord::new(
            first.row + second.row + 1,
            first.col + second.col + 1,
        ))
    }

    /// Open grid positions one step away from `coord`, in up, right, down, left order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| coord.step(direction))
            .filter(move |next| self.tile(*next) == Some(Tile::Open))
    }

    /// Every grid coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..width).flat_map(move |row| (0..width).map(move |col| Coord::new(row, col)))
    }

    /// Rows of the doubled grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// Number of open grid positions.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == Tile::Open).count()
    }

    /// Number of open wall slots, that is, carved passages between logical cells.
    ///
    /// A freshly generated maze without extra paths has exactly `N^2 - 1` of them.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.coords()
            .filter(|coord| coord.is_wall_slot() && self.tile(*coord) == Some(Tile::Open))
            .count()
    }

    /// Opens a grid position, returning whether it was a wall before.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] if the coordinate falls outside the matrix.
    pub(crate) fn set_open(&mut self, coord: Coord) -> Result<bool> {
        let width = self.width;
        let tile = self
            .index(coord)
            .and_then(|index| self.tiles.get_mut(index))
            .ok_or(MazeError::OutOfBounds { coord, width })?;
        let was_wall = *tile == Tile::Wall;
        *tile = Tile::Open;

        Ok(was_wall)
    }

    /// Opens the grid position of a logical cell.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] if the cell is outside the logical space.
    pub(crate) fn open_cell(&mut self, cell: Cell) -> Result<Coord> {
        if !self.contains_cell(cell) {
            return Err(MazeError::OutOfBounds {
                coord: cell.to_coord(),
                width: self.width,
            });
        }

        let coord = cell.to_coord();
        let _ = self.set_open(coord)?;

        Ok(coord)
    }

    /// Opens the wall slot between two adjacent logical cells.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Maze::wall_between`].
    pub(crate) fn open_wall(&mut self, first: Cell, second: Cell) -> Result<Coord> {
        let coord = self.wall_between(first, second)?;
        let _ = self.set_open(coord)?;

        Ok(coord)
    }

    /// Closes a grid position again. Only tests need to carve walls back in.
    #[cfg(test)]
    pub(crate) fn set_wall(&mut self, coord: Coord) {
        if let Some(tile) = self
            .index(coord)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *tile = Tile::Wall;
        }
    }

    /// Builds a maze from rows of `#` (wall) and anything else (open).
    ///
    /// The rows must describe a square `(2N+1) x (2N+1)` grid.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Result<Self> {
        let size = rows.len().saturating_sub(1) / 2;
        let mut maze = Self::walled(size)?;

        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                if glyph != '#' {
                    let _ = maze.set_open(Coord::new(row, col))?;
                }
            }
        }

        Ok(maze)
    }

    /// Renders the maze with `path` overlaid as `-` characters.
    ///
    /// Coordinates of the path that fall outside the grid are ignored.
    #[must_use]
    pub fn render_with_path(&self, path: &[Coord]) -> String {
        let on_path: HashSet<Coord> = path.iter().copied().collect();
        let mut rendered = String::with_capacity(self.width * (self.width + 1));

        for (row, tiles) in self.rows().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                if on_path.contains(&Coord::new(row, col)) {
                    rendered.push('-');
                } else {
                    rendered.push(tile.glyph());
                }
            }
            rendered.push('\n');
        }

        rendered
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tiles in self.rows() {
            for tile in tiles {
                write!(formatter, "{}", tile.glyph())?;
            }
            writeln!(formatter)?;
        }

        Ok(())
    }
}
