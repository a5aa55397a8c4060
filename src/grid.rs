use crate::input::Direction;

/// One grid square in logical cell coordinates.
///
/// Coordinates are signed so a head that has left the board can still be
/// represented long enough to be classified as a wall collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dc, dr) = direction.unit_vector();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Returns true when `other` differs by exactly one step on exactly one axis.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.col - other.col).abs() + (self.row - other.row).abs() == 1
    }
}

/// Side length of the square N×N playing field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize(pub u16);

impl GridSize {
    /// Returns true when `cell` lies inside `[0, n) × [0, n)`.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        let n = i32::from(self.0);
        cell.col >= 0 && cell.row >= 0 && cell.col < n && cell.row < n
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.0) * usize::from(self.0)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let n = i32::from(self.0);
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell { col, row }))
    }
}

/// Converts a cell to the top-left pixel of its square.
///
/// Off-board cells saturate at zero; callers only pass cells they intend to draw.
#[must_use]
pub fn to_pixel(cell: Cell, cell_size: u32) -> (u32, u32) {
    let col = u32::try_from(cell.col).unwrap_or(0);
    let row = u32::try_from(cell.row).unwrap_or(0);
    (col.saturating_mul(cell_size), row.saturating_mul(cell_size))
}

/// Number of whole cells that fit across a board `board_width` pixels wide.
#[must_use]
pub fn cell_count(board_width: u32, cell_size: u32) -> u32 {
    board_width.checked_div(cell_size).unwrap_or(0)
}

/// Cell size that fits `grid_size` cells across `board_width` pixels.
#[must_use]
pub fn cell_size_for(board_width: u32, grid_size: GridSize) -> u32 {
    board_width.checked_div(u32::from(grid_size.0)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, GridSize, cell_count, cell_size_for, to_pixel};

    #[test]
    fn to_pixel_scales_both_axes() {
        assert_eq!(to_pixel(Cell::new(0, 0), 20), (0, 0));
        assert_eq!(to_pixel(Cell::new(3, 7), 20), (60, 140));
    }

    #[test]
    fn cell_count_truncates_partial_cells() {
        assert_eq!(cell_count(400, 20), 20);
        assert_eq!(cell_count(419, 20), 20);
        assert_eq!(cell_count(400, 0), 0);
    }

    #[test]
    fn cell_size_is_inverse_of_cell_count() {
        let size = cell_size_for(400, GridSize(20));
        assert_eq!(size, 20);
        assert_eq!(cell_count(400, size), 20);
        assert_eq!(cell_size_for(400, GridSize(0)), 0);
    }

    #[test]
    fn contains_rejects_every_edge_overflow() {
        let grid = GridSize(20);

        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
        assert!(!grid.contains(Cell::new(20, 5)));
        assert!(!grid.contains(Cell::new(5, 20)));
        assert!(!grid.contains(Cell::new(-1, 5)));
        assert!(!grid.contains(Cell::new(5, -1)));
    }

    #[test]
    fn offset_moves_one_step() {
        let cell = Cell::new(5, 5);

        assert_eq!(cell.offset(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.offset(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.offset(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.offset(Direction::Right), Cell::new(6, 5));
        assert!(cell.is_adjacent(cell.offset(Direction::Up)));
        assert!(!cell.is_adjacent(Cell::new(6, 6)));
    }

    #[test]
    fn cells_iterates_whole_board() {
        let grid = GridSize(4);
        let cells: Vec<Cell> = grid.cells().collect();

        assert_eq!(cells.len(), grid.total_cells());
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(3, 3)));
    }
}
