use crate::error::ConfigError;

/// Grid cell in logical coordinates.
///
/// Signed so that the cell one step past an edge is still representable and
/// can be rejected by [`GridSize::is_inside`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Logical grid dimensions, fixed for the whole session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

impl GridSize {
    /// Creates a grid with explicit dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] when either dimension is zero.
    pub fn new(rows: u16, cols: u16) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid {
                width: cols,
                height: rows,
                cell_width: 1,
                cell_height: 1,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Derives the grid from the available display area divided by a fixed
    /// cell size, flooring both axes.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the cell size is zero or when the area is too small
    /// to hold a single cell on either axis.
    pub fn from_display(
        width: u16,
        height: u16,
        cell_width: u16,
        cell_height: u16,
    ) -> Result<Self, ConfigError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(ConfigError::ZeroCellSize {
                width: cell_width,
                height: cell_height,
            });
        }
        let cols = width / cell_width;
        let rows = height / cell_height;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid {
                width,
                height,
                cell_width,
                cell_height,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub fn dimensions(self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    /// Returns true when `position` lies inside the grid.
    #[must_use]
    pub fn is_inside(self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && position.row < i32::from(self.rows)
            && position.col < i32::from(self.cols)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }
}
