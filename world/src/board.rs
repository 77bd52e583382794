//! Dense cell storage backing the authoritative board.

use scavenger_core::{Cell, CellCoord, GridView, Occupant, TileKind};

/// Row-major grid of cells owned by the world for the lifetime of one board.
///
/// Every mutation keeps two invariants: a cell holds at most one occupant, and
/// impassable cells never hold one.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Board {
    /// Allocates a board where every cell starts impassable and empty.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Cell::new(false, TileKind::Blocking(0)); capacity],
        }
    }

    pub(crate) fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.index(coord).and_then(|index| self.cells.get_mut(index))
    }

    /// Overwrites passability and tile of a single cell, dropping any occupant.
    pub(crate) fn reset_cell(&mut self, coord: CellCoord, passable: bool, tile: TileKind) {
        if let Some(cell) = self.cell_mut(coord) {
            *cell = Cell::new(passable, tile);
        }
    }

    /// Claims a vacant cell for `occupant`. Returns `false` without mutating when
    /// the cell is out of bounds, impassable, or already claimed.
    pub(crate) fn occupy(&mut self, coord: CellCoord, occupant: Occupant) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if cell.is_vacant() => {
                cell.set_occupant(Some(occupant));
                true
            }
            _ => false,
        }
    }

    /// Empties a cell, yielding whatever occupied it.
    pub(crate) fn vacate(&mut self, coord: CellCoord) -> Option<Occupant> {
        let cell = self.cell_mut(coord)?;
        let previous = cell.occupant();
        cell.set_occupant(None);
        previous
    }

    /// Moves the occupant of `from` into `to` in one step.
    ///
    /// Fails without mutating when `from` is empty or `to` is not vacant.
    pub(crate) fn transfer(&mut self, from: CellCoord, to: CellCoord) -> bool {
        let Some(occupant) = self.cell(from).and_then(Cell::occupant) else {
            return false;
        };
        if !self.cell(to).is_some_and(Cell::is_vacant) {
            return false;
        }

        let _ = self.vacate(from);
        self.occupy(to, occupant)
    }

    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.columns, self.rows)
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// All coordinates on the board in row-major order.
    pub(crate) fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
