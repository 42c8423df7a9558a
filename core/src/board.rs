use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-shape grid of cells; only the cell statuses change after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(layout: &MineLayout) -> Self {
        let adjacency = layout.adjacency_grid();
        let cells = Array2::from_shape_fn(adjacency.dim(), |(row, col)| {
            let mut cell = Cell::new((row as Coord, col as Coord));
            cell.adjacency = adjacency[(row, col)];
            cell
        });
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.grid_index())
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.grid_index())
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_by_status(&self, status: CellStatus) -> Vec<Cell> {
        self.iter().filter(|cell| cell.status == status).copied().collect()
    }

    /// What the player sees: open cells show their value, flags `F`, closed cells `X`.
    pub fn player_view(&self) -> String {
        self.render(|cell| match cell.status {
            CellStatus::Open => digit(cell.adjacency),
            CellStatus::Flagged => 'F',
            CellStatus::Closed => 'X',
        })
    }

    /// Every adjacency value regardless of status, mines as `9`.
    pub fn solution_view(&self) -> String {
        self.render(|cell| digit(cell.adjacency))
    }

    fn render(&self, glyph: impl Fn(&Cell) -> char) -> String {
        let (rows, cols) = self.cells.dim();
        let mut out = String::with_capacity(rows * (cols * 2 + 1));
        for row in self.cells.rows() {
            for cell in row {
                out.push(glyph(cell));
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

/// Single-digit glyph for `adjacency`, `?` for counts a real board cannot produce.
fn digit(adjacency: Adjacency) -> char {
    char::from_digit(adjacency.value().into(), 10).unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn cells_know_their_position() {
        let board = board((2, 3), &[(0, 0)]);

        assert_eq!(board.size(), (2, 3));
        for cell in board.iter() {
            assert_eq!(board.get(cell.coords()), Some(cell));
        }
        assert_eq!(board.get((2, 0)), None);
        assert_eq!(board.get((0, 3)), None);
    }

    #[test]
    fn iterates_row_major() {
        let board = board((2, 2), &[(1, 1)]);
        let coords: Vec<_> = board.iter().map(Cell::coords).collect();

        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn solution_view_lists_every_value() {
        let board = board((2, 3), &[(0, 0)]);

        assert_eq!(board.solution_view(), "9 1 0 \n1 1 0 \n");
    }

    #[test]
    fn player_view_hides_closed_cells() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.get_mut((0, 1)).unwrap().status = CellStatus::Open;
        board.get_mut((0, 0)).unwrap().status = CellStatus::Flagged;

        assert_eq!(board.player_view(), "F 1 \nX X \n");
    }

    #[test]
    fn decoded_out_of_range_count_renders_as_unknown() {
        let mut board = board((1, 2), &[(0, 0)]);
        board.get_mut((0, 1)).unwrap().adjacency = Adjacency::Count(250);

        let decoded: Board = serde_json::from_value(serde_json::to_value(&board).unwrap()).unwrap();
        assert_eq!(decoded.solution_view(), "9 ? \n");
    }
}
