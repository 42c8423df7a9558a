use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game: the board, its mines and the open/flag state machine.
///
/// Every status change goes through [`Game::change_status`], which is also the only
/// source of [`GameEvent::CellChanged`] notifications.
#[derive(Debug)]
pub struct Game {
    board: Board,
    mines: Vec<Coord2>,
    mine_count: CellCount,
    spaces_remaining: CellCount,
    state: GameState,
    seed: Option<u64>,
    listeners: Listeners,
}

impl Game {
    /// Random layout from a fresh seed, see [`Game::seed`].
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let layout = RandomLayoutGenerator::new(seed).generate(config);
        let mut game = Self::from_layout(layout);
        game.seed = Some(seed);
        game
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        log::debug!("New game {}", config);
        Self {
            board: Board::new(&layout),
            mines: layout.mines().to_vec(),
            mine_count: config.mines(),
            spaces_remaining: config.total_cells(),
            state: GameState::default(),
            seed: None,
            listeners: Listeners::default(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> Coord {
        self.board.rows()
    }

    pub fn cols(&self) -> Coord {
        self.board.cols()
    }

    pub fn cell(&self, row: Coord, col: Coord) -> Option<Cell> {
        self.board.get((row, col)).copied()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Mines in placement order.
    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }

    pub fn spaces_remaining(&self) -> CellCount {
        self.spaces_remaining
    }

    /// Seed used to place the mines, `None` for layouts supplied by the caller.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        let flagged = self.board.iter().filter(|cell| cell.is_flagged()).count();
        self.mine_count as isize - flagged as isize
    }

    pub fn cells_by_status(&self, status: CellStatus) -> Vec<Cell> {
        self.board.cells_by_status(status)
    }

    /// Opens a closed cell, cascading through zero-adjacency regions.
    pub fn select_space(&mut self, row: Coord, col: Coord) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoChange;
        }

        let mut outcome = RevealOutcome::NoChange;
        let mut to_visit = vec![(row, col)];

        while let Some(coords) = to_visit.pop() {
            let Some(cell) = self.board.get(coords).copied() else {
                continue;
            };
            // the closed check doubles as the visited set
            if cell.status != CellStatus::Closed {
                continue;
            }

            self.change_status(coords.0, coords.1, CellStatus::Open);
            log::trace!("Opened {:?}, adjacency {}", coords, cell.adjacency);

            match cell.adjacency {
                Adjacency::Mine => {
                    log::debug!("Mine hit at {:?}", coords);
                    self.end_game(false);
                    return RevealOutcome::HitMine;
                }
                Adjacency::Count(0) => {
                    to_visit.extend(
                        self.board
                            .neighbors(coords)
                            .filter(|&pos| self.cell_status(pos) == Some(CellStatus::Closed)),
                    );
                }
                Adjacency::Count(_) => {}
            }
            outcome = RevealOutcome::Revealed;
        }

        if outcome.has_update() {
            log::debug!(
                "Opened from ({}, {}), {} spaces remaining",
                row,
                col,
                self.spaces_remaining
            );
        }
        outcome
    }

    /// Sets a cell's status and notifies listeners.
    ///
    /// No change happens when the cell is out of bounds, already in `status`, or open.
    pub fn change_status(&mut self, row: Coord, col: Coord, status: CellStatus) -> MarkOutcome {
        let Some(cell) = self.board.get_mut((row, col)) else {
            return MarkOutcome::NoChange;
        };
        if cell.status == status || cell.is_open() {
            return MarkOutcome::NoChange;
        }

        cell.status = status;
        let snapshot = *cell;
        if status == CellStatus::Open {
            self.spaces_remaining -= 1;
        }

        self.listeners.publish(&GameEvent::CellChanged {
            row,
            col,
            cell: snapshot,
        });
        MarkOutcome::Changed
    }

    /// Flags a closed cell or clears an existing flag. Open cells are left alone.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> MarkOutcome {
        match self.cell_status((row, col)) {
            Some(CellStatus::Closed) => self.change_status(row, col, CellStatus::Flagged),
            Some(CellStatus::Flagged) => self.change_status(row, col, CellStatus::Closed),
            Some(CellStatus::Open) | None => MarkOutcome::NoChange,
        }
    }

    /// Won when only mines are left closed, or when exactly the mines are flagged.
    pub fn check_win(&self) -> bool {
        if self.spaces_remaining == self.mine_count {
            return true;
        }

        let mut flagged: CellCount = 0;
        for cell in self.board.iter().filter(|cell| cell.is_flagged()) {
            if !cell.is_mine() {
                return false;
            }
            flagged += 1;
        }
        flagged == self.mine_count
    }

    /// Moves every mine to `status`, e.g. `Open` after a loss or `Flagged` when cheating.
    pub fn reveal_mines(&mut self, status: CellStatus) -> MarkOutcome {
        let mines = self.mines.clone();
        mines
            .into_iter()
            .map(|(row, col)| self.change_status(row, col, status))
            .fold(MarkOutcome::NoChange, core::ops::BitOr::bitor)
    }

    /// Replaces whatever flags are set with flags on exactly the mines.
    pub fn cheat(&mut self) -> MarkOutcome {
        let cleared = self
            .cells_by_status(CellStatus::Flagged)
            .into_iter()
            .map(|cell| self.change_status(cell.row, cell.col, CellStatus::Closed))
            .fold(MarkOutcome::NoChange, core::ops::BitOr::bitor);
        log::debug!("Cheat used");
        cleared | self.reveal_mines(CellStatus::Flagged)
    }

    /// Marks the game as finished. Only a loss is published to listeners.
    pub fn end_game(&mut self, has_won: bool) {
        if !self.finish(has_won) {
            return;
        }
        if !has_won {
            self.listeners.publish(&GameEvent::GameEnded { has_won });
        }
    }

    /// Checks the board on request of the player and ends the game with the result.
    ///
    /// Nothing is published either way; the caller acts on the returned value.
    pub fn validate(&mut self) -> bool {
        if self.is_finished() {
            return self.state == GameState::Won;
        }
        let has_won = self.check_win();
        self.finish(has_won);
        has_won
    }

    fn finish(&mut self, has_won: bool) -> bool {
        if self.state.is_finished() {
            return false;
        }
        self.state = if has_won {
            GameState::Won
        } else {
            GameState::Lost
        };
        log::debug!("Game ended, won: {}", has_won);
        true
    }

    fn cell_status(&self, coords: Coord2) -> Option<CellStatus> {
        self.board.get(coords).map(|cell| cell.status)
    }
}
