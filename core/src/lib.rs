//! Minesweeper board engine: mine placement, adjacency counts, flood-fill reveal and
//! win/loss detection.
//!
//! A [`Game`] is driven by an external collaborator (usually a UI) that issues commands
//! and listens for [`GameEvent`]s:
//!
//! ```
//! use kaboom_core::*;
//!
//! let mut game = Game::with_seed(Difficulty::Easy.config(), 7);
//! let log = EventLog::default();
//! game.subscribe(log.listener());
//!
//! if game.select_space(0, 0) == RevealOutcome::HitMine {
//!     game.reveal_mines(CellStatus::Open);
//! }
//! assert!(!log.is_empty());
//! ```

use core::ops::BitOr;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod event;
mod generator;
mod layout;
mod types;

/// Whether a flag or status command touched any cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Several status changes count as a change if any of them did
impl BitOr for MarkOutcome {
    type Output = MarkOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        if self.has_update() || rhs.has_update() {
            Self::Changed
        } else {
            Self::NoChange
        }
    }
}

/// Result of [`Game::select_space`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
