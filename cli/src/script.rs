use std::str::FromStr;

use anyhow::{Context, Error, Result, bail};
use kaboom_core::{CellStatus, Coord, Game, GameState, MarkOutcome, RevealOutcome};

/// One collaborator command in a scripted game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Open(Coord, Coord),
    Flag(Coord, Coord),
    Cheat,
    Validate,
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let Some(action) = parts.next() else {
            bail!("empty move");
        };

        let mut coord = |axis: &str| -> Result<Coord> {
            parts
                .next()
                .with_context(|| format!("missing {axis} in {s:?}"))?
                .parse()
                .with_context(|| format!("invalid {axis} in {s:?}"))
        };

        let parsed = match action {
            "o" | "open" => Move::Open(coord("row")?, coord("column")?),
            "f" | "flag" => Move::Flag(coord("row")?, coord("column")?),
            "c" | "cheat" => Move::Cheat,
            "v" | "validate" => Move::Validate,
            other => bail!("unknown action {other:?}"),
        };

        if parts.next().is_some() {
            bail!("trailing input in {s:?}");
        }
        Ok(parsed)
    }
}

/// Parses a comma separated list like `o 0 0, f 1 2, v`.
pub fn parse_moves(script: &str) -> Result<Vec<Move>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Move>())
        .collect()
}

/// Plays `moves` in order and returns the resulting state.
///
/// Moves after the game has ended are skipped. A lost game, whether from a mine hit or a
/// failed validation, gets every mine opened.
pub fn apply_moves(game: &mut Game, moves: &[Move]) -> GameState {
    for &next in moves {
        if game.is_finished() {
            log::warn!("Game already ended, ignoring {:?}", next);
            continue;
        }
        match next {
            Move::Open(row, col) => {
                let outcome = game.select_space(row, col);
                log::info!("open ({}, {}): {}", row, col, describe_reveal(outcome));
                if outcome == RevealOutcome::HitMine {
                    game.reveal_mines(CellStatus::Open);
                }
            }
            Move::Flag(row, col) => {
                let outcome = game.toggle_flag(row, col);
                log::info!("flag ({}, {}): {}", row, col, describe_mark(outcome));
            }
            Move::Cheat => {
                let outcome = game.cheat();
                log::info!("cheat: {}", describe_mark(outcome));
            }
            Move::Validate => {
                let has_won = game.validate();
                log::info!("validate: {}", if has_won { "won" } else { "lost" });
                if !has_won {
                    game.reveal_mines(CellStatus::Open);
                }
            }
        }
    }
    game.state()
}

pub fn describe_reveal(outcome: RevealOutcome) -> &'static str {
    match outcome {
        RevealOutcome::NoChange => "nothing to open",
        RevealOutcome::Revealed => "opened",
        RevealOutcome::HitMine => "hit a mine",
    }
}

pub fn describe_mark(outcome: MarkOutcome) -> &'static str {
    match outcome {
        MarkOutcome::NoChange => "unchanged",
        MarkOutcome::Changed => "changed",
    }
}

#[cfg(test)]
mod tests {
    use kaboom_core::MineLayout;

    use super::*;

    /// 2x2 board with mines on the diagonal, both safe cells show `2`.
    fn diagonal_game() -> Game {
        Game::from_layout(MineLayout::from_mine_coords((2, 2), &[(0, 0), (1, 1)]).unwrap())
    }

    fn status(game: &Game, row: Coord, col: Coord) -> Option<CellStatus> {
        game.cell(row, col).map(|cell| cell.status)
    }

    #[test]
    fn parses_a_full_script() {
        let moves = parse_moves("o 0 0, flag 1 2,c , v,").unwrap();

        assert_eq!(
            moves,
            vec![Move::Open(0, 0), Move::Flag(1, 2), Move::Cheat, Move::Validate]
        );
    }

    #[test]
    fn rejects_malformed_moves() {
        assert!("o 1".parse::<Move>().is_err());
        assert!("o 1 x".parse::<Move>().is_err());
        assert!("o 1 300".parse::<Move>().is_err());
        assert!("v 1".parse::<Move>().is_err());
        assert!("jump".parse::<Move>().is_err());
    }

    #[test]
    fn mine_hit_opens_every_mine() {
        let mut game = diagonal_game();

        assert_eq!(apply_moves(&mut game, &[Move::Open(0, 0)]), GameState::Lost);
        assert_eq!(status(&game, 0, 0), Some(CellStatus::Open));
        assert_eq!(status(&game, 1, 1), Some(CellStatus::Open));
        assert_eq!(status(&game, 0, 1), Some(CellStatus::Closed));
    }

    #[test]
    fn failed_validation_opens_every_mine() {
        let mut game = diagonal_game();
        let moves = [Move::Flag(0, 1), Move::Validate];

        assert_eq!(apply_moves(&mut game, &moves), GameState::Lost);
        assert_eq!(status(&game, 0, 0), Some(CellStatus::Open));
        assert_eq!(status(&game, 1, 1), Some(CellStatus::Open));
        assert_eq!(status(&game, 0, 1), Some(CellStatus::Flagged));
    }

    #[test]
    fn flagging_the_mines_validates_as_won() {
        let mut game = diagonal_game();
        let moves = [Move::Flag(0, 0), Move::Flag(1, 1), Move::Validate];

        assert_eq!(apply_moves(&mut game, &moves), GameState::Won);
        assert_eq!(status(&game, 0, 0), Some(CellStatus::Flagged));
        assert_eq!(game.mines_left(), 0);
    }

    #[test]
    fn moves_after_the_end_are_skipped() {
        let mut game = diagonal_game();
        let moves = [Move::Cheat, Move::Validate, Move::Open(0, 1), Move::Flag(1, 0)];

        assert_eq!(apply_moves(&mut game, &moves), GameState::Won);
        assert_eq!(status(&game, 0, 1), Some(CellStatus::Closed));
        assert_eq!(status(&game, 1, 0), Some(CellStatus::Closed));
        assert_eq!(game.spaces_remaining(), 4);
    }
}
