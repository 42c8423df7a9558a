use kaboom_core::{CellStatus, EventLog, Game, GameConfig, RevealOutcome};
use rand::prelude::*;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub notifications: usize,
}

/// Plays one game by opening random closed cells until a mine goes off or the board is clear.
pub fn play_random(config: GameConfig, seed: u64) -> (bool, usize) {
    let mut game = Game::with_seed(config, seed);
    let log = EventLog::default();
    game.subscribe(log.listener());
    let mut rng = SmallRng::seed_from_u64(seed.rotate_left(32));

    while !game.check_win() {
        let closed = game.cells_by_status(CellStatus::Closed);
        let Some(cell) = closed.choose(&mut rng) else {
            break;
        };
        if game.select_space(cell.row, cell.col) == RevealOutcome::HitMine {
            game.reveal_mines(CellStatus::Open);
            break;
        }
    }

    let won = game.validate();
    log::debug!(
        "seed {}: {} with {} spaces remaining",
        seed,
        if won { "won" } else { "lost" },
        game.spaces_remaining()
    );
    (won, log.len())
}

pub fn run(config: GameConfig, games: u32, base_seed: u64) -> Summary {
    let mut summary = Summary::default();
    for offset in 0..games {
        let (won, notifications) = play_random(config, base_seed.wrapping_add(offset.into()));
        summary.games += 1;
        if won {
            summary.wins += 1;
        } else {
            summary.losses += 1;
        }
        summary.notifications += notifications;
    }
    log::info!(
        "Simulated {} games on {}: {} won, {} lost",
        summary.games,
        config,
        summary.wins,
        summary.losses
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaboom_core::Difficulty;

    #[test]
    fn every_game_ends_in_a_result() {
        let summary = run(Difficulty::Easy.config(), 25, 3);

        assert_eq!(summary.games, 25);
        assert_eq!(summary.wins + summary.losses, 25);
        assert!(summary.notifications >= 25);
    }

    #[test]
    fn single_safe_cell_games_are_reproducible() {
        let config = GameConfig::new(2, 2, 3).unwrap();

        assert_eq!(play_random(config, 11), play_random(config, 11));
    }
}
