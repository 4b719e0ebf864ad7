//! Random self-play.
//!
//! A playout drives a [`Game`] from setup to game over with uniformly random
//! legal choices. The clock is simulated: each selection advances it past the
//! stay delay so staying in place is always among the candidates.

use std::time::{Duration, Instant};

use log::debug;

use crate::game::{Game, Phase, RuleViolation};
use crate::scoring::Winner;

/// Upper bound on turns; every turn adds a wall, so real games end far sooner.
const MAX_TURNS: usize = 1000;

/// Play the game in its current state to the end and return the winner.
///
/// Returns `Ok(None)` only if no legal choice exists or the turn limit is hit.
pub fn random_playout(
    game: &mut Game,
    rng: &mut fastrand::Rng,
    start: Instant,
) -> Result<Option<Winner>, RuleViolation> {
    let step = game.config().stay_delay + Duration::from_millis(1);
    let mut now = start;

    if matches!(game.phase(), Phase::Setup { .. }) {
        game.randomize_setup()?;
    }

    for turn in 0..MAX_TURNS {
        if let Some(winner) = game.winner() {
            debug!("playout finished after {turn} turns");
            return Ok(Some(winner));
        }

        let player = game.current_player();
        let movable = game.movable_pieces(player);
        if movable.is_empty() {
            return Ok(None);
        }
        let piece = movable[rng.usize(..movable.len())];
        let Some(from) = game.board().piece(player, piece) else {
            return Ok(None);
        };
        game.click(from, now)?;

        now += step;
        game.update(now);
        let moves: Vec<_> = game.valid_moves().iter().copied().collect();
        if moves.is_empty() {
            return Ok(None);
        }
        game.click(moves[rng.usize(..moves.len())], now)?;

        let walls = game.legal_walls();
        if walls.is_empty() {
            return Ok(None);
        }
        game.place_wall(walls[rng.usize(..walls.len())])?;
    }

    Ok(game.winner())
}
