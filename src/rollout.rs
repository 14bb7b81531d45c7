//! Random rollouts (game simulation) for position evaluation.
//!
//! A rollout clones the game and plays uniformly random legal moves until
//! the game ends or a depth cap is reached, then scores the result. The
//! score is always taken from black's perspective: every node statistic in
//! the search tree reads as "probability black wins from here", regardless
//! of whose turn it is at the node. Search and backpropagation rely on this
//! single fixed convention.

use crate::constants::{BLACK, ROLLOUT_DEPTH};
use crate::game::GameState;

/// Play random legal moves from `game` until it finishes or the depth cap
/// is hit, and return the final result from black's perspective: +1.0 black
/// won, -1.0 red won, 0.0 for a draw or an unfinished simulation.
pub fn rollout(game: &GameState, rng: &mut fastrand::Rng) -> f64 {
    let mut sim = game.clone();
    let mut depth = 0;
    while !sim.done && depth < ROLLOUT_DEPTH {
        let moves = sim.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = &moves[rng.usize(..moves.len())];
        sim.apply_move(mv).expect("random legal move applies cleanly");
        depth += 1;
    }
    sim.result_for(BLACK)
}
