//! Checkers-Rust: a 10x10 checkers engine with an MCTS agent.
//!
//! This crate provides the rules of international-style checkers (forced and
//! chained captures, promotion, the no-capture draw rule) together with a
//! Monte Carlo Tree Search agent that picks moves by random-rollout
//! simulation.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, piece encoding, and search parameters
//! - [`board`] - The 10x10 grid representation
//! - [`game`] - Game state, legal moves, capture chains, termination
//! - [`rollout`] - Random game simulation for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search with UCT selection
//!
//! ## Example
//!
//! ```
//! use checkers_rust::game::GameState;
//! use checkers_rust::mcts::SearchTree;
//!
//! // Create a new game
//! let mut game = GameState::new();
//!
//! // Run MCTS to pick a move for red
//! let mut search = SearchTree::with_seed(100, 42);
//! let mv = search.search(&game).unwrap();
//!
//! // Play it
//! let (_observation, _reward, done) = game.apply_move(&mv).unwrap();
//! assert!(!done);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod mcts;
pub mod rollout;
