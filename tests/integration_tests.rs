//! Integration tests for checkers-rust.
//!
//! These exercise the rules engine and the search together through the
//! public API only: whole-game invariants, the draw rule over a real move
//! sequence, and search-driven play.

use checkers_rust::board::{Board, Coord};
use checkers_rust::constants::{BLACK, BLACK_KING, BOARD_SIZE, EMPTY, RED, RED_KING};
use checkers_rust::game::{GameState, Move};
use checkers_rust::mcts::{SearchError, SearchTree};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a game from an explicit piece placement.
fn game_on(pieces: &[(Coord, i8)], turn: i8) -> GameState {
    let mut game = GameState::new();
    game.board = Board::empty();
    game.turn = turn;
    for &(at, piece) in pieces {
        game.board.set(at, piece);
    }
    game
}

/// Assert the invariants that must hold in any live position.
fn assert_position_invariants(game: &GameState) {
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if (r + c) % 2 == 0 {
                assert_eq!(
                    game.board.get((r, c)),
                    EMPTY,
                    "light square ({r},{c}) must stay empty"
                );
            }
        }
    }
    if !game.done {
        let moves = game.legal_moves();
        assert!(!moves.is_empty(), "a live game always has a reply");
        if moves.iter().any(Move::is_capture) {
            assert!(
                moves.iter().all(Move::is_capture),
                "captures are mandatory: quiet moves may not coexist with captures"
            );
        }
    }
}

// =============================================================================
// Opening position
// =============================================================================

#[test]
fn test_opening_position() {
    let game = GameState::new();
    assert_eq!(game.board.count_side(RED), 20);
    assert_eq!(game.board.count_side(BLACK), 20);
    assert_eq!(game.turn, RED);
    assert!(!game.done);
    assert_eq!(game.winner, None);

    let moves = game.legal_moves();
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().all(|m| !m.is_capture()));
    assert_position_invariants(&game);
}

#[test]
fn test_opening_move_encodings_are_distinct() {
    let game = GameState::new();
    let moves = game.legal_moves();
    let mut keys: Vec<u32> = moves.iter().map(Move::encode).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), moves.len());
}

// =============================================================================
// Whole-game invariants under random play
// =============================================================================

#[test]
fn test_invariants_hold_through_random_game() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let mut game = GameState::new();
    let mut ply = 0;

    while !game.done && ply < 300 {
        assert_position_invariants(&game);
        let moves = game.legal_moves();
        let mv = moves[rng.usize(..moves.len())].clone();
        let piece_count =
            game.board.count_side(RED) + game.board.count_side(BLACK);

        let (_, reward, done) = game.apply_move(&mv).unwrap();
        assert_eq!(done, game.done);
        assert!(reward == 0.0 || reward == 1.0);

        // Captured pieces leave the board with the move that took them.
        let after = game.board.count_side(RED) + game.board.count_side(BLACK);
        assert_eq!(after, piece_count - mv.captures.len());
        for &cap in &mv.captures {
            assert_eq!(game.board.get(cap), EMPTY);
        }
        ply += 1;
    }

    if game.done {
        match game.winner {
            Some(0) => {
                assert_eq!(game.result_for(RED), 0.0);
                assert_eq!(game.result_for(BLACK), 0.0);
            }
            Some(side) => {
                assert_eq!(game.result_for(side), 1.0);
                assert_eq!(game.result_for(-side), -1.0);
            }
            None => panic!("a done game must have a winner or a draw"),
        }
    }
}

// =============================================================================
// Draw rule over a real move sequence
// =============================================================================

#[test]
fn test_eighty_quiet_half_moves_draw() {
    let mut game = game_on(&[((9, 0), RED_KING), ((0, 1), BLACK_KING)], RED);

    // Two kings shuttle in opposite corners; nothing is ever captured.
    let red_cycle = [((9, 0), (8, 1)), ((8, 1), (9, 0))];
    let black_cycle = [((0, 1), (1, 0)), ((1, 0), (0, 1))];

    let mut half_moves = 0;
    while !game.done {
        assert!(half_moves < 80, "the draw must trigger at 80 half-moves");
        let cycle = if game.turn == RED { &red_cycle } else { &black_cycle };
        let (from, to) = cycle[(half_moves / 2) % 2];
        let mv = Move::step(from, to);
        assert!(game.legal_moves().contains(&mv));
        game.apply_move(&mv).unwrap();
        half_moves += 1;
    }

    assert_eq!(half_moves, 80);
    assert_eq!(game.winner, Some(0));
    assert_eq!(game.result_for(RED), 0.0);
}

// =============================================================================
// Termination by exhaustion
// =============================================================================

#[test]
fn test_capturing_last_piece_wins() {
    let mut game = game_on(&[((5, 2), RED), ((4, 1), BLACK)], RED);
    let moves = game.legal_moves();
    assert_eq!(moves.len(), 1);
    assert!(moves[0].is_capture());

    let (_, reward, done) = game.apply_move(&moves[0]).unwrap();
    assert!(done);
    assert_eq!(reward, 1.0);
    assert_eq!(game.winner, Some(RED));
    assert_eq!(game.board.count_side(BLACK), 0);
}

#[test]
fn test_blocked_side_loses() {
    // Black's man sits on the bottom rank with nowhere to go.
    let mut game = game_on(&[((5, 2), RED), ((9, 0), BLACK)], RED);
    let mv = Move::step((5, 2), (4, 3));
    let (_, reward, done) = game.apply_move(&mv).unwrap();
    assert!(done);
    assert_eq!(reward, 1.0);
    assert_eq!(game.winner, Some(RED));
    assert_eq!(game.board.count_side(BLACK), 1, "the blocked piece stays on");
}

// =============================================================================
// Search-driven play
// =============================================================================

#[test]
fn test_search_move_survives_mutation_boundary() {
    let mut game = GameState::new();
    let mut search = SearchTree::with_seed(50, 17);

    // Legal-move lists are only valid until the next apply_move, so the
    // driver pattern is: search, apply, re-fetch.
    for _ in 0..4 {
        let legal_before = game.legal_moves();
        let mv = search.search(&game).unwrap();
        assert!(legal_before.contains(&mv));
        game.apply_move(&mv).unwrap();
    }
    assert_position_invariants(&game);
}

#[test]
fn test_search_does_not_touch_callers_game() {
    let game = GameState::new();
    let mut search = SearchTree::with_seed(40, 23);
    search.search(&game).unwrap();

    assert_eq!(game.board, Board::starting());
    assert_eq!(game.turn, RED);
    assert!(!game.done);
}

#[test]
fn test_search_on_decided_game_is_an_error() {
    let mut game = game_on(&[((5, 2), RED), ((4, 1), BLACK)], RED);
    let moves = game.legal_moves();
    game.apply_move(&moves[0]).unwrap();
    assert!(game.done);

    let mut search = SearchTree::with_seed(10, 1);
    assert_eq!(search.search(&game), Err(SearchError::NoLegalMoves));
}

#[test]
fn test_engine_finishes_endgame() {
    // Three pieces against a lone king: random-rollout search should at
    // least keep producing legal moves until the game resolves.
    let mut game = game_on(
        &[
            ((5, 2), RED),
            ((6, 3), RED_KING),
            ((7, 2), RED),
            ((2, 3), BLACK_KING),
        ],
        RED,
    );
    let mut search = SearchTree::with_seed(80, 31);

    let mut ply = 0;
    while !game.done && ply < 200 {
        let mv = search.search(&game).unwrap();
        game.apply_move(&mv).unwrap();
        assert_position_invariants(&game);
        ply += 1;
    }
    if game.done {
        assert!(game.winner.is_some());
    }
}
