//! Monte Carlo Tree Search over checkers positions.
//!
//! The search repeats four steps within an iteration or wall-clock budget:
//! - **Select**: descend from the root by UCT score until reaching a node
//!   with untried moves (or a terminal node).
//! - **Expand**: apply one untried move, chosen uniformly at random, to a
//!   clone of the node's game and append the resulting child.
//! - **Rollout**: play the child's position out with random moves and score
//!   it from black's perspective (see [`crate::rollout`]).
//! - **Backpropagate**: add the visit and the score along the parent chain.
//!
//! The chosen move is the root child with the most visits, which is robust
//! to the high variance of random rollouts. Nodes live in an arena `Vec`;
//! children and parents are indices into it, so the tree stays a strict
//! arborescence with no shared ownership.

use std::fmt;
use std::time::{Duration, Instant};

use crate::constants::{N_ITERATIONS, UCT_C};
use crate::game::{GameState, Move};
use crate::rollout::rollout;

/// Searching a position that has no moves to choose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The game is already decided; there is no move to return.
    NoLegalMoves,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalMoves => write!(f, "no legal moves to search"),
        }
    }
}

impl std::error::Error for SearchError {}

/// A node in the search arena.
///
/// Owns the game snapshot reached by `mv` and the statistics gathered below
/// it. `parent` is a non-owning index used only to read visit counts during
/// selection and to walk upward during backpropagation.
pub struct Node {
    /// Position after `mv` was applied (the root holds the searched position).
    pub game: GameState,
    /// Move that created this node; `None` for the root.
    pub mv: Option<Move>,
    /// Arena index of the parent; `None` for the root.
    pub parent: Option<usize>,
    /// Arena indices of expanded children.
    pub children: Vec<usize>,
    /// Number of rollouts propagated through this node.
    pub visits: u32,
    /// Sum of rollout rewards (black's perspective) propagated through here.
    pub wins: f64,
    /// Legal moves not yet expanded into children.
    pub untried: Vec<Move>,
}

impl Node {
    fn new(game: GameState, mv: Option<Move>, parent: Option<usize>) -> Self {
        let untried = game.legal_moves();
        Self {
            game,
            mv,
            parent,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            untried,
        }
    }

    /// Mean rollout reward at this node.
    pub fn win_rate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / f64::from(self.visits)
        } else {
            0.0
        }
    }
}

/// The grown search tree: an arena of nodes with the root at index 0.
pub struct Tree {
    /// All nodes; children/parents reference each other by index.
    pub nodes: Vec<Node>,
}

impl Tree {
    fn new(root: GameState) -> Self {
        Self {
            nodes: vec![Node::new(root, None, None)],
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// UCT score of the child at `idx`: mean reward plus the exploration
    /// bonus `c * sqrt(ln(parent visits) / visits)`. Only called on nodes
    /// that have been visited at least once.
    fn uct_score(&self, idx: usize, c: f64) -> f64 {
        let node = &self.nodes[idx];
        let parent_visits = node.parent.map_or(node.visits, |p| self.nodes[p].visits);
        node.wins / f64::from(node.visits)
            + c * (f64::from(parent_visits).ln() / f64::from(node.visits)).sqrt()
    }

    /// Descend from the root until hitting a terminal node or one that still
    /// has untried moves. Among fully expanded nodes the max-UCT child wins;
    /// ties go to the first-seen child (strict `>`).
    fn select(&self, c: f64) -> usize {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            if node.game.done || !node.untried.is_empty() || node.children.is_empty() {
                return idx;
            }
            let mut best = node.children[0];
            let mut best_score = self.uct_score(best, c);
            for &child in &node.children[1..] {
                let score = self.uct_score(child, c);
                if score > best_score {
                    best = child;
                    best_score = score;
                }
            }
            idx = best;
        }
    }

    /// Expand one untried move of `idx`, chosen uniformly at random, and
    /// return the new child's index.
    fn expand(&mut self, idx: usize, rng: &mut fastrand::Rng) -> usize {
        let pick = rng.usize(..self.nodes[idx].untried.len());
        let mv = self.nodes[idx].untried.swap_remove(pick);
        let mut game = self.nodes[idx].game.clone();
        game.apply_move(&mv).expect("untried moves are legal");
        let child_idx = self.nodes.len();
        self.nodes.push(Node::new(game, Some(mv), Some(idx)));
        self.nodes[idx].children.push(child_idx);
        child_idx
    }

    /// Add one visit and `result` to `idx` and every ancestor up to the root.
    fn backpropagate(&mut self, mut idx: usize, result: f64) {
        loop {
            let node = &mut self.nodes[idx];
            node.visits += 1;
            node.wins += result;
            match node.parent {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

    /// Move of the most-visited root child; ties go to the first-seen child.
    pub fn best_move(&self) -> Option<Move> {
        let mut best: Option<usize> = None;
        for &child in &self.root().children {
            if best.is_none_or(|b| self.nodes[child].visits > self.nodes[b].visits) {
                best = Some(child);
            }
        }
        best.and_then(|idx| self.nodes[idx].mv.clone())
    }
}

/// A configured Monte Carlo Tree Search.
///
/// The budget is either a fixed iteration count or a wall-clock limit; the
/// time limit takes precedence when set and is checked between iterations.
/// The random source is owned here and threaded through expansion and
/// rollouts, so a seeded search is fully reproducible.
pub struct SearchTree {
    /// Number of select/expand/rollout/backpropagate cycles to run.
    pub iterations: usize,
    /// Wall-clock budget; overrides `iterations` when set.
    pub time_limit: Option<Duration>,
    /// UCT exploration constant.
    pub exploration: f64,
    rng: fastrand::Rng,
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new(N_ITERATIONS)
    }
}

impl SearchTree {
    /// A search with a fixed iteration budget and a randomly seeded source.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            time_limit: None,
            exploration: UCT_C,
            rng: fastrand::Rng::new(),
        }
    }

    /// A reproducible search: fixed iteration budget and explicit seed.
    pub fn with_seed(iterations: usize, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            ..Self::new(iterations)
        }
    }

    /// A search bounded by wall-clock time instead of iterations.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
            ..Self::new(N_ITERATIONS)
        }
    }

    /// Pick the best move for the side to move in `game`.
    ///
    /// The caller's game is cloned into the root; search never mutates it.
    /// The tree is discarded once the move is chosen.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMoves`] if `game` is already finished.
    pub fn search(&mut self, game: &GameState) -> Result<Move, SearchError> {
        self.grow(game)?.best_move().ok_or(SearchError::NoLegalMoves)
    }

    /// Run the budgeted search loop and return the grown tree.
    ///
    /// This is the engine behind [`SearchTree::search`]; it is public so
    /// callers can audit visit counts and win rates of the root's children.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMoves`] if `game` is already finished.
    pub fn grow(&mut self, game: &GameState) -> Result<Tree, SearchError> {
        if game.done {
            return Err(SearchError::NoLegalMoves);
        }
        let mut tree = Tree::new(game.clone());
        let deadline = self.time_limit.map(|limit| Instant::now() + limit);
        let mut iters = 0;
        loop {
            match deadline {
                Some(end) => {
                    if Instant::now() >= end {
                        break;
                    }
                }
                None => {
                    if iters >= self.iterations {
                        break;
                    }
                }
            }

            let mut idx = tree.select(self.exploration);
            if !tree.nodes[idx].game.done && !tree.nodes[idx].untried.is_empty() {
                idx = tree.expand(idx, &mut self.rng);
            }
            let result = rollout(&tree.nodes[idx].game, &mut self.rng);
            tree.backpropagate(idx, result);
            iters += 1;
        }
        Ok(tree)
    }
}

/// Print per-move statistics for the root's children.
pub fn dump_children(tree: &Tree) {
    for &child in &tree.root().children {
        let node = &tree.nodes[child];
        if let Some(mv) = &node.mv {
            eprintln!(
                "move {} visits={} wins={:.1} rate={:.3}",
                mv,
                node.visits,
                node.wins,
                node.win_rate()
            );
        }
    }
}
