use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::eval::evaluate;
use crate::board::Board;
use crate::types::{AiConfig, Difficulty, Player, Position};

const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// The artificial opponent: a configuration plus the random source that
/// drives the Easy-tier blunders.
#[derive(Clone)]
pub struct AiOpponent {
    config: AiConfig,
    rng: SmallRng,
}

impl AiOpponent {
    pub fn new(config: AiConfig) -> Self {
        Self::with_seed(config, entropy_seed())
    }

    /// Fixed-seed constructor for reproducible games.
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn player(&self) -> Player {
        self.config.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Picks this side's move on `board`; `None` iff it has no legal move.
    pub fn choose_move(&mut self, board: &Board) -> Option<Position> {
        choose_move(board, self.config.player, self.config.difficulty, &mut self.rng)
    }
}

/// Selects a move for `ai_player` at the given difficulty. Returns `None`
/// iff the side has no legal move.
///
/// Easy short-circuits to a uniformly random legal move with probability
/// 0.3 regardless of the position. Otherwise every candidate is searched to
/// the tier's depth and the best score wins, ties going to the first
/// candidate in row-major order.
pub fn choose_move<R: Rng>(
    board: &Board,
    ai_player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    let moves = board.legal_positions(ai_player);
    if moves.is_empty() {
        return None;
    }

    let chance = difficulty.random_move_chance();
    if chance > 0.0 && rng.random::<f64>() < chance {
        return Some(moves[rng.random_range(0..moves.len())]);
    }

    let depth = difficulty.search_depth();
    let mut best_move = moves[0];
    let mut best_score = MIN_SCORE;

    for mv in moves {
        let Some((child, _)) = board.apply(ai_player, mv) else {
            continue;
        };
        let score = minimax(&child, depth - 1, false, ai_player, MIN_SCORE, MAX_SCORE);
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }

    Some(best_move)
}

/// Minimax with alpha-beta pruning, scored from `ai_player`'s perspective.
///
/// A ply with no legal move is a forced pass: the side flips and a level of
/// depth is spent on the unchanged board. When neither side can move the
/// position is terminal and evaluates immediately. Pruning only skips
/// subtrees that cannot change the decision, so the selected move is
/// identical to an unpruned search.
pub fn minimax(
    board: &Board,
    depth: u8,
    maximizing: bool,
    ai_player: Player,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if depth == 0 {
        return evaluate(board, ai_player);
    }

    let to_move = if maximizing {
        ai_player
    } else {
        ai_player.opponent()
    };
    let moves = board.legal_positions(to_move);

    if moves.is_empty() {
        if board.legal_moves(to_move.opponent()) == 0 {
            return evaluate(board, ai_player);
        }
        return minimax(board, depth - 1, !maximizing, ai_player, alpha, beta);
    }

    if maximizing {
        let mut best = MIN_SCORE;
        for mv in moves {
            let Some((child, _)) = board.apply(to_move, mv) else {
                continue;
            };
            let score = minimax(&child, depth - 1, false, ai_player, alpha, beta);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = MAX_SCORE;
        for mv in moves {
            let Some((child, _)) = board.apply(to_move, mv) else {
                continue;
            };
            let score = minimax(&child, depth - 1, true, ai_player, alpha, beta);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9_7f4a_7c15)
}
