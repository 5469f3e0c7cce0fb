use crate::board::Board;
use crate::types::{GameError, GameResult, GameState, Outcome, Player, Position, Status};

/// One game of Othello: the board, whose turn it is, and whether the game
/// has ended.
///
/// `Game` is a plain value. The single mutating operation, [`Game::apply_move`],
/// returns a new `Game` and leaves the receiver untouched, so callers can keep
/// old states around for undo or lookahead. Invariant: while the status is
/// `InProgress`, the current player always has at least one legal move
/// (forced passes are resolved inside the transition, never exposed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    status: Status,
    /// The previous transition skipped the opponent's turn.
    passed: bool,
    /// Mask of discs flipped by the last applied move.
    flipped: u64,
}

impl Game {
    /// Canonical opening position, black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            status: Status::InProgress,
            passed: false,
            flipped: 0,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.board.count()
    }

    /// Legal destinations for the side to move, row-major. Empty once the
    /// game is finished.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.status.is_finished() {
            return Vec::new();
        }
        self.board.legal_positions(self.current_player)
    }

    /// Applies a legal move for the current player and returns the resulting
    /// game. Resolves the turn per the rules:
    /// the turn goes to the opponent when they can answer, stays with the
    /// mover when only the opponent is stuck, and the game ends when neither
    /// side has a move.
    pub fn apply_move(&self, pos: Position) -> Result<Game, GameError> {
        if self.status.is_finished() {
            return Err(GameError::GameFinished);
        }

        let (board, flips) = self
            .board
            .apply(self.current_player, pos)
            .ok_or(GameError::IllegalMove)?;

        let opponent = self.current_player.opponent();
        let next = if board.legal_moves(opponent) != 0 {
            Game {
                board,
                current_player: opponent,
                status: Status::InProgress,
                passed: false,
                flipped: flips,
            }
        } else if board.legal_moves(self.current_player) != 0 {
            // Forced pass: the opponent is skipped and the mover goes again.
            Game {
                board,
                current_player: self.current_player,
                status: Status::InProgress,
                passed: true,
                flipped: flips,
            }
        } else {
            Game {
                board,
                current_player: opponent,
                status: Status::Finished(outcome_by_majority(&board)),
                passed: false,
                flipped: flips,
            }
        };

        Ok(next)
    }

    pub fn to_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_count,
            white_count,
            is_game_over: self.status.is_finished(),
            is_pass: self.passed,
            flipped: bitmask_to_indices(self.flipped),
        }
    }

    /// Final result snapshot; `None` while the game is still in progress.
    pub fn to_result(&self) -> Option<GameResult> {
        let Status::Finished(outcome) = self.status else {
            return None;
        };
        let (black_count, white_count) = self.board.count();
        Some(GameResult {
            winner: outcome.code(),
            black_count,
            white_count,
        })
    }

    /// Test-only entry for mid-game positions. Resolves passes and
    /// termination the same way `apply_move` does, so the in-progress
    /// invariant holds for constructed positions too.
    #[cfg(test)]
    pub(crate) fn with_position(board: Board, to_move: Player) -> Self {
        let (current_player, status) = if board.legal_moves(to_move) != 0 {
            (to_move, Status::InProgress)
        } else if board.legal_moves(to_move.opponent()) != 0 {
            (to_move.opponent(), Status::InProgress)
        } else {
            (to_move, Status::Finished(outcome_by_majority(&board)))
        };

        Self {
            board,
            current_player,
            status,
            passed: false,
            flipped: 0,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn outcome_by_majority(board: &Board) -> Outcome {
    let (black, white) = board.count();
    if black > white {
        Outcome::BlackWins
    } else if white > black {
        Outcome::WhiteWins
    } else {
        Outcome::Draw
    }
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BOARD: u64 = u64::MAX;

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * 8 + col)
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new();
        let state = game.to_state();

        assert_eq!(state.current_player, 1);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
        assert_eq!(game.to_result(), None);
    }

    #[test]
    fn illegal_move_returns_error_and_leaves_state_alone() {
        let game = Game::new();

        assert_eq!(game.apply_move(pos(0, 0)), Err(GameError::IllegalMove));
        assert_eq!(game.apply_move(pos(3, 3)), Err(GameError::IllegalMove));
        assert_eq!(game.apply_move(pos(9, 9)), Err(GameError::IllegalMove));
        assert_eq!(game.score(), (2, 2));
    }

    #[test]
    fn opening_move_flips_one_disc_and_passes_turn() {
        let game = Game::new();

        let next = game.apply_move(pos(2, 3)).unwrap();
        let state = next.to_state();

        assert_eq!(state.black_count, 4);
        assert_eq!(state.white_count, 1);
        assert_eq!(state.current_player, 2);
        assert!(!state.is_pass);
        assert_eq!(state.flipped, vec![27]); // (3,3)
        // The prior state is a distinct value, untouched by the move.
        assert_eq!(game.score(), (2, 2));
    }

    #[test]
    fn white_reply_includes_expected_capture() {
        let game = Game::new().apply_move(pos(2, 3)).unwrap();

        assert_eq!(game.current_player(), Player::White);
        assert!(game.legal_moves().contains(&pos(2, 2)));
    }

    #[test]
    fn forced_pass_keeps_current_player() {
        // Black to move: black (0,0), white (0,1) and (0,3). Playing (0,2)
        // flips (0,1); white is then stuck while black can still take (0,4).
        let board = Board::from_bitboards(bit(0, 0), bit(0, 1) | bit(0, 3));
        let game = Game::with_position(board, Player::Black);

        let next = game.apply_move(pos(0, 2)).unwrap();

        assert_eq!(next.current_player(), Player::Black);
        assert_eq!(next.status(), Status::InProgress);
        assert!(next.to_state().is_pass);
        assert_eq!(next.legal_moves(), vec![pos(0, 4)]);
    }

    #[test]
    fn pass_snapshot_keeps_the_triggering_moves_flips() {
        // The pass is folded into the move transition, so the snapshot
        // reports the move's captures together with the pass marker.
        let board = Board::from_bitboards(bit(0, 0), bit(0, 1) | bit(0, 3));
        let game = Game::with_position(board, Player::Black);

        let state = game.apply_move(pos(0, 2)).unwrap().to_state();

        assert!(state.is_pass);
        assert_eq!(state.flipped, vec![1]); // (0,1), flipped by the move itself
    }

    #[test]
    fn double_stall_finishes_with_majority_winner() {
        // Neither side can move: one white disc in a black sea.
        let board = Board::from_bitboards(FULL_BOARD ^ bit(0, 0), bit(0, 0));
        let game = Game::with_position(board, Player::Black);

        assert_eq!(game.status(), Status::Finished(Outcome::BlackWins));
        assert!(game.legal_moves().is_empty());
        let result = game.to_result().unwrap();
        assert_eq!(result.winner, 1);
        assert_eq!((result.black_count, result.white_count), (63, 1));
    }

    #[test]
    fn packed_board_with_even_split_is_a_draw() {
        let black = (1u64 << 32) - 1;
        let board = Board::from_bitboards(black, !black);
        let game = Game::with_position(board, Player::White);

        assert_eq!(game.status(), Status::Finished(Outcome::Draw));
        assert_eq!(game.to_result().unwrap().winner, 0);
    }

    #[test]
    fn move_after_finish_is_rejected() {
        let board = Board::from_bitboards(FULL_BOARD ^ bit(0, 0), bit(0, 0));
        let game = Game::with_position(board, Player::Black);

        assert_eq!(game.apply_move(pos(0, 0)), Err(GameError::GameFinished));
    }

    #[test]
    fn finishing_move_sets_game_over() {
        // White mops up the last empty square and owns the whole board.
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let game = Game::with_position(Board::from_bitboards(black, white), Player::White);

        let next = game.apply_move(pos(0, 0)).unwrap();
        let state = next.to_state();

        assert!(state.is_game_over);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 64);
        assert_eq!(state.flipped, vec![1]);
        assert_eq!(next.to_result().unwrap().winner, 2);
    }

    #[test]
    fn disc_conservation_holds_across_a_full_game() {
        // Drive a whole game with the first legal move; the sum of discs and
        // empties must stay 64 at every step and the game must terminate.
        let mut game = Game::new();
        let mut plies = 0;

        while game.status() == Status::InProgress {
            let mv = game.legal_moves()[0];
            game = game.apply_move(mv).unwrap();

            let (black, white) = game.score();
            let empty = game.board().empty_count();
            assert_eq!(black as u16 + white as u16 + empty as u16, 64);

            plies += 1;
            assert!(plies <= 60, "game did not terminate");
        }

        assert!(game.to_result().is_some());
    }
}
