use std::fmt;

use serde::Serialize;

const BOARD_WIDTH: u8 = 8;

/// Disc color, also the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Returns the other side. Total and involutive.
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// Wire code used in state snapshots: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Wire code used in state snapshots: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

/// A board coordinate, row-major, both axes 0..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_WIDTH && self.col < BOARD_WIDTH
    }

    /// Flat index 0..64. Caller contract: `in_bounds` holds.
    pub(crate) fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH as usize + self.col as usize
    }

    pub(crate) fn from_index(index: usize) -> Position {
        Position {
            row: (index / BOARD_WIDTH as usize) as u8,
            col: (index % BOARD_WIDTH as usize) as u8,
        }
    }
}

/// Final standing of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl Outcome {
    /// Wire code used in result snapshots: 0=draw, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Draw => 0,
            Outcome::BlackWins => 1,
            Outcome::WhiteWins => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Finished(Outcome),
}

impl Status {
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Finished(_))
    }
}

/// AI strength tier. Maps to a fixed search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn search_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Probability of ignoring the search result for a random legal move.
    /// Non-zero only on Easy, independent of the position.
    pub fn random_move_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Normal | Difficulty::Hard => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiConfig {
    pub player: Player,
    pub difficulty: Difficulty,
}

/// Recoverable failures of the single mutating entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Out of range, occupied target, or no direction captures.
    IllegalMove,
    /// A move was attempted after the game reached a terminal position.
    GameFinished,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove => write!(f, "illegal move"),
            GameError::GameFinished => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for GameError {}

/// Public game state snapshot handed across the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous move forced the opponent to pass.
    /// - `false` otherwise.
    pub is_pass: bool,
    /// Contract:
    /// - After a move: list of flipped positions (0..=63). A move that
    ///   forced a pass keeps its own flips, with `is_pass` set alongside.
    /// - Opening state: an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
