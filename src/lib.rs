use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod game;
pub mod session;
pub mod types;

pub use ai::{AiOpponent, choose_move, evaluate};
pub use board::Board;
pub use game::Game;
pub use session::Session;
pub use types::{
    AiConfig, Cell, Difficulty, GameError, GameResult, GameState, Outcome, Player, Position,
    Status,
};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
