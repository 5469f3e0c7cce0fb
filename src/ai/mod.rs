pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::{AiOpponent, choose_move};
