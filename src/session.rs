use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::ai::AiOpponent;
use crate::game::Game;
use crate::types::{AiConfig, Difficulty, GameError, GameResult, GameState, Player, Position};

/// Report returned from an AI turn. `elapsed_ms` is how long the search
/// actually took; the UI subtracts it from its cosmetic thinking delay and
/// never feeds it back into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiMoveReport {
    pub row: u8,
    pub col: u8,
    pub elapsed_ms: u32,
    pub state: GameState,
}

/// A running game: the current `Game` value, every predecessor state for
/// undo, and the AI opponent when one was requested.
pub struct Session {
    game: Game,
    history: Vec<Game>,
    ai: Option<AiOpponent>,
}

impl Session {
    pub fn new(ai: Option<AiConfig>) -> Self {
        Self {
            game: Game::new(),
            history: Vec::new(),
            ai: ai.map(AiOpponent::new),
        }
    }

    /// Fixed-seed variant for reproducible AI games.
    pub fn with_seeded_ai(config: AiConfig, seed: u64) -> Self {
        Self {
            game: Game::new(),
            history: Vec::new(),
            ai: Some(AiOpponent::with_seed(config, seed)),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> GameState {
        self.game.to_state()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.game.to_result()
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.game.legal_moves()
    }

    /// Applies a human move for the side to move.
    pub fn place(&mut self, row: u8, col: u8) -> Result<GameState, String> {
        if let Some(ai) = &self.ai
            && self.game.current_player() == ai.player()
            && !self.game.status().is_finished()
        {
            return Err("it is not the player's turn".to_string());
        }

        self.advance(Position::new(row, col))
            .map_err(|err| err.to_string())
    }

    /// Runs the AI's turn: selects a move, applies it, and reports the
    /// choice together with the measured search time.
    pub fn ai_move(&mut self) -> Result<AiMoveReport, String> {
        if self.game.status().is_finished() {
            return Err(GameError::GameFinished.to_string());
        }
        let board = self.game.board();
        let Some(ai) = &mut self.ai else {
            return Err("no AI opponent is configured".to_string());
        };
        if self.game.current_player() != ai.player() {
            return Err("it is not the AI's turn".to_string());
        }

        let started = Instant::now();
        let mv = ai
            .choose_move(&board)
            .ok_or_else(|| "AI could not select a move".to_string())?;
        let elapsed_ms = started.elapsed().as_millis() as u32;

        let state = self.advance(mv).map_err(|err| err.to_string())?;
        Ok(AiMoveReport {
            row: mv.row,
            col: mv.col,
            elapsed_ms,
            state,
        })
    }

    /// Restores the position before the last move; every consecutive AI
    /// reply is unwound too (a forced pass lets the AI move twice in a
    /// row), so undo always hands the turn back to the human. Returns
    /// `None` with the state unchanged when there is nothing to undo.
    pub fn undo(&mut self) -> Option<GameState> {
        self.game = self.history.pop()?;
        if let Some(ai) = &self.ai {
            while self.game.current_player() == ai.player() {
                match self.history.pop() {
                    Some(prev) => self.game = prev,
                    None => break,
                }
            }
        }
        Some(self.game.to_state())
    }

    #[cfg(test)]
    pub(crate) fn set_game_for_test(&mut self, game: Game) {
        self.game = game;
        self.history.clear();
    }

    fn advance(&mut self, pos: Position) -> Result<GameState, GameError> {
        let next = self.game.apply_move(pos)?;
        self.history.push(self.game);
        self.game = next;
        Ok(self.game.to_state())
    }
}

static SESSION: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, String>) -> Result<T, JsValue> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("session lock poisoned"))?;
    let session = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("no active game"))?;
    f(session).map_err(|err| JsValue::from_str(&err))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn parse_difficulty(name: &str) -> Result<Difficulty, JsValue> {
    match name {
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        other => Err(JsValue::from_str(&format!(
            "unknown difficulty: {other} (expected easy, normal, or hard)"
        ))),
    }
}

/// Starts a fresh game, replacing any session in progress. The AI, when
/// requested, plays white; the difficulty string is one of
/// `easy`/`normal`/`hard`.
#[wasm_bindgen]
pub fn new_game(vs_ai: bool, difficulty: &str) -> Result<JsValue, JsValue> {
    let ai = if vs_ai {
        Some(AiConfig {
            player: Player::White,
            difficulty: parse_difficulty(difficulty)?,
        })
    } else {
        None
    };

    let session = Session::new(ai);
    let state = session.state();
    let mut guard = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("session lock poisoned"))?;
    *guard = Some(session);
    to_js(&state)
}

#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let state = with_session(|session| session.place(row, col))?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    let report = with_session(|session| session.ai_move())?;
    to_js(&report)
}

#[wasm_bindgen]
pub fn undo() -> Result<JsValue, JsValue> {
    let state = with_session(|session| {
        session.undo().ok_or_else(|| "nothing to undo".to_string())
    })?;
    to_js(&state)
}

/// Legal destinations for the side to move, for hint highlighting.
#[wasm_bindgen]
pub fn legal_moves() -> Result<JsValue, JsValue> {
    let moves = with_session(|session| Ok(session.legal_moves()))?;
    to_js(&moves)
}

#[wasm_bindgen]
pub fn game_state() -> Result<JsValue, JsValue> {
    let state = with_session(|session| Ok(session.state()))?;
    to_js(&state)
}

/// Final result, or JS `null` while the game is still in progress.
#[wasm_bindgen]
pub fn game_result() -> Result<JsValue, JsValue> {
    let result = with_session(|session| Ok(session.result()))?;
    to_js(&result)
}
