//! WASM bindings for yut-core
//!
//! Wraps [`Game`] in a JavaScript-friendly API. Operations return the produced
//! events as a JS array, or throw with the refusal message.

use wasm_bindgen::prelude::*;

use crate::{BoardShape, Game, GameConfig, Phase, PieceId, Roll};

#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game. `shape` is "square", "pentagon" or "hexagon".
    #[wasm_bindgen(constructor)]
    pub fn new(shape: &str, teams: u8, pieces: u8) -> Result<WasmGame, JsError> {
        let shape: BoardShape = shape.parse().map_err(|e| JsError::new(&format!("{}", e)))?;
        let inner = Game::new(GameConfig::new(shape, teams, pieces)).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmGame { inner })
    }

    /// Record a throw given as its step count (1-5, or -1 for Back-Do)
    #[wasm_bindgen(js_name = rollSticks)]
    pub fn roll_sticks(&mut self, steps: i8) -> Result<JsValue, JsError> {
        let roll = Roll::from_steps(steps).ok_or_else(|| JsError::new(&format!("no roll moves {} steps", steps)))?;
        let events = self.inner.record_roll(roll).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&events)
    }

    /// Spend pending rolls in the given order (step counts)
    #[wasm_bindgen(js_name = reorderRolls)]
    pub fn reorder_rolls(&mut self, steps: Vec<i8>) -> Result<JsValue, JsError> {
        let order: Option<Vec<Roll>> = steps.into_iter().map(Roll::from_steps).collect();
        let order = order.ok_or_else(|| JsError::new("unknown roll in order"))?;
        let events = self.inner.reorder_rolls(order).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&events)
    }

    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, piece: u8) -> Result<JsValue, JsError> {
        let events = self
            .inner
            .select_piece(PieceId(piece))
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&events)
    }

    #[wasm_bindgen(js_name = decideGrouping)]
    pub fn decide_grouping(&mut self, accept: bool) -> Result<JsValue, JsError> {
        let events = self.inner.decide_grouping(accept).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&events)
    }

    pub fn restart(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.restart())
    }

    /// All pieces as { id, team, number, position, finished, leader, group_size }
    pub fn pieces(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.piece_views())
    }

    #[wasm_bindgen(js_name = playablePieces)]
    pub fn playable_pieces(&self) -> Vec<u8> {
        self.inner.playable_pieces().into_iter().map(|p| p.0).collect()
    }

    /// Landing square for `piece` with the next pending roll, or undefined
    #[wasm_bindgen(js_name = targetFor)]
    pub fn target_for(&self, piece: u8) -> Option<u8> {
        self.inner.target_for(PieceId(piece)).map(|p| p.0)
    }

    /// Pending rolls as step counts, next one first
    #[wasm_bindgen(js_name = pendingRolls)]
    pub fn pending_rolls(&self) -> Vec<i8> {
        self.inner.pending_rolls().iter().map(|r| r.steps()).collect()
    }

    /// "roll", "piece", "grouping" or "over"
    pub fn phase(&self) -> String {
        match self.inner.phase() {
            Phase::AwaitingRoll => "roll",
            Phase::AwaitingPiece => "piece",
            Phase::AwaitingGrouping(_) => "grouping",
            Phase::Over { .. } => "over",
        }
        .to_string()
    }

    /// Current team (0-based)
    #[wasm_bindgen(js_name = currentTeam)]
    pub fn current_team(&self) -> u8 {
        self.inner.current_team().0
    }

    /// Winning team (0-based), or undefined while the game is on
    pub fn winner(&self) -> Option<u8> {
        self.inner.winner().map(|t| t.0)
    }

    /// Board edges as a flat [from, to, from, to, ...] array
    pub fn edges(&self) -> Vec<u8> {
        self.inner
            .topology()
            .edges()
            .into_iter()
            .flat_map(|(from, to)| [from.0, to.0])
            .collect()
    }

    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.inner.topology().point_count()
    }
}
