use crate::response_types::GameId;

use serde::Serialize;

/// Body of `POST /game/play`: claims the edge `index` between `from` and `to`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayRequest {
    pub game_id: GameId,
    pub player_id: String,
    pub from: String,
    pub to: String,
    pub index: usize,
}

/// Body of `POST /game/buy-train-card` and `POST /game/swap-tickets`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerRequest {
    pub game_id: GameId,
    pub player_id: String,
}
