use serde::Deserialize;
pub use ticket_to_ride::game_state::GameId;
use ticket_to_ride::train_color::TrainColor;

/// Response of `POST /game/create`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct CreateGameResponse {
    pub game_id: GameId,
}

/// Response of a successful `POST /game/buy-train-card`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct BuyTrainCardResponse {
    pub drawn_color: TrainColor,
}
