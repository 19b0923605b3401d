//! The seam between the client and the game server.

use crate::error::ClientError;
use crate::request_types::{PlayRequest, PlayerRequest};
use crate::response_types::GameId;

use async_trait::async_trait;
use ticket_to_ride::game_state::GameState;
use ticket_to_ride::train_color::TrainColor;

/// Every action the game server exposes.
///
/// The server is the only authority on rules: any action may be rejected with a
/// [`ClientError::ServerRejection`].
#[async_trait]
pub trait GameApi {
    /// `POST /game/create`: starts a new game, and returns its ID.
    async fn create_game(&self) -> Result<GameId, ClientError>;

    /// `POST /game/play`: claims a route.
    async fn play(&self, request: &PlayRequest) -> Result<(), ClientError>;

    /// `POST /game/buy-train-card`: draws a train card, and returns its color.
    async fn buy_train_card(&self, request: &PlayerRequest) -> Result<TrainColor, ClientError>;

    /// `POST /game/swap-tickets`: swaps one of the player's tickets.
    async fn swap_tickets(&self, request: &PlayerRequest) -> Result<(), ClientError>;

    /// `GET /game/state`: the full state of the game.
    async fn get_state(&self, game_id: &GameId) -> Result<GameState, ClientError>;
}
