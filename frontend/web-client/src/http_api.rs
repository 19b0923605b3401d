//! [`GameApi`] over HTTP, talking JSON to the game server.

use crate::api::GameApi;
use crate::error::ClientError;
use crate::request_types::{PlayRequest, PlayerRequest};
use crate::response_types::{BuyTrainCardResponse, CreateGameResponse, GameId};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use ticket_to_ride::game_state::GameState;
use ticket_to_ride::train_color::TrainColor;
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/api";

const PLAY_FALLBACK: &str = "Unknown error";
const BUY_FALLBACK: &str = "Error buying card";
const SWAP_FALLBACK: &str = "Error swapping ticket";

pub struct HttpGameApi {
    client: Client,
    base_url: String,
}

impl HttpGameApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
        fallback: &str,
    ) -> Result<Response, ClientError> {
        let url = self.endpoint(path);
        debug!(%url, payload = %serde_json::to_string(payload).unwrap_or_default(), "POST");

        let response = self.client.post(url).json(payload).send().await?;
        reject_unless_success(response, fallback).await
    }
}

/// Turns a non-2xx response into a [`ClientError::ServerRejection`].
async fn reject_unless_success(response: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(error) => {
            debug!(%status, %error, "could not read the rejection's body");
            String::new()
        }
    };
    debug!(%status, %body, "request rejected");
    Err(ClientError::ServerRejection(rejection_message(&body, fallback)))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|error| ClientError::Network(error.to_string()))
}

/// The message to show for a rejected request, given the response's body.
///
/// The `error` field of a JSON object is preferred, then any JSON as-is, then the raw body.
/// An empty body yields `fallback`.
pub fn rejection_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => match fields.get("error") {
            Some(Value::String(error)) if !error.is_empty() => error.clone(),
            _ => Value::Object(fields).to_string(),
        },
        Ok(value) => value.to_string(),
        Err(_) if body.trim().is_empty() => fallback.to_owned(),
        Err(_) => body.to_owned(),
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn create_game(&self) -> Result<GameId, ClientError> {
        let url = self.endpoint("game/create");
        debug!(%url, "POST");

        let response = self.client.post(url).send().await?;
        let response = reject_unless_success(response, PLAY_FALLBACK).await?;
        let CreateGameResponse { game_id } = decode(response).await?;

        Ok(game_id)
    }

    async fn play(&self, request: &PlayRequest) -> Result<(), ClientError> {
        self.post_json("game/play", request, PLAY_FALLBACK).await?;
        Ok(())
    }

    async fn buy_train_card(&self, request: &PlayerRequest) -> Result<TrainColor, ClientError> {
        let response = self
            .post_json("game/buy-train-card", request, BUY_FALLBACK)
            .await?;
        let BuyTrainCardResponse { drawn_color } = decode(response).await?;

        Ok(drawn_color)
    }

    async fn swap_tickets(&self, request: &PlayerRequest) -> Result<(), ClientError> {
        self.post_json("game/swap-tickets", request, SWAP_FALLBACK)
            .await?;
        Ok(())
    }

    async fn get_state(&self, game_id: &GameId) -> Result<GameState, ClientError> {
        let url = self.endpoint("game/state");
        debug!(%url, %game_id, "GET");

        let response = self
            .client
            .get(url)
            .query(&[("game_id", game_id.to_string())])
            .send()
            .await?;
        let response = reject_unless_success(response, PLAY_FALLBACK).await?;

        decode(response).await
    }
}
