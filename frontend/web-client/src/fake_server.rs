//! In-memory stand-in for the game server, enforcing just enough rules to exercise the client.

use crate::api::GameApi;
use crate::error::ClientError;
use crate::request_types::{PlayRequest, PlayerRequest};
use crate::response_types::GameId;

use async_trait::async_trait;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use smallvec::smallvec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use strum::IntoEnumIterator;
use ticket_to_ride::game_state::{Board, Edge, GameState, Player, Ticket};
use ticket_to_ride::train_color::TrainColor;
use uuid::Uuid;

pub(crate) struct FakeGameServer {
    games: DashMap<String, GameState>,
    calls: AtomicUsize,
    next_failure: Mutex<Option<ClientError>>,
}

fn ticket(origin: &str, destination: &str, value: i32) -> Ticket {
    Ticket {
        origin: String::from(origin),
        destination: String::from(destination),
        value,
    }
}

fn edge(from: &str, to: &str, index: usize, color: TrainColor) -> Edge {
    Edge {
        from: String::from(from),
        to: String::from(to),
        index,
        color,
        occupied: false,
        occupied_by: None,
    }
}

fn new_game(id: GameId) -> GameState {
    GameState {
        id,
        turn: 0,
        finished: false,
        players: smallvec![
            Player {
                id: String::from("1"),
                hand: [(TrainColor::Red, 2), (TrainColor::Wild, 1)].into_iter().collect(),
                tickets: vec![ticket("Boston", "Miami", 12)],
            },
            Player {
                id: String::from("2"),
                hand: [(TrainColor::Blue, 1)].into_iter().collect(),
                tickets: vec![ticket("Denver", "El Paso", 4)],
            },
        ],
        board: Board {
            edges: vec![
                edge("Boston", "New York", 0, TrainColor::Red),
                edge("Boston", "New York", 1, TrainColor::Yellow),
                edge("Denver", "Omaha", 2, TrainColor::Blue),
                edge("Chicago", "Omaha", 3, TrainColor::Wild),
                edge("Montréal", "Boston", 4, TrainColor::Green),
            ],
        },
    }
}

fn rejection(message: impl Into<String>) -> ClientError {
    ClientError::ServerRejection(message.into())
}

impl FakeGameServer {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            calls: AtomicUsize::new(0),
            next_failure: Mutex::new(None),
        }
    }

    /// How many requests were received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The next request fails with `error`, whatever it is.
    pub fn fail_next(&self, error: ClientError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }

    /// Edits a game behind the client's back.
    pub fn edit_game(&self, game_id: &GameId, edit: impl FnOnce(&mut GameState)) {
        edit(self.games.get_mut(&game_id.to_string()).unwrap().value_mut());
    }

    fn receive(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.next_failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// The game, as long as it is ongoing and `player_id`'s turn.
    fn game_for_turn(
        &self,
        game_id: &GameId,
        player_id: &str,
    ) -> Result<RefMut<'_, String, GameState>, ClientError> {
        let game = self
            .games
            .get_mut(&game_id.to_string())
            .ok_or_else(|| rejection("Game not found."))?;

        if game.finished {
            return Err(rejection("The game is over."));
        }

        if !game.is_turn_of(player_id) {
            return Err(rejection(format!("It is not player {player_id}'s turn.")));
        }

        Ok(game)
    }
}

#[async_trait]
impl GameApi for FakeGameServer {
    async fn create_game(&self) -> Result<GameId, ClientError> {
        self.receive()?;

        let game_id = Uuid::new_v4().to_string();
        self.games
            .insert(game_id.clone(), new_game(GameId::Text(game_id.clone())));

        Ok(GameId::Text(game_id))
    }

    async fn play(&self, request: &PlayRequest) -> Result<(), ClientError> {
        self.receive()?;

        let mut game = self.game_for_turn(&request.game_id, &request.player_id)?;
        let edge = game
            .board
            .edges
            .iter_mut()
            .find(|edge| edge.index == request.index)
            .filter(|edge| !edge.occupied && edge.connects(&request.from, &request.to))
            .ok_or_else(|| rejection("This route cannot be claimed."))?;

        edge.occupied = true;
        edge.occupied_by = Some(request.player_id.clone());
        game.turn += 1;

        Ok(())
    }

    async fn buy_train_card(&self, request: &PlayerRequest) -> Result<TrainColor, ClientError> {
        self.receive()?;

        let mut game = self.game_for_turn(&request.game_id, &request.player_id)?;
        let drawn_color = TrainColor::iter()
            .cycle()
            .nth(game.turn as usize)
            .unwrap();

        let player = game
            .players
            .iter_mut()
            .find(|player| player.id == request.player_id)
            .unwrap();
        *player.hand.entry(drawn_color).or_insert(0) += 1;
        game.turn += 1;

        Ok(drawn_color)
    }

    async fn swap_tickets(&self, request: &PlayerRequest) -> Result<(), ClientError> {
        self.receive()?;

        let mut game = self.game_for_turn(&request.game_id, &request.player_id)?;
        let player = game
            .players
            .iter_mut()
            .find(|player| player.id == request.player_id)
            .unwrap();
        player.tickets = vec![ticket("Seattle", "New York", 22)];
        game.turn += 1;

        Ok(())
    }

    async fn get_state(&self, game_id: &GameId) -> Result<GameState, ClientError> {
        self.receive()?;

        self.games
            .get(&game_id.to_string())
            .map(|game| game.value().clone())
            .ok_or_else(|| rejection("Game not found."))
    }
}
