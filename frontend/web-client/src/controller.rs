//! Orchestrates the game from the client's side: submits actions, syncs the state back from the
//! server, and plays the bot's turns.
//!
//! Every action follows the same cycle: submit it, refetch the whole state, replace the store's
//! state (which re-renders it), and schedule the bot if it is now its turn.
//!
//! Timers are plain deadlines: whoever drives the controller waits until [`Controller::next_deadline`],
//! then calls [`Controller::fire_due_timers`].

use crate::api::GameApi;
use crate::error::{ClientError, UserInputError};
use crate::request_types::{PlayRequest, PlayerRequest};
use crate::response_types::GameId;
use crate::session::SessionContext;
use crate::store::StateStore;

use rand::Rng;
use std::time::Duration;
use ticket_to_ride::bot::{self, BotAction};
use ticket_to_ride::city::{CityRegistry, Point};
use ticket_to_ride::game_state::{GameState, PlayerId};
use ticket_to_ride::route::{PickOutcome, RouteClaim};
use ticket_to_ride::train_color::TrainColor;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub human_player: PlayerId,
    pub bot_player: PlayerId,
    /// How long to wait before the bot plays its turn.
    pub bot_delay: Duration,
    /// How long the bot's status message stays up once its action is done.
    pub status_clear_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            human_player: String::from("1"),
            bot_player: String::from("2"),
            bot_delay: Duration::from_millis(1500),
            status_clear_delay: Duration::from_millis(3200),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyncPhase {
    Idle,
    /// A request is in flight.
    AwaitingResponse,
    /// Nothing is in flight, but the bot will play once its deadline is reached.
    BotScheduled,
}

/// Receives the bot's transient status message. An empty message clears it.
pub trait Notifier {
    fn bot_status(&mut self, message: &str);
}

pub struct Controller<A: GameApi, R: Rng> {
    api: A,
    rng: R,
    config: ClientConfig,
    registry: CityRegistry,
    store: StateStore,
    session: Option<SessionContext>,
    notifier: Box<dyn Notifier>,
    phase: SyncPhase,
    bot_turn_at: Option<Instant>,
    clear_status_at: Option<Instant>,
}

impl<A: GameApi, R: Rng> Controller<A, R> {
    pub fn new(
        api: A,
        rng: R,
        config: ClientConfig,
        registry: CityRegistry,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            rng,
            config,
            registry,
            store: StateStore::new(),
            session: None,
            notifier,
            phase: SyncPhase::Idle,
            bot_turn_at: None,
            clear_status_at: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Starts a new game, dropping everything about the previous one.
    pub async fn create_game(&mut self) -> Result<GameId, ClientError> {
        self.phase = SyncPhase::AwaitingResponse;

        let game_id = match self.api.create_game().await {
            Ok(game_id) => game_id,
            Err(error) => {
                self.restore_phase();
                return Err(error);
            }
        };

        info!(%game_id, "game created");
        self.bot_turn_at = None;
        self.clear_status_at = None;
        self.store.clear();
        self.session = Some(SessionContext::new(game_id.clone()));

        self.after_action().await?;
        Ok(game_id)
    }

    /// Picks the city under `point` on the map, and plays the route once both ends are picked.
    pub async fn pick_point(&mut self, point: Point) -> Result<PickOutcome, ClientError> {
        let session = self.session.as_mut().ok_or(UserInputError::NoSession)?;
        let snapshot = self.store.snapshot();
        let edges = snapshot.as_deref().map_or(&[][..], GameState::edges);

        let outcome = session.selection.pick_point(point, &self.registry, edges);
        self.handle_pick(outcome).await
    }

    /// Same as [`Controller::pick_point`], picking a city by name.
    pub async fn pick_city(&mut self, city: &str) -> Result<PickOutcome, ClientError> {
        let session = self.session.as_mut().ok_or(UserInputError::NoSession)?;
        let snapshot = self.store.snapshot();
        let edges = snapshot.as_deref().map_or(&[][..], GameState::edges);

        let outcome = session.selection.pick_named(city, &self.registry, edges);
        self.handle_pick(outcome).await
    }

    async fn handle_pick(&mut self, outcome: PickOutcome) -> Result<PickOutcome, ClientError> {
        match outcome {
            PickOutcome::SameCity(_) => Err(UserInputError::SameCity.into()),
            PickOutcome::NoFreeRoute { from, to } => {
                Err(UserInputError::NoFreeRoute { from, to }.into())
            }
            PickOutcome::Resolved(claim) => {
                self.play_move(&claim).await?;
                Ok(PickOutcome::Resolved(claim))
            }
            outcome => Ok(outcome),
        }
    }

    /// Claims a route on behalf of the human player.
    ///
    /// If the server rejects the move, the state is not refetched.
    pub async fn play_move(&mut self, claim: &RouteClaim) -> Result<(), ClientError> {
        let request = PlayRequest {
            game_id: self.game_id()?,
            player_id: self.config.human_player.clone(),
            from: claim.from.clone(),
            to: claim.to.clone(),
            index: claim.index,
        };

        self.phase = SyncPhase::AwaitingResponse;
        if let Err(error) = self.api.play(&request).await {
            self.restore_phase();
            return Err(error);
        }

        self.after_action().await
    }

    /// Draws a train card for the human player, and returns its color.
    pub async fn buy_card(&mut self) -> Result<TrainColor, ClientError> {
        let request = self.human_request()?;

        self.phase = SyncPhase::AwaitingResponse;
        let drawn_color = match self.api.buy_train_card(&request).await {
            Ok(drawn_color) => drawn_color,
            Err(error) => {
                self.restore_phase();
                return Err(error);
            }
        };

        self.after_action().await?;
        Ok(drawn_color)
    }

    /// Swaps one of the human player's tickets.
    pub async fn swap_ticket(&mut self) -> Result<(), ClientError> {
        let request = self.human_request()?;

        self.phase = SyncPhase::AwaitingResponse;
        if let Err(error) = self.api.swap_tickets(&request).await {
            self.restore_phase();
            return Err(error);
        }

        self.after_action().await
    }

    /// Refetches the whole state, stores it, and schedules the bot if it is now its turn.
    ///
    /// Does nothing without a session.
    pub async fn after_action(&mut self) -> Result<(), ClientError> {
        let Ok(game_id) = self.game_id() else {
            self.restore_phase();
            return Ok(());
        };

        self.phase = SyncPhase::AwaitingResponse;
        let state = match self.api.get_state(&game_id).await {
            Ok(state) => state,
            Err(error) => {
                self.restore_phase();
                return Err(error);
            }
        };

        debug!(%game_id, turn = state.turn, finished = state.finished, "state refreshed");

        if state.is_turn_of(&self.config.bot_player) {
            if self.bot_turn_at.is_none() {
                self.bot_turn_at = Some(Instant::now() + self.config.bot_delay);
            }
        } else {
            self.bot_turn_at = None;
        }

        self.store.replace(state);
        self.restore_phase();
        Ok(())
    }

    /// Syncs the state back from the server without acting, e.g. after a failed refetch left the
    /// stored state behind the server's.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        if self.session.is_none() {
            return Err(UserInputError::NoSession.into());
        }

        self.after_action().await
    }

    /// The earliest moment at which [`Controller::fire_due_timers`] has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.bot_turn_at, self.clear_status_at) {
            (Some(bot_turn_at), Some(clear_status_at)) => Some(bot_turn_at.min(clear_status_at)),
            (bot_turn_at, clear_status_at) => bot_turn_at.or(clear_status_at),
        }
    }

    /// Clears the bot's status and plays the bot's turn, if their deadlines are reached.
    pub async fn fire_due_timers(&mut self) {
        let now = Instant::now();

        if self.clear_status_at.map_or(false, |deadline| deadline <= now) {
            self.clear_status_at = None;
            self.notifier.bot_status("");
        }

        if self.bot_turn_at.map_or(false, |deadline| deadline <= now) {
            self.bot_turn_at = None;
            self.play_bot_turn().await;
        }
    }

    /// Decides on the bot's action from the current state, and submits it.
    ///
    /// The bot's failures are only logged: the state is refetched no matter what.
    async fn play_bot_turn(&mut self) {
        let (Some(snapshot), Ok(game_id)) = (self.store.snapshot(), self.game_id()) else {
            self.restore_phase();
            return;
        };

        let Some(bot) = snapshot.player(&self.config.bot_player) else {
            warn!(bot_player = %self.config.bot_player, "bot is not part of the game");
            self.restore_phase();
            return;
        };

        let decision = bot::decide(bot, snapshot.edges(), &mut self.rng);
        info!(action = ?decision.action, "bot decided");

        self.clear_status_at = None;
        self.notifier.bot_status(&decision.status);

        let player_id = self.config.bot_player.clone();
        self.phase = SyncPhase::AwaitingResponse;

        let result = match decision.action {
            BotAction::Occupy(edge) => {
                self.api
                    .play(&PlayRequest {
                        game_id,
                        player_id,
                        from: edge.from,
                        to: edge.to,
                        index: edge.index,
                    })
                    .await
            }
            BotAction::BuyCard => self
                .api
                .buy_train_card(&PlayerRequest { game_id, player_id })
                .await
                .map(|_| ()),
            BotAction::SwapTicket => {
                self.api
                    .swap_tickets(&PlayerRequest { game_id, player_id })
                    .await
            }
        };

        if let Err(error) = result {
            warn!(%error, "bot action failed");
        }

        if let Err(error) = self.after_action().await {
            warn!(%error, "could not refresh the state after the bot's turn");
        }

        self.clear_status_at = Some(Instant::now() + self.config.status_clear_delay);
    }

    fn game_id(&self) -> Result<GameId, ClientError> {
        self.session
            .as_ref()
            .map(|session| session.game_id.clone())
            .ok_or_else(|| UserInputError::NoSession.into())
    }

    fn human_request(&self) -> Result<PlayerRequest, ClientError> {
        Ok(PlayerRequest {
            game_id: self.game_id()?,
            player_id: self.config.human_player.clone(),
        })
    }

    fn restore_phase(&mut self) {
        self.phase = if self.bot_turn_at.is_some() {
            SyncPhase::BotScheduled
        } else {
            SyncPhase::Idle
        };
    }
}
