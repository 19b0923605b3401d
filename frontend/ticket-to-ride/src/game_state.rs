//! Snapshot of a game, exactly as reported by the game server.
//!
//! The client never patches a [`GameState`]: every sync replaces it wholesale.

use crate::train_color::TrainColor;

use parse_display::Display;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt::{self, Formatter};

/// Games are played by two players: the human, and the bot.
pub const NUM_PLAYERS: usize = 2;

/// Identifies a player within a game, e.g. `"1"`.
pub type PlayerId = String;

/// Identifies a game on the server.
///
/// # JSON
/// The server is free to hand out either textual or numeric ids: they are sent back exactly as received.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GameId {
    Number(u64),
    Text(String),
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameId::Number(id) => write!(f, "{id}"),
            GameId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// How many cards of each color a player holds.
/// Colors that are absent from the mapping are held zero times.
pub type Hand = BTreeMap<TrainColor, u32>;

/// The server sends `null` rather than an empty list or object for some fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A scoring objective: connect two cities to be granted its value.
#[derive(Clone, Debug, Deserialize, Display, PartialEq, Serialize)]
#[display("{origin} → {destination} ({value} points)")]
pub struct Ticket {
    #[serde(rename = "X")]
    pub origin: String,
    #[serde(rename = "Y")]
    pub destination: String,
    #[serde(rename = "Value")]
    pub value: i32,
}

/// A player, along with their private hand and tickets.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Player {
    #[serde(rename = "ID")]
    pub id: PlayerId,
    #[serde(rename = "Hand", default, deserialize_with = "null_as_default")]
    pub hand: Hand,
    #[serde(rename = "Tickets", default, deserialize_with = "null_as_default")]
    pub tickets: Vec<Ticket>,
}

impl Player {
    /// How many cards of `color` the player holds.
    pub fn count(&self, color: TrainColor) -> u32 {
        self.hand.get(&color).copied().unwrap_or(0)
    }

    /// Colors of which the player holds at least one card, in color order.
    pub fn colors_with_cards(&self) -> impl Iterator<Item = TrainColor> + '_ {
        self.hand
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(color, _)| *color)
    }
}

/// A claimable route between two cities.
///
/// Parallel routes between the same two cities are distinct edges, told apart by their `index`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Unique amongst all the edges of a board.
    pub index: usize,
    /// The `Wild` color means that any color matches.
    pub color: TrainColor,
    #[serde(default)]
    pub occupied: bool,
    /// Set iff `occupied` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied_by: Option<PlayerId>,
}

impl Edge {
    /// Whether this edge connects `a` and `b`, regardless of direction.
    #[inline]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Board {
    #[serde(rename = "Edges", default, deserialize_with = "null_as_default")]
    pub edges: Vec<Edge>,
}

/// All the information about a game's current state, as returned by the server.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameState {
    #[serde(rename = "ID")]
    pub id: GameId,
    /// Monotonically increasing: whose turn it is is derived from it, see [`GameState::turn_index`].
    #[serde(rename = "Turn")]
    pub turn: u32,
    #[serde(rename = "Finished")]
    pub finished: bool,
    #[serde(rename = "Players")]
    pub players: SmallVec<[Player; NUM_PLAYERS]>,
    #[serde(rename = "Board", default)]
    pub board: Board,
}

impl GameState {
    /// Index in [`GameState::players`] of the player whose turn it is.
    ///
    /// This is `None` only if there are no players.
    pub fn turn_index(&self) -> Option<usize> {
        if self.players.is_empty() {
            None
        } else {
            Some(self.turn as usize % self.players.len())
        }
    }

    /// The player whose turn it is.
    pub fn turn_player(&self) -> Option<&Player> {
        self.turn_index().map(|index| &self.players[index])
    }

    /// Whether the game is ongoing, and it is `player_id`'s turn to play.
    pub fn is_turn_of(&self, player_id: &str) -> bool {
        !self.finished
            && self
                .turn_player()
                .map_or(false, |player| player.id == player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == player_id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.board.edges
    }
}
