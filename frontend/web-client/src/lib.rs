//! Client playing Ticket to Ride against a bot, on top of the game server's HTTP API.
//!
//! The [`controller::Controller`] drives everything: it submits the player's actions through a
//! [`api::GameApi`], keeps the [`store::StateStore`] in sync with the server, and plays the bot's turns.

pub mod api;
pub mod background;
pub mod config;
pub mod controller;
pub mod error;
pub mod http_api;
pub mod request_types;
pub mod response_types;
pub mod session;
pub mod store;
pub mod terminal;

#[cfg(test)]
mod fake_server;
