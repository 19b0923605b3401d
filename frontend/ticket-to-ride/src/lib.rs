//! Core of the _Ticket To Ride_ client: everything that does not need the network.
//!
//! The game server is the authority on rules. This crate only mirrors what it reports
//! ([`game_state`]), resolves clicks into moves ([`route`]), picks the bot's moves ([`bot`]),
//! and projects a snapshot into something to display ([`render`]).

pub mod bot;
pub mod city;
pub mod game_state;
pub mod render;
pub mod route;
pub mod train_color;

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate smallvec;
