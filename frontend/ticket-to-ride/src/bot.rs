//! Decision policy of the bot, which plays against the human.
//!
//! The policy only filters out moves that obviously cannot succeed: the server is the one
//! deciding whether a move is legal.

use crate::game_state::{Edge, Player};
use crate::train_color::TrainColor;

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use std::collections::BTreeSet;
use strum_macros::{Display, EnumIter};

/// A bot holding a ticket worth at least this many points never swaps tickets.
pub const BIG_TICKET_VALUE: i32 = 10;

/// The kinds of action amongst which the bot draws, before looking at the board.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum BotActionKind {
    Occupy,
    BuyCard,
    SwapTicket,
}

/// The single action the bot submits this turn.
#[derive(Clone, Debug, PartialEq)]
pub enum BotAction {
    /// Claim this edge.
    Occupy(Edge),
    /// Draw a train card.
    BuyCard,
    /// Swap one of the bot's tickets.
    SwapTicket,
}

/// A [`BotAction`], along with the status message shown while the bot plays it.
#[derive(Clone, Debug, PartialEq)]
pub struct BotDecision {
    pub action: BotAction,
    pub status: String,
}

/// Actions the player may draw from this turn.
///
/// Swapping tickets is off the table as soon as the player holds a ticket worth
/// [`BIG_TICKET_VALUE`] points or more.
pub fn eligible_actions(player: &Player) -> SmallVec<[BotActionKind; 3]> {
    let mut actions: SmallVec<[BotActionKind; 3]> =
        smallvec![BotActionKind::Occupy, BotActionKind::BuyCard];

    if !player
        .tickets
        .iter()
        .any(|ticket| ticket.value >= BIG_TICKET_VALUE)
    {
        actions.push(BotActionKind::SwapTicket);
    }

    actions
}

/// Whether a player holding cards of `affordable_colors` could pay for `edge`'s color.
///
/// Only colors are considered, not how many cards the route needs.
pub fn is_affordable(edge: &Edge, affordable_colors: &BTreeSet<TrainColor>) -> bool {
    if edge.color.is_wild() {
        affordable_colors.iter().any(TrainColor::is_not_wild)
    } else {
        affordable_colors.contains(&edge.color) || affordable_colors.contains(&TrainColor::Wild)
    }
}

/// All unoccupied edges that `player` could pay for, in the board's order.
pub fn claimable_edges<'a>(player: &Player, edges: &'a [Edge]) -> Vec<&'a Edge> {
    let affordable_colors: BTreeSet<TrainColor> = player.colors_with_cards().collect();

    edges
        .iter()
        .filter(|edge| !edge.occupied && is_affordable(edge, &affordable_colors))
        .collect()
}

/// Picks the bot's action for this turn.
///
/// The kind of action is drawn uniformly from [`eligible_actions`]. When drawing [`BotActionKind::Occupy`],
/// the edge is drawn uniformly from [`claimable_edges`]; if there are none, the bot buys a card instead.
///
/// # Example
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use ticket_to_ride::bot::{decide, BotAction};
/// use ticket_to_ride::game_state::Player;
///
/// let player = Player {
///     id: String::from("2"),
///     hand: Default::default(),
///     tickets: Vec::new(),
/// };
///
/// // Without any card nor edge, the bot cannot occupy anything.
/// let decision = decide(&player, &[], &mut StdRng::seed_from_u64(7));
/// assert!(matches!(decision.action, BotAction::BuyCard | BotAction::SwapTicket));
/// ```
pub fn decide<R: Rng + ?Sized>(player: &Player, edges: &[Edge], rng: &mut R) -> BotDecision {
    let actions = eligible_actions(player);
    let kind = *actions
        .choose(rng)
        .unwrap_or(&BotActionKind::BuyCard);

    match kind {
        BotActionKind::Occupy => match claimable_edges(player, edges).choose(rng) {
            Some(edge) => BotDecision {
                action: BotAction::Occupy((*edge).clone()),
                status: format!("Player {} is trying to occupy a route...", player.id),
            },
            None => BotDecision {
                action: BotAction::BuyCard,
                status: format!(
                    "Player {} cannot play, trying to buy a card...",
                    player.id
                ),
            },
        },
        BotActionKind::BuyCard => BotDecision {
            action: BotAction::BuyCard,
            status: format!("Player {} is buying a card...", player.id),
        },
        BotActionKind::SwapTicket => BotDecision {
            action: BotAction::SwapTicket,
            status: format!("Player {} is swapping a ticket...", player.id),
        },
    }
}
