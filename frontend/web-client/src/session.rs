use crate::response_types::GameId;

use ticket_to_ride::route::CitySelection;

/// Everything tied to one game: starting a new game starts over from a fresh context.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionContext {
    pub game_id: GameId,
    pub selection: CitySelection,
}

impl SessionContext {
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            selection: CitySelection::default(),
        }
    }
}
