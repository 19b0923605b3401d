//! Turns two picked cities into a concrete edge of the board that can be claimed.

use crate::city::{CityRegistry, Point};
use crate::game_state::Edge;

/// Returns the index of the first unoccupied edge connecting `origin` and `destination`, in either direction.
///
/// Parallel routes between the same two cities are equally valid to claim: the first one, in the
/// board's order, is returned.
///
/// # Example
/// ```
/// use ticket_to_ride::game_state::Edge;
/// use ticket_to_ride::route::resolve;
/// use ticket_to_ride::train_color::TrainColor;
///
/// let edges = vec![Edge {
///     from: String::from("Raleigh"),
///     to: String::from("Washington"),
///     index: 4,
///     color: TrainColor::Wild,
///     occupied: false,
///     occupied_by: None,
/// }];
///
/// assert_eq!(resolve("Washington", "Raleigh", &edges), Some(4));
/// assert_eq!(resolve("Washington", "Miami", &edges), None);
/// ```
pub fn resolve(origin: &str, destination: &str, edges: &[Edge]) -> Option<usize> {
    edges
        .iter()
        .find(|edge| !edge.occupied && edge.connects(origin, destination))
        .map(|edge| edge.index)
}

/// A move resolved from two picks, ready to be submitted to the server.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteClaim {
    pub from: String,
    pub to: String,
    pub index: usize,
}

/// What happened after a city was picked, see [`CitySelection::pick`].
#[derive(Clone, Debug, PartialEq)]
pub enum PickOutcome {
    /// The point did not land on any city. Nothing changed.
    Missed,
    /// The city is now the origin, and the destination is to be picked next.
    OriginSelected(String),
    /// The destination cannot be the same city as the origin. The origin stays selected.
    SameCity(String),
    /// A free route exists between the origin and the destination.
    Resolved(RouteClaim),
    /// No free route exists between the origin and the destination.
    NoFreeRoute { from: String, to: String },
}

/// Two-state machine picking an origin, then a destination.
///
/// Once a destination is picked, we go back to having no origin, whether a route was found or not.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CitySelection {
    #[default]
    NoOrigin,
    OriginSelected(String),
}

impl CitySelection {
    pub fn origin(&self) -> Option<&str> {
        match self {
            CitySelection::NoOrigin => None,
            CitySelection::OriginSelected(origin) => Some(origin.as_str()),
        }
    }

    /// Picks the city under `point`, if any. See [`CitySelection::pick`].
    pub fn pick_point(
        &mut self,
        point: Point,
        registry: &CityRegistry,
        edges: &[Edge],
    ) -> PickOutcome {
        match registry.hit_test(point) {
            Some(city) => {
                let city = city.to_owned();
                self.pick(&city, edges)
            }
            None => PickOutcome::Missed,
        }
    }

    /// Picks the city named `city`, if it is in the registry. See [`CitySelection::pick`].
    pub fn pick_named(&mut self, city: &str, registry: &CityRegistry, edges: &[Edge]) -> PickOutcome {
        if registry.contains(city) {
            self.pick(city, edges)
        } else {
            PickOutcome::Missed
        }
    }

    /// Feeds a picked city to the state machine.
    ///
    /// # Example
    /// ```
    /// use ticket_to_ride::route::{CitySelection, PickOutcome};
    ///
    /// let mut selection = CitySelection::default();
    ///
    /// assert_eq!(
    ///     selection.pick("Denver", &[]),
    ///     PickOutcome::OriginSelected(String::from("Denver"))
    /// );
    /// assert_eq!(
    ///     selection.pick("Denver", &[]),
    ///     PickOutcome::SameCity(String::from("Denver"))
    /// );
    /// assert_eq!(
    ///     selection.pick("Omaha", &[]),
    ///     PickOutcome::NoFreeRoute {
    ///         from: String::from("Denver"),
    ///         to: String::from("Omaha")
    ///     }
    /// );
    /// assert_eq!(selection, CitySelection::NoOrigin);
    /// ```
    pub fn pick(&mut self, city: &str, edges: &[Edge]) -> PickOutcome {
        match std::mem::take(self) {
            CitySelection::NoOrigin => {
                *self = CitySelection::OriginSelected(city.to_owned());
                PickOutcome::OriginSelected(city.to_owned())
            }
            CitySelection::OriginSelected(origin) if origin == city => {
                *self = CitySelection::OriginSelected(origin);
                PickOutcome::SameCity(city.to_owned())
            }
            CitySelection::OriginSelected(origin) => match resolve(&origin, city, edges) {
                Some(index) => PickOutcome::Resolved(RouteClaim {
                    from: origin,
                    to: city.to_owned(),
                    index,
                }),
                None => PickOutcome::NoFreeRoute {
                    from: origin,
                    to: city.to_owned(),
                },
            },
        }
    }
}
