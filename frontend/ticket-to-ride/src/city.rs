//! Where cities are drawn on the background map, and which city a click lands on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A click only lands on a city if it is strictly closer than 8 pixels to its center.
pub const HIT_RADIUS_SQUARED: f64 = 64.0;

/// A position on the background map, in pixels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Read-only mapping of a city's name to its pixel coordinates on the background map.
///
/// # JSON
/// A registry is a JSON object whose keys are city names, e.g. `{"Denver": {"x": 360, "y": 320}}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CityRegistry {
    cities: BTreeMap<String, Point>,
}

/// Convenience macro to list cities with their coordinates.
macro_rules! cities {
    ($($name:literal => ($x:literal, $y:literal)),+ $(,)?) => {
        [$(($name, Point::new($x as f64, $y as f64))),+]
    };
}

lazy_static! {
    static ref US_MAP: CityRegistry = CityRegistry::from_iter(cities! {
        "Atlanta" => (760, 460),
        "Boston" => (930, 120),
        "Calgary" => (220, 50),
        "Charleston" => (850, 460),
        "Chicago" => (640, 250),
        "Dallas" => (520, 520),
        "Denver" => (360, 320),
        "Duluth" => (540, 160),
        "El Paso" => (350, 530),
        "Helena" => (310, 170),
        "Houston" => (560, 580),
        "Kansas City" => (520, 340),
        "Las Vegas" => (190, 400),
        "Little Rock" => (600, 440),
        "Los Angeles" => (120, 470),
        "Miami" => (900, 640),
        "Montréal" => (860, 60),
        "Nashville" => (700, 410),
        "New Orleans" => (650, 580),
        "New York" => (880, 200),
        "Oklahoma City" => (500, 430),
        "Omaha" => (500, 280),
        "Phoenix" => (250, 480),
        "Pittsburgh" => (780, 240),
        "Portland" => (70, 160),
        "Raleigh" => (840, 380),
        "Saint Louis" => (610, 340),
        "Salt Lake City" => (240, 300),
        "San Francisco" => (60, 350),
        "Santa Fe" => (360, 420),
        "Sault St. Marie" => (640, 110),
        "Seattle" => (90, 110),
        "Toronto" => (760, 140),
        "Vancouver" => (95, 60),
        "Washington" => (880, 300),
        "Winnipeg" => (430, 60),
    });
}

impl CityRegistry {
    /// The registry matching the default background map of the United States.
    pub fn us_map() -> &'static CityRegistry {
        &US_MAP
    }

    /// Parses a registry from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn get(&self, city: &str) -> Option<Point> {
        self.cities.get(city).copied()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// All cities with their coordinates, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.cities.iter().map(|(name, point)| (name.as_str(), *point))
    }

    /// Returns the city closest to `point`, as long as it is within the hit radius.
    ///
    /// # Example
    /// ```
    /// use ticket_to_ride::city::{CityRegistry, Point};
    ///
    /// let registry = CityRegistry::us_map();
    ///
    /// assert_eq!(registry.hit_test(Point::new(362.0, 318.0)), Some("Denver"));
    /// assert_eq!(registry.hit_test(Point::new(368.0, 320.0)), None);
    /// ```
    pub fn hit_test(&self, point: Point) -> Option<&str> {
        self.cities
            .iter()
            .map(|(name, city)| (name, city.distance_squared(&point)))
            .filter(|(_, distance_squared)| *distance_squared < HIT_RADIUS_SQUARED)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(name, _)| name.as_str())
    }
}

impl<N: Into<String>> FromIterator<(N, Point)> for CityRegistry {
    fn from_iter<I: IntoIterator<Item = (N, Point)>>(iter: I) -> Self {
        Self {
            cities: iter
                .into_iter()
                .map(|(name, point)| (name.into(), point))
                .collect(),
        }
    }
}
