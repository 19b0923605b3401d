use serde_repr::{Deserialize_repr, Serialize_repr};
use strum_macros::{Display, EnumIter};

/// Represents the different variants of train cards, and the colors of routes.
///
/// # JSON
/// Colors are serialized as an 8-bit unsigned integer, which is how the game server
/// numbers them. This also holds when a color is used as the key of a hand.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize_repr,
    Display,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize_repr,
)]
#[repr(u8)]
pub enum TrainColor {
    /// Also known as the *Locomotive*.
    /// This is a special color that matches with any other color.
    #[strum(serialize = "All")]
    Wild = 0,
    Blue = 1,
    Red = 2,
    Green = 3,
    Yellow = 4,
    White = 5,
    Pink = 6,
    Orange = 7,
    Black = 8,
}

impl TrainColor {
    /// Whether the current color is wild, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use ticket_to_ride::train_color::TrainColor;
    ///
    /// assert!(!TrainColor::Black.is_wild());
    /// assert!(TrainColor::Wild.is_wild());
    /// ```
    #[inline]
    pub fn is_wild(&self) -> bool {
        *self == TrainColor::Wild
    }

    /// The opposite of `is_wild`.
    #[inline]
    pub fn is_not_wild(&self) -> bool {
        !self.is_wild()
    }

    /// Name of the card face asset for this color, as in `trainCard_<name>.png`.
    ///
    /// Pink cards are drawn with the purple artwork.
    pub fn asset_name(&self) -> &'static str {
        match self {
            TrainColor::Wild => "all",
            TrainColor::Blue => "blue",
            TrainColor::Red => "red",
            TrainColor::Green => "green",
            TrainColor::Yellow => "yellow",
            TrainColor::White => "white",
            TrainColor::Pink => "purple",
            TrainColor::Orange => "orange",
            TrainColor::Black => "black",
        }
    }

    /// File name of the card face for an optional color, falling back to the card's back.
    pub fn card_image(color: Option<TrainColor>) -> String {
        format!(
            "trainCard_{}.png",
            color.map_or("back", |color| color.asset_name())
        )
    }
}
