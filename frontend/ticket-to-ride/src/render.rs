//! Projection of a [`GameState`] into what the player sees: a textual panel, and a drawing of the map.
//!
//! Everything in here is a pure function of the snapshot. Actually displaying a [`Frame`] is left to the caller.

use crate::city::{CityRegistry, Point};
use crate::game_state::GameState;
use crate::train_color::TrainColor;

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

pub const CITY_MARKER_RADIUS: f64 = 8.0;
pub const ROUTE_LINE_WIDTH: f64 = 6.0;
const CITY_MARKER_COLOR: &str = "red";
const CITY_LABEL_OFFSET: f64 = 10.0;
const CITY_LABEL_FONT: &str = "12px Arial";

/// Color of the routes claimed by a given player.
///
/// Only players `"1"` and `"2"` are expected; anyone else is drawn in gray.
pub fn occupant_color(occupied_by: Option<&str>) -> &'static str {
    match occupied_by {
        Some("1") => "blue",
        Some("2") => "green",
        _ => "gray",
    }
}

/// Dimensions, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The image of the map drawn beneath everything else.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundMap {
    pub href: String,
    /// Size of the image file itself, regardless of how it is displayed.
    pub natural_size: Size,
}

/// The surface on which the map is drawn.
///
/// It always has the same dimensions as the background's natural size, so that city coordinates
/// line up with the background. The size is recomputed whenever the background is (re)loaded,
/// and whenever the viewport is resized.
#[derive(Clone, Debug, PartialEq)]
pub struct MapCanvas {
    background: BackgroundMap,
    size: Size,
}

impl MapCanvas {
    pub fn new(background: BackgroundMap) -> Self {
        let size = background.natural_size;
        Self { background, size }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> &BackgroundMap {
        &self.background
    }

    /// The background finished loading, and its natural size is now known.
    pub fn on_background_loaded(&mut self, natural_size: Size) {
        self.background.natural_size = natural_size;
        self.fit_to_background();
    }

    pub fn on_viewport_resized(&mut self) {
        self.fit_to_background();
    }

    fn fit_to_background(&mut self) {
        self.size = self.background.natural_size;
    }
}

/// A single element of the map drawing.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A claimed route.
    Route {
        from: Point,
        to: Point,
        stroke: &'static str,
    },
    /// The dot marking a city.
    CityMarker { center: Point },
    /// The name of a city, next to its marker.
    CityLabel { at: Point, text: String },
}

/// The whole map, ready to be displayed.
///
/// Shapes are listed in drawing order: claimed routes first, then city markers and labels on top.
///
/// # SVG
/// The [`Display`] implementation writes the drawing as a standalone SVG document.
#[derive(Clone, Debug, PartialEq)]
pub struct MapDrawing {
    pub size: Size,
    pub background: Option<String>,
    pub shapes: Vec<Shape>,
}

impl MapDrawing {
    pub fn routes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Route { .. }))
    }
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

impl Display for MapDrawing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Size { width, height } = self.size;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;

        if let Some(href) = &self.background {
            writeln!(
                f,
                r#"  <image href="{}" x="0" y="0" width="{width}" height="{height}"/>"#,
                escape_xml(href)
            )?;
        }

        for shape in &self.shapes {
            match shape {
                Shape::Route { from, to, stroke } => writeln!(
                    f,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{ROUTE_LINE_WIDTH}"/>"#,
                    from.x, from.y, to.x, to.y
                )?,
                Shape::CityMarker { center } => writeln!(
                    f,
                    r#"  <circle cx="{}" cy="{}" r="{CITY_MARKER_RADIUS}" fill="{CITY_MARKER_COLOR}" stroke="black"/>"#,
                    center.x, center.y
                )?,
                Shape::CityLabel { at, text } => writeln!(
                    f,
                    r#"  <text x="{}" y="{}" fill="black" style="font: {CITY_LABEL_FONT}">{}</text>"#,
                    at.x,
                    at.y,
                    escape_xml(text)
                )?,
            }
        }

        write!(f, "</svg>")
    }
}

/// Draws every city of the registry, and every claimed route between two known cities.
pub fn render_map(state: Option<&GameState>, registry: &CityRegistry, canvas: &MapCanvas) -> MapDrawing {
    let mut shapes = Vec::with_capacity(2 * registry.len());

    if let Some(state) = state {
        for edge in state.edges().iter().filter(|edge| edge.occupied) {
            if let (Some(from), Some(to)) = (registry.get(&edge.from), registry.get(&edge.to)) {
                shapes.push(Shape::Route {
                    from,
                    to,
                    stroke: occupant_color(edge.occupied_by.as_deref()),
                });
            }
        }
    }

    for (name, center) in registry.iter() {
        shapes.push(Shape::CityMarker { center });
        shapes.push(Shape::CityLabel {
            at: Point::new(center.x + CITY_LABEL_OFFSET, center.y),
            text: name.to_owned(),
        });
    }

    MapDrawing {
        size: canvas.size(),
        background: Some(canvas.background().href.clone()),
        shapes,
    }
}

/// The textual panel about the game, from the perspective of the human player.
pub struct Panel<'a> {
    state: &'a GameState,
    human_id: &'a str,
}

impl<'a> Panel<'a> {
    pub fn new(state: &'a GameState, human_id: &'a str) -> Self {
        Self { state, human_id }
    }
}

impl Display for Panel<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game ID: {}", self.state.id)?;
        writeln!(f, "Turn: {}", self.state.turn)?;
        writeln!(
            f,
            "Status: {}",
            if self.state.finished {
                "Finished"
            } else {
                "In progress"
            }
        )?;

        let human = self.state.player(self.human_id);

        writeln!(f, "Your tickets:")?;
        for ticket in human.into_iter().flat_map(|human| &human.tickets) {
            writeln!(f, "  - {ticket}")?;
        }

        write!(f, "Your hand:")?;
        for (color, count) in human.into_iter().flat_map(|human| &human.hand) {
            if *count > 0 {
                write!(
                    f,
                    "\n  - [{}] {color}: {count}",
                    TrainColor::card_image(Some(*color))
                )?;
            }
        }

        Ok(())
    }
}

/// Everything rendered from one snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub panel: String,
    pub map: MapDrawing,
}

/// Renders both the panel and the map for `state`.
pub fn render(
    state: &GameState,
    human_id: &str,
    registry: &CityRegistry,
    canvas: &MapCanvas,
) -> Frame {
    Frame {
        panel: Panel::new(state, human_id).to_string(),
        map: render_map(Some(state), registry, canvas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::tests::{edge, occupied_edge, player};
    use crate::game_state::{Board, GameId, Ticket};
    use crate::train_color::TrainColor::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn canvas() -> MapCanvas {
        MapCanvas::new(BackgroundMap {
            href: String::from("assets/map.png"),
            natural_size: Size::new(1000, 700),
        })
    }

    fn registry() -> CityRegistry {
        CityRegistry::from_iter([
            ("Boston", Point::new(10.0, 20.0)),
            ("Miami", Point::new(30.0, 40.0)),
            ("New York", Point::new(50.0, 60.0)),
        ])
    }

    fn state() -> GameState {
        let mut human = player("1", &[(Wild, 2), (Blue, 0), (Pink, 1)], &[]);
        human.tickets.push(Ticket {
            origin: String::from("Boston"),
            destination: String::from("Miami"),
            value: 12,
        });

        GameState {
            id: GameId::Text(String::from("42")),
            turn: 5,
            finished: false,
            players: smallvec![human, player("2", &[(Red, 7)], &[20])],
            board: Board {
                edges: vec![
                    occupied_edge("Boston", "New York", 0, Red, "1"),
                    edge("Boston", "Miami", 1, Wild),
                    occupied_edge("Miami", "New York", 2, Blue, "2"),
                    occupied_edge("Miami", "Boston", 3, Blue, "7"),
                    occupied_edge("Miami", "Atlantis", 4, Blue, "1"),
                ],
            },
        }
    }

    #[test]
    fn occupant_colors() {
        assert_eq!(occupant_color(Some("1")), "blue");
        assert_eq!(occupant_color(Some("2")), "green");
        assert_eq!(occupant_color(Some("3")), "gray");
        assert_eq!(occupant_color(None), "gray");
    }

    #[test]
    fn panel_shows_human_information_only() {
        let panel = Panel::new(&state(), "1").to_string();

        assert_eq!(
            panel,
            "Game ID: 42\n\
             Turn: 5\n\
             Status: In progress\n\
             Your tickets:\n  \
             - Boston → Miami (12 points)\n\
             Your hand:\n  \
             - [trainCard_all.png] All: 2\n  \
             - [trainCard_purple.png] Pink: 1"
        );
    }

    #[test]
    fn panel_of_finished_game() {
        let mut state = state();
        state.finished = true;

        let panel = Panel::new(&state, "1").to_string();
        assert!(panel.contains("Status: Finished"));
    }

    #[test]
    fn panel_without_human() {
        let panel = Panel::new(&state(), "9").to_string();

        assert!(panel.ends_with("Your tickets:\nYour hand:"));
    }

    #[test]
    fn map_draws_occupied_routes_then_cities() {
        let drawing = render_map(Some(&state()), &registry(), &canvas());

        assert_eq!(drawing.size, Size::new(1000, 700));
        assert_eq!(drawing.background.as_deref(), Some("assets/map.png"));
        assert_eq!(
            drawing.shapes,
            vec![
                Shape::Route {
                    from: Point::new(10.0, 20.0),
                    to: Point::new(50.0, 60.0),
                    stroke: "blue",
                },
                Shape::Route {
                    from: Point::new(30.0, 40.0),
                    to: Point::new(50.0, 60.0),
                    stroke: "green",
                },
                Shape::Route {
                    from: Point::new(30.0, 40.0),
                    to: Point::new(10.0, 20.0),
                    stroke: "gray",
                },
                Shape::CityMarker {
                    center: Point::new(10.0, 20.0)
                },
                Shape::CityLabel {
                    at: Point::new(20.0, 20.0),
                    text: String::from("Boston"),
                },
                Shape::CityMarker {
                    center: Point::new(30.0, 40.0)
                },
                Shape::CityLabel {
                    at: Point::new(40.0, 40.0),
                    text: String::from("Miami"),
                },
                Shape::CityMarker {
                    center: Point::new(50.0, 60.0)
                },
                Shape::CityLabel {
                    at: Point::new(60.0, 60.0),
                    text: String::from("New York"),
                },
            ]
        );
    }

    #[test]
    fn map_without_state_only_has_cities() {
        let drawing = render_map(None, &registry(), &canvas());

        assert_eq!(drawing.routes().count(), 0);
        assert_eq!(drawing.shapes.len(), 6);
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = state();

        assert_eq!(
            render(&state, "1", &registry(), &canvas()),
            render(&state, "1", &registry(), &canvas())
        );
    }

    #[test]
    fn canvas_follows_background_natural_size() {
        let mut canvas = canvas();
        assert_eq!(canvas.size(), Size::new(1000, 700));

        canvas.on_background_loaded(Size::new(1200, 800));
        assert_eq!(canvas.size(), Size::new(1200, 800));

        canvas.on_viewport_resized();
        assert_eq!(canvas.size(), Size::new(1200, 800));
    }

    #[test]
    fn map_to_svg() {
        let registry = CityRegistry::from_iter([("Saint <Louis>", Point::new(1.0, 2.0))]);
        let svg = render_map(None, &registry, &canvas()).to_string();

        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="700" viewBox="0 0 1000 700">
  <image href="assets/map.png" x="0" y="0" width="1000" height="700"/>
  <circle cx="1" cy="2" r="8" fill="red" stroke="black"/>
  <text x="11" y="2" fill="black" style="font: 12px Arial">Saint &lt;Louis&gt;</text>
</svg>"#
        );
    }

    #[test]
    fn escape_xml_only_allocates_when_needed() {
        assert!(matches!(escape_xml("Salt Lake City"), Cow::Borrowed("Salt Lake City")));
        assert_eq!(
            escape_xml(r#"A&B <"C'>"#),
            "A&amp;B &lt;&quot;C&apos;&gt;"
        );
    }

    #[test]
    fn route_to_svg() {
        let drawing = MapDrawing {
            size: Size::new(10, 10),
            background: None,
            shapes: vec![Shape::Route {
                from: Point::new(1.5, 2.0),
                to: Point::new(3.0, 4.0),
                stroke: "green",
            }],
        };

        assert_eq!(
            drawing.to_string(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\" viewBox=\"0 0 10 10\">\n  \
             <line x1=\"1.5\" y1=\"2\" x2=\"3\" y2=\"4\" stroke=\"green\" stroke-width=\"6\"/>\n\
             </svg>"
        );
    }
}
