//! Playing from a terminal: commands are read from stdin, and the map is written as an SVG file.

use crate::api::GameApi;
use crate::background::load_background;
use crate::controller::{Controller, Notifier};
use crate::error::ClientError;
use crate::store::StateObserver;

use colored::Colorize;
use parse_display::{Display, FromStr};
use rand::Rng;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use ticket_to_ride::city::{CityRegistry, Point};
use ticket_to_ride::game_state::GameState;
use ticket_to_ride::render::{self, MapCanvas};
use ticket_to_ride::route::PickOutcome;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  create        start a new game
  click X Y     pick the city at pixel (X, Y) of the map
  pick CITY     pick a city by name
  buy           buy a train card
  swap          swap one of your tickets
  refresh       fetch the game from the server again
  show          print the game again
  resize        fit the map to its background again
  cities        list the cities of the map
  help          print this message
  quit          leave";

#[derive(Clone, Debug, Display, FromStr, PartialEq)]
#[display(style = "snake_case")]
pub enum Command {
    Create,
    #[display("click {x} {y}")]
    Click { x: f64, y: f64 },
    #[display("pick {0}")]
    Pick(String),
    Buy,
    Swap,
    Refresh,
    Show,
    Resize,
    Cities,
    Help,
    Quit,
}

/// Prints the bot's status messages.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn bot_status(&mut self, message: &str) {
        if message.is_empty() {
            debug!("bot status cleared");
        } else {
            println!("{}", message.yellow());
        }
    }
}

/// Shows the game: the panel goes to stdout, the map to an SVG file.
///
/// The SVG is only written by [`write_pending_map`], outside of the store's notifications.
pub struct TerminalView {
    registry: CityRegistry,
    canvas: MapCanvas,
    human_id: String,
    svg_out: PathBuf,
    pending_map: Option<String>,
}

impl TerminalView {
    pub fn new(registry: CityRegistry, canvas: MapCanvas, human_id: String, svg_out: PathBuf) -> Self {
        Self {
            registry,
            canvas,
            human_id,
            svg_out,
            pending_map: None,
        }
    }

    pub fn canvas_mut(&mut self) -> &mut MapCanvas {
        &mut self.canvas
    }

    pub fn show(&mut self, state: Option<&GameState>) {
        let map = match state {
            Some(state) => {
                let frame = render::render(state, &self.human_id, &self.registry, &self.canvas);
                println!("{}", frame.panel);
                frame.map
            }
            None => {
                println!("No game yet, type `create` to start one.");
                render::render_map(None, &self.registry, &self.canvas)
            }
        };

        self.pending_map = Some(map.to_string());
    }

    /// The latest map not yet written, along with where to write it.
    pub fn take_pending_map(&mut self) -> Option<(PathBuf, String)> {
        self.pending_map
            .take()
            .map(|svg| (self.svg_out.clone(), svg))
    }
}

/// Writes the latest map drawn by `view`, if any.
pub async fn write_pending_map(view: &RefCell<TerminalView>) {
    let pending_map = view.borrow_mut().take_pending_map();

    if let Some((path, svg)) = pending_map {
        match tokio::fs::write(&path, svg).await {
            Ok(()) => debug!(path = %path.display(), "map written"),
            Err(error) => warn!(path = %path.display(), %error, "could not write the map"),
        }
    }
}

/// Lets the store re-render the view, while the terminal keeps a handle to it.
pub struct SharedView(pub Rc<RefCell<TerminalView>>);

impl StateObserver for SharedView {
    fn state_replaced(&mut self, state: &GameState) {
        self.0.borrow_mut().show(Some(state));
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Reads commands from stdin until `quit` or the end of input, while firing the controller's timers.
pub async fn run<A: GameApi, R: Rng>(
    controller: &mut Controller<A, R>,
    view: Rc<RefCell<TerminalView>>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(controller, &view, command).await,
                    Err(_) => println!("{}", format!("Unknown command: {line}").red()),
                }
            }
            _ = sleep_until(deadline) => controller.fire_due_timers().await,
        }

        write_pending_map(&view).await;
    }

    Ok(())
}

async fn execute<A: GameApi, R: Rng>(
    controller: &mut Controller<A, R>,
    view: &RefCell<TerminalView>,
    command: Command,
) {
    let result = match command {
        Command::Create => controller
            .create_game()
            .await
            .map(|game_id| format!("Game {game_id} created.")),
        Command::Click { x, y } => controller
            .pick_point(Point::new(x, y))
            .await
            .map(|outcome| describe(&outcome)),
        Command::Pick(city) => controller
            .pick_city(city.trim())
            .await
            .map(|outcome| describe(&outcome)),
        Command::Buy => controller
            .buy_card()
            .await
            .map(|color| format!("You bought a card: {color}")),
        Command::Swap => controller
            .swap_ticket()
            .await
            .map(|()| String::from("Ticket swapped successfully!")),
        Command::Refresh => controller
            .refresh()
            .await
            .map(|()| String::from("Game refreshed.")),
        Command::Show => {
            view.borrow_mut().show(controller.store().current());
            return;
        }
        Command::Resize => {
            let mut view = view.borrow_mut();
            load_background(view.canvas_mut());
            view.show(controller.store().current());
            return;
        }
        Command::Cities => {
            let names: Vec<&str> = controller.registry().iter().map(|(name, _)| name).collect();
            println!("{}", names.join(", "));
            return;
        }
        Command::Help | Command::Quit => {
            println!("{HELP}");
            return;
        }
    };

    report(result);
}

fn describe(outcome: &PickOutcome) -> String {
    match outcome {
        PickOutcome::Missed => String::from("There is no city there."),
        PickOutcome::OriginSelected(city) => {
            format!("Origin city selected: {city}. Now pick the destination city.")
        }
        PickOutcome::SameCity(_) => String::from("Select a destination city different from the origin."),
        PickOutcome::Resolved(claim) => format!("Claimed the route {} → {}.", claim.from, claim.to),
        PickOutcome::NoFreeRoute { from, to } => {
            format!("There is no free route between {from} and {to}!")
        }
    }
}

fn report(result: Result<String, ClientError>) {
    match result {
        Ok(message) => println!("{}", message.green()),
        Err(error) => println!("{}", error.to_string().red()),
    }
}
