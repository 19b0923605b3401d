use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use web_client::config::Args;
use web_client::controller::Controller;
use web_client::http_api::HttpGameApi;
use web_client::terminal::{self, SharedView, TerminalNotifier, TerminalView};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let registry = args.load_registry()?;
    let config = args.client_config();
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(server_url = %args.server_url, cities = registry.len(), "starting");

    let view = Rc::new(RefCell::new(TerminalView::new(
        registry.clone(),
        args.canvas(),
        config.human_player.clone(),
        args.svg_out.clone(),
    )));

    let mut controller = Controller::new(
        HttpGameApi::new(args.server_url.clone()),
        rng,
        config,
        registry,
        Box::new(TerminalNotifier),
    );
    controller
        .store_mut()
        .subscribe(Box::new(SharedView(Rc::clone(&view))));

    terminal::run(&mut controller, view).await
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
