mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::actions::AppActions;
use app::App;
use clap::Parser;
use color_eyre::Result;
use jma_forecast::config::init_app_config;
use jma_forecast::logging::{init_logging, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = cli::CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    let headless = args.headless || args.office.is_some() || !is_terminal();

    let log_target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone())
    };
    init_logging(config.debug, &log_target)?;
    tracing::debug!(?config, headless, "configuration resolved");

    let actions = AppActions::new(config)?;
    let mut app = App::new(actions);
    app.load_catalog().await;

    if headless {
        return event::run_headless(&app, args.office.as_deref(), args.json).await;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
