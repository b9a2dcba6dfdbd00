use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;

use jma_forecast::view::WeatherCard;

use crate::app::{handle_input, App};
use crate::ui;

// States of a single forecast request
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FetchState {
    Idle,
    Fetching,
    Rendered,
    Failed,
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Fetching => write!(f, "Fetching"),
            Self::Rendered => write!(f, "Rendered"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug)]
enum FetchEvent {
    Start(String),
    Rendered(usize),
    Failed(String),
    Reset,
}

impl fmt::Display for FetchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(office) => write!(f, "Start({office})"),
            Self::Rendered(days) => write!(f, "Rendered({days})"),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: FetchState,
    event: FetchEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct FetchMachine {
    state: FetchState,
}

impl FetchMachine {
    const fn new(initial_state: FetchState) -> Self {
        Self {
            state: initial_state,
        }
    }

    const fn state(&self) -> FetchState {
        self.state
    }

    fn process_event(
        &mut self,
        event: &FetchEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(FetchState);

impl TryFrom<(FetchState, &FetchEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (FetchState, &FetchEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (FetchState::Idle, FetchEvent::Start(office)) => {
                app.status_message = format!("Fetching forecast for {}...", app.office_title(office));
                app.loading_office = Some(office.clone());
                app.throbber_state.calc_next();
                Ok(Self(FetchState::Fetching))
            }
            (FetchState::Fetching, FetchEvent::Rendered(_)) => {
                // status line was already set by the store step
                app.loading_office = None;
                Ok(Self(FetchState::Rendered))
            }
            (FetchState::Fetching, FetchEvent::Failed(error)) => {
                app.loading_office = None;
                app.status_message = format!("Error: {error}");
                Ok(Self(FetchState::Failed))
            }
            (FetchState::Rendered | FetchState::Failed, FetchEvent::Reset) => {
                Ok(Self(FetchState::Idle))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Takes the queued office only when no fetch is in progress, so a selection
/// made mid-fetch stays queued.
fn next_pending_office(machine: &FetchMachine, app: &mut App) -> Option<String> {
    if machine.state() != FetchState::Idle {
        return None;
    }
    app.pending_office.take()
}

/// Run the application in headless mode (no UI)
///
/// Without an office code this prints the region tree. With one it fetches
/// the forecast, prints it, and appends it to the store.
pub async fn run_headless(app: &App, office: Option<&str>, json: bool) -> Result<()> {
    if let Some(message) = &app.catalog_error {
        return Err(color_eyre::eyre::eyre!("{message}"));
    }

    match office {
        Some(office_code) => render_headless_forecast(app, office_code, json).await,
        None if json => render_headless_tree_json(app),
        None => {
            render_headless_tree(app);
            Ok(())
        }
    }
}

fn render_headless_tree(app: &App) {
    println!("\nJMA Regions");
    println!("===========");
    for center in &app.centers {
        println!("{} ({})", center.label, center.id);
        for office in &center.offices {
            println!("  - {} | {}", office.id, office.label);
        }
    }
}

fn render_headless_tree_json(app: &App) -> Result<()> {
    let tree: Vec<HeadlessCenter> = app
        .centers
        .iter()
        .map(|center| HeadlessCenter {
            id: center.id.clone(),
            name: center.label.clone(),
            offices: center
                .offices
                .iter()
                .map(|office| HeadlessOffice {
                    id: office.id.clone(),
                    label: office.label.clone(),
                })
                .collect(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

async fn render_headless_forecast(app: &App, office_code: &str, json: bool) -> Result<()> {
    let days = app
        .actions
        .fetch_forecast(office_code)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.user_message()))?;

    let stored = match app.actions.store_forecast(office_code, &days).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(error = %e, office_code, "forecast not persisted");
            eprintln!("{}", e.user_message());
            None
        }
    };
    let total_rows = match app.actions.count_stored_rows().await {
        Ok(total) => total,
        Err(e) => {
            tracing::warn!(error = %e, "stored row count unavailable");
            eprintln!("{}", e.user_message());
            None
        }
    };

    let report = HeadlessForecast {
        office_code: office_code.to_string(),
        title: app.office_title(office_code),
        days: days.iter().map(WeatherCard::from).map(HeadlessDay::from).collect(),
        stored_rows: stored,
        total_rows,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", report.title);
    println!("{}", "=".repeat(report.title.chars().count()));
    for day in &report.days {
        println!("- {} | {} {} | {}", day.date, day.icon, day.text, day.code);
    }
    println!("\n{}", store_summary(report.stored_rows, report.total_rows));

    Ok(())
}

fn store_summary(stored_rows: Option<u64>, total_rows: Option<i64>) -> String {
    match (stored_rows, total_rows) {
        (Some(stored), Some(total)) => format!("Stored {stored} rows ({total} total)"),
        (Some(stored), None) => format!("Stored {stored} rows (total unavailable)"),
        (None, _) => "Forecast not stored".to_string(),
    }
}

#[derive(serde::Serialize)]
struct HeadlessCenter {
    id: String,
    name: String,
    offices: Vec<HeadlessOffice>,
}

#[derive(serde::Serialize)]
struct HeadlessOffice {
    id: String,
    label: String,
}

#[derive(serde::Serialize)]
struct HeadlessForecast {
    office_code: String,
    title: String,
    days: Vec<HeadlessDay>,
    stored_rows: Option<u64>,
    total_rows: Option<i64>,
}

#[derive(serde::Serialize)]
struct HeadlessDay {
    date: String,
    icon: String,
    text: String,
    code: String,
}

impl From<WeatherCard> for HeadlessDay {
    fn from(card: WeatherCard) -> Self {
        Self {
            date: card.date,
            icon: card.icon,
            text: card.text,
            code: card.code,
        }
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut fetch_machine = FetchMachine::new(FetchState::Idle);

    loop {
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }

        let Some(office_code) = next_pending_office(&fetch_machine, app) else {
            continue;
        };

        if let Err(e) = fetch_machine.process_event(&FetchEvent::Start(office_code.clone()), app) {
            tracing::warn!(error = %e, "fetch state machine");
            continue;
        }

        // Show the loading frame; input is not read until the fetch returns
        if terminal.draw(|f| ui::ui(app, f)).is_err() {
            // Non-fatal redraw error
        }

        let event = match app.show_forecast(&office_code).await {
            Ok(days) => FetchEvent::Rendered(days),
            Err(e) => {
                tracing::warn!(error = %e, office_code = %office_code, "forecast fetch failed");
                FetchEvent::Failed(e.to_string())
            }
        };

        for event in [event, FetchEvent::Reset] {
            if let Err(e) = fetch_machine.process_event(&event, app) {
                tracing::warn!(error = %e, "fetch state machine");
            }
        }
    }
    Ok(())
}
