// services/gear-dash/src/main.rs
//
// Gear Whisperer terminal dashboard
// Simulated gearbox health telemetry and predictive maintenance panels
//
// Run with: cargo run --bin gear-dash -- --seed 7

use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use gearkit::config::DashboardConfig;
use ratatui::prelude::*;
use tracing::info;

mod config;
mod logging;
mod mock;
mod state;
mod views;

use mock::DemoFeed;
use state::{DashboardState, InputMode, LogLevel, View};

#[derive(Parser, Debug)]
#[command(name = "gear-dash")]
#[command(about = "Terminal dashboard for gearbox health telemetry and predictive maintenance")]
#[command(version = "0.1.0")]
struct Args {
    /// YAML configuration file (optional)
    #[arg(short, long, default_value = "config/gear-dash.yaml")]
    config: String,

    /// Dataset files or directories to analyze on startup
    #[arg(long, short, num_args = 1..)]
    dataset: Vec<PathBuf>,

    /// Refresh interval in milliseconds (overrides ui.refresh_ms)
    #[arg(long)]
    refresh_ms: Option<u64>,

    /// Seed for reproducible synthetic chart data
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path (overrides observability.log_file)
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = config::load_config(&args.config)?;
    let _guard = logging::init_tracing(&config.observability, args.log_file.as_deref())?;
    info!("Starting gear-dash with config {}", args.config);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &args, config);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    info!("gear-dash stopped");
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, args: &Args, config: DashboardConfig) -> Result<()> {
    let tick_rate = Duration::from_millis(args.refresh_ms.unwrap_or(config.ui.refresh_ms));
    let mut state = DashboardState::new(config);
    let mut feed = DemoFeed::new(args.seed);
    feed.update(&mut state);

    if !args.dataset.is_empty() {
        state.select_view(View::Upload);
        state.select_paths(&args.dataset, Instant::now());
    }

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| views::draw_ui(frame, &state))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(&mut state, &mut feed, key.code) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            let now = Instant::now();
            feed.update(&mut state);
            state.tick(now);
            last_tick = now;
        }
    }
}

/// Returns false when the operator asked to quit.
fn handle_key(state: &mut DashboardState, feed: &mut DemoFeed, code: KeyCode) -> bool {
    if state.input_mode == InputMode::Editing {
        match code {
            KeyCode::Enter => state.submit_input(Instant::now()),
            KeyCode::Esc => state.cancel_edit(),
            KeyCode::Backspace => state.pop_char(),
            KeyCode::Char(c) => state.push_char(c),
            _ => {}
        }
        return true;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char('1') => state.select_view(View::Dashboard),
        KeyCode::Char('2') => state.select_view(View::Predictive),
        KeyCode::Char('3') => state.select_view(View::Upload),
        KeyCode::Tab => state.select_view(state.view.next()),
        KeyCode::BackTab => state.select_view(state.view.previous()),
        KeyCode::Char('i') | KeyCode::Enter => state.begin_edit(),
        KeyCode::Char('r') => {
            feed.regenerate_charts(state);
            state.add_log(LogLevel::Info, "Synthetic charts regenerated");
        }
        _ => {}
    }
    true
}
