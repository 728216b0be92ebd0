mod app;
mod completion;
mod entropy;
mod error;
mod helpers;
mod schedule;
mod scramble;
mod surface;
mod types;

use crate::{
    app::App,
    helpers::{DEFAULT_PROFILE, init_logging, load_profile, parse_args},
};

use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::info;

// One step per refresh at roughly 60 Hz.
const POLLING_RATE_MS: u64 = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args();

    if let Some(path) = &options.log {
        init_logging(path)?;
    }

    let profile = match &options.profile {
        Some(path) => load_profile(path)?,
        None => DEFAULT_PROFILE.to_string(),
    };

    let mut app = App::new(options.title, profile, options.seed)?;
    info!(seed = ?options.seed, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|frame| app.draw_ui(frame))?;
        terminal.show_cursor()?;

        if event::poll(Duration::from_millis(POLLING_RATE_MS))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc => break,
                    _ => app.handle_key(key),
                }
            }
        }

        app.on_frame(Instant::now());
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("shutting down");

    Ok(())
}
