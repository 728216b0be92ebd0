use crate::{
    completion::Completion,
    error::Result,
    helpers::cells_to_line,
    scramble::{ScrambleConfig, Scrambler},
    surface::Panel,
};

use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    crossterm::event::{self, KeyCode},
    prelude::*,
    widgets::*,
};
use std::{
    mem,
    time::{Duration, Instant},
};
use tracing::info;
use tui_input::{Input, InputRequest};

/// Gap between the title settling and the profile appearing.
pub const PROFILE_DELAY: Duration = Duration::from_millis(300);

enum Intro {
    Revealing(Completion),
    Waiting(Instant),
    Shown,
}

pub struct App {
    title: Scrambler<Panel>,
    headline: String,
    profile: String,
    intro: Intro,
    input: Input,
}

impl App {
    /// Without a seed the title draws its randomness from the OS.
    pub fn new(headline: String, profile: String, seed: Option<u64>) -> Result<Self> {
        let config = ScrambleConfig::default();
        let mut title = match seed {
            Some(seed) => {
                Scrambler::with_entropy(Panel::default(), config, StdRng::seed_from_u64(seed))?
            }
            None => Scrambler::new(Panel::default(), config)?,
        };
        let done = title.reveal(&headline);

        Ok(Self {
            title,
            headline,
            profile,
            intro: Intro::Revealing(done),
            input: Input::default(),
        })
    }

    /// Reveals `text` on the title. Until the profile is up, the newest
    /// reveal is the one it waits for.
    pub fn reveal(&mut self, text: &str) {
        let done = self.title.reveal(text);

        if !matches!(self.intro, Intro::Shown) {
            self.intro = Intro::Revealing(done);
        }
    }

    pub fn handle_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let text = self.input.value().trim().to_string();
                if !text.is_empty() {
                    self.reveal(&text);
                    self.input.reset();
                }
            }
            KeyCode::F(5) => {
                let headline = self.headline.clone();
                self.reveal(&headline);
            }
            KeyCode::Char(c) => {
                self.input.handle(InputRequest::InsertChar(c));
            }
            KeyCode::Backspace => {
                self.input.handle(InputRequest::DeletePrevChar);
            }
            _ => {}
        }
    }

    /// Advances one display refresh.
    pub fn on_frame(&mut self, now: Instant) {
        self.title.tick();

        self.intro = match mem::replace(&mut self.intro, Intro::Shown) {
            Intro::Revealing(done) if done.is_resolved() => Intro::Waiting(now + PROFILE_DELAY),
            Intro::Waiting(at) if now >= at => {
                info!("showing profile");
                Intro::Shown
            }
            intro => intro,
        };
    }

    pub fn profile_visible(&self) -> bool {
        matches!(self.intro, Intro::Shown)
    }

    pub fn title(&self) -> &Scrambler<Panel> {
        &self.title
    }

    pub fn draw_ui(&self, f: &mut Frame) {
        let area = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3), // Title
                    Constraint::Min(5),    // Profile
                    Constraint::Length(3), // Input
                    Constraint::Length(1), // Help
                ]
                .as_ref(),
            )
            .split(area);

        let title = Paragraph::new(cells_to_line(self.title.surface().cells()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        if self.profile_visible() {
            let profile = Paragraph::new(self.profile.as_str())
                .block(Block::default().title("Profile").borders(Borders::ALL))
                .wrap(Wrap { trim: false });
            f.render_widget(profile, chunks[1]);
        }

        let input_block = Block::default().title("Reveal").borders(Borders::ALL);
        let input_inner = input_block.inner(chunks[2]);
        let input_width = input_inner.width.max(1) as usize;
        let scroll = self.input.visual_scroll(input_width);

        let input = Paragraph::new(self.input.value())
            .block(input_block)
            .scroll((0, scroll as u16));
        f.render_widget(input, chunks[2]);

        let cursor_x = self.input.visual_cursor().saturating_sub(scroll) as u16;
        f.set_cursor_position((input_inner.x + cursor_x, input_inner.y));

        let help = Paragraph::new("Enter: reveal typed text | F5: replay title | Esc: quit")
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[3]);
    }
}
