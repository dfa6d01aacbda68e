use crate::config::Config;
use crate::state::AppState;
use crate::ui::draw;
use crate::ui::events::EventHandler;
use color_eyre::Result;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    client: reqwest::Client,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: EventHandler,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let state = match &config.request.initial_url {
            Some(url) => AppState::with_initial_url(url),
            None => AppState::default(),
        };

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            client: config.http_client()?,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: EventHandler::new(),
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            let state = Arc::clone(&self.state);
            self.event_handler.handle_events(state, &self.client)?;

            // Let background request tasks make progress between polls
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        // Create main layout: Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[1]);

        draw::render_header(frame, main_chunks[0], &state, self.spinner_index);
        draw::render_request_panel(frame, body_chunks[0], &state);
        draw::render_response_panel(frame, body_chunks[1], &state);
        draw::render_footer(frame, main_chunks[2], &state);
    }
}
