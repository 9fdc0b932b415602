use crate::client::LanguageService;
use crate::core::prelude::*;
use crate::server::types::ContentResponse;
use crate::ui::terminal::TerminalManager;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, Stdout};

pub type TerminalBackend = Terminal<CrosstermBackend<Stdout>>;

const POLL_RATE_MS: u64 = 150;
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

struct Notification {
    text: String,
    is_error: bool,
    shown_at: Instant,
}

/// Terminal UI: content pane plus a language selector bound to the
/// supported list. Change and fetch each move idle -> loading on user
/// action and back on response.
pub struct ScreenManager {
    terminal: TerminalBackend,
    terminal_mgr: TerminalManager,
    service: LanguageService,
    selected: usize,
    content: Option<ContentResponse>,
    content_loading: bool,
    notification: Option<Notification>,
}

impl ScreenManager {
    pub fn new(service: LanguageService) -> Result<Self> {
        // Build the terminal first; raw mode is entered last so a failure
        // here leaves the terminal untouched.
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        let mut terminal_mgr = TerminalManager::new();
        terminal_mgr.setup()?;

        Ok(Self {
            terminal,
            terminal_mgr,
            service,
            selected: 0,
            content: None,
            content_loading: false,
            notification: None,
        })
    }

    /// The terminal is restored before any error from the loop propagates.
    pub async fn run(&mut self) -> Result<()> {
        let result = self.event_loop().await;
        result.and(self.terminal_mgr.cleanup())
    }

    async fn event_loop(&mut self) -> Result<()> {
        if let Err(e) = self.service.init().await {
            self.notify(format!("Server unreachable: {}", e), true);
        }
        self.sync_selection();
        self.load_content().await;

        loop {
            self.expire_notification();
            self.render()?;

            if event::poll(Duration::from_millis(POLL_RATE_MS))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key).await? {
                            return Ok(());
                        }
                    }
                    Event::Resize(..) => {
                        self.terminal.autoresize()?;
                    }
                    _ => {}
                }
            }
        }
    }

    /// Returns true when the app should quit.
    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                if !self.busy() && self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                let max = self.service.supported_languages().len().saturating_sub(1);
                if !self.busy() && self.selected < max {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if !self.busy() {
                    self.apply_selection().await;
                }
            }
            KeyCode::Char('r') => {
                if !self.busy() {
                    self.load_content().await;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn busy(&self) -> bool {
        self.service.is_loading() || self.content_loading
    }

    async fn apply_selection(&mut self) {
        let supported = self.service.supported_languages();
        let Some(&lang) = supported.get(self.selected) else {
            return;
        };
        if lang == self.service.current_language() {
            return;
        }

        match self.service.change_language(lang.as_str()).await {
            Ok(confirmed) => {
                self.notify(format!("Language changed to {}", confirmed.display_name()), false);
                self.load_content().await;
            }
            Err(e) => {
                // Prior state is intact; put the selector back on it.
                self.sync_selection();
                self.notify(e.to_string(), true);
            }
        }
    }

    async fn load_content(&mut self) {
        self.content_loading = true;
        match self.service.fetch_content().await {
            Ok(content) => self.content = Some(content),
            Err(e) => self.notify(format!("Failed to load content: {}", e), true),
        }
        self.content_loading = false;
    }

    fn sync_selection(&mut self) {
        let current = self.service.current_language();
        if let Some(pos) = self
            .service
            .supported_languages()
            .iter()
            .position(|&l| l == current)
        {
            self.selected = pos;
        }
    }

    fn notify(&mut self, text: String, is_error: bool) {
        self.notification = Some(Notification {
            text,
            is_error,
            shown_at: Instant::now(),
        });
    }

    fn expire_notification(&mut self) {
        if let Some(n) = &self.notification {
            if n.shown_at.elapsed() > NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let supported = self.service.supported_languages();
        let current = self.service.current_language();
        let busy = self.busy();

        let items: Vec<ListItem> = supported
            .iter()
            .map(|lang| {
                let marker = if *lang == current { "●" } else { " " };
                ListItem::new(format!(" {} {} ({})", marker, lang.display_name(), lang))
            })
            .collect();
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.min(items.len().saturating_sub(1))));

        let content = self.content.as_ref();
        let notification = self.notification.as_ref();

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(6),
                    Constraint::Length(3),
                ])
                .split(frame.size());

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(28), Constraint::Min(20)])
                .split(chunks[1]);

            let (title, subtitle) = match content {
                Some(c) => (c.content.title.as_str(), c.content.subtitle.as_str()),
                None => ("lingo-sync", "Loading content..."),
            };
            let header = Paragraph::new(vec![
                Line::from(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(subtitle),
            ])
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            let selector_title = if busy { " Languages (busy) " } else { " Languages " };
            let selector = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(selector_title))
                .highlight_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_stateful_widget(selector, columns[0], &mut list_state);

            let body = match content {
                Some(c) => vec![
                    Line::from(c.content.welcome_message.clone()),
                    Line::from(""),
                    Line::from(c.content.current_language.clone()),
                    Line::from(""),
                    Line::from(c.content.instructions.clone()),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Served: {} ({})", c.timestamp, c.language),
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                None => vec![Line::from("No content loaded yet.")],
            };
            let content_pane = Paragraph::new(body)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Content "));
            frame.render_widget(content_pane, columns[1]);

            let status_line = if busy {
                Line::from(Span::styled(
                    " Loading...",
                    Style::default().fg(Color::Yellow),
                ))
            } else if let Some(n) = notification {
                let color = if n.is_error { Color::Red } else { Color::Green };
                Line::from(Span::styled(
                    format!(" {}", n.text),
                    Style::default().fg(color),
                ))
            } else {
                Line::from(" ↑/↓ select · Enter apply · r refresh · q quit")
            };
            let status = Paragraph::new(status_line)
                .block(Block::default().borders(Borders::ALL).title(" Status "));
            frame.render_widget(status, chunks[2]);
        })?;

        Ok(())
    }
}
