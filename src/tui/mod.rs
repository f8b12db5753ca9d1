//! Ratatui-based terminal dashboard.
//!
//! Shows the latest stored snapshot with its regime score, an indicator panel,
//! and a history chart for the selected indicator. Updates run on demand.

use std::io;
use std::time::Duration;

use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{self, Services, StepStatus, UpdateOptions};
use crate::data::HistoryBundle;
use crate::domain::{Indicator, ScoredSnapshot, Signal, SignalAction};
use crate::error::{AppError, EXIT_TERMINAL};
use crate::report::fmt_reading;
use crate::signals::evaluate_signal;

mod plotters_chart;

use plotters_chart::{ChartData, HistoryChart};

/// Start the TUI.
pub fn run(services: &Services, days: u32) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(services, days);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_TERMINAL, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Slow work queued by a key press; run after the status line is redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Update,
    ReloadHistory,
}

struct App<'a> {
    services: &'a Services,
    days: u32,
    selected: Indicator,
    scored: Option<ScoredSnapshot>,
    signal: Option<Signal>,
    history: Option<HistoryBundle>,
    pending: Option<Action>,
    status: String,
}

impl<'a> App<'a> {
    fn new(services: &'a Services, days: u32) -> Self {
        let mut app = Self {
            services,
            days,
            selected: Indicator::GdpGrowth,
            scored: None,
            signal: None,
            history: None,
            pending: Some(Action::ReloadHistory),
            status: "Loading history...".to_string(),
        };
        app.load_stored();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if let Some(action) = self.pending.take() {
                self.perform(action);
                needs_redraw = true;
                continue;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Up => {
                self.selected = self.selected.prev();
                self.status = self.selected.display_name().to_string();
            }
            KeyCode::Right | KeyCode::Down => {
                self.selected = self.selected.next();
                self.status = self.selected.display_name().to_string();
            }
            KeyCode::Char('u') => {
                self.pending = Some(Action::Update);
                self.status = "Fetching latest readings from FRED...".to_string();
            }
            KeyCode::Char('h') => {
                self.pending = Some(Action::ReloadHistory);
                self.status = format!("Loading {} days of history...", self.days);
            }
            _ => {}
        }
        false
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Update => self.run_update(),
            Action::ReloadHistory => self.reload_history(),
        }
    }

    fn load_stored(&mut self) {
        match pipeline::current(self.services) {
            Ok(Some(scored)) => {
                self.signal = evaluate_signal(&scored.snapshot);
                self.scored = Some(scored);
            }
            Ok(None) => self.status = "No stored snapshot yet; press u to update.".to_string(),
            Err(err) => self.status = format!("Store error: {err}"),
        }
    }

    fn run_update(&mut self) {
        // Notifications are left to the `update` command.
        let options = UpdateOptions {
            notify: false,
            summarize: false,
        };
        match pipeline::run_update(self.services, Utc::now(), options) {
            Ok(report) => {
                let saved = match &report.saved {
                    StepStatus::Failed(reason) => format!(" (not saved: {reason})"),
                    _ => String::new(),
                };
                self.status = if report.failures.is_empty() {
                    format!("Updated{saved}.")
                } else {
                    format!("Updated with {} unavailable indicator(s){saved}.", report.failures.len())
                };
                self.signal = report.signal;
                self.scored = Some(report.scored);
            }
            Err(err) => self.status = format!("Update failed: {err}"),
        }
    }

    fn reload_history(&mut self) {
        let bundle = pipeline::history(self.services, self.days, Local::now().date_naive());
        let failed = Indicator::ALL
            .iter()
            .filter(|i| bundle.outcome(**i).is_some_and(|o| o.is_failed()))
            .count();
        self.status = if failed == 0 {
            format!("History loaded ({} days).", self.days)
        } else {
            format!("History loaded; {failed} series failed.")
        };
        self.history = Some(bundle);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("macro-dash", Style::default().fg(Color::Cyan)),
            Span::raw(" | FRED macro regime dashboard"),
        ]));

        let as_of = self
            .scored
            .as_ref()
            .map(|s| s.snapshot.timestamp.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        let score = self
            .scored
            .as_ref()
            .and_then(|s| s.regime)
            .map(|r| format!("{:.1} / 100", r.composite))
            .unwrap_or_else(|| "n/a".to_string());
        lines.push(Line::from(Span::styled(
            format!("as of: {as_of} | regime score: {score}"),
            Style::default().fg(Color::Gray),
        )));

        let signal_line = match &self.signal {
            Some(sig) => {
                let color = match sig.action {
                    SignalAction::Buy => Color::Green,
                    SignalAction::Sell => Color::Red,
                };
                Line::from(vec![
                    Span::raw("signal: "),
                    Span::styled(sig.action.label(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" ({})", sig.reason), Style::default().fg(Color::Gray)),
                ])
            }
            None => Line::from(Span::styled("signal: none", Style::default().fg(Color::Gray))),
        };
        lines.push(signal_line);

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(0)])
            .split(area);

        self.draw_indicators(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_indicators(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let snapshot = self.scored.as_ref().map(|s| &s.snapshot);
        let items: Vec<ListItem> = Indicator::ALL
            .iter()
            .map(|&ind| {
                let value = fmt_reading(ind, snapshot.and_then(|s| s.get(ind)));
                ListItem::new(format!("{:<22}{value:>9}", ind.display_name()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Indicators").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Indicator::ALL.iter().position(|i| *i == self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let outcome = self.history.as_ref().and_then(|h| h.outcome(self.selected));
        let title = match outcome {
            Some(o) => format!("{} ({})", self.selected.display_name(), o.status_label()),
            None => self.selected.display_name().to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(data) = outcome.and_then(|o| ChartData::from_series(o.series())) else {
            let msg = if self.history.is_none() {
                "Waiting for data..."
            } else {
                "No data in window."
            };
            frame.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Yellow)), inner);
            return;
        };

        let y_label = if self.selected.is_percent() { "%" } else { "index" };
        let widget = HistoryChart {
            line: &data.line,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            y_label,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ indicator  u update  h reload history  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
