//! Main TUI application state and logic

use crate::playback::{PlaybackEngine, PlaybackEvent, PlaybackState, Scheduler, SystemScheduler};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

/// Viewer tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// How much `+`/`-` change the interval
    pub speed_step_ms: u64,
    pub min_speed_ms: u64,
    pub max_speed_ms: u64,
    /// Longest wait for input before redrawing
    pub frame_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            speed_step_ms: 100,
            min_speed_ms: 10,
            max_speed_ms: 2000,
            frame_ms: 50,
        }
    }
}

impl PlayerConfig {
    pub fn clamp_speed(&self, ms: u64) -> u64 {
        ms.clamp(self.min_speed_ms, self.max_speed_ms)
    }

    /// Shorter interval, one step at a time
    pub fn faster(&self, current: u64) -> u64 {
        self.clamp_speed(current.saturating_sub(self.speed_step_ms))
    }

    pub fn slower(&self, current: u64) -> u64 {
        self.clamp_speed(current.saturating_add(self.speed_step_ms))
    }
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    Details,
    Source,
}

impl FocusedPane {
    /// Move focus to the next pane (structure -> details -> source)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Details,
            FocusedPane::Details => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Structure,
        }
    }
}

/// The main application state
pub struct App<S: Scheduler = SystemScheduler> {
    pub engine: PlaybackEngine<S>,

    /// Code listing of the loaded algorithm
    pub listing: &'static [&'static str],

    pub config: PlayerConfig,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub structure_scroll: usize,
    pub details_scroll: usize,
    pub source_scroll: super::panes::SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl<S: Scheduler> App<S> {
    /// Create an app around an engine that already holds a trace
    pub fn new(
        engine: PlaybackEngine<S>,
        listing: &'static [&'static str],
        config: PlayerConfig,
    ) -> Self {
        App {
            engine,
            listing,
            config,
            focused_pane: FocusedPane::Structure,
            structure_scroll: 0,
            details_scroll: 0,
            source_scroll: Default::default(),
            should_quit: false,
            status_message: String::from("Ready! Press space to play"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let frame = Duration::from_millis(self.config.frame_ms);
        loop {
            self.tick();
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // wake up early when the next playback tick is due sooner
            let timeout = self
                .engine
                .scheduler()
                .until_next()
                .map_or(frame, |due| due.min(frame));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Deliver due timers and turn engine events into status messages
    pub fn tick(&mut self) {
        self.engine.poll();
        for event in self.engine.drain_events() {
            match event {
                PlaybackEvent::Completed => {
                    self.status_message = "Playback complete".to_string();
                }
                PlaybackEvent::StateChanged { to, .. } => match to {
                    PlaybackState::Playing => self.status_message = "Playing...".to_string(),
                    PlaybackState::Paused => self.status_message = "Paused".to_string(),
                    _ => {}
                },
                PlaybackEvent::CursorMoved { .. } => {
                    self.structure_scroll = 0;
                    self.details_scroll = 0;
                }
                PlaybackEvent::Loaded { len } => {
                    self.status_message = format!("Loaded {} steps", len);
                }
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Structure (top) | Details (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let step = self.engine.current_step();
        let title = self
            .engine
            .trace()
            .map_or("Code", |t| t.algorithm_name());

        super::panes::render_structure_pane(
            frame,
            left_rows[0],
            step.map(|s| &s.snapshot),
            self.focused_pane == FocusedPane::Structure,
            &mut self.structure_scroll,
        );

        super::panes::render_details_pane(
            frame,
            left_rows[1],
            step,
            self.focused_pane == FocusedPane::Details,
            &mut self.details_scroll,
        );

        super::panes::render_source_pane(
            frame,
            columns[1],
            title,
            self.listing,
            step.and_then(|s| s.source_line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                cursor: self.engine.cursor(),
                total_steps: self.engine.len(),
                state: self.engine.state(),
                speed_ms: self.engine.speed_ms(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.engine.toggle();
                if self.engine.state() == PlaybackState::Completed {
                    self.status_message = "At the end; step back or seek to replay".to_string();
                }
            }
            KeyCode::Left => {
                self.engine.step_back();
                self.status_message = "Stepped backward".to_string();
            }
            KeyCode::Right => {
                self.engine.step_forward();
                self.status_message = "Stepped forward".to_string();
            }
            KeyCode::Home | KeyCode::Backspace => {
                self.engine.seek_start();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::End | KeyCode::Enter => {
                self.engine.seek_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = self.config.faster(self.engine.speed_ms());
                self.change_speed(speed);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let speed = self.config.slower(self.engine.speed_ms());
                self.change_speed(speed);
            }
            // Digits seek to that tenth of the trace
            KeyCode::Char(c @ '0'..='9') => {
                let tenth = c as usize - '0' as usize;
                let last = self.engine.len().saturating_sub(1);
                self.engine.seek(last * tenth / 10);
                self.status_message = format!("Jumped to {}0%", tenth);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Structure => {
                    self.structure_scroll = self.structure_scroll.saturating_sub(1);
                }
                FocusedPane::Details => {
                    self.details_scroll = self.details_scroll.saturating_sub(1);
                }
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Structure => {
                    self.structure_scroll = self.structure_scroll.saturating_add(1);
                }
                FocusedPane::Details => {
                    self.details_scroll = self.details_scroll.saturating_add(1);
                }
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
            },
            _ => {}
        }
    }

    fn change_speed(&mut self, ms: u64) {
        match self.engine.set_speed(ms as i64) {
            Ok(()) => {
                debug!(speed_ms = ms, "speed adjusted from keyboard");
                self.status_message = format!("Speed: {}ms per step", ms);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }
}
