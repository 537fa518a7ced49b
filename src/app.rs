//! Interactive timer session.
//!
//! One cooperative loop owns the controller and serializes every mutation:
//! user input lines, scheduler ticks and Ctrl-C are awaited together with
//! `tokio::select!`, and the view is redrawn after each of them.
//!
//! Input lines come from a dedicated reader thread, so a blocking read on
//! the terminal never holds up shutdown.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::Display;
use crate::sound::{try_create_player, CuePlayer, SilentCuePlayer};
use crate::timer::{TickFired, TickScheduler, TimerController, TimerEngine, TimerEvent};
use crate::types::{Mode, TimerSnapshot, TimerState};

// ============================================================================
// AppConfig
// ============================================================================

/// Runtime options for an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Whether completion cues are played
    pub sound_enabled: bool,
    /// Whether to emit JSON snapshots instead of the status view
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            json: false,
        }
    }
}

// ============================================================================
// UserAction
// ============================================================================

/// A user event parsed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SelectWork,
    SelectShortBreak,
    ToggleRun,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

impl UserAction {
    /// Parses one line of input. An empty line toggles the timer.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" | "s" => UserAction::ToggleRun,
            "w" => UserAction::SelectWork,
            "b" => UserAction::SelectShortBreak,
            "r" => UserAction::Reset,
            "h" | "?" => UserAction::Help,
            "q" => UserAction::Quit,
            other => UserAction::Unknown(other.to_string()),
        }
    }
}

// ============================================================================
// App
// ============================================================================

/// An interactive session writing its view to `W`.
pub struct App<W: Write> {
    controller: TimerController,
    event_rx: mpsc::UnboundedReceiver<TimerEvent>,
    tick_rx: mpsc::UnboundedReceiver<TickFired>,
    output: W,
    json: bool,
    /// A status line without trailing newline is on screen
    status_open: bool,
}

impl<W: Write> App<W> {
    /// Creates a session in the initial timer state.
    pub fn new(player: Arc<dyn CuePlayer>, json: bool, output: W) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let controller = TimerController::new(
            TimerEngine::new(player, event_tx),
            TickScheduler::new(tick_tx),
        );

        Self {
            controller,
            event_rx,
            tick_rx,
            output,
            json,
            status_open: false,
        }
    }

    pub fn state(&self) -> &TimerState {
        self.controller.state()
    }

    /// Draws the initial view.
    pub fn start(&mut self) -> Result<()> {
        if self.json {
            return self.write_snapshot();
        }
        writeln!(self.output, "{}", Display::help())?;
        self.write_screen()
    }

    /// Applies one user action and redraws.
    pub fn apply(&mut self, action: UserAction) -> Result<ControlFlow<()>> {
        debug!("User action: {:?}", action);

        match action {
            UserAction::SelectWork => self.controller.switch_mode(Mode::Work),
            UserAction::SelectShortBreak => self.controller.switch_mode(Mode::ShortBreak),
            UserAction::ToggleRun => self.controller.toggle_run(),
            UserAction::Reset => self.controller.reset(),
            UserAction::Help => {
                if !self.json {
                    self.close_status()?;
                    writeln!(self.output, "{}", Display::help())?;
                }
                return Ok(ControlFlow::Continue(()));
            }
            UserAction::Unknown(input) => {
                warn!("Unknown input: {:?}", input);
                if !self.json {
                    self.close_status()?;
                    writeln!(self.output, "不明なコマンドです: {}", input)?;
                    writeln!(self.output, "{}", Display::help())?;
                }
                return Ok(ControlFlow::Continue(()));
            }
            UserAction::Quit => return Ok(ControlFlow::Break(())),
        }

        self.redraw(true)?;
        Ok(ControlFlow::Continue(()))
    }

    /// Applies a fired tick and redraws if it was live.
    pub fn on_tick(&mut self, tick: TickFired) -> Result<()> {
        if self.controller.handle_tick(tick) {
            self.redraw(false)?;
        }
        Ok(())
    }

    /// Waits for the next tick from the scheduler.
    pub async fn next_tick(&mut self) -> Option<TickFired> {
        self.tick_rx.recv().await
    }

    /// Runs the session until `q`, end of input or Ctrl-C.
    pub async fn run(mut self, mut lines: mpsc::UnboundedReceiver<String>) -> Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.start()?;

        loop {
            tokio::select! {
                line = lines.recv() => {
                    match line {
                        Some(line) => {
                            if self.apply(UserAction::parse(&line))?.is_break() {
                                break;
                            }
                        }
                        None => {
                            debug!("Input closed");
                            break;
                        }
                    }
                }
                Some(tick) = self.tick_rx.recv() => self.on_tick(tick)?,
                result = &mut ctrl_c => {
                    result.context("Ctrl-C ハンドラの登録に失敗しました")?;
                    break;
                }
            }
        }

        self.shutdown()
    }

    /// Cancels pending ticks and finishes the output.
    pub fn shutdown(&mut self) -> Result<()> {
        self.controller.shutdown();
        self.close_status()?;
        self.output.flush()?;
        info!(
            "Session ended with {} completed sessions",
            self.state().sessions()
        );
        Ok(())
    }

    /// Consumes the session and returns its output.
    pub fn into_output(self) -> W {
        self.output
    }

    fn redraw(&mut self, full: bool) -> Result<()> {
        let messages: Vec<String> = std::iter::from_fn(|| self.event_rx.try_recv().ok())
            .filter_map(|event| Display::event_message(&event))
            .collect();

        if self.json {
            return self.write_snapshot();
        }

        if full || !messages.is_empty() {
            self.close_status()?;
            for message in &messages {
                writeln!(self.output, "{}", message)?;
            }
            return self.write_screen();
        }

        write!(self.output, "\r{}", Display::status_line(self.state()))?;
        self.output.flush()?;
        self.status_open = true;
        Ok(())
    }

    fn write_screen(&mut self) -> Result<()> {
        let screen = Display::screen(self.controller.state());
        write!(self.output, "{}", screen)?;
        self.output.flush()?;
        Ok(())
    }

    fn write_snapshot(&mut self) -> Result<()> {
        let snapshot = TimerSnapshot::from_timer_state(self.controller.state());
        serde_json::to_writer(&mut self.output, &snapshot).context("JSON出力に失敗しました")?;
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(())
    }

    fn close_status(&mut self) -> Result<()> {
        if self.status_open {
            writeln!(self.output)?;
            self.status_open = false;
        }
        Ok(())
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Chooses the cue output for a session.
pub fn create_player(sound_enabled: bool) -> Arc<dyn CuePlayer> {
    if !sound_enabled {
        info!("Completion cues disabled");
        return Arc::new(SilentCuePlayer);
    }
    match try_create_player() {
        Some(player) => Arc::new(player),
        None => Arc::new(SilentCuePlayer),
    }
}

/// Forwards stdin lines from a detached reader thread.
///
/// The channel closes at end of input or on a read error.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}

/// Runs an interactive session on stdin/stdout.
pub async fn run(config: AppConfig) -> Result<()> {
    let player = create_player(config.sound_enabled);
    let app = App::new(player, config.json, std::io::stdout());
    app.run(spawn_stdin_reader()).await
}

// ============================================================================
// Tests
// ============================================================================
