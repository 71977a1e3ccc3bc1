//! Terminal frontend built on ratatui and crossterm
//!
//! This module provides the display side of the pipeline:
//!
//! - [`TerminalDisplay`] - Owns the terminal in raw mode on the alternate
//!   screen and implements [`ChartDisplay`]
//! - [`spawn_quit_listener`] - Input thread that fires the
//!   [`CancellationSignal`] on `q`, `Esc` or `Ctrl-C`
//! - [`chart`] - Widget construction for a single frame
//!
//! The terminal is restored when the display is dropped, so it is left usable
//! after a fatal error as well as after a normal quit.

pub mod chart;

use crate::error::{Result, SerialVisError};
use crate::pipeline::{CancellationSignal, ChartDisplay, RenderFrame};
use crate::types::DisplayGeometry;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::thread::JoinHandle;
use std::time::Duration;

/// How long the input thread waits for an event before rechecking the signal
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal-backed chart display
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalDisplay {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e.into());
            }
        };
        terminal.hide_cursor()?;
        terminal.clear()?;

        tracing::debug!("Terminal initialized");
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Leave the alternate screen and raw mode; safe to call more than once
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        tracing::debug!("Terminal restored");
        Ok(())
    }
}

impl ChartDisplay for TerminalDisplay {
    fn geometry(&mut self) -> Result<DisplayGeometry> {
        let size = self.terminal.size().map_err(SerialVisError::Render)?;
        Ok(DisplayGeometry::new(size.width, size.height))
    }

    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        self.terminal
            .draw(|f| chart::draw_frame(f, frame))
            .map_err(SerialVisError::Render)?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Combine the acquisition result with the outcome of restoring the terminal
///
/// An acquisition error always wins; a restore failure is logged and only
/// returned when the run itself succeeded.
pub fn combine_teardown<T>(result: Result<T>, restored: Result<()>) -> Result<T> {
    if let Err(e) = &restored {
        tracing::warn!("Failed to restore terminal: {}", e);
    }
    let value = result?;
    restored?;
    Ok(value)
}

/// Restore the terminal before the default panic message is printed
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        previous(info);
    }));
}

/// Whether a key event is a quit request
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Spawn the input thread
///
/// The thread only ever fires `signal`. It exits once the signal has fired,
/// whoever fired it, so the caller should cancel after acquisition returns
/// and then join the handle. An input error also fires the signal so the
/// acquisition loop does not outlive the keyboard.
pub fn spawn_quit_listener(signal: CancellationSignal) -> Result<JoinHandle<Result<()>>> {
    let handle = std::thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            let result = listen(&signal);
            if result.is_err() {
                signal.cancel();
            }
            result
        })?;
    Ok(handle)
}

fn listen(signal: &CancellationSignal) -> Result<()> {
    while !signal.is_cancelled() {
        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if is_quit_key(&key) {
                tracing::info!("Quit requested ({:?})", key.code);
                signal.cancel();
            }
        }
    }
    Ok(())
}
