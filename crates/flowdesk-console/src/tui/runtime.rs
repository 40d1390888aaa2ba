/*
[INPUT]:  Gateway client, refresh channel, cancellation token, log buffer
[OUTPUT]: Ratatui run loop, rendering, and log capture utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When the event loop, tick cadence, or log capture change
[UPDATE]: 2026-08-06 Drive ActionModal timers from the UI tick
[UPDATE]: 2026-08-06 Show recent log lines in the footer
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use flowdesk_adapter::{FlowdeskClient, TaskQuery};

use super::app::AppState;
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui;
use crate::controller::ModalTick;
use crate::refresh::{RefreshEvent, Refresher};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Bounded in-memory sink for tracing output while the alternate screen
/// owns stdout.
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn tail(&self, count: usize) -> Vec<String> {
        self.lines
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial = self.partial[pos + 1..].to_string();
            let mut guard = self.buffer.lock().expect("log buffer lock");
            guard.push_line(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            let mut guard = self.buffer.lock().expect("log buffer lock");
            guard.push_line(line);
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

/// Run the console view until quit or cancellation.
pub async fn run_console(
    client: Arc<FlowdeskClient>,
    refresher: Refresher,
    query_tx: watch::Sender<TaskQuery>,
    mut refresh_rx: mpsc::Receiver<RefreshEvent>,
    shutdown: CancellationToken,
    log_buffer: LogBufferHandle,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = shutdown.clone();
    tokio::task::spawn_blocking(move || {
        while !input_shutdown.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(client, refresher, query_tx);
    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        let log_lines = log_buffer
            .lock()
            .map(|buffer| buffer.tail(2))
            .unwrap_or_default();
        terminal.draw(|frame| ui::draw(frame, &app, &log_lines))?;

        tokio::select! {
            _ = tick.tick() => {
                if let Some(modal) = app.modal.as_mut() {
                    if modal.tick() == ModalTick::Close {
                        app.modal = None;
                        app.attach_input.clear();
                    }
                }
            }
            Some(event) = refresh_rx.recv() => match event {
                RefreshEvent::Snapshot { tasks, counters } => {
                    app.apply_snapshot(tasks, counters);
                }
                RefreshEvent::Failed(message) => {
                    app.status_message = format!("refresh failed: {message}");
                }
            },
            Some(UiEvent::Input(event)) = event_rx.recv() => {
                if let CrosstermEvent::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        should_quit = handle_key_event(&mut app, key.code).await;
                    }
                }
            }
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
        }
    }

    // Stop the input thread and the dashboard poller with us.
    shutdown.cancel();
    Ok(())
}
