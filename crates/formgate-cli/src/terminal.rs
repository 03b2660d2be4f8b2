//! Line-oriented terminal driver.
//!
//! Reads one command per line and re-renders the whole screen after every
//! change. Parse errors are reported on the output without reaching the app.
//! At end of input the driver waits for any in-flight submission before
//! quitting, so piped scripts see their final outcome.

use std::{
    future::{Future, pending},
    io::Write,
};

use formgate_app::{App, AppEvent, Driver};
use formgate_harness::MemoryBackend;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    TerminalError,
    commands::{self, Command},
    ui,
};

/// Driver over a line reader and a text writer.
pub struct TerminalDriver<R, W> {
    lines: Lines<R>,
    out: W,
    backend: MemoryBackend,
    eof: bool,
}

impl<R, W> TerminalDriver<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Create a driver reading commands from `input` and rendering to `out`.
    pub fn new(input: R, out: W, backend: MemoryBackend) -> Self {
        Self { lines: input.lines(), out, backend, eof: false }
    }

    async fn next_events(&mut self, busy: bool) -> Result<Vec<AppEvent>, TerminalError> {
        if self.eof {
            if busy {
                return pending().await;
            }
            return Ok(vec![AppEvent::Quit]);
        }

        match self.lines.next_line().await? {
            Some(line) => self.interpret(&line),
            None => {
                self.eof = true;
                Ok(Vec::new())
            },
        }
    }

    fn interpret(&mut self, line: &str) -> Result<Vec<AppEvent>, TerminalError> {
        let command = commands::parse(line);
        if let Some(event) = command.to_event() {
            return Ok(vec![event]);
        }

        match command {
            Command::Unknown { input } => writeln!(self.out, "unknown command: {input}")?,
            Command::InvalidArgs { command, error } => writeln!(self.out, "/{command}: {error}")?,
            _ => {},
        }
        Ok(Vec::new())
    }
}

impl<R, W> Driver for TerminalDriver<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    type Error = TerminalError;
    type Backend = MemoryBackend;

    fn poll_event(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send {
        let busy = app.is_busy();
        self.next_events(busy)
    }

    fn backend(&self) -> Self::Backend {
        self.backend.clone()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.out.write_all(ui::render(app)?.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Err(error) = self.out.flush() {
            tracing::debug!(%error, "flush on stop failed");
        }
    }
}
