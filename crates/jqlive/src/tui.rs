//! Terminal list UI.
//!
//! Draws to stderr so stdout stays free for piping; crossterm reads keys from
//! the controlling terminal even when the document arrived on stdin.

mod render;
mod state;

use std::io::{self, Stderr};

use async_trait::async_trait;
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::{Stream, StreamExt};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

pub use self::render::{draw, View};
pub use self::state::{InputState, KeyAction};

use crate::error::{CoreError, CoreResult};
use crate::frontend::{Decision, Frontend};
use crate::highlight::Highlighted;
use crate::preview::{PreviewController, PreviewState, PreviewUpdates};
use crate::shorthand::ShorthandTable;

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalSession {
    fn new() -> CoreResult<Self> {
        enable_raw_mode().map_err(terminal_error)?;

        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen).map_err(|error| {
            teardown_terminal();
            terminal_error(error)
        })?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stderr)).map_err(|error| {
            teardown_terminal();
            terminal_error(error)
        })?;
        terminal.clear().map_err(|error| {
            teardown_terminal();
            terminal_error(error)
        })?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stderr(), LeaveAlternateScreen);
}

fn terminal_error(error: io::Error) -> CoreError {
    CoreError::Terminal(error.to_string())
}

/// Interactive front end on the controlling terminal.
pub struct TuiFrontend {
    shorthands: ShorthandTable,
    input: InputState,
    /// Annotation of the shown candidate, keyed by its generation.
    annotation: Option<(u64, Highlighted)>,
    /// Enter was pressed while the newest input was still evaluating.
    confirm_pending: bool,
}

impl TuiFrontend {
    pub fn new(shorthands: ShorthandTable) -> Self {
        Self {
            shorthands,
            input: InputState::default(),
            annotation: None,
            confirm_pending: false,
        }
    }

    fn refresh_annotation(&mut self, controller: &PreviewController) {
        let Some(candidate) = controller.candidate() else {
            self.annotation = None;
            return;
        };
        let stale = self
            .annotation
            .as_ref()
            .map_or(true, |(generation, _)| *generation != candidate.generation());
        if stale {
            self.annotation = Some((candidate.generation(), controller.annotate(candidate)));
        }
    }

    fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        controller: &PreviewController,
    ) -> CoreResult<()> {
        let candidate = controller
            .candidate()
            .zip(self.annotation.as_ref())
            .map(|(candidate, (_, annotation))| (candidate.label(), annotation));
        let view = View {
            input: &self.input,
            evaluating: matches!(controller.state(), PreviewState::Evaluating { .. }),
            candidate,
            shorthands: &self.shorthands,
        };
        terminal
            .draw(|frame| draw(frame, &view))
            .map_err(terminal_error)?;
        Ok(())
    }

    /// Draws and reacts to keys and completions until the user decides.
    ///
    /// Enter during an evaluation confirms once the newest run has landed, so
    /// the committed result matches the input on screen.
    async fn event_loop<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut S,
        controller: &mut PreviewController,
        updates: &mut PreviewUpdates,
    ) -> CoreResult<Decision>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            let evaluating = matches!(controller.state(), PreviewState::Evaluating { .. });
            if self.confirm_pending && !evaluating {
                return Ok(Decision::Confirm);
            }
            self.refresh_annotation(controller);
            self.render(terminal, controller)?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => match self.input.handle_key(key) {
                        KeyAction::Edited => {
                            controller.input_changed(self.input.text());
                        }
                        KeyAction::Confirm => self.confirm_pending = true,
                        KeyAction::Cancel => return Ok(Decision::Cancel),
                        KeyAction::Moved | KeyAction::Ignored => {}
                    },
                    Some(Ok(_)) => {}
                    Some(Err(error)) => return Err(terminal_error(error)),
                    None => return Ok(Decision::Cancel),
                },
                Some(update) = updates.recv() => {
                    controller.apply(update);
                }
            }
        }
    }
}

#[async_trait(?Send)]
impl Frontend for TuiFrontend {
    async fn drive(
        &mut self,
        controller: &mut PreviewController,
        updates: &mut PreviewUpdates,
    ) -> CoreResult<Decision> {
        let mut session = TerminalSession::new()?;
        let mut events = EventStream::new();
        self.event_loop(&mut session.terminal, &mut events, controller, updates)
            .await
    }
}
