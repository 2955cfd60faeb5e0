pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use app::events::{AppEvent, spawn_input_task};
use app::state::{AppMode, AppState};
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let mut session = TerminalSession::enter()?;
    event_loop(&mut session.terminal, cli).await
}

/// Draws, then waits for the next event. The first pass paints the loading
/// screen before any network response arrives; the loop ends when the state
/// machine reaches `AppMode::Quit` or both event sources close.
async fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli);

    tx.send(AppEvent::Bootstrap).await?;

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        let event = tokio::select! {
            maybe_input = input_stream.next() => maybe_input.map(AppEvent::Input),
            maybe_event = rx.recv() => maybe_event,
        };
        let Some(event) = event else { break };
        app.handle_event(event, &tx).await?;

        if app.mode == AppMode::Quit {
            break;
        }
    }

    Ok(())
}

/// Raw-mode alternate-screen session, restored on drop and on panic.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        let existing = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic| {
            leave_screen();
            existing(panic);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        leave_screen();
        let _ = self.terminal.show_cursor();
    }
}

fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
