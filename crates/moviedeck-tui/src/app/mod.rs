//! Movie browser main loop.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::{FutureExt, StreamExt};
use moviedeck_api::tmdb::{ImageConfig, TmdbApi};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedSender};

use self::state::{AppMessage, BrowserState, Command};
use crate::catalog::{PopularFeed, TypeaheadSettings, fetch_suggestions, load_movie_details};
use crate::prompt::{PromptController, PromptEvent};

/// Interval of the debounce / redraw tick.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Settings for [`run_browser`].
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// TMDB response language.
    pub language: String,
    /// Image URL settings.
    pub images: ImageConfig,
    /// Typeahead tuning.
    pub typeahead: TypeaheadSettings,
}

/// Runs the interactive movie browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or event reading fails.
pub async fn run_browser<A>(api: Arc<A>, options: BrowserOptions) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    let mut state = BrowserState::new(&options.language, options.images, options.typeahead);
    let prompt = PromptController::new();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &prompt, &api).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    prompt: &PromptController,
    api: &Arc<A>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);

    let initial = state.start();
    dispatch(initial, state, prompt, api, &tx);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state, prompt))
            .context("failed to draw TUI")?;

        let command = tokio::select! {
            maybe_event = events.next().fuse() => match maybe_event {
                Some(Ok(event)) => handle_terminal_event(&event, state, prompt),
                Some(Err(e)) => return Err(e).context("failed to read event"),
                None => return Ok(()),
            },
            Some(message) = rx.recv() => {
                state.handle_message(message);
                None
            }
            _ = tick.tick() => state.tick(Instant::now()),
        };

        if let Some(command) = command
            && dispatch(command, state, prompt, api, &tx)
        {
            return Ok(());
        }
    }
}

/// Routes a terminal event to the open prompt first, then to the browser.
fn handle_terminal_event(
    event: &Event,
    state: &mut BrowserState,
    prompt: &PromptController,
) -> Option<Command> {
    if let Some(prompt_event) = PromptEvent::from_terminal(event)
        && prompt.handle_event(prompt_event)
    {
        return None;
    }
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            state.handle_key(key.code, key.modifiers, Instant::now())
        }
        _ => None,
    }
}

/// Starts the work behind `command`. Returns `true` to exit.
fn dispatch<A>(
    command: Command,
    state: &BrowserState,
    prompt: &PromptController,
    api: &Arc<A>,
    tx: &UnboundedSender<AppMessage>,
) -> bool
where
    A: TmdbApi + Send + Sync + 'static,
{
    let language = String::from(state.feed.language());
    match command {
        Command::Quit => return true,
        Command::FetchPage(request) => {
            let api = Arc::clone(api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = PopularFeed::fetch(api.as_ref(), request, &language).await;
                let _ = tx.send(AppMessage::Page { request, result });
            });
        }
        Command::LoadDetails(movie_id) => {
            let api = Arc::clone(api);
            let prompt = prompt.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let details = load_movie_details(api.as_ref(), &prompt, movie_id, &language)
                    .await
                    .map(Box::new);
                let _ = tx.send(AppMessage::Details { movie_id, details });
            });
        }
        Command::Search(request) => {
            let api = Arc::clone(api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = fetch_suggestions(api.as_ref(), &request.query, &language).await;
                let _ = tx.send(AppMessage::Suggestions {
                    generation: request.generation,
                    result,
                });
            });
        }
        Command::OpenUrl(url) => {
            tracing::info!(url = %url, "opening trailer");
            if let Err(e) = open::that(&url) {
                tracing::warn!(url = %url, error = %e, "failed to open browser");
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use super::state::Screen;
    use super::*;

    fn new_state() -> BrowserState {
        BrowserState::new("en-US", ImageConfig::default(), TypeaheadSettings::default())
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_open_prompt_swallows_keys() {
        // Arrange
        let mut state = new_state();
        let prompt = PromptController::new();
        let _response = prompt.confirm("Quit?", None);

        // Act
        let command = handle_terminal_event(&press(KeyCode::Char('q')), &mut state, &prompt);

        // Assert
        assert!(command.is_none());
        assert!(prompt.is_active());
    }

    #[test]
    fn test_escape_goes_to_prompt_before_browser() {
        // Arrange
        let mut state = new_state();
        state.open_movie(438_631);
        let prompt = PromptController::new();
        let _response = prompt.alert("hello", None);

        // Act
        handle_terminal_event(&press(KeyCode::Esc), &mut state, &prompt);

        // Assert
        assert!(!prompt.is_active());
        assert_eq!(state.screen, Screen::Detail);
    }

    #[test]
    fn test_keys_reach_browser_without_prompt() {
        // Arrange
        let mut state = new_state();
        let prompt = PromptController::new();

        // Act
        let command = handle_terminal_event(&press(KeyCode::Char('q')), &mut state, &prompt);

        // Assert
        assert_eq!(command, Some(Command::Quit));
    }

    #[test]
    fn test_mouse_without_prompt_is_ignored() {
        // Arrange
        let mut state = new_state();
        let prompt = PromptController::new();
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });

        // Act
        let command = handle_terminal_event(&click, &mut state, &prompt);

        // Assert
        assert!(command.is_none());
    }
}
