//! Queue-backed modal prompt controller.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use tokio::sync::oneshot;

use super::overlay::{Overlay, PromptSnapshot, Trigger};
use super::request::PromptRequest;

/// Input routed to an open prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// A key press.
    Key(KeyCode),
    /// A left click at a terminal cell.
    Click {
        /// Column of the clicked cell.
        column: u16,
        /// Row of the clicked cell.
        row: u16,
    },
}

impl PromptEvent {
    /// Converts a terminal event; key releases and non-click mouse events yield `None`.
    #[must_use]
    pub fn from_terminal(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key.code)),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some(Self::Click {
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            _ => None,
        }
    }
}

/// Resolves to `true` when confirmed and `false` when dismissed.
///
/// The request is queued when `show` is called, not when this is first
/// polled. Dropping the response does not withdraw the prompt. If the
/// controller goes away first, the response resolves to `false`.
#[derive(Debug)]
pub struct PromptResponse {
    rx: oneshot::Receiver<bool>,
}

impl Future for PromptResponse {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.unwrap_or(false))
    }
}

/// A request waiting for the overlay.
#[derive(Debug)]
struct Pending {
    request: PromptRequest,
    reply: oneshot::Sender<bool>,
}

/// The prompt currently on screen.
#[derive(Debug)]
struct Active {
    invocation: u64,
    reply: oneshot::Sender<bool>,
}

#[derive(Debug, Default)]
struct ControllerState {
    overlay: Option<Overlay>,
    active: Option<Active>,
    queue: VecDeque<Pending>,
    invocations: u64,
}

impl ControllerState {
    /// Puts the next queued request on screen if the overlay is free.
    fn advance(&mut self) {
        if self.active.is_some() {
            return;
        }
        let Some(next) = self.queue.pop_front() else {
            return;
        };

        let overlay = self.overlay.get_or_insert_with(|| {
            tracing::debug!("creating prompt overlay");
            Overlay::new()
        });
        overlay.populate(&next.request);
        overlay.open();

        self.invocations = self.invocations.wrapping_add(1);
        tracing::debug!(
            invocation = self.invocations,
            title = %next.request.title,
            kind = ?next.request.kind,
            queued = self.queue.len(),
            "prompt opened"
        );
        self.active = Some(Active {
            invocation: self.invocations,
            reply: next.reply,
        });
    }

    /// Closes `invocation` with `outcome`. No-op if it is no longer on screen.
    fn cleanup(&mut self, invocation: u64, outcome: bool) {
        if self
            .active
            .as_ref()
            .is_none_or(|a| a.invocation != invocation)
        {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.close();
        }
        // The caller may have dropped its response.
        let _ = active.reply.send(outcome);
        tracing::debug!(invocation, outcome, "prompt closed");
        self.advance();
    }
}

fn titled(request: PromptRequest, title: Option<&str>) -> PromptRequest {
    match title {
        Some(title) => request.with_title(title),
        None => request,
    }
}

/// Shows one modal prompt at a time and resolves a future per request.
///
/// Cloning yields another handle to the same overlay and queue, so
/// background tasks can raise prompts that the UI loop draws and dismisses.
#[derive(Debug, Clone, Default)]
pub struct PromptController {
    inner: Arc<Mutex<ControllerState>>,
}

impl PromptController {
    /// Creates a controller; the overlay is built on the first `show`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues `request` and returns its response.
    ///
    /// Requests are displayed in FIFO order; a request made while another
    /// prompt is open waits until that prompt is dismissed.
    pub fn show(&self, request: PromptRequest) -> PromptResponse {
        let (reply, rx) = oneshot::channel();
        let mut state = self.lock();
        state.queue.push_back(Pending { request, reply });
        state.advance();
        PromptResponse { rx }
    }

    /// Info prompt titled "Notice" unless `title` overrides it.
    pub fn alert(&self, message: impl Into<String>, title: Option<&str>) -> PromptResponse {
        self.show(titled(PromptRequest::alert(message), title))
    }

    /// Error prompt titled "Error" unless `title` overrides it.
    pub fn error(&self, message: impl Into<String>, title: Option<&str>) -> PromptResponse {
        self.show(titled(PromptRequest::error(message), title))
    }

    /// Success prompt titled "Success" unless `title` overrides it.
    pub fn success(&self, message: impl Into<String>, title: Option<&str>) -> PromptResponse {
        self.show(titled(PromptRequest::success(message), title))
    }

    /// Warning prompt titled "Warning" unless `title` overrides it.
    pub fn warning(&self, message: impl Into<String>, title: Option<&str>) -> PromptResponse {
        self.show(titled(PromptRequest::warning(message), title))
    }

    /// Yes/No question titled "Confirm" unless `title` overrides it.
    pub fn confirm(&self, message: impl Into<String>, title: Option<&str>) -> PromptResponse {
        self.show(titled(PromptRequest::confirm(message), title))
    }

    /// Fully caller-specified prompt.
    pub fn custom(&self, request: PromptRequest) -> PromptResponse {
        self.show(request)
    }

    /// Routes an input event to the open prompt.
    ///
    /// Returns `true` when a prompt is open: every event is consumed then,
    /// whether or not it dismissed the prompt.
    pub fn handle_event(&self, event: PromptEvent) -> bool {
        let mut state = self.lock();
        let Some(invocation) = state.active.as_ref().map(|a| a.invocation) else {
            return false;
        };
        let Some(overlay) = state.overlay.as_ref() else {
            return false;
        };

        let outcome = match event {
            PromptEvent::Key(code) if overlay.is_listening(Trigger::KeyPress) => match code {
                KeyCode::Esc => Some(false),
                KeyCode::Enter => Some(true),
                _ => None,
            },
            PromptEvent::Key(_) => None,
            PromptEvent::Click { column, row } => overlay
                .hit(Position::new(column, row))
                .map(Trigger::click_outcome),
        };

        if let Some(outcome) = outcome {
            state.cleanup(invocation, outcome);
        }
        true
    }

    /// Draws the overlay on top of `area` when a prompt is open.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut state = self.lock();
        if let Some(overlay) = state.overlay.as_mut() {
            overlay.render(frame, area);
        }
    }

    /// Whether a prompt is on screen.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().active.is_some()
    }

    /// Requests waiting behind the open prompt.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Dismissal triggers currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock()
            .overlay
            .as_ref()
            .map_or(0, Overlay::listener_count)
    }

    /// Whether the overlay has been built.
    #[must_use]
    pub fn overlay_created(&self) -> bool {
        self.lock().overlay.is_some()
    }

    /// Current overlay contents, or `None` before the first prompt.
    #[must_use]
    pub fn snapshot(&self) -> Option<PromptSnapshot> {
        self.lock().overlay.as_ref().map(Overlay::snapshot)
    }
}
