//! The dialog surface shared by every prompt.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use super::request::{PromptKind, PromptRequest};

/// Preferred dialog width in cells.
const DIALOG_WIDTH: u16 = 52;

/// Preferred dialog height in cells.
const DIALOG_HEIGHT: u16 = 9;

/// Gap between the cancel and confirm buttons.
const BUTTON_GAP: u16 = 2;

/// A dismissal listener attached while a prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// Click on the confirm button.
    ConfirmClick,
    /// Click on the cancel button (registered only when it is shown).
    CancelClick,
    /// Click outside the dialog box.
    BackdropClick,
    /// Enter / Escape.
    KeyPress,
}

impl Trigger {
    /// Outcome delivered by a click trigger.
    pub(crate) const fn click_outcome(self) -> bool {
        matches!(self, Self::ConfirmClick)
    }
}

/// Screen regions from the last draw, used for click hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    /// Full overlay (backdrop) area.
    pub area: Rect,
    /// Dialog box.
    pub dialog: Rect,
    /// Confirm button.
    pub confirm: Rect,
    /// Cancel button, when shown.
    pub cancel: Option<Rect>,
}

/// Read-only view of the overlay for assertions and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSnapshot {
    /// Title slot.
    pub title: String,
    /// Message slot.
    pub message: String,
    /// Kind driving icon and colors.
    pub kind: PromptKind,
    /// Confirm button caption.
    pub confirm_label: String,
    /// Cancel button caption.
    pub cancel_label: String,
    /// Whether the cancel button is shown.
    pub cancel_visible: bool,
    /// Whether the overlay is shown.
    pub visible: bool,
    /// Whether the confirm button holds focus.
    pub confirm_focused: bool,
}

/// Cached dialog slots, reused by every prompt.
#[derive(Debug)]
pub(crate) struct Overlay {
    title: String,
    message: String,
    kind: PromptKind,
    confirm_label: String,
    cancel_label: String,
    cancel_visible: bool,
    visible: bool,
    confirm_focused: bool,
    listeners: Vec<Trigger>,
    layout: Option<OverlayLayout>,
}

impl Overlay {
    /// Creates a hidden overlay with empty slots.
    pub(crate) fn new() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: PromptKind::Info,
            confirm_label: String::new(),
            cancel_label: String::new(),
            cancel_visible: false,
            visible: false,
            confirm_focused: false,
            listeners: Vec::with_capacity(4),
            layout: None,
        }
    }

    /// Copies the request into the slots, reusing their buffers.
    pub(crate) fn populate(&mut self, request: &PromptRequest) {
        self.title.clone_from(&request.title);
        self.message.clone_from(&request.message);
        self.kind = request.kind;
        self.confirm_label.clone_from(&request.confirm_label);
        self.cancel_label.clone_from(&request.cancel_label);
        self.cancel_visible = request.show_cancel;
    }

    /// Shows the overlay, focuses confirm, and registers the triggers.
    pub(crate) fn open(&mut self) {
        self.visible = true;
        self.confirm_focused = true;
        self.listeners.clear();
        self.listeners.push(Trigger::ConfirmClick);
        if self.cancel_visible {
            self.listeners.push(Trigger::CancelClick);
        }
        self.listeners.push(Trigger::BackdropClick);
        self.listeners.push(Trigger::KeyPress);
    }

    /// Hides the overlay and drops every trigger.
    pub(crate) fn close(&mut self) {
        self.visible = false;
        self.confirm_focused = false;
        self.listeners.clear();
        self.layout = None;
    }

    pub(crate) const fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn is_listening(&self, trigger: Trigger) -> bool {
        self.listeners.contains(&trigger)
    }

    pub(crate) const fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) const fn layout(&self) -> Option<OverlayLayout> {
        self.layout
    }

    /// Resolves a click to a registered trigger. Clicks inside the dialog
    /// that miss both buttons resolve to nothing.
    pub(crate) fn hit(&self, position: Position) -> Option<Trigger> {
        let layout = self.layout?;
        let trigger = if layout.confirm.contains(position) {
            Trigger::ConfirmClick
        } else if layout.cancel.is_some_and(|r| r.contains(position)) {
            Trigger::CancelClick
        } else if layout.dialog.contains(position) {
            return None;
        } else {
            Trigger::BackdropClick
        };
        self.is_listening(trigger).then_some(trigger)
    }

    pub(crate) fn snapshot(&self) -> PromptSnapshot {
        PromptSnapshot {
            title: self.title.clone(),
            message: self.message.clone(),
            kind: self.kind,
            confirm_label: self.confirm_label.clone(),
            cancel_label: self.cancel_label.clone(),
            cancel_visible: self.cancel_visible,
            visible: self.visible,
            confirm_focused: self.confirm_focused,
        }
    }

    /// Draws the dimmed backdrop and the dialog, recording the hit regions.
    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        frame.render_widget(
            Block::default().style(Style::default().add_modifier(Modifier::DIM)),
            area,
        );

        let dialog = area.centered(
            Constraint::Length(DIALOG_WIDTH.min(area.width)),
            Constraint::Length(DIALOG_HEIGHT.min(area.height)),
        );
        frame.render_widget(Clear, dialog);

        let accent = self.kind.accent();
        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", self.kind.icon()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let [body, _, buttons] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .horizontal_margin(1)
        .areas(inner);

        let message = Paragraph::new(self.message.as_str())
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, body);

        let mut confirm_style = Style::default()
            .fg(Color::Black)
            .bg(accent)
            .add_modifier(Modifier::BOLD);
        if self.confirm_focused {
            confirm_style = confirm_style.add_modifier(Modifier::UNDERLINED);
        }
        let confirm_text = format!(" {} ", self.confirm_label);
        let confirm = button_rect(buttons, buttons.right(), &confirm_text);
        frame.render_widget(Paragraph::new(Span::styled(confirm_text, confirm_style)), confirm);

        let cancel = self.cancel_visible.then(|| {
            let cancel_text = format!(" {} ", self.cancel_label);
            let rect = button_rect(buttons, confirm.x.saturating_sub(BUTTON_GAP), &cancel_text);
            let style = Style::default().fg(Color::Gray).bg(Color::DarkGray);
            frame.render_widget(Paragraph::new(Span::styled(cancel_text, style)), rect);
            rect
        });

        self.layout = Some(OverlayLayout {
            area,
            dialog,
            confirm,
            cancel,
        });
    }
}

/// One-row button rectangle ending at `right` within `row`.
fn button_rect(row: Rect, right: u16, text: &str) -> Rect {
    let width = u16::try_from(Span::raw(text).width())
        .unwrap_or(u16::MAX)
        .min(right.saturating_sub(row.x));
    Rect {
        x: right.saturating_sub(width),
        y: row.y,
        width,
        height: row.height.min(1),
    }
}
