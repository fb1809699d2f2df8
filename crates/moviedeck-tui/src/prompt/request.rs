//! Prompt request description.

use ratatui::style::Color;

/// Visual flavor of a prompt; selects the icon and button color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptKind {
    /// Neutral notice.
    #[default]
    Info,
    /// Failure report.
    Error,
    /// Completed action.
    Success,
    /// Caution.
    Warning,
    /// Yes/no question.
    Confirm,
}

impl PromptKind {
    /// Icon glyph drawn next to the title.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Error => "!",
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Confirm => "?",
        }
    }

    /// Accent color for the icon, border, and confirm button.
    #[must_use]
    pub const fn accent(self) -> Color {
        match self {
            Self::Info | Self::Confirm => Color::Cyan,
            Self::Error => Color::Red,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
        }
    }
}

/// What to show in a prompt. Moved into the controller by `show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Dialog title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Icon and color selection.
    pub kind: PromptKind,
    /// Whether the cancel button is shown and clickable.
    pub show_cancel: bool,
    /// Confirm button caption.
    pub confirm_label: String,
    /// Cancel button caption.
    pub cancel_label: String,
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: PromptKind::Info,
            show_cancel: false,
            confirm_label: String::from("OK"),
            cancel_label: String::from("Cancel"),
        }
    }
}

impl PromptRequest {
    /// Creates a request with default labels and no cancel button.
    pub fn new(kind: PromptKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            ..Self::default()
        }
    }

    /// Info prompt titled "Notice".
    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(PromptKind::Info, "Notice", message)
    }

    /// Error prompt titled "Error".
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(PromptKind::Error, "Error", message)
    }

    /// Success prompt titled "Success".
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(PromptKind::Success, "Success", message)
    }

    /// Warning prompt titled "Warning".
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(PromptKind::Warning, "Warning", message)
    }

    /// Yes/No question titled "Confirm".
    pub fn confirm(message: impl Into<String>) -> Self {
        Self::new(PromptKind::Confirm, "Confirm", message)
            .with_cancel(true)
            .with_labels("Yes", "No")
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces both button captions.
    #[must_use]
    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    /// Shows or hides the cancel button.
    #[must_use]
    pub const fn with_cancel(mut self, show_cancel: bool) -> Self {
        self.show_cancel = show_cancel;
        self
    }
}
