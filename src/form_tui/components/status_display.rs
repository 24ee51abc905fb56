//! Status display component for showing messages

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form_tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Status display component
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub message_history: Vec<StatusMessage>,
    pub max_history: usize,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            message_history: Vec::new(),
            max_history: 100,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set current status message
    pub fn set_message(&mut self, message: StatusMessage) {
        self.archive_current();
        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_warning(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Warning));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    /// Clear current message
    pub fn clear(&mut self) {
        self.archive_current();
    }

    fn archive_current(&mut self) {
        if let Some(current) = self.current_message.take() {
            self.message_history.push(current);
            if self.message_history.len() > self.max_history {
                self.message_history.remove(0);
            }
        }
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    pub fn get_history(&self) -> &[StatusMessage] {
        &self.message_history
    }

    /// Render the status line; `hint` is shown when there is no message
    pub fn render(&self, f: &mut Frame, area: Rect, hint: &str) {
        let content = match &self.current_message {
            Some(message) => self.format_message(message),
            None => hint.to_string(),
        };

        let style = match self.current_message.as_ref().map(|m| &m.status_type) {
            Some(StatusType::Info) => Styles::info(),
            Some(StatusType::Success) => Styles::success(),
            Some(StatusType::Warning) => Styles::warning(),
            Some(StatusType::Error) => Styles::error(),
            None => Styles::inactive(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        let paragraph = Paragraph::new(content).style(style).block(block);

        f.render_widget(paragraph, area);
    }

    /// Format message for display
    fn format_message(&self, message: &StatusMessage) -> String {
        let prefix = match message.status_type {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Warning => "⚠",
            StatusType::Error => "✗",
        };

        format!(
            "{} [{}] {}",
            prefix,
            message.timestamp.format("%H:%M:%S"),
            message.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut status = StatusDisplay::new();
        status.max_history = 2;
        for i in 0..4 {
            status.set_info(format!("message {}", i));
        }
        assert_eq!(status.get_history().len(), 2);
        assert_eq!(status.get_history()[0].message, "message 1");
        assert_eq!(status.get_current().unwrap().message, "message 3");

        status.clear();
        assert!(status.get_current().is_none());
    }
}
