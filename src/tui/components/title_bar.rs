//! # TitleBar Component
//!
//! Top status bar: the configured title plus a transient status message
//! (the last evaluation, e.g. `10 / 4 = 2.5`).
//!
//! Stateless. It receives both props from the parent and renders a single
//! line:
//!
//! 1. **Status message**: `"Tally | 10 / 4 = 2.5"`
//! 2. **Default**: `"Tally"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Configured title (e.g., "Tally")
    pub title: String,
    /// Status message (e.g., "10 / 4 = 2.5")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(title: String, status_message: String) -> Self {
        Self {
            title,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
