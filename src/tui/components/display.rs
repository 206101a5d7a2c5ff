//! # Display Component
//!
//! The calculator's output panel. Two right-aligned rows inside a border:
//!
//! ```text
//! ┌──────────────────────┐
//! │             1,234 +  │   previous operand + pending operation (dim)
//! │                  56  │   current operand (bold)
//! └──────────────────────┘
//! ```
//!
//! Text too wide for the panel is cut from the left so the digits being
//! typed stay visible, with a leading `…` marking the cut.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::format::DisplayLines;
use crate::tui::component::Component;

/// Rows the display needs, borders included.
pub const DISPLAY_HEIGHT: u16 = 4;

pub struct Display {
    pub lines: DisplayLines,
}

impl Display {
    pub fn new(lines: DisplayLines) -> Self {
        Self { lines }
    }
}

impl Component for Display {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let width = block.inner(area).width as usize;

        let previous = Line::styled(
            fit_from_right(&self.lines.previous, width),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        );
        let current = Line::styled(
            fit_from_right(&self.lines.current, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );

        let paragraph = Paragraph::new(vec![previous, current])
            .alignment(Alignment::Right)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

/// Keeps the rightmost part of `text` that fits in `width` columns.
fn fit_from_right(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    // Reserve one column for the ellipsis
    let budget = width - 1;
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = idx;
    }
    format!("…{}", &text[start..])
}
