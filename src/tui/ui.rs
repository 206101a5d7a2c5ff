use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::format::display_lines;
use crate::core::state::Calculator;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DISPLAY_HEIGHT, Display, Keypad, TitleBar};

const HELP_TEXT: &str = " ←↑↓→ Move  Enter Press  Click Press  q Quit ";

/// Widest the calculator gets; wider terminals center it.
const MAX_WIDTH: u16 = 48;

pub fn draw_ui(frame: &mut Frame, calculator: &Calculator, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let area = centered_column(frame.area(), MAX_WIDTH);
    let help_height = if tui.show_help { 1 } else { 0 };
    let layout = Layout::vertical([
        Length(1),
        Length(DISPLAY_HEIGHT),
        Min(0),
        Length(help_height),
    ]);
    let [title_area, display_area, keypad_area, help_area] = layout.areas(area);

    TitleBar::new(tui.title.clone(), tui.status_message.clone()).render(frame, title_area);
    Display::new(display_lines(calculator)).render(frame, display_area);
    Keypad::new(&mut tui.keypad).render(frame, keypad_area);

    if tui.show_help {
        let help = Line::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)).centered();
        frame.render_widget(help, help_area);
    }
}

/// A full-height column at most `max_width` wide, centered horizontally.
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::replay::replay;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(calculator: &Calculator, tui: &mut TuiState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, calculator, tui)).unwrap();
        terminal
    }

    #[test]
    fn test_draw_ui_empty() {
        let mut tui = TuiState::new("Tally".to_string(), true);
        let terminal = draw(&Calculator::default(), &mut tui);
        let text = buffer_text(&terminal);
        assert!(text.contains("Tally"));
        assert!(text.contains("AC"));
        assert!(text.contains("q Quit"));
    }

    #[test]
    fn test_draw_ui_shows_formatted_operands() {
        let calculator = replay("1234567.5*89").state;
        let mut tui = TuiState::new("Tally".to_string(), false);
        let terminal = draw(&calculator, &mut tui);
        let text = buffer_text(&terminal);
        assert!(text.contains("1,234,567.5 *"));
        assert!(text.contains("89"));
        assert!(!text.contains("q Quit"));
    }

    #[test]
    fn test_centered_column() {
        let area = Rect::new(0, 0, 100, 10);
        assert_eq!(centered_column(area, 48), Rect::new(26, 0, 48, 10));
        let narrow = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_column(narrow, 48), narrow);
    }
}
