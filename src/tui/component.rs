use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something `draw_ui` can place in a slice of the frame.
///
/// `TitleBar` and `Display` are built fresh each frame from the calculator
/// snapshot. `Keypad` borrows the long-lived `KeypadState` and writes the
/// button rects it laid out back into it, hence `&mut self`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns raw terminal events into something the event loop acts on.
///
/// Only the keypad implements this: clicks and focus moves go in, a
/// `KeypadEvent::Press` comes out when a button should be dispatched.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
