//! # TUI Components
//!
//! - `TitleBar`: title plus the last evaluation, e.g. `Tally | 10 / 4 = 2.5`
//! - `Display`: previous and current operand rows
//! - `Keypad`: button grid with focus and mouse hit testing
//!
//! The first two are rebuilt every frame from plain values. The display never
//! sees a `Calculator`, only the already-formatted `DisplayLines`:
//!
//! ```rust,ignore
//! Display::new(display_lines(&calculator)).render(frame, area);
//! ```
//!
//! The keypad keeps its focus and last-drawn button rects in `KeypadState`,
//! which outlives frames so clicks can be matched against what was drawn.

mod display;
pub mod keypad;
mod title_bar;

pub use display::{DISPLAY_HEIGHT, Display};
pub use keypad::{Keypad, KeypadEvent, KeypadState};
pub use title_bar::TitleBar;
