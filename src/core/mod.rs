//! # Core Calculator Logic
//!
//! This module contains Tally's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Calculator (state)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • evaluate / format    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Headless  │
//!           │  Adapter   │              │   replay   │
//!           │ (ratatui)  │              │  (--keys)  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Calculator` struct and its `Operation` / `Digit` payloads
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`evaluate`]: Number parsing, arithmetic, and result text
//! - [`format`]: Display formatting with thousands grouping
//! - [`keypad`]: The button set shared by the TUI and replay
//! - [`replay`]: Headless key sequences
//! - [`config`]: Settings with defaults → file → env → CLI overrides

pub mod action;
pub mod config;
pub mod evaluate;
pub mod format;
pub mod keypad;
pub mod replay;
pub mod state;
