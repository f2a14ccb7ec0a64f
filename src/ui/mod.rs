//! UI utilities for terminal output
//!
//! A spinner for non-interactive network waits and the interactive picker.

mod interactive;
mod picker;
mod spinner;

pub use interactive::{run_interactive, Switched};
pub use picker::{ListView, Picker, PickerState, Selection, TerminalPicker};
pub use spinner::{clear_spinner, create_spinner, set_spinner_message};
