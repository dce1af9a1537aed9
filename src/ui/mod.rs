//! Front ends for the live view: an interactive terminal and a headless runner

pub mod headless;
pub mod terminal;

pub use headless::{run_headless, HeadlessReport, HEADLESS_HZ};
pub use terminal::{render_frame, run, TerminalHost};
