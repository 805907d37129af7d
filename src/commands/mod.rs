mod help;
mod start;

pub use help::{HELP_TEXT, help};
pub use start::{START_TEXT, start};
