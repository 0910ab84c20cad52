pub mod status_formatter;

pub use status_formatter::{colorize_status, format_status};
