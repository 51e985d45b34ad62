//! Version and help output.

use super::args::USAGE;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("voyage {}", VERSION)
}

pub fn help_text() -> String {
    format!("{}\n\n{}", version_line(), USAGE)
}
