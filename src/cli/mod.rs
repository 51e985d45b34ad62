//! CLI module for voyage.
//!
//! Parses flags before the terminal UI starts:
//!
//! ```ignore
//! use voyage::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! if let Some(options) = run_cli_command(command) {
//!     // start the browser with `options`
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, BrowseOptions, CliCommand, USAGE_HINT};
pub use version::{help_text, version_line, VERSION};

/// Run a CLI command if applicable.
///
/// Prints version or help and returns `None`; returns the browse options
/// when the UI should start.
pub fn run_cli_command(command: CliCommand) -> Option<BrowseOptions> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            None
        }
        CliCommand::Help => {
            println!("{}", help_text());
            None
        }
        CliCommand::Browse(options) => Some(options),
    }
}
