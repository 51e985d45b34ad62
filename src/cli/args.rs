//! Command-line argument parsing.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::ItineraryFilters;
use crate::models::ItineraryStatus;

/// Options for the interactive browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseOptions {
    /// Initial filters of the listing
    pub filters: ItineraryFilters,
    /// Overrides `VOYAGE_API_URL`
    pub api_url: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the itinerary browser (default)
    Browse(BrowseOptions),
}

/// Errors from malformed command lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: String },

    #[error("invalid value '{value}' for {flag}: {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

pub const USAGE: &str = "\
Usage: voyage [OPTIONS]

Browse itineraries with an infinitely scrolling list.

Options:
      --status <STATUS>     agendado, confirmado, concluido or cancelado
      --date <YYYY-MM-DD>   only itineraries on this day
      --destination <ID>    only itineraries at this destination
      --api-url <URL>       backend URL (overrides VOYAGE_API_URL)
  -h, --help                print this help
  -V, --version             print version

Keys: j/k or arrows scroll, PgUp/PgDn page, s cycle status, c clear filters,
      r retry, Enter details, q quit";

pub const USAGE_HINT: &str = "Run 'voyage --help' for usage.";

fn invalid(flag: &str, value: &str, reason: impl Into<String>) -> ArgsError {
    ArgsError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse command-line arguments and return the command to run.
///
/// Both `--flag value` and `--flag=value` forms are accepted.
///
/// # Examples
///
/// ```
/// use voyage::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["voyage".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = BrowseOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--status" | "--date" | "--destination" | "--api-url" => {
                let value = match inline {
                    Some(value) => value,
                    None => args.next().ok_or_else(|| ArgsError::MissingValue {
                        flag: flag.clone(),
                    })?,
                };
                apply_option(&mut options, &flag, &value)?;
            }
            _ => return Err(ArgsError::UnknownArgument(arg)),
        }
    }

    Ok(CliCommand::Browse(options))
}

fn apply_option(options: &mut BrowseOptions, flag: &str, value: &str) -> Result<(), ArgsError> {
    match flag {
        "--status" => {
            let status = value
                .parse::<ItineraryStatus>()
                .map_err(|reason| invalid(flag, value, reason))?;
            options.filters.status = Some(status);
        }
        "--date" => {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|e| invalid(flag, value, e.to_string()))?;
            options.filters.date = Some(date);
        }
        "--destination" => {
            let id = value
                .parse::<u64>()
                .map_err(|e| invalid(flag, value, e.to_string()))?;
            options.filters.destination = Some(id);
        }
        "--api-url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(flag, value, "expected an http(s) URL"));
            }
            options.api_url = Some(value.to_string());
        }
        _ => return Err(ArgsError::UnknownArgument(flag.to_string())),
    }
    Ok(())
}
