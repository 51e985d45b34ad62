//! Error handling for page fetches.
//!
//! Page sources report failures as [`FetchError`]. The list controller
//! converts every one of them into state (the list's `error` field), so
//! nothing in this module ever reaches the view as a panic or an
//! unhandled `Err`.
//!
//! | Variant | Retryable |
//! |---------|-----------|
//! | ConnectionFailed | Yes |
//! | Timeout | Yes |
//! | HttpStatus 5xx / 408 / 429 | Yes |
//! | HttpStatus other | No |
//! | InvalidResponse | No |
//! | Cancelled | No |
//! | Other | No |

mod fetch;

pub use fetch::{classify_http_error, FetchError};
