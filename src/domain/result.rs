//! Crate-wide result alias

use super::errors::SprintdeckError;

/// Shorthand for `std::result::Result<T, SprintdeckError>`, used by every
/// fallible operation in the crate.
///
/// ```
/// use sprintdeck::domain::{Result, SprintdeckError};
///
/// fn parse_count(raw: &str) -> Result<usize> {
///     raw.parse()
///         .map_err(|_| SprintdeckError::Validation(format!("not a count: {raw}")))
/// }
///
/// assert!(parse_count("3").is_ok());
/// assert!(parse_count("three").is_err());
/// ```
pub type Result<T> = std::result::Result<T, SprintdeckError>;
