use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ParseError;

lazy_static! {
    // Accepted separator forms: commas, semicolons, or plain whitespace
    static ref SEPARATORS: Regex = Regex::new(r"[,;\s]+").unwrap();
}

/// Parses a free-form textual reference list into an ordered address stream
///
/// The whole stream is parsed up front, before any of it reaches a cache,
/// so a malformed token can never leave a simulation half-applied. An empty
/// input is an empty stream, not an error
///
/// # Examples
///
/// ```
/// use waylib::refs::parse_refs;
/// assert_eq!(parse_refs("1, 65, 129").unwrap(), vec![1, 65, 129]);
/// assert_eq!(parse_refs("1;65;129").unwrap(), vec![1, 65, 129]);
/// assert_eq!(parse_refs("1 65 129").unwrap(), vec![1, 65, 129]);
/// ```
pub fn parse_refs(input: &str) -> Result<Vec<u64>, ParseError> {
    SEPARATORS
        .split(input.trim())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<u64>().map_err(|_| ParseError::BadToken {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}
