use thiserror::Error;

/// Rejected cache geometry. Always fatal to constructing that instance,
/// never silently corrected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a replacement policy is required with {ways} ways (anything other than direct mapping)")]
    PolicyRequired { ways: usize },

    #[error("{partitions} partitions cannot be split evenly into sets of {ways} ways")]
    UnevenSets { partitions: usize, ways: usize },

    #[error("{field} must be a positive integer")]
    Zero { field: &'static str },
}

/// A windowed index translation or lookup that fell outside its declared
/// range. Inside the cache this means an invariant was violated, so it is
/// propagated rather than swallowed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("window index {local} is out of range for a window of {len} elements")]
    OutOfRange { local: isize, len: usize },

    #[error("value not present in the window")]
    NotFound,

    #[error("slot {slot} is out of range for a cache with {partitions} partitions")]
    SlotOutOfRange { slot: usize, partitions: usize },
}

/// Malformed reference-stream text. Parsing happens before any access, so
/// this never leaves a cache in a partially updated state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{token}' (reference #{position}) is not a valid word address")]
    BadToken { token: String, position: usize },
}
