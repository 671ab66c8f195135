//! Error surface for strict run-order parsing.
//!
//! Dispatch itself has no recoverable failure modes: callable shapes and
//! element types are checked when the caller's code is compiled, and the
//! lenient override parse tolerates bad input by dropping it. The only
//! errors this crate reports come from the strict parse used for loud
//! configuration validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("run order specification is empty")]
    Empty,
    #[error("run order token '{token}' at position {position} is not an integer index")]
    InvalidToken { token: String, position: usize },
}
