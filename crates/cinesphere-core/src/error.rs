//! Error types for `cinesphere-core`.

use thiserror::Error;

use crate::booking::BookingId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("seat not found: {0}")]
  SeatNotFound(String),

  #[error("seat {0} is already booked")]
  SeatUnavailable(String),

  #[error("booking not found: {0}")]
  BookingNotFound(BookingId),

  #[error("malformed booking record: {reason}")]
  MalformedRecord { reason: String },

  #[error("invalid show date {0:?} (expected YYYY-MM-DD)")]
  InvalidDate(String),

  #[error("invalid show time {0:?} (expected e.g. \"10:30 AM\")")]
  InvalidTime(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
