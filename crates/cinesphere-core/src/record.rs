//! Persisted booking records.
//!
//! One record per line: `id|showtimeKey|seat1,seat2,...`. The showtime key
//! itself contains `|` separators, so decoding takes the id up to the first
//! `|`, the seat list after the last `|`, and keeps everything in between as
//! the key verbatim.

use std::{fmt, str::FromStr};

use crate::{Error, Result, booking::BookingId};

/// The on-disk shape of a booking. Food detail is not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
  pub id:           BookingId,
  pub showtime_key: String,
  pub seats:        Vec<String>,
}

impl fmt::Display for BookingRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}|{}|{}", self.id, self.showtime_key, self.seats.join(","))
  }
}

impl FromStr for BookingRecord {
  type Err = Error;

  fn from_str(line: &str) -> Result<Self> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (id, rest) = line
      .split_once('|')
      .ok_or_else(|| malformed("missing field separator"))?;
    let (key, seats) = rest
      .rsplit_once('|')
      .ok_or_else(|| malformed("expected id, showtime key and seat list"))?;

    let id = id
      .trim()
      .parse::<u32>()
      .map_err(|_| malformed(format!("non-numeric booking id {id:?}")))?;
    if key.is_empty() {
      return Err(malformed("empty showtime key"));
    }

    let seats = if seats.is_empty() {
      Vec::new()
    } else {
      seats.split(',').map(str::to_owned).collect()
    };

    Ok(Self {
      id: BookingId(id),
      showtime_key: key.to_owned(),
      seats,
    })
  }
}

fn malformed(reason: impl Into<String>) -> Error {
  Error::MalformedRecord { reason: reason.into() }
}
