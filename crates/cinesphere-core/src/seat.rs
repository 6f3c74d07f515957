//! Seat ledger: The per-theater grid of seats and their booking status.
//!
//! The ledger is the authoritative source of availability. A seat moves
//! through `AVAILABLE → SELECTED → BOOKED → AVAILABLE`; the only way into
//! `SELECTED` is a [`SeatSelection`] session, which reverts its seats when it
//! is dropped without being finalised.

use rust_decimal::Decimal;
use strum::Display;

use crate::{Error, Result};

// ─── Seat ────────────────────────────────────────────────────────────────────

/// Pricing class of a seat, fixed when the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatType {
  Standard,
  Premium,
}

impl SeatType {
  /// Ticket price for this class.
  pub fn price(self) -> Decimal {
    match self {
      Self::Standard => Decimal::new(25000, 2),
      Self::Premium => Decimal::new(45000, 2),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
  #[default]
  Available,
  Selected,
  Booked,
}

/// A single seat, identified by row letter and column number (e.g. `A5`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
  id:     String,
  kind:   SeatType,
  status: SeatStatus,
}

impl Seat {
  fn new(id: String, kind: SeatType) -> Self {
    Self { id, kind, status: SeatStatus::Available }
  }

  pub fn id(&self) -> &str { &self.id }

  pub fn kind(&self) -> SeatType { self.kind }

  pub fn status(&self) -> SeatStatus { self.status }

  pub fn price(&self) -> Decimal { self.kind.price() }
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Rows of seats for one theater: premium rows first, then standard rows.
#[derive(Debug, Clone, Default)]
pub struct SeatLedger {
  rows: Vec<Vec<Seat>>,
}

impl SeatLedger {
  /// Build a grid with rows lettered from `A` and columns numbered from 1.
  ///
  /// At most 26 rows (`A` to `Z`) in total.
  pub fn new(premium_rows: usize, standard_rows: usize, seats_per_row: usize) -> Self {
    debug_assert!(
      premium_rows + standard_rows <= 26,
      "seat grid needs {} rows but only A-Z are available",
      premium_rows + standard_rows
    );
    let kinds = std::iter::repeat_n(SeatType::Premium, premium_rows)
      .chain(std::iter::repeat_n(SeatType::Standard, standard_rows));

    let rows = kinds
      .enumerate()
      .map(|(r, kind)| {
        let letter = row_letter(r);
        (1..=seats_per_row)
          .map(|c| Seat::new(format!("{letter}{c}"), kind))
          .collect()
      })
      .collect();

    Self { rows }
  }

  pub fn rows(&self) -> &[Vec<Seat>] { &self.rows }

  pub fn seats(&self) -> impl Iterator<Item = &Seat> { self.rows.iter().flatten() }

  /// First seat whose id equals `seat_id` exactly.
  pub fn find_seat(&self, seat_id: &str) -> Option<&Seat> {
    self.seats().find(|s| s.id == seat_id)
  }

  fn find_seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
    self.rows.iter_mut().flatten().find(|s| s.id == seat_id)
  }

  /// Unconditionally overwrite a seat's status. Callers own the state
  /// machine.
  pub fn set_status(&mut self, seat_id: &str, status: SeatStatus) -> Result<()> {
    let seat = self
      .find_seat_mut(seat_id)
      .ok_or_else(|| Error::SeatNotFound(seat_id.to_owned()))?;
    seat.status = status;
    Ok(())
  }

  /// Mark each listed seat BOOKED. Unknown ids are skipped.
  pub fn mark_booked<S: AsRef<str>>(&mut self, seat_ids: &[S]) {
    for id in seat_ids {
      if let Some(seat) = self.find_seat_mut(id.as_ref()) {
        seat.status = SeatStatus::Booked;
      }
    }
  }

  /// Revert each listed seat that is currently BOOKED back to AVAILABLE.
  /// Unknown ids and seats in any other state are left alone.
  pub fn release<S: AsRef<str>>(&mut self, seat_ids: &[S]) {
    for id in seat_ids {
      if let Some(seat) = self.find_seat_mut(id.as_ref())
        && seat.status == SeatStatus::Booked
      {
        seat.status = SeatStatus::Available;
      }
    }
  }

  /// Sum of ticket prices for the listed seats. Unknown ids contribute
  /// nothing.
  pub fn price_of<S: AsRef<str>>(&self, seat_ids: &[S]) -> Decimal {
    seat_ids
      .iter()
      .filter_map(|id| self.find_seat(id.as_ref()))
      .map(Seat::price)
      .sum()
  }

  pub fn count(&self, status: SeatStatus) -> usize {
    self.seats().filter(|s| s.status == status).count()
  }

  /// Open a selection session over this ledger.
  pub fn select(&mut self) -> SeatSelection<'_> {
    SeatSelection { ledger: self, selected: Vec::new(), finalized: false }
  }
}

fn row_letter(index: usize) -> char {
  char::from(b'A' + (index % 26) as u8)
}

// ─── Selection session ───────────────────────────────────────────────────────

/// Outcome of [`SeatSelection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
  Selected,
  Deselected,
}

/// One interactive round of seat picking against a single ledger.
///
/// Seats toggled here are SELECTED until [`finalize`](Self::finalize) turns
/// them BOOKED. Dropping the session without finalising reverts them to
/// AVAILABLE, so no seat stays SELECTED once the session is gone.
pub struct SeatSelection<'a> {
  ledger:    &'a mut SeatLedger,
  selected:  Vec<String>,
  finalized: bool,
}

impl SeatSelection<'_> {
  /// Toggle a seat by id (case-insensitive).
  ///
  /// AVAILABLE seats become SELECTED, SELECTED seats go back to AVAILABLE.
  /// BOOKED seats are rejected.
  pub fn toggle(&mut self, seat_id: &str) -> Result<Toggle> {
    let id = seat_id.trim().to_ascii_uppercase();
    let seat = self
      .ledger
      .find_seat_mut(&id)
      .ok_or_else(|| Error::SeatNotFound(id.clone()))?;

    match seat.status {
      SeatStatus::Available => {
        seat.status = SeatStatus::Selected;
        self.selected.push(id);
        Ok(Toggle::Selected)
      }
      SeatStatus::Selected => {
        seat.status = SeatStatus::Available;
        self.selected.retain(|s| *s != id);
        Ok(Toggle::Deselected)
      }
      SeatStatus::Booked => Err(Error::SeatUnavailable(id)),
    }
  }

  /// Seat ids selected in this session, in selection order.
  pub fn selected(&self) -> &[String] { &self.selected }

  pub fn is_empty(&self) -> bool { self.selected.is_empty() }

  pub fn ledger(&self) -> &SeatLedger { self.ledger }

  /// Turn exactly this session's SELECTED seats into BOOKED and return their
  /// ids.
  pub fn finalize(mut self) -> Vec<String> {
    let selected = std::mem::take(&mut self.selected);
    for id in &selected {
      if let Some(seat) = self.ledger.find_seat_mut(id)
        && seat.status == SeatStatus::Selected
      {
        seat.status = SeatStatus::Booked;
      }
    }
    self.finalized = true;
    selected
  }
}

impl Drop for SeatSelection<'_> {
  fn drop(&mut self) {
    if self.finalized {
      return;
    }
    for id in &self.selected {
      if let Some(seat) = self.ledger.find_seat_mut(id)
        && seat.status == SeatStatus::Selected
      {
        seat.status = SeatStatus::Available;
      }
    }
  }
}
