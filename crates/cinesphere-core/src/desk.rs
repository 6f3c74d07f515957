//! Booking desk: The active booking set and the operations that must keep it
//! consistent with the seat ledgers.
//!
//! A seat is BOOKED if and only if it is listed by some active booking for
//! its theater. [`BookingDesk::restore`], [`BookingDesk::confirm`] and
//! [`BookingDesk::cancel`] each change seats and bookings together.

use crate::{
  Error, Result,
  booking::{Booking, BookingId, BookingIdGenerator},
  catalog::{Catalog, ShowtimeId},
  food::FoodOrder,
  record::BookingRecord,
  seat::SeatSelection,
};

/// What [`BookingDesk::restore`] did with the records it was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
  pub restored:         usize,
  /// Records whose showtime key matched nothing in the catalog.
  pub unknown_showtime: usize,
  /// Records whose id was already taken by an active booking.
  pub duplicate_id:     usize,
  /// Records whose id leaves no room for later ids (`u32::MAX`).
  pub id_out_of_range:  usize,
}

pub struct BookingDesk {
  catalog:  Catalog,
  bookings: Vec<Booking>,
  ids:      BookingIdGenerator,
}

impl BookingDesk {
  pub fn new(catalog: Catalog) -> Self {
    Self {
      catalog,
      bookings: Vec::new(),
      ids: BookingIdGenerator::new(),
    }
  }

  pub fn catalog(&self) -> &Catalog { &self.catalog }

  /// Active bookings in the order they were added.
  pub fn bookings(&self) -> &[Booking] { &self.bookings }

  pub fn booking(&self, id: BookingId) -> Option<&Booking> {
    self.bookings.iter().find(|b| b.id() == id)
  }

  /// The id the next confirmed booking will receive.
  pub fn next_id(&self) -> BookingId { self.ids.peek() }

  // ── Reconciliation ────────────────────────────────────────────────────────

  /// Replay persisted records onto the seat ledgers and the active set.
  ///
  /// Records referencing an unknown showtime are dropped, as are records
  /// reusing an id that is already active and records carrying the largest
  /// possible id. Unknown seat ids are skipped.
  pub fn restore(&mut self, records: impl IntoIterator<Item = BookingRecord>) -> RestoreReport {
    let mut report = RestoreReport::default();

    for record in records {
      let Some(showtime) = self.catalog.showtime_by_key(&record.showtime_key) else {
        report.unknown_showtime += 1;
        continue;
      };
      if self.booking(record.id).is_some() {
        report.duplicate_id += 1;
        continue;
      }
      if !self.ids.observe(record.id) {
        report.id_out_of_range += 1;
        continue;
      }

      self.catalog.ledger_mut(showtime).mark_booked(&record.seats);
      let booking = Booking::restore(record.id, &self.catalog, showtime, record.seats);
      self.bookings.push(booking);
      report.restored += 1;
    }

    report
  }

  // ── Booking ───────────────────────────────────────────────────────────────

  /// Start picking seats for `showtime`. Dropping the returned session
  /// without finalising it puts every picked seat back.
  pub fn select_seats(&mut self, showtime: ShowtimeId) -> SeatSelection<'_> {
    self.catalog.ledger_mut(showtime).select()
  }

  /// Record a fresh booking over `seats`, which must already be BOOKED (see
  /// [`SeatSelection::finalize`]).
  pub fn confirm(&mut self, showtime: ShowtimeId, seats: Vec<String>, food: FoodOrder) -> &Booking {
    let booking = Booking::new(&mut self.ids, &self.catalog, showtime, seats, food);
    self.bookings.push(booking);
    &self.bookings[self.bookings.len() - 1]
  }

  /// Cancel a booking: release its seats and drop it from the active set.
  pub fn cancel(&mut self, id: BookingId) -> Result<Booking> {
    let index = self
      .bookings
      .iter()
      .position(|b| b.id() == id)
      .ok_or(Error::BookingNotFound(id))?;

    let booking = self.bookings.remove(index);
    booking.cancel(&mut self.catalog);
    Ok(booking)
  }

  // ── Persistence ───────────────────────────────────────────────────────────

  /// Records for every active booking, in active-set order.
  pub fn records(&self) -> Vec<BookingRecord> {
    self
      .bookings
      .iter()
      .map(|b| b.to_record(&self.catalog))
      .collect()
  }
}
