//! Booking: The immutable record of a confirmed transaction.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  catalog::{Catalog, ShowtimeId},
  food::FoodOrder,
  record::BookingRecord,
};

/// Food subtotals strictly above this earn the food discount.
pub const FOOD_DISCOUNT_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Fraction of the food subtotal taken off once over the threshold.
pub const FOOD_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

// ─── Ids ─────────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookingId(pub u32);

impl fmt::Display for BookingId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Hands out increasing booking ids. Once `u32::MAX` is reached the
/// generator keeps returning it.
#[derive(Debug, Clone)]
pub struct BookingIdGenerator {
  next: u32,
}

impl BookingIdGenerator {
  pub const FIRST: u32 = 5001;

  pub fn new() -> Self { Self { next: Self::FIRST } }

  pub fn next_id(&mut self) -> BookingId {
    let id = BookingId(self.next);
    self.next = self.next.saturating_add(1);
    id
  }

  /// Make sure ids handed out later never collide with `id`. Returns `false`
  /// and leaves the generator unchanged when no id can follow `id`.
  pub fn observe(&mut self, id: BookingId) -> bool {
    let Some(after) = id.0.checked_add(1) else {
      return false;
    };
    self.next = self.next.max(after);
    true
  }

  /// The id the next call to [`next_id`](Self::next_id) will return.
  pub fn peek(&self) -> BookingId { BookingId(self.next) }
}

impl Default for BookingIdGenerator {
  fn default() -> Self { Self::new() }
}

// ─── Booking ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Booking {
  id:              BookingId,
  showtime:        ShowtimeId,
  seats:           Vec<String>,
  food:            FoodOrder,
  ticket_subtotal: Decimal,
  discount:        Decimal,
  grand_total:     Decimal,
}

impl Booking {
  /// Build a fresh booking over seats already BOOKED in the showtime's
  /// ledger. The id comes from `ids`.
  pub fn new(
    ids: &mut BookingIdGenerator,
    catalog: &Catalog,
    showtime: ShowtimeId,
    seats: Vec<String>,
    food: FoodOrder,
  ) -> Self {
    Self::priced(ids.next_id(), catalog, showtime, seats, food)
  }

  /// Rebuild a booking loaded from storage. Food detail is not persisted, so
  /// the order is empty. The caller must already have observed `id`.
  pub fn restore(id: BookingId, catalog: &Catalog, showtime: ShowtimeId, seats: Vec<String>) -> Self {
    Self::priced(id, catalog, showtime, seats, FoodOrder::new())
  }

  fn priced(
    id: BookingId,
    catalog: &Catalog,
    showtime: ShowtimeId,
    seats: Vec<String>,
    food: FoodOrder,
  ) -> Self {
    let ticket_subtotal = catalog.ledger(showtime).price_of(&seats);
    let food_total = food.total_price();
    let discount = if food_total > FOOD_DISCOUNT_THRESHOLD {
      (food_total * FOOD_DISCOUNT_RATE).round_dp(2)
    } else {
      Decimal::ZERO
    };

    Self {
      id,
      showtime,
      seats,
      food,
      ticket_subtotal,
      discount,
      grand_total: ticket_subtotal + food_total - discount,
    }
  }

  pub fn id(&self) -> BookingId { self.id }

  pub fn showtime(&self) -> ShowtimeId { self.showtime }

  pub fn seats(&self) -> &[String] { &self.seats }

  pub fn food(&self) -> &FoodOrder { &self.food }

  pub fn ticket_subtotal(&self) -> Decimal { self.ticket_subtotal }

  pub fn food_subtotal(&self) -> Decimal { self.food.total_price() }

  pub fn discount(&self) -> Decimal { self.discount }

  pub fn grand_total(&self) -> Decimal { self.grand_total }

  /// Release this booking's seats: every listed seat that is BOOKED goes back
  /// to AVAILABLE.
  pub fn cancel(&self, catalog: &mut Catalog) {
    catalog.ledger_mut(self.showtime).release(&self.seats);
  }

  pub fn to_record(&self, catalog: &Catalog) -> BookingRecord {
    BookingRecord {
      id:           self.id,
      showtime_key: catalog.showtime(self.showtime).key().to_owned(),
      seats:        self.seats.clone(),
    }
  }

  /// The persisted line for this booking: `id|showtimeKey|seat1,seat2`.
  pub fn serialize(&self, catalog: &Catalog) -> String {
    self.to_record(catalog).to_string()
  }
}
