//! Scripted console sessions against an in-memory store.

use std::{
  cell::{Cell, RefCell},
  io::{self, Cursor},
};

use cinesphere_core::{
  booking::BookingId,
  catalog::{Catalog, ShowtimeId},
  desk::BookingDesk,
  record::BookingRecord,
  seat::SeatStatus,
  store::BookingStore,
};
use rust_decimal::Decimal;

use crate::{app::App, prompt::Prompt};

// ─── Fixtures ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryStore {
  records: RefCell<Vec<BookingRecord>>,
  saves:   Cell<usize>,
  broken:  bool,
}

impl MemoryStore {
  fn with(records: Vec<BookingRecord>) -> Self {
    Self { records: RefCell::new(records), ..Self::default() }
  }
}

impl BookingStore for MemoryStore {
  type Error = io::Error;

  fn load(&self) -> Result<Vec<BookingRecord>, io::Error> { Ok(self.records.borrow().clone()) }

  fn save(&self, records: &[BookingRecord]) -> Result<(), io::Error> {
    self.saves.set(self.saves.get() + 1);
    if self.broken {
      return Err(io::Error::other("disk full"));
    }
    *self.records.borrow_mut() = records.to_vec();
    Ok(())
  }
}

type TestApp = App<MemoryStore, Cursor<String>, Vec<u8>>;

/// Lines joined with newlines, as typed at the console.
fn session(store: MemoryStore, lines: &[&str]) -> TestApp {
  let mut script = lines.join("\n");
  script.push('\n');
  let prompt = Prompt::new(Cursor::new(script), Vec::new());
  let desk = BookingDesk::new(Catalog::builtin().unwrap());
  let mut app = App::new(desk, store, prompt);
  app.load().unwrap();
  app
}

fn printed(app: &TestApp) -> String { String::from_utf8_lossy(app.prompt.output()).into_owned() }

/// The 10:30 AM "The AI Architect" show at PVR Phoenix, Mumbai.
fn first_show(app: &TestApp) -> ShowtimeId { app.desk.catalog().showtimes().next().unwrap().0 }

/// Main menu → new booking → Maharashtra → Mumbai → PVR Phoenix → no
/// filter → first showtime.
const TO_SEATS: [&str; 6] = ["1", "1", "1", "1", "N", "1"];

fn script(rest: &[&'static str]) -> Vec<&'static str> {
  TO_SEATS.iter().copied().chain(rest.iter().copied()).collect()
}

// ─── Booking ─────────────────────────────────────────────────────────────────

#[test]
fn full_booking_prints_bill_and_saves() {
  let lines = script(&["a1", "e1", "DONE", "5", "2", "0", "", "3"]);
  let mut app = session(MemoryStore::default(), &lines);
  app.run().unwrap();

  let booking = app.desk.booking(BookingId(5001)).expect("booked");
  assert_eq!(booking.seats(), ["A1", "E1"]);
  assert_eq!(booking.ticket_subtotal(), Decimal::new(700, 0));
  assert_eq!(booking.food_subtotal(), Decimal::new(580, 0));
  assert_eq!(booking.discount(), Decimal::new(58, 0));
  assert_eq!(booking.grand_total(), Decimal::new(1222, 0));

  let out = printed(&app);
  assert!(out.contains("Reference ID: 5001"));
  assert!(out.contains("Food Discount (10%): -Rs 58.00"));
  assert!(out.contains("Rs 1222.00"));
  assert!(out.contains("Application Session Ended"));

  // Once after the booking, once on exit.
  assert_eq!(app.store.saves.get(), 2);
  let saved = app.store.records.borrow();
  assert_eq!(saved.len(), 1);
  assert_eq!(saved[0].to_string(), "5001|PVR Phoenix|2025-12-15|10:30 AM|The AI Architect|A1,E1");
}

#[test]
fn deselecting_a_seat_leaves_it_out() {
  let lines = script(&["A1", "A2", "a1", "DONE", "0", "", "3"]);
  let mut app = session(MemoryStore::default(), &lines);
  app.run().unwrap();

  let booking = app.desk.booking(BookingId(5001)).unwrap();
  assert_eq!(booking.seats(), ["A2"]);
  let ledger = app.desk.catalog().ledger(first_show(&app));
  assert_eq!(ledger.find_seat("A1").unwrap().status(), SeatStatus::Available);
  assert_eq!(ledger.find_seat("A2").unwrap().status(), SeatStatus::Booked);
}

#[test]
fn cancel_during_seat_selection_reverts_seats() {
  let lines = script(&["A1", "B2", "CANCEL", "3"]);
  let mut app = session(MemoryStore::default(), &lines);
  app.run().unwrap();

  assert!(app.desk.bookings().is_empty());
  let ledger = app.desk.catalog().ledger(first_show(&app));
  assert_eq!(ledger.count(SeatStatus::Selected), 0);
  assert_eq!(ledger.count(SeatStatus::Booked), 0);
  assert!(printed(&app).contains("Booking process aborted. No seats selected."));
}

#[test]
fn end_of_input_mid_booking_reverts_and_saves() {
  let lines = script(&["A1", "DONE", "5"]);
  let mut app = session(MemoryStore::default(), &lines);
  app.run().unwrap();

  assert!(app.desk.bookings().is_empty());
  let ledger = app.desk.catalog().ledger(first_show(&app));
  assert_eq!(ledger.find_seat("A1").unwrap().status(), SeatStatus::Available);
  assert_eq!(app.store.saves.get(), 1);
  assert!(app.store.records.borrow().is_empty());
}

#[test]
fn booked_and_unknown_seats_are_refused() {
  let existing = "5001|PVR Phoenix|2025-12-15|10:30 AM|The AI Architect|A1".parse().unwrap();
  let lines = script(&["A1", "Z9", "DONE", "A3", "DONE", "0", "", "3"]);
  let mut app = session(MemoryStore::with(vec![existing]), &lines);
  app.run().unwrap();

  let out = printed(&app);
  assert!(out.contains("Seat A1 is already BOOKED"));
  assert!(out.contains("Invalid Seat ID: Z9"));
  assert!(out.contains("Please select at least one seat"));
  assert_eq!(app.desk.booking(BookingId(5002)).unwrap().seats(), ["A3"]);
}

#[test]
fn oversized_food_quantity_is_not_added() {
  let lines = script(&[
    "A1", "DONE", "5", "5000000000", "5", "3000000000", "5", "3000000000", "0", "", "3",
  ]);
  let mut app = session(MemoryStore::default(), &lines);
  app.run().unwrap();

  let out = printed(&app);
  assert!(out.contains("Quantity 5000000000 is too large; nothing added."));
  assert!(!out.contains("-> Added 5000000000"));
  assert_eq!(out.matches("-> Added 3000000000 x Nachos with Cheese Dip").count(), 1);
  assert!(out.contains("Quantity 3000000000 is too large; nothing added."));

  let booking = app.desk.booking(BookingId(5001)).unwrap();
  assert_eq!(booking.food().total_items(), 3_000_000_000);
}

#[test]
fn load_skips_record_with_largest_id() {
  let store = MemoryStore::with(vec![
    "4294967295|PVR Phoenix|2025-12-15|10:30 AM|The AI Architect|A1".parse().unwrap(),
  ]);
  let lines = script(&["A1", "DONE", "0", "", "3"]);
  let mut app = session(store, &lines);
  app.run().unwrap();

  let booking = app.desk.booking(BookingId(5001)).expect("fresh id after skipped record");
  assert_eq!(booking.seats(), ["A1"]);
  assert_eq!(app.desk.bookings().len(), 1);
}

#[test]
fn unmatched_filter_aborts_booking() {
  let lines = ["1", "1", "1", "1", "y", "Nonexistent", "3"];
  let mut app = session(MemoryStore::default(), &lines);
  app.run().unwrap();

  let out = printed(&app);
  assert!(out.contains("No showtimes available at PVR Phoenix matching your filter."));
  assert!(out.contains("No showtime selected."));
  assert!(app.desk.bookings().is_empty());
}

// ─── Cancellation ────────────────────────────────────────────────────────────

fn seeded() -> MemoryStore {
  MemoryStore::with(vec![
    "5001|PVR Phoenix|2025-12-15|10:30 AM|The AI Architect|A1,A2".parse().unwrap(),
    "5002|PVR Phoenix|2025-12-15|07:00 PM|Eternal Sun|C4".parse().unwrap(),
  ])
}

#[test]
fn cancellation_releases_seats_and_saves() {
  let mut app = session(seeded(), &["2", "5001", "y", "3"]);
  app.run().unwrap();

  assert!(app.desk.booking(BookingId(5001)).is_none());
  // Both shows run in PVR Phoenix, which has a single seat grid.
  let ledger = app.desk.catalog().ledger(first_show(&app));
  assert_eq!(ledger.find_seat("A1").unwrap().status(), SeatStatus::Available);
  assert_eq!(ledger.find_seat("A2").unwrap().status(), SeatStatus::Available);
  assert_eq!(ledger.find_seat("C4").unwrap().status(), SeatStatus::Booked);
  assert_eq!(ledger.count(SeatStatus::Booked), 1);

  let saved = app.store.records.borrow();
  assert_eq!(saved.len(), 1);
  assert_eq!(saved[0].id, BookingId(5002));
  assert!(printed(&app).contains("BOOKING ID 5001 HAS BEEN SUCCESSFULLY CANCELED"));
}

#[test]
fn cancellation_can_be_declined() {
  let mut app = session(seeded(), &["2", "5001", "n", "2", "0", "2", "7777", "3"]);
  app.run().unwrap();

  assert_eq!(app.desk.bookings().len(), 2);
  let out = printed(&app);
  assert!(out.contains("Cancellation operation aborted by user."));
  assert!(out.contains("Cancellation aborted."));
  assert!(out.contains("Error: Booking ID 7777 not found."));
}

#[test]
fn cancel_with_no_bookings_says_so() {
  let mut app = session(MemoryStore::default(), &["2", "3"]);
  app.run().unwrap();
  assert!(printed(&app).contains("There are no successful bookings to cancel."));
}

// ─── Main menu ───────────────────────────────────────────────────────────────

#[test]
fn invalid_menu_input_reprompts() {
  let mut app = session(MemoryStore::default(), &["abc", "9", "4", "3"]);
  app.run().unwrap();

  let out = printed(&app);
  assert!(out.contains("Invalid input. Please enter a valid number."));
  assert!(out.contains("Invalid choice."));
  assert!(out.contains("No active bookings."));
}

#[test]
fn save_failure_is_reported_without_rollback() {
  let store = MemoryStore { broken: true, ..MemoryStore::default() };
  let lines = script(&["A1", "DONE", "0", "", "3"]);
  let mut app = session(store, &lines);
  app.run().unwrap();

  assert_eq!(app.desk.bookings().len(), 1);
  assert!(printed(&app).contains("[System Error] Unable to save booking data: disk full"));
}
