//! Plain-text rendering of catalog entries, seat maps, orders and bills.

use std::io::{self, Write};

use cinesphere_core::{
  booking::Booking,
  catalog::{Catalog, MenuItem, ShowtimeId},
  food::FoodOrder,
  seat::{SeatLedger, SeatStatus, SeatType},
};
use rust_decimal::Decimal;
use serde::Serialize;

pub const APP_NAME: &str = "CineSphere Booking Console";

pub fn separator() -> String { "-".repeat(70) }

/// `Rs 1234.50`
pub fn currency(amount: Decimal) -> String { format!("Rs {:.2}", amount.round_dp(2)) }

pub fn header(out: &mut impl Write, title: &str) -> io::Result<()> {
  let bar = "=".repeat(10);
  writeln!(out, "\n{bar} {title} {bar}")
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

pub fn showtime_line(
  out: &mut impl Write,
  index: usize,
  catalog: &Catalog,
  id: ShowtimeId,
) -> io::Result<()> {
  let show = catalog.showtime(id);
  let movie = catalog.movie(show.movie);
  writeln!(
    out,
    "  [{index}] {:<10} - {:<30} ({} mins) on {}",
    show.time_str(),
    movie.title,
    movie.duration_minutes,
    show.date_str()
  )
}

pub fn menu(out: &mut impl Write, items: &[MenuItem]) -> io::Result<()> {
  for (i, item) in items.iter().enumerate() {
    writeln!(
      out,
      "  [{}] {:<30} - {:<10} @ {}",
      i + 1,
      item.name,
      item.category,
      currency(item.price)
    )?;
  }
  Ok(())
}

// ─── Seats ───────────────────────────────────────────────────────────────────

/// One row per line; each seat shows its class, or `X` when booked and `V`
/// when selected.
pub fn seat_map(out: &mut impl Write, ledger: &SeatLedger) -> io::Result<()> {
  for row in ledger.rows() {
    let Some(first) = row.first() else { continue };
    let letter = first.id().chars().next().unwrap_or('?');
    write!(out, "Row {letter} | ")?;
    for seat in row {
      let mark = match (seat.status(), seat.kind()) {
        (SeatStatus::Booked, _) => 'X',
        (SeatStatus::Selected, _) => 'V',
        (SeatStatus::Available, SeatType::Premium) => 'P',
        (SeatStatus::Available, SeatType::Standard) => 'S',
      };
      write!(out, "[{mark}{:>4}]", seat.id())?;
    }
    writeln!(out)?;
  }
  Ok(())
}

// ─── Orders and bookings ─────────────────────────────────────────────────────

pub fn food_order(out: &mut impl Write, order: &FoodOrder) -> io::Result<()> {
  writeln!(out, "\n    --- Food Order Details ---")?;
  if order.is_empty() {
    return writeln!(out, "    (No food items ordered)");
  }
  for (name, line) in order.lines() {
    writeln!(
      out,
      "    * {name:<30} x{:>3} @ {} = {}",
      line.quantity,
      currency(line.unit_price),
      currency(line.subtotal())
    )?;
  }
  writeln!(out, "    Total Food Cost: {}", currency(order.total_price()))
}

pub fn bill(out: &mut impl Write, catalog: &Catalog, booking: &Booking) -> io::Result<()> {
  let show = catalog.showtime(booking.showtime());
  let theater = catalog.theater(show.theater);
  let line = separator();

  header(out, "BOOKING CONFIRMATION & BILL")?;
  writeln!(out, "Reference ID: {}", booking.id())?;
  writeln!(out, "{line}")?;
  writeln!(out, "{:<20}{}", "Movie:", catalog.movie(show.movie).title)?;
  writeln!(out, "{:<20}{} ({})", "Theater:", theater.name, theater.city)?;
  writeln!(out, "{:<20}{} at {}", "Show Time:", show.date_str(), show.time_str())?;
  writeln!(out, "{line}")?;

  writeln!(out, "Ticket Details:")?;
  writeln!(out, "  Seats Reserved ({}): {}", booking.seats().len(), booking.seats().join(", "))?;
  writeln!(out, "{:<20}{}", "  Ticket Subtotal:", currency(booking.ticket_subtotal()))?;

  food_order(out, booking.food())?;
  if !booking.discount().is_zero() {
    writeln!(out, "    Food Discount (10%): -{}", currency(booking.discount()))?;
  }

  writeln!(out, "{line}")?;
  writeln!(out, ">> {:<20}{}", "GRAND TOTAL:", currency(booking.grand_total()))?;
  writeln!(out, "{line}")?;
  writeln!(out, "Enjoy your movie! Seats are confirmed.")
}

pub fn booking_brief(out: &mut impl Write, catalog: &Catalog, booking: &Booking) -> io::Result<()> {
  let show = catalog.showtime(booking.showtime());
  writeln!(
    out,
    "  [ID: {}] {} at {} on {} ({})",
    booking.id(),
    catalog.movie(show.movie).title,
    show.time_str(),
    show.date_str(),
    catalog.theater(show.theater).name
  )?;
  writeln!(out, "    Seats: {}", booking.seats().join(", "))
}

// ─── Machine-readable listing ────────────────────────────────────────────────

/// A flattened view of an active booking for `list --json`.
#[derive(Debug, Serialize)]
pub struct BookingSummary<'a> {
  pub id:              u32,
  pub movie:           &'a str,
  pub theater:         &'a str,
  pub city:            &'a str,
  pub date:            &'a str,
  pub time:            &'a str,
  pub seats:           &'a [String],
  pub ticket_subtotal: Decimal,
  pub grand_total:     Decimal,
}

impl<'a> BookingSummary<'a> {
  pub fn new(catalog: &'a Catalog, booking: &'a Booking) -> Self {
    let show = catalog.showtime(booking.showtime());
    let theater = catalog.theater(show.theater);
    Self {
      id:              booking.id().0,
      movie:           &catalog.movie(show.movie).title,
      theater:         &theater.name,
      city:            &theater.city,
      date:            show.date_str(),
      time:            show.time_str(),
      seats:           booking.seats(),
      ticket_subtotal: booking.ticket_subtotal(),
      grand_total:     booking.grand_total(),
    }
  }
}
