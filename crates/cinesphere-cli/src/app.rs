//! The interactive booking workflow.
//!
//! [`App`] drives one console session: location, theater and showtime
//! selection, seat picking, food ordering, billing and cancellation. It owns
//! the [`BookingDesk`] and persists through a [`BookingStore`] after every
//! booking, every cancellation and once more on exit.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use cinesphere_core::{
  Error as CoreError,
  booking::BookingId,
  catalog::{MenuItem, ShowtimeId, TheaterId},
  desk::{BookingDesk, RestoreReport},
  food::FoodOrder,
  seat::{SeatSelection, SeatType, Toggle},
  store::BookingStore,
};

use crate::{
  prompt::{Prompt, is_end_of_input},
  render::{self, APP_NAME, currency, separator},
};

// ─── Main menu ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
  NewBooking,
  CancelBooking,
  Exit,
  ViewBookings,
}

impl MenuChoice {
  fn from_number(n: i64) -> Option<Self> {
    match n {
      1 => Some(Self::NewBooking),
      2 => Some(Self::CancelBooking),
      3 => Some(Self::Exit),
      4 => Some(Self::ViewBookings),
      _ => None,
    }
  }
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Top-level session state.
pub struct App<S, R, W> {
  /// Catalog, seat ledgers and active bookings.
  pub desk:   BookingDesk,
  /// Where bookings are persisted.
  pub store:  S,
  /// Console input and output.
  pub prompt: Prompt<R, W>,
}

impl<S, R, W> App<S, R, W>
where
  S: BookingStore,
  R: BufRead,
  W: Write,
{
  pub fn new(desk: BookingDesk, store: S, prompt: Prompt<R, W>) -> Self {
    Self { desk, store, prompt }
  }

  // ── Startup and shutdown ──────────────────────────────────────────────────

  /// Read persisted bookings and replay them onto the seat ledgers. Must run
  /// before the interactive loop.
  pub fn load(&mut self) -> Result<RestoreReport> {
    let records = self.store.load().context("loading persisted bookings")?;
    let report = self.desk.restore(records);
    if report.unknown_showtime > 0 || report.duplicate_id > 0 {
      tracing::info!(
        unknown_showtime = report.unknown_showtime,
        duplicate_id = report.duplicate_id,
        "dropped persisted bookings"
      );
    }
    if report.id_out_of_range > 0 {
      tracing::warn!(
        count = report.id_out_of_range,
        "skipped persisted bookings whose id leaves no room for new ids"
      );
    }
    tracing::info!(restored = report.restored, next_id = %self.desk.next_id(), "bookings loaded");
    Ok(report)
  }

  /// Run the main menu until the user exits or input ends, then save.
  pub fn run(&mut self) -> Result<()> {
    let line = separator();
    writeln!(self.prompt.out(), "{line}")?;
    writeln!(self.prompt.out(), "{APP_NAME}")?;
    writeln!(self.prompt.out(), "Welcome to the world-class movie booking experience.")?;
    writeln!(self.prompt.out(), "{line}")?;

    loop {
      match self.main_menu() {
        Ok(true) => {}
        Ok(false) => break,
        Err(e) if is_end_of_input(&e) => {
          tracing::debug!("input closed; leaving main menu");
          break;
        }
        Err(e) => return Err(e),
      }
    }

    self.persist()?;
    writeln!(self.prompt.out(), "\n{line}")?;
    writeln!(self.prompt.out(), "Application Session Ended. All current bookings have been saved.")?;
    writeln!(self.prompt.out(), "{line}")?;
    Ok(())
  }

  /// Show the main menu and dispatch one choice. Returns `false` to quit.
  fn main_menu(&mut self) -> Result<bool> {
    render::header(self.prompt.out(), "MAIN MENU")?;
    writeln!(self.prompt.out(), "[1] Start New Booking")?;
    writeln!(self.prompt.out(), "[2] Cancel Existing Booking")?;
    writeln!(self.prompt.out(), "[3] Exit Application")?;
    writeln!(self.prompt.out(), "[4] View Bookings")?;
    writeln!(self.prompt.out(), "{}", separator())?;

    let n = self.prompt.int("Enter your choice: ")?;
    match MenuChoice::from_number(n) {
      Some(MenuChoice::NewBooking) => self.book()?,
      Some(MenuChoice::CancelBooking) => self.cancel()?,
      Some(MenuChoice::ViewBookings) => self.view()?,
      Some(MenuChoice::Exit) => return Ok(false),
      None => writeln!(self.prompt.out(), "Invalid choice. Please select 1, 2, 3 or 4.")?,
    }
    Ok(true)
  }

  /// Save the active set. A failed save is reported but does not undo the
  /// in-memory change.
  fn persist(&mut self) -> Result<()> {
    let records = self.desk.records();
    if let Err(e) = self.store.save(&records) {
      tracing::error!(error = %e, "failed to save bookings");
      writeln!(self.prompt.out(), "\n[System Error] Unable to save booking data: {e}")?;
    }
    Ok(())
  }

  // ── Booking ───────────────────────────────────────────────────────────────

  fn book(&mut self) -> Result<()> {
    let Some(theater) = self.choose_theater()? else {
      writeln!(self.prompt.out(), "\nBooking process aborted. No theater selected.")?;
      return Ok(());
    };
    let Some(showtime) = self.choose_showtime(theater)? else {
      writeln!(self.prompt.out(), "\nBooking process aborted. No showtime selected.")?;
      return Ok(());
    };

    let catalog = self.desk.catalog();
    let theater_name = catalog.theater(theater).name.clone();
    let menu = catalog.theater(theater).menu().to_vec();
    let show = catalog.showtime(showtime);
    let banner = format!(
      "Theater: {} | Movie: {} | Time: {}",
      theater_name,
      catalog.movie(show.movie).title,
      show.time_str()
    );

    // The selection reverts itself if anything below returns early.
    let mut selection = self.desk.select_seats(showtime);
    if !pick_seats(&mut self.prompt, &mut selection, &banner)? {
      drop(selection);
      writeln!(self.prompt.out(), "\nBooking process aborted. No seats selected.")?;
      return Ok(());
    }
    let food = pick_food(&mut self.prompt, &theater_name, &menu)?;
    let seats = selection.finalize();

    let id = self.desk.confirm(showtime, seats, food).id();
    let booking = self.desk.booking(id).context("confirmed booking is not active")?;
    tracing::info!(
      booking = %id,
      seats = booking.seats().len(),
      total = %booking.grand_total(),
      "booking confirmed"
    );
    render::bill(self.prompt.out(), self.desk.catalog(), booking)?;

    self.persist()?;
    self.prompt.line("\nPress Enter to return to the main menu...")?;
    Ok(())
  }

  /// State, then city, then theater. `None` when the city has no theaters.
  fn choose_theater(&mut self) -> Result<Option<TheaterId>> {
    let catalog = self.desk.catalog();

    render::header(self.prompt.out(), "STEP 1.1: Select Location (State)")?;
    let states = catalog.states();
    for (i, state) in states.iter().enumerate() {
      writeln!(self.prompt.out(), "[{}] {state}", i + 1)?;
    }
    let i = self
      .prompt
      .choice("Enter State number: ", states.len(), "Invalid state selection.")?;
    let state = states[i];
    writeln!(self.prompt.out(), "-> Selected State: {state}")?;

    render::header(self.prompt.out(), "STEP 1.2: Select Location (City)")?;
    let cities = catalog.cities_in(state);
    for (i, city) in cities.iter().enumerate() {
      writeln!(self.prompt.out(), "[{}] {city}", i + 1)?;
    }
    let i = self
      .prompt
      .choice("Enter City number: ", cities.len(), "Invalid city selection.")?;
    let city = cities[i];
    writeln!(self.prompt.out(), "-> Selected City: {city}")?;

    let theaters = catalog.theaters_in(city);
    if theaters.is_empty() {
      writeln!(self.prompt.out(), "No theaters available in {city}.")?;
      return Ok(None);
    }

    render::header(self.prompt.out(), "STEP 2.1: Select Theater")?;
    writeln!(self.prompt.out(), "Available theaters in {city}:")?;
    for (i, id) in theaters.iter().enumerate() {
      writeln!(self.prompt.out(), "  [{}] {}", i + 1, catalog.theater(*id).name)?;
    }
    let i = self
      .prompt
      .choice("Enter Theater number: ", theaters.len(), "Invalid theater number.")?;
    writeln!(self.prompt.out(), "-> Selected Theater: {}", catalog.theater(theaters[i]).name)?;
    Ok(Some(theaters[i]))
  }

  /// Optional title filter, then showtime. `None` when nothing matches.
  fn choose_showtime(&mut self, theater: TheaterId) -> Result<Option<ShowtimeId>> {
    let catalog = self.desk.catalog();
    let name = &catalog.theater(theater).name;

    let filter = if self
      .prompt
      .confirm("\nDo you want to filter showtimes by a movie title? (Y/N): ")?
    {
      let text = self
        .prompt
        .line("Enter part of the movie title to filter (e.g., 'Architect'): ")?;
      writeln!(self.prompt.out(), "Filtering for movies containing: '{text}'")?;
      Some(text)
    } else {
      None
    };

    let shows = catalog.showtimes_at(theater, filter.as_deref());
    if shows.is_empty() {
      let suffix = if filter.as_deref().is_some_and(|f| !f.is_empty()) {
        " matching your filter."
      } else {
        ""
      };
      writeln!(self.prompt.out(), "No showtimes available at {name}{suffix}")?;
      return Ok(None);
    }

    render::header(self.prompt.out(), "STEP 2.2: Select Showtime (Time & Movie)")?;
    writeln!(self.prompt.out(), "Showtimes at {name}:")?;
    for (i, id) in shows.iter().enumerate() {
      render::showtime_line(self.prompt.out(), i + 1, catalog, *id)?;
    }
    let i = self
      .prompt
      .choice("Enter Showtime number to book: ", shows.len(), "Invalid showtime number.")?;
    let show = catalog.showtime(shows[i]);
    writeln!(
      self.prompt.out(),
      "-> Confirmed: {} at {}",
      catalog.movie(show.movie).title,
      show.time_str()
    )?;
    Ok(Some(shows[i]))
  }

  // ── Cancellation and listing ──────────────────────────────────────────────

  fn cancel(&mut self) -> Result<()> {
    render::header(self.prompt.out(), "BOOKING CANCELLATION")?;
    if self.desk.bookings().is_empty() {
      writeln!(self.prompt.out(), "There are no successful bookings to cancel.")?;
      return Ok(());
    }

    writeln!(self.prompt.out(), "Existing Bookings:")?;
    self.list_bookings()?;
    writeln!(self.prompt.out(), "{}", separator())?;

    let n = self
      .prompt
      .int("Enter the Reference ID of the booking to cancel (or 0 to abort): ")?;
    if n == 0 {
      writeln!(self.prompt.out(), "Cancellation aborted.")?;
      return Ok(());
    }
    let Some(id) = u32::try_from(n)
      .ok()
      .map(BookingId)
      .filter(|id| self.desk.booking(*id).is_some())
    else {
      writeln!(self.prompt.out(), "Error: Booking ID {n} not found.")?;
      return Ok(());
    };

    writeln!(self.prompt.out(), "\n--- Confirmation ---")?;
    let question = format!("Are you sure you want to cancel booking ID {id}? (Y/N): ");
    if !self.prompt.confirm(&question)? {
      writeln!(self.prompt.out(), "Cancellation operation aborted by user.")?;
      return Ok(());
    }

    let cancelled = self.desk.cancel(id)?;
    tracing::info!(booking = %id, seats = cancelled.seats().len(), "booking cancelled");
    writeln!(self.prompt.out(), "\n>> BOOKING ID {id} HAS BEEN SUCCESSFULLY CANCELED.")?;
    writeln!(self.prompt.out(), ">> Corresponding seats are now AVAILABLE.")?;
    self.persist()
  }

  fn view(&mut self) -> Result<()> {
    render::header(self.prompt.out(), "ACTIVE BOOKINGS")?;
    if self.desk.bookings().is_empty() {
      writeln!(self.prompt.out(), "No active bookings.")?;
      return Ok(());
    }
    self.list_bookings()?;
    Ok(())
  }

  fn list_bookings(&mut self) -> io::Result<()> {
    let catalog = self.desk.catalog();
    for booking in self.desk.bookings() {
      render::booking_brief(self.prompt.out(), catalog, booking)?;
    }
    Ok(())
  }
}

// ─── Selection steps ─────────────────────────────────────────────────────────

/// Seat picking loop. Returns `false` if the user aborts with `CANCEL`.
fn pick_seats<R: BufRead, W: Write>(
  prompt: &mut Prompt<R, W>,
  selection: &mut SeatSelection<'_>,
  banner: &str,
) -> io::Result<bool> {
  let line = separator();
  render::header(prompt.out(), "STEP 3: Select Seats")?;
  writeln!(prompt.out(), "{banner}")?;
  writeln!(prompt.out(), "Legend: [S=Standard, P=Premium, X=Booked, V=Selected]")?;
  writeln!(
    prompt.out(),
    "Standard Price: {} | Premium Price: {}",
    currency(SeatType::Standard.price()),
    currency(SeatType::Premium.price())
  )?;

  loop {
    writeln!(prompt.out(), "{line}")?;
    render::seat_map(prompt.out(), selection.ledger())?;
    writeln!(prompt.out(), "{line}")?;

    let input = prompt
      .line("Enter Seat ID to select/deselect (e.g., A1, C10), 'DONE' to finish or 'CANCEL' to abort: ")?
      .to_ascii_uppercase();

    match input.as_str() {
      "" => {}
      "DONE" if selection.is_empty() => {
        writeln!(prompt.out(), "Please select at least one seat before proceeding.")?;
      }
      "DONE" => return Ok(true),
      "CANCEL" => return Ok(false),
      seat_id => match selection.toggle(seat_id) {
        Ok(toggle) => {
          let verb = match toggle {
            Toggle::Selected => "selected",
            Toggle::Deselected => "deselected",
          };
          writeln!(
            prompt.out(),
            "-> Seat {seat_id} {verb}. Current Selections: {}",
            selection.selected().join(" ")
          )?;
        }
        Err(CoreError::SeatUnavailable(_)) => {
          writeln!(prompt.out(), "Seat {seat_id} is already BOOKED (X). Select another seat.")?;
        }
        Err(_) => {
          writeln!(
            prompt.out(),
            "Invalid Seat ID: {seat_id}. Please check the map and try again."
          )?;
        }
      },
    }
  }
}

/// Food ordering loop over `menu`; `0` finishes.
fn pick_food<R: BufRead, W: Write>(
  prompt: &mut Prompt<R, W>,
  theater_name: &str,
  menu: &[MenuItem],
) -> io::Result<FoodOrder> {
  let line = separator();
  let mut order = FoodOrder::new();

  render::header(prompt.out(), "STEP 4: Select Food & Beverages (Optional)")?;
  writeln!(prompt.out(), "You are ordering from the menu of {theater_name}.")?;

  loop {
    writeln!(prompt.out(), "\n{line}")?;
    writeln!(prompt.out(), "Menu: ")?;
    render::menu(prompt.out(), menu)?;
    writeln!(prompt.out(), "{line}")?;
    writeln!(prompt.out(), "[0] Proceed to Payment (Skip Food / Finish Order)")?;

    let n = prompt.int("Enter menu number to add, or 0 to continue: ")?;
    let item = match usize::try_from(n) {
      Ok(0) => return Ok(order),
      Ok(n) if n <= menu.len() => &menu[n - 1],
      _ => {
        writeln!(
          prompt.out(),
          "Invalid menu number. Please select from 1 to {}.",
          menu.len()
        )?;
        continue;
      }
    };

    let quantity = prompt.int(&format!("Enter quantity for {}: ", item.name))?;
    if quantity <= 0 {
      writeln!(prompt.out(), "Quantity must be at least 1; nothing added.")?;
      continue;
    }
    if !order.add_item(item, quantity) {
      writeln!(prompt.out(), "Quantity {quantity} is too large; nothing added.")?;
      continue;
    }
    writeln!(prompt.out(), "-> Added {quantity} x {} to your order.", item.name)?;
    render::food_order(prompt.out(), &order)?;
  }
}
