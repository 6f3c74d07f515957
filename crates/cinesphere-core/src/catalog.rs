//! Catalog: Movies, theaters and showtimes assembled once at startup.
//!
//! Entities live in owning `Vec`s and refer to each other through typed
//! indices, so a [`Showtime`] or a booking can point at a theater without
//! borrowing it.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::{Error, Result, seat::SeatLedger};

// ─── Ids ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TheaterId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShowtimeId(usize);

// ─── Entities ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Movie {
  pub title:            String,
  pub genre:            String,
  pub duration_minutes: u32,
}

/// A food or beverage item on a theater's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
  pub name:     String,
  pub price:    Decimal,
  pub category: String,
}

impl MenuItem {
  pub fn new(name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
    Self { name: name.into(), price, category: category.into() }
  }
}

/// A theater owns its seat grid and menu outright.
#[derive(Debug, Clone)]
pub struct Theater {
  pub name:  String,
  pub city:  String,
  pub state: String,
  menu:      Vec<MenuItem>,
  seats:     SeatLedger,
}

impl Theater {
  pub fn menu(&self) -> &[MenuItem] { &self.menu }

  pub fn seats(&self) -> &SeatLedger { &self.seats }

  pub fn seats_mut(&mut self) -> &mut SeatLedger { &mut self.seats }
}

/// A screening of one movie in one theater at a given date and time.
#[derive(Debug, Clone)]
pub struct Showtime {
  pub movie:   MovieId,
  pub theater: TheaterId,
  pub date:    NaiveDate,
  pub time:    NaiveTime,
  date_str:    String,
  time_str:    String,
  key:         String,
}

impl Showtime {
  /// The date exactly as it was entered into the catalog.
  pub fn date_str(&self) -> &str { &self.date_str }

  /// The time exactly as it was entered into the catalog.
  pub fn time_str(&self) -> &str { &self.time_str }

  /// `theater|date|time|title`, the join key for persisted bookings.
  pub fn key(&self) -> &str { &self.key }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Static reference data: the arena every id indexes into.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  movies:    Vec<Movie>,
  theaters:  Vec<Theater>,
  showtimes: Vec<Showtime>,
}

impl Catalog {
  pub fn new() -> Self { Self::default() }

  // ── Construction ──────────────────────────────────────────────────────────

  pub fn add_movie(
    &mut self,
    title: impl Into<String>,
    genre: impl Into<String>,
    duration_minutes: u32,
  ) -> MovieId {
    self.movies.push(Movie {
      title: title.into(),
      genre: genre.into(),
      duration_minutes,
    });
    MovieId(self.movies.len() - 1)
  }

  /// Add a theater with a freshly built seat grid (premium rows first).
  #[allow(clippy::too_many_arguments)]
  pub fn add_theater(
    &mut self,
    name: impl Into<String>,
    city: impl Into<String>,
    state: impl Into<String>,
    standard_rows: usize,
    premium_rows: usize,
    seats_per_row: usize,
    menu: Vec<MenuItem>,
  ) -> TheaterId {
    self.theaters.push(Theater {
      name: name.into(),
      city: city.into(),
      state: state.into(),
      menu,
      seats: SeatLedger::new(premium_rows, standard_rows, seats_per_row),
    });
    TheaterId(self.theaters.len() - 1)
  }

  /// Add a showtime. `date` must be `YYYY-MM-DD` and `time` a 12-hour clock
  /// value such as `07:00 PM`.
  pub fn add_showtime(
    &mut self,
    movie: MovieId,
    theater: TheaterId,
    date: &str,
    time: &str,
  ) -> Result<ShowtimeId> {
    let parsed_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
      .map_err(|_| Error::InvalidDate(date.to_owned()))?;
    let parsed_time = NaiveTime::parse_from_str(time, "%I:%M %p")
      .map_err(|_| Error::InvalidTime(time.to_owned()))?;

    let key = format!(
      "{}|{}|{}|{}",
      self.theater(theater).name,
      date,
      time,
      self.movie(movie).title
    );

    self.showtimes.push(Showtime {
      movie,
      theater,
      date: parsed_date,
      time: parsed_time,
      date_str: date.to_owned(),
      time_str: time.to_owned(),
      key,
    });
    Ok(ShowtimeId(self.showtimes.len() - 1))
  }

  // ── Lookups ───────────────────────────────────────────────────────────────

  pub fn movie(&self, id: MovieId) -> &Movie { &self.movies[id.0] }

  pub fn theater(&self, id: TheaterId) -> &Theater { &self.theaters[id.0] }

  pub fn theater_mut(&mut self, id: TheaterId) -> &mut Theater {
    &mut self.theaters[id.0]
  }

  pub fn showtime(&self, id: ShowtimeId) -> &Showtime { &self.showtimes[id.0] }

  /// The seat ledger a showtime plays against.
  pub fn ledger(&self, id: ShowtimeId) -> &SeatLedger {
    self.theater(self.showtime(id).theater).seats()
  }

  pub fn ledger_mut(&mut self, id: ShowtimeId) -> &mut SeatLedger {
    let theater = self.showtime(id).theater;
    self.theater_mut(theater).seats_mut()
  }

  pub fn movies(&self) -> impl Iterator<Item = (MovieId, &Movie)> {
    self.movies.iter().enumerate().map(|(i, m)| (MovieId(i), m))
  }

  pub fn theaters(&self) -> impl Iterator<Item = (TheaterId, &Theater)> {
    self.theaters.iter().enumerate().map(|(i, t)| (TheaterId(i), t))
  }

  pub fn showtimes(&self) -> impl Iterator<Item = (ShowtimeId, &Showtime)> {
    self.showtimes.iter().enumerate().map(|(i, s)| (ShowtimeId(i), s))
  }

  /// Resolve a persisted showtime key. First match wins.
  pub fn showtime_by_key(&self, key: &str) -> Option<ShowtimeId> {
    self
      .showtimes()
      .find(|(_, s)| s.key == key)
      .map(|(id, _)| id)
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Distinct states in order of first appearance.
  pub fn states(&self) -> Vec<&str> {
    distinct(self.theaters.iter().map(|t| t.state.as_str()))
  }

  /// Distinct cities within `state`, in order of first appearance.
  pub fn cities_in(&self, state: &str) -> Vec<&str> {
    distinct(
      self
        .theaters
        .iter()
        .filter(|t| t.state == state)
        .map(|t| t.city.as_str()),
    )
  }

  pub fn theaters_in(&self, city: &str) -> Vec<TheaterId> {
    self
      .theaters()
      .filter(|(_, t)| t.city == city)
      .map(|(id, _)| id)
      .collect()
  }

  /// Showtimes at `theater`, optionally restricted to movies whose title
  /// contains `title_filter` (case-sensitive).
  pub fn showtimes_at(&self, theater: TheaterId, title_filter: Option<&str>) -> Vec<ShowtimeId> {
    let filter = title_filter.filter(|f| !f.is_empty());
    self
      .showtimes()
      .filter(|(_, s)| s.theater == theater)
      .filter(|(_, s)| filter.is_none_or(|f| self.movie(s.movie).title.contains(f)))
      .map(|(id, _)| id)
      .collect()
  }

  // ── Built-in data ─────────────────────────────────────────────────────────

  /// The catalogue shipped with the console.
  pub fn builtin() -> Result<Self> {
    let mut c = Self::new();

    let ai_architect = c.add_movie("The AI Architect", "Sci-Fi/Action", 145);
    let eternal_sun = c.add_movie("Eternal Sun", "Romantic Drama", 120);
    let rogue_agent = c.add_movie("Rogue Agent 7", "Spy Thriller", 130);
    let jungle_quest = c.add_movie("Jungle Quest", "Family Animation", 95);
    let desert_storm = c.add_movie("Desert Storm", "War Epic", 160);
    let last_voyage = c.add_movie("The Last Voyage", "Mystery", 110);

    // (name, city, state, standard rows, premium rows, seats per row)
    let theaters = [
      ("PVR Phoenix", "Mumbai", "Maharashtra", 6, 4, 10),
      ("Cinepolis Amanora", "Pune", "Maharashtra", 5, 5, 8),
      ("INOX Empress", "Nagpur", "Maharashtra", 7, 3, 12),
      ("Gopalan Cinemas", "Bangalore", "Karnataka", 5, 5, 10),
      ("PVR Orion Mall", "Mysore", "Karnataka", 4, 6, 9),
      ("Wave Cinemas", "New Delhi", "Delhi", 5, 5, 10),
      ("PVR Ambience", "Gurugram", "Delhi", 6, 4, 11),
      ("INOX Mall", "Noida", "Delhi", 7, 3, 9),
      ("Jazz Cinemas", "Chennai", "Tamil Nadu", 5, 5, 11),
      ("Brookfield Mall", "Coimbatore", "Tamil Nadu", 6, 4, 9),
      ("Inox South City", "Kolkata", "West Bengal", 7, 3, 10),
      ("PVR City Centre", "Siliguri", "West Bengal", 5, 5, 8),
      ("PVR Acropolis", "Ahmedabad", "Gujarat", 6, 4, 10),
      ("Cinepolis VR", "Surat", "Gujarat", 5, 5, 12),
      ("Inox Inorbit", "Vadodara", "Gujarat", 4, 6, 9),
      ("Wave Mall", "Lucknow", "Uttar Pradesh", 7, 3, 10),
      ("PVR Rave 3", "Kanpur", "Uttar Pradesh", 5, 5, 11),
      ("INOX Pacific", "Agra", "Uttar Pradesh", 6, 4, 8),
    ];
    let t: Vec<TheaterId> = theaters
      .into_iter()
      .map(|(name, city, state, std_rows, prem_rows, per_row)| {
        c.add_theater(name, city, state, std_rows, prem_rows, per_row, standard_menu())
      })
      .collect();

    let showtimes = [
      (ai_architect, t[0], "2025-12-15", "10:30 AM"),
      (eternal_sun, t[0], "2025-12-15", "07:00 PM"),
      (desert_storm, t[1], "2025-12-15", "04:00 PM"),
      (last_voyage, t[1], "2025-12-15", "09:30 PM"),
      (last_voyage, t[2], "2025-12-16", "01:00 PM"),
      (rogue_agent, t[3], "2025-12-16", "11:00 AM"),
      (ai_architect, t[3], "2025-12-16", "05:00 PM"),
      (eternal_sun, t[4], "2025-12-16", "09:00 PM"),
      (jungle_quest, t[4], "2025-12-16", "02:00 PM"),
      (jungle_quest, t[5], "2025-12-17", "02:00 PM"),
      (last_voyage, t[6], "2025-12-17", "06:00 PM"),
      (desert_storm, t[7], "2025-12-17", "08:30 PM"),
      (eternal_sun, t[7], "2025-12-17", "11:00 AM"),
      (eternal_sun, t[8], "2025-12-18", "10:00 AM"),
      (ai_architect, t[8], "2025-12-18", "06:45 PM"),
      (rogue_agent, t[9], "2025-12-18", "03:00 PM"),
      (ai_architect, t[10], "2025-12-19", "12:00 PM"),
      (jungle_quest, t[11], "2025-12-19", "08:00 PM"),
      (last_voyage, t[12], "2025-12-20", "04:30 PM"),
      (rogue_agent, t[13], "2025-12-20", "07:30 PM"),
      (desert_storm, t[14], "2025-12-20", "01:00 PM"),
      (ai_architect, t[15], "2025-12-21", "06:00 PM"),
      (eternal_sun, t[16], "2025-12-21", "10:00 AM"),
      (jungle_quest, t[17], "2025-12-21", "02:30 PM"),
    ];
    for (movie, theater, date, time) in showtimes {
      c.add_showtime(movie, theater, date, time)?;
    }

    Ok(c)
  }
}

/// The menu every built-in theater serves.
pub fn standard_menu() -> Vec<MenuItem> {
  vec![
    MenuItem::new("Caramel Popcorn (Large)", Decimal::new(35000, 2), "Popcorn"),
    MenuItem::new("Salty Popcorn (Medium)", Decimal::new(25000, 2), "Popcorn"),
    MenuItem::new("Coca-Cola (500ml)", Decimal::new(15000, 2), "Beverage"),
    MenuItem::new("Fresh Lime Soda", Decimal::new(18000, 2), "Beverage"),
    MenuItem::new("Nachos with Cheese Dip", Decimal::new(29000, 2), "Snack"),
    MenuItem::new("Veg Burger", Decimal::new(22000, 2), "Snack"),
  ]
}

fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
  let mut out: Vec<&str> = Vec::new();
  for item in items {
    if !out.contains(&item) {
      out.push(item);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seat::SeatType;

  #[test]
  fn builtin_catalog_shape() {
    let c = Catalog::builtin().unwrap();
    assert_eq!(c.movies().count(), 6);
    assert_eq!(c.theaters().count(), 18);
    assert_eq!(c.showtimes().count(), 24);
    assert_eq!(c.states().len(), 7);
    assert_eq!(c.states()[0], "Maharashtra");
    assert_eq!(c.cities_in("Maharashtra"), ["Mumbai", "Pune", "Nagpur"]);
  }

  #[test]
  fn showtime_keys_are_unique_in_builtin_catalog() {
    let c = Catalog::builtin().unwrap();
    let mut keys: Vec<&str> = c.showtimes().map(|(_, s)| s.key()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), 24);
  }

  #[test]
  fn showtime_key_joins_theater_date_time_title() {
    let c = Catalog::builtin().unwrap();
    let (id, show) = c.showtimes().next().unwrap();
    assert_eq!(show.key(), "PVR Phoenix|2025-12-15|10:30 AM|The AI Architect");
    assert_eq!(c.showtime_by_key(show.key()), Some(id));
    assert_eq!(c.showtime_by_key("PVR Phoenix|2025-12-15|10:30 AM"), None);
  }

  #[test]
  fn theater_grid_follows_row_counts() {
    let c = Catalog::builtin().unwrap();
    let mumbai = c.theaters_in("Mumbai")[0];
    let seats = c.theater(mumbai).seats();
    assert_eq!(seats.rows().len(), 10);
    assert_eq!(seats.find_seat("D10").unwrap().kind(), SeatType::Premium);
    assert_eq!(seats.find_seat("E1").unwrap().kind(), SeatType::Standard);
    assert!(seats.find_seat("J11").is_none());
  }

  #[test]
  fn showtime_filter_matches_title_substring() {
    let c = Catalog::builtin().unwrap();
    let mysore = c.theaters_in("Mysore")[0];
    assert_eq!(c.showtimes_at(mysore, None).len(), 2);
    assert_eq!(c.showtimes_at(mysore, Some("")).len(), 2);

    let jungle = c.showtimes_at(mysore, Some("Jungle"));
    assert_eq!(jungle.len(), 1);
    assert_eq!(c.movie(c.showtime(jungle[0]).movie).title, "Jungle Quest");

    assert!(c.showtimes_at(mysore, Some("jungle")).is_empty());
  }

  #[test]
  fn add_showtime_rejects_bad_date_and_time() {
    let mut c = Catalog::new();
    let m = c.add_movie("M", "G", 90);
    let t = c.add_theater("T", "City", "State", 1, 1, 2, Vec::new());
    assert!(matches!(c.add_showtime(m, t, "15/12/2025", "10:00 AM"), Err(Error::InvalidDate(_))));
    assert!(matches!(c.add_showtime(m, t, "2025-12-15", "25:00"), Err(Error::InvalidTime(_))));
    let id = c.add_showtime(m, t, "2025-12-15", "10:00 AM").unwrap();
    assert_eq!(c.showtime(id).time_str(), "10:00 AM");
    assert_eq!(c.ledger(id).rows().len(), 2);
  }
}
