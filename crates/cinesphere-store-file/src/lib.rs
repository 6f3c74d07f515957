//! Flat-file backend for CineSphere bookings.
//!
//! Bookings live in a single text file, one record per line. Every save
//! rewrites the whole file; nothing is appended in place.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FileStore;
