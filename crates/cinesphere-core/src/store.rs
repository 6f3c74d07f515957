//! The `BookingStore` trait.
//!
//! Implemented by storage backends (e.g. `cinesphere-store-file`). The
//! console depends on this abstraction, not on any concrete backend.

use crate::record::BookingRecord;

/// Abstraction over where active bookings are persisted.
///
/// Saving always replaces the whole stored set; there is no append or
/// partial update.
pub trait BookingStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every well-formed record. Backends skip (and report) lines they
  /// cannot decode rather than failing the whole load.
  fn load(&self) -> Result<Vec<BookingRecord>, Self::Error>;

  /// Replace the stored set with `records`, in the given order.
  fn save(&self, records: &[BookingRecord]) -> Result<(), Self::Error>;
}
