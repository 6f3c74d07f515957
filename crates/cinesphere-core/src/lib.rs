//! Core types for the CineSphere booking console.
//!
//! This crate is deliberately free of terminal and filesystem dependencies.
//! It owns the catalog, the per-theater seat ledgers, food orders, booking
//! records and the reconciliation between persisted records and in-memory
//! seat state. Storage backends implement [`store::BookingStore`].

pub mod booking;
pub mod catalog;
pub mod desk;
pub mod error;
pub mod food;
pub mod record;
pub mod seat;
pub mod store;

pub use error::{Error, Result};
