//! Tour Guide Core - Domain models, ports, events, and configuration
//!
//! This crate contains the shared domain types and the port traits that the
//! platform adapters (location, speech, remote endpoints) implement.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod ports;

pub use error::{LocationError, Result, TourGuideError};
pub use events::{AppEvent, EventQueue, EventSender};
