//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the crate.
//! - `adapters`: OS/runtime specific implementations (IO/async).
//! - `bus`: per-owner event channels.

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{EventBus, EventReceiver};
