//! # Daycare Core
//!
//! Domain types and the pure scheduling logic shared by the database and API crates.
//!
//! - [`models`]: services, children, schedule slots, subscriptions and sessions
//! - [`scheduling`]: slot conflict detection and recurring session generation
//! - [`billing`]: monthly statements computed from session attendance
//!
//! Nothing in this crate performs I/O.

pub mod billing;
pub mod clock;
pub mod errors;
pub mod models;
pub mod scheduling;
