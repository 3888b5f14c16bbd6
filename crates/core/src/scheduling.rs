//! Scheduling logic: slot conflict detection and recurring session generation.
//!
//! Both operate on small in-memory snapshots and never touch storage. Callers load
//! the data, invoke these functions, and persist the results themselves.

pub mod calendar;
pub mod conflict;
pub mod generator;
