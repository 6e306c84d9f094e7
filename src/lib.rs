//! Help-desk ticketing service with first-response SLA tracking.
//!
//! The core engine lives in [`sla`], [`queue`] and [`analytics`]: pure
//! functions over an immutable ticket snapshot with the current instant
//! passed in explicitly. [`state`] provides the ticket store, [`processing`]
//! the workflow that glues the engine to it, and [`api`] the HTTP surface.

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod queue;
pub mod sla;
pub mod state;
