//! Ticket queue filtering
//!
//! Narrows a ticket snapshot by assignment state, priority tier and
//! free-text search, and applies the single sort contract every consumer
//! shares: created_at descending.

pub mod filter;

pub use filter::*;
