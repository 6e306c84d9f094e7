//! Compliance aggregation and export projection
//!
//! Both consumers of the filtered queue live here: the dashboard's
//! first-response compliance report and the flat-row projection handed to
//! the CSV serializer. Pure recomputation over a snapshot on every request;
//! no incremental state.

pub mod compliance;
pub mod export;

pub use compliance::*;
pub use export::*;
