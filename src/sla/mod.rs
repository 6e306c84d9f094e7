//! First-response SLA clock
//!
//! Pure time arithmetic: deadline computation from the priority tier and
//! human-readable countdown/breach rendering. Nothing here reads a clock;
//! the current instant is always a parameter.

pub mod clock;

pub use clock::*;
