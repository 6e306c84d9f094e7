pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::processing::TicketProcessor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<TicketProcessor>,
}

impl AppState {
    pub fn new(processor: Arc<TicketProcessor>) -> Self {
        Self { processor }
    }
}
