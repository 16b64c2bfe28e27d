pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::heights::HeightComparator;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub comparator: Arc<HeightComparator>,
}

impl AppState {
    pub fn new(comparator: Arc<HeightComparator>) -> Self {
        Self { comparator }
    }
}

// Body returned when either node could not be queried
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
