//! Application state management

use mongodb::{Client, Database};

/// Handles shared by every route; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
