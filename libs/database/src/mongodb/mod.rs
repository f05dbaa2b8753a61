//! MongoDB connection management and health probing

mod config;
mod connector;
mod health;

pub use config::{MongoConfig, database_from_url};
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use ::mongodb::{Client, Collection, Database};
