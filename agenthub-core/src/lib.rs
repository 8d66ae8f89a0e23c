pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::HubConfig;
pub use error::HubError;
