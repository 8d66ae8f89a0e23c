pub mod agent;
pub mod analytics;
pub mod message;

pub use agent::Agent;
pub use analytics::{AnalyticsRecord, GlobalStats};
pub use message::Message;
