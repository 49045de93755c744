pub mod agent;
pub mod config;
pub mod domain;
pub mod error;
pub mod list_client;
pub mod telemetry;

pub use agent::Agent;
pub use error::AgentError;
