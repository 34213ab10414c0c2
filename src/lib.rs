pub mod client;
pub mod configuration;
pub mod database;
pub mod models;
pub mod server;

pub use models::Workflow;

// Re-export specific items from server
pub use server::services;
