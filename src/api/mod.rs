// Atomic API modules
pub mod auth;
pub mod client;
pub mod instances;

// Re-export commonly used items
pub use client::{set_silent, ApiClient};
