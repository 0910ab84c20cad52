pub mod auth_response;
pub mod connection_info;
pub mod instance;
pub mod instance_stats;
pub mod user;

// Re-export commonly used types
pub use auth_response::AuthResponse;
pub use connection_info::ConnectionInfo;
pub use instance::{CreateInstanceRequest, Instance, InstanceStatus, OsKind};
pub use instance_stats::InstanceStats;
pub use user::User;
