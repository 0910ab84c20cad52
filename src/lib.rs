//! Client library for the CloudPC rental service.
//!
//! This crate carries the two pieces every CloudPC frontend needs:
//!
//! - [`SessionStore`] — owns the bearer token, persisted across runs.
//! - [`ApiClient`] — the single outbound path to the backend; attaches the
//!   token to every request and tears the session down when the backend
//!   answers 401.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use cloudpc::{ApiClient, SessionStore};
//!
//! # async fn example() -> Result<(), cloudpc::ApiError> {
//! let session = Arc::new(SessionStore::open(cloudpc::config::get_token_file()));
//! let client = ApiClient::new("http://localhost:5000".to_string(), session);
//!
//! let auth = client.login("a@example.com", "pw").await?;
//! println!("Logged in as {}", auth.user.name);
//!
//! for instance in client.list_instances().await? {
//!     println!("{}\t{}", instance.name, instance.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;

pub use api::ApiClient;
pub use error::ApiError;
pub use session::SessionStore;
