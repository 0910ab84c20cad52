use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account snapshot as returned by the backend. Immutable from the client's
/// point of view.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}
