use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Successful login/register response: the account plus a fresh bearer token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
