use serde::{Deserialize, Serialize};

/// Remote-access handle returned by the connect endpoint. The token here is
/// a one-off connection ticket, not the session credential.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub connection_url: String,
    pub token: String,
}
