use std::env;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "";
pub const TOKEN_DIR_NAME: &str = ".cloudpc";
pub const TOKEN_FILE_NAME: &str = "token";

/// Path prefix every backend endpoint lives under.
pub const API_PREFIX: &str = "/api";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

/// Resolve the token file path: `CLOUDPC_TOKEN_FILE` when set, otherwise
/// `$HOME/.cloudpc/token` (the working directory stands in when no home
/// directory is available).
pub fn get_token_file() -> PathBuf {
    if let Ok(path) = env::var("CLOUDPC_TOKEN_FILE") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    let base = env::var("HOME").map(PathBuf::from).unwrap_or_default();
    base.join(TOKEN_DIR_NAME).join(TOKEN_FILE_NAME)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:5000".to_string()
    } else {
        trimmed.to_string()
    }
}
