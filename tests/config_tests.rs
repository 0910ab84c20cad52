use cloudpc::config;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

// Env-mutating tests share one lock so they cannot race each other.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("https://cloud.example.com/"),
        "https://cloud.example.com"
    );
}

#[test]
fn test_sanitize_base_url_no_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("https://cloud.example.com"),
        "https://cloud.example.com"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("https://cloud.example.com///"),
        "https://cloud.example.com"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  https://cloud.example.com/  "),
        "https://cloud.example.com"
    );
}

#[test]
fn test_sanitize_base_url_empty_string() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:5000");
}

#[test]
fn test_sanitize_base_url_whitespace_only() {
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:5000");
}

#[test]
fn test_get_token_file_env_override() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("CLOUDPC_TOKEN_FILE", "/tmp/custom-token");

    let path = config::get_token_file();
    assert_eq!(path, std::path::PathBuf::from("/tmp/custom-token"));

    // Clean up
    env::remove_var("CLOUDPC_TOKEN_FILE");
}

#[test]
fn test_get_token_file_default_ends_with_fixed_name() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::remove_var("CLOUDPC_TOKEN_FILE");

    let path = config::get_token_file();
    assert!(path.ends_with(
        std::path::Path::new(config::TOKEN_DIR_NAME).join(config::TOKEN_FILE_NAME)
    ));
}
