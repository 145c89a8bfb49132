use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ideaboard::config::GeminiConfig;
use ideaboard::providers::GeminiProvider;
use serde_json::{json, Value};
use std::time::Duration;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Gemini provider pointed at a mock server with a fixed test key
#[allow(dead_code)]
pub fn gemini_at(base: &str) -> GeminiProvider {
    let config = GeminiConfig {
        model: "gemini-test".to_string(),
        api_base: format!("{}/v1beta", base),
    };
    GeminiProvider::new(config, Some("test-key".to_string()), Duration::from_secs(5))
        .expect("failed to build gemini provider")
}

/// A generateContent body whose single candidate holds `text`
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 40, "candidatesTokenCount": 12 }
    })
}

/// Base URL of a local port with nothing listening on it
#[allow(dead_code)]
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
