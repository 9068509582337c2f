#![allow(dead_code)]

use chrono::{Duration, Utc};
use resim_cli::config::Config;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock ReSim deployment plus a throwaway home directory for the cache
pub struct TestEnv {
    pub server: MockServer,
    pub home: TempDir,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            home: tempfile::tempdir().unwrap(),
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1/", self.server.uri())
    }

    pub fn auth_url(&self) -> String {
        format!("{}/", self.server.uri())
    }

    pub fn cache_path(&self) -> PathBuf {
        self.home.path().join(".resim").join("cache.json")
    }

    pub fn config(&self, client_id: &str) -> Config {
        Config {
            api_url: self.api_url(),
            auth_url: self.auth_url(),
            client_id: client_id.to_string(),
            client_secret: "secret".to_string(),
            cache_path: self.cache_path(),
        }
    }

    /// Token endpoint for `client_id`, verified to be hit `calls` times
    pub async fn mock_token_exchange(&self, client_id: &str, access_token: &str, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains(format!("client_id={}", client_id)))
            .and(body_string_contains("audience=https%3A%2F%2Fapi.resim.ai"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": 86400
            })))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Seed the cache with one token expiring `expires_in` from now
    pub fn write_cache(&self, entries: &[(&str, &str, Duration)]) {
        let mut tokens = serde_json::Map::new();
        for (client_id, token, expires_in) in entries {
            tokens.insert(
                client_id.to_string(),
                json!({
                    "access_token": token,
                    "token_type": "Bearer",
                    "expiry": (Utc::now() + *expires_in).to_rfc3339()
                }),
            );
        }

        let path = self.cache_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string_pretty(&json!({ "tokens": tokens })).unwrap())
            .unwrap();
    }

    pub fn read_cache(&self) -> Value {
        serde_json::from_str(&fs::read_to_string(self.cache_path()).unwrap()).unwrap()
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap_or_default().len()
    }
}

pub fn project_json(name: &str, id: Uuid) -> Value {
    json!({
        "projectID": id,
        "name": name,
        "description": format!("{} project", name),
        "orgID": "resim"
    })
}

/// One page of `GET projects`
pub fn project_page(projects: &[(String, Uuid)], next_page_token: &str) -> Value {
    let projects: Vec<Value> = projects
        .iter()
        .map(|(name, id)| project_json(name, *id))
        .collect();
    json!({ "projects": projects, "nextPageToken": next_page_token })
}

/// `count` projects named `{prefix}-{n}` with fresh IDs
pub fn projects_named(prefix: &str, count: usize) -> Vec<(String, Uuid)> {
    (0..count)
        .map(|n| (format!("{}-{}", prefix, n), Uuid::new_v4()))
        .collect()
}
