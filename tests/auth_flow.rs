mod common;

use chrono::Duration;
use common::{TestEnv, project_json};
use resim_cli::api::ApiError;
use resim_cli::cli::commands::ProjectCommands;
use resim_cli::cli::commands::project::{CreateProjectArgs, ProjectSubcommands};
use resim_cli::cli::{Commands, execute};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn create_project(name: &str) -> Commands {
    Commands::Project(ProjectCommands {
        command: ProjectSubcommands::Create(CreateProjectArgs {
            name: name.to_string(),
            description: "D".to_string(),
            github: true,
        }),
    })
}

async fn mock_create_project(env: &TestEnv, token: &str, id: Uuid, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/projects"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .and(body_json(json!({"name": "P", "description": "D"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json("P", id)))
        .expect(calls)
        .mount(&env.server)
        .await;
}

#[tokio::test]
async fn test_cold_start_exchanges_once_and_caches_token() {
    let env = TestEnv::start().await;
    let project_id = Uuid::new_v4();
    env.mock_token_exchange("A", "fresh-token", 1).await;
    mock_create_project(&env, "fresh-token", project_id, 1).await;

    let out = execute(create_project("P"), &env.config("A")).await.unwrap();

    assert_eq!(out, format!("project_id={}\n", project_id));
    let cache = env.read_cache();
    assert_eq!(cache["tokens"]["A"]["access_token"], "fresh-token");
    assert_eq!(cache["tokens"]["A"]["token_type"], "Bearer");
}

#[tokio::test]
async fn test_second_invocation_reuses_cached_token() {
    let env = TestEnv::start().await;
    let project_id = Uuid::new_v4();
    env.mock_token_exchange("A", "fresh-token", 1).await;
    mock_create_project(&env, "fresh-token", project_id, 2).await;

    let config = env.config("A");
    execute(create_project("P"), &config).await.unwrap();
    execute(create_project("P"), &config).await.unwrap();
}

#[tokio::test]
async fn test_warm_start_never_contacts_token_endpoint() {
    let env = TestEnv::start().await;
    let project_id = Uuid::new_v4();
    env.write_cache(&[("A", "cached-token", Duration::hours(1))]);
    env.mock_token_exchange("A", "fresh-token", 0).await;
    mock_create_project(&env, "cached-token", project_id, 1).await;

    let out = execute(create_project("P"), &env.config("A")).await.unwrap();

    assert_eq!(out, format!("project_id={}\n", project_id));
    assert_eq!(env.read_cache()["tokens"]["A"]["access_token"], "cached-token");
}

#[tokio::test]
async fn test_expired_token_is_replaced_and_other_clients_kept() {
    let env = TestEnv::start().await;
    let project_id = Uuid::new_v4();
    env.write_cache(&[
        ("A", "stale-token", -Duration::hours(1)),
        ("B", "other-token", Duration::hours(1)),
    ]);
    env.mock_token_exchange("A", "fresh-token", 1).await;
    mock_create_project(&env, "fresh-token", project_id, 1).await;

    execute(create_project("P"), &env.config("A")).await.unwrap();

    let cache = env.read_cache();
    assert_eq!(cache["tokens"]["A"]["access_token"], "fresh-token");
    assert_eq!(cache["tokens"]["B"]["access_token"], "other-token");
}

#[tokio::test]
async fn test_token_inside_expiry_margin_is_not_used() {
    let env = TestEnv::start().await;
    let project_id = Uuid::new_v4();
    env.write_cache(&[("A", "nearly-expired", Duration::seconds(5))]);
    env.mock_token_exchange("A", "fresh-token", 1).await;
    mock_create_project(&env, "fresh-token", project_id, 1).await;

    execute(create_project("P"), &env.config("A")).await.unwrap();
}

#[tokio::test]
async fn test_corrupt_cache_falls_back_to_exchange() {
    let env = TestEnv::start().await;
    let project_id = Uuid::new_v4();
    std::fs::create_dir_all(env.cache_path().parent().unwrap()).unwrap();
    std::fs::write(env.cache_path(), "{not json").unwrap();
    env.mock_token_exchange("A", "fresh-token", 1).await;
    mock_create_project(&env, "fresh-token", project_id, 1).await;

    execute(create_project("P"), &env.config("A")).await.unwrap();

    assert_eq!(env.read_cache()["tokens"]["A"]["access_token"], "fresh-token");
}

#[tokio::test]
async fn test_rejected_credentials_report_server_body() {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("access_denied"))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/projects"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&env.server)
        .await;

    let err = execute(create_project("P"), &env.config("A")).await.unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Auth(message)) => assert!(message.contains("access_denied")),
        other => panic!("expected auth error, got {:?}", other),
    }
    assert!(!env.cache_path().exists());
}

#[tokio::test]
async fn test_token_response_without_access_token_fails() {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&env.server)
        .await;

    let err = execute(create_project("P"), &env.config("A")).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Auth(_))));
    assert!(err.to_string().contains("no access token"));
}

#[tokio::test]
async fn test_missing_client_id_fails_without_requests() {
    let env = TestEnv::start().await;

    let err = execute(create_project("P"), &env.config("")).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Config(_))));
    assert!(err.to_string().contains("client ID is required"));
    assert_eq!(env.request_count().await, 0);
}

#[tokio::test]
async fn test_unrepresentable_expires_in_is_auth_error() {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "Bearer",
            "expires_in": 9_000_000_000_000_000i64
        })))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/projects"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&env.server)
        .await;

    let err = execute(create_project("P"), &env.config("A")).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Auth(_))));
    assert!(err.to_string().contains("invalid expires_in"));
    assert!(!env.cache_path().exists());
}
