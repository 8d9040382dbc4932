use motion_relay::adapters::motion::{MotionClient, MotionClientConfig};
use motion_relay::domain::errors::DomainError;
use motion_relay::domain::models::{TaskPayload, TaskUpdate};
use motion_relay::domain::ports::MotionApi;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

fn client(server: &MockServer) -> MotionClient {
    MotionClient::new(MotionClientConfig::new(API_KEY).with_base_url(server.uri())).unwrap()
}

fn task_payload() -> TaskPayload {
    TaskPayload {
        name: "Crash on start".to_string(),
        description: "https://github.com/octocat/hello/issues/1\n\n".to_string(),
        status: "Todo".to_string(),
        project_id: "P1".to_string(),
        workspace_id: "ws_1".to_string(),
    }
}

#[tokio::test]
async fn test_get_project_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/P1"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "P1",
            "name": "hello",
            "workspaceId": "ws_1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = client(&mock_server).get_project("P1").await.unwrap().unwrap();
    assert_eq!(project.id, "P1");
    assert_eq!(project.workspace_id.as_deref(), Some("ws_1"));
}

#[tokio::test]
async fn test_get_project_not_found_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    assert!(client(&mock_server).get_project("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_project_server_error_is_hard_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/P1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).get_project("P1").await.unwrap_err();
    match err {
        DomainError::RemoteRequestFailed(message) => {
            assert!(message.contains("500"), "got: {message}");
            assert!(message.contains("upstream exploded"), "got: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_project_sends_name_and_workspace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "name": "hello", "workspaceId": "ws_1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": "P9" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let id = client(&mock_server).create_project("hello", "ws_1").await.unwrap();
    assert_eq!(id, "P9");
}

#[tokio::test]
async fn test_create_task_sends_full_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(serde_json::json!({
            "name": "Crash on start",
            "description": "https://github.com/octocat/hello/issues/1\n\n",
            "status": "Todo",
            "projectId": "P1",
            "workspaceId": "ws_1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "T1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let id = client(&mock_server).create_task(&task_payload()).await.unwrap();
    assert_eq!(id, "T1");
}

#[tokio::test]
async fn test_create_task_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid status"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).create_task(&task_payload()).await.unwrap_err();
    assert!(matches!(err, DomainError::RemoteRequestFailed(_)));
}

#[tokio::test]
async fn test_update_task_omits_workspace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/T1"))
        .and(body_json(serde_json::json!({
            "name": "Crash on start",
            "description": "https://github.com/octocat/hello/issues/1\n\n",
            "status": "Todo",
            "projectId": "P1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "T1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .update_task("T1", &task_payload().without_workspace())
        .await
        .unwrap();
    assert_eq!(result, TaskUpdate::Updated);
}

#[tokio::test]
async fn test_update_task_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/T_gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .update_task("T_gone", &task_payload().without_workspace())
        .await
        .unwrap();
    assert_eq!(result, TaskUpdate::NotFound);
}

#[tokio::test]
async fn test_update_task_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/T1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .update_task("T1", &task_payload().without_workspace())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_list_workspace_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statuses"))
        .and(query_param("workspaceId", "ws_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Todo", "isDefaultStatus": true, "isResolvedStatus": false },
            { "name": "Done", "isDefaultStatus": false, "isResolvedStatus": true },
            { "name": "Blocked" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let statuses = client(&mock_server).list_workspace_statuses("ws_1").await.unwrap();
    assert_eq!(statuses.len(), 3);
    assert!(statuses[0].is_default_status);
    assert!(statuses[1].is_resolved_status);
    assert!(!statuses[2].is_default_status && !statuses[2].is_resolved_status);
}

#[tokio::test]
async fn test_list_workspaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "workspaces": [
                { "id": "ws_1", "name": "Personal" },
                { "id": "ws_2", "name": "Team" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let workspaces = client(&mock_server).list_workspaces().await.unwrap();
    assert_eq!(workspaces.len(), 2);
    assert_eq!(workspaces[1].name, "Team");
}

#[tokio::test]
async fn test_unreachable_server_is_hard_failure() {
    let client = MotionClient::new(
        MotionClientConfig::new(API_KEY).with_base_url("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = client.list_workspaces().await.unwrap_err();
    assert!(matches!(err, DomainError::RemoteRequestFailed(_)));
}

#[tokio::test]
async fn test_task_id_with_separators_stays_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/T1%2F..%2Fprojects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "T1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .update_task("T1/../projects", &task_payload().without_workspace())
        .await
        .unwrap();
    assert_eq!(result, TaskUpdate::Updated);
}
