use qc_mcp_api::{ApiClient, ApiConfig, ApiError, BrowserLauncher, Credentials};
use qc_mcp_tools::catalog::{backtests, files, object_store, project, server_version};
use qc_mcp_tools::{Tool, ToolContext, ToolError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn context_for(server: &MockServer) -> ToolContext {
    let config = ApiConfig::new(Credentials::new("12345", "token")).with_base_url(server.uri());
    ToolContext::new(ApiClient::new(Arc::new(config)), "Test Agent")
}

/// Starts a server answering each `(method, path)` with its response.
async fn serve(routes: Vec<(&str, &str, ResponseTemplate)>) -> MockServer {
    let server = MockServer::start().await;
    for (verb, route, response) in routes {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(response)
            .mount(&server)
            .await;
    }
    server
}

fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn requests_to(server: &MockServer, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path() == route)
        .collect()
}

fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

#[derive(Default)]
struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_forward_tool_relays_body_unchanged() {
    let body = json!({"success": true, "projects": [{"projectId": 7, "name": "Alpha"}]});
    let server = serve(vec![("POST", "/projects/read", json_response(body.clone()))]).await;
    let ctx = context_for(&server);

    let result = project::read_project()
        .execute(&ctx, json!({"projectId": 7}))
        .await
        .unwrap();
    assert_eq!(result, body);

    let requests = requests_to(&server, "/projects/read").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(body_json(&requests[0]), json!({"projectId": 7}));
}

#[tokio::test]
async fn test_logical_failure_is_a_normal_result() {
    let body = json!({"success": false, "errors": ["Project not found"]});
    let server = serve(vec![("POST", "/projects/delete", json_response(body.clone()))]).await;

    let result = project::delete_project()
        .execute(&context_for(&server), json!({"projectId": 1}))
        .await
        .unwrap();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_transport() {
    let server = serve(vec![]).await;
    let ctx = context_for(&server);

    let missing = project::read_project().execute(&ctx, json!({})).await;
    assert!(matches!(missing, Err(ToolError::Validation(_))));

    let unknown = project::read_project()
        .execute(&ctx, json!({"projectId": 1, "verbose": true}))
        .await;
    assert!(matches!(unknown, Err(ToolError::Validation(_))));

    let wrong_type = project::create_project()
        .execute(&ctx, json!({"name": "x", "language": "Rust"}))
        .await;
    assert!(wrong_type.unwrap_err().is_validation());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_optional_fields_are_omitted_from_payload() {
    let server = serve(vec![(
        "POST",
        "/projects/create",
        json_response(json!({"success": true, "projects": []})),
    )])
    .await;

    project::create_project()
        .execute(&context_for(&server), json!({"name": "Alpha", "language": "Py"}))
        .await
        .unwrap();

    let requests = requests_to(&server, "/projects/create").await;
    assert_eq!(
        body_json(&requests[0]),
        json!({"name": "Alpha", "language": "Py"})
    );
}

#[test]
fn test_prepare_is_deterministic() {
    let tool = files::update_file_contents();
    let input = json!({"projectId": 3, "name": "main.py", "content": "print(1)"});

    let first = serde_json::to_vec(&tool.prepare("Agent", input.clone()).unwrap()).unwrap();
    let second = serde_json::to_vec(&tool.prepare("Agent", input).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(tool.endpoint(), "/files/update");
}

#[tokio::test]
async fn test_identical_calls_send_identical_bodies() {
    let server = serve(vec![(
        "POST",
        "/compile/read",
        json_response(json!({"success": true, "state": "BuildSuccess"})),
    )])
    .await;
    let ctx = context_for(&server);
    let tool = qc_mcp_tools::catalog::compile::read_compile();

    for _ in 0..2 {
        tool.execute(&ctx, json!({"projectId": 9, "compileId": "c-1"}))
            .await
            .unwrap();
    }

    let requests = requests_to(&server, "/compile/read").await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_file_tools_tag_code_source() {
    let server = serve(vec![(
        "POST",
        "/files/create",
        json_response(json!({"success": true})),
    )])
    .await;

    files::create_file()
        .execute(&context_for(&server), json!({"projectId": 3, "name": "utils.py"}))
        .await
        .unwrap();

    let requests = requests_to(&server, "/files/create").await;
    assert_eq!(
        body_json(&requests[0]),
        json!({"projectId": 3, "name": "utils.py", "codeSourceId": "Test Agent"})
    );
}

#[test]
fn test_untagged_tools_leave_payload_alone() {
    let payload = project::read_project()
        .prepare("Agent", json!({"projectId": 1}))
        .unwrap();
    assert!(payload.get("codeSourceId").is_none());
}

#[tokio::test]
async fn test_projected_tool_shapes_response() {
    let server = serve(vec![(
        "POST",
        "/backtests/create",
        json_response(
            json!({"success": true, "backtest": {"backtestId": "42", "status": "Running", "charts": {}}}),
        ),
    )])
    .await;

    let result = backtests::create_backtest_brief()
        .execute(
            &context_for(&server),
            json!({"projectId": 1, "compileId": "c", "backtestName": "Smoke"}),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({"backtest": {"backtestId": "42", "status": "Running"}, "success": true, "errors": []})
    );
}

#[tokio::test]
async fn test_http_error_produces_no_normalized_result() {
    let server = serve(vec![]).await;

    let err = backtests::read_backtest_brief()
        .execute(&context_for(&server), json!({"projectId": 1, "backtestId": "b"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Api(ApiError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_upload_object_sends_multipart() {
    let server = serve(vec![(
        "POST",
        object_store::UPLOAD_ENDPOINT,
        json_response(json!({"success": true})),
    )])
    .await;

    object_store::UploadObjectTool
        .execute(
            &context_for(&server),
            json!({"organizationId": "org-1", "key": "models/weights.csv", "objectData": "a,b\n1,2"}),
        )
        .await
        .unwrap();

    let request = &requests_to(&server, object_store::UPLOAD_ENDPOINT).await[0];
    assert!(header(request, "content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"organizationId\""));
    assert!(body.contains("org-1"));
    assert!(body.contains("filename=\"models/weights.csv\""));
    assert!(body.contains("a,b\n1,2"));
}

#[tokio::test]
async fn test_authorize_connection_opens_redirect() {
    let server = serve(vec![
        (
            "POST",
            "/live/auth0/authorize",
            ResponseTemplate::new(302)
                .insert_header("Location", "https://login.example.com/authorize?state=1"),
        ),
        (
            "POST",
            "/live/auth0/read",
            json_response(json!({"success": true, "authorization": {"id": "a"}})),
        ),
    ])
    .await;
    let browser = Arc::new(RecordingBrowser::default());
    let ctx = context_for(&server).with_browser(browser.clone());

    let tool = qc_mcp_tools::catalog::live::AuthorizeConnectionTool;
    let result = tool
        .execute(&ctx, json!({"brokerage": "TradierBrokerage"}))
        .await
        .unwrap();

    assert_eq!(result["authorization"]["id"], "a");
    assert_eq!(
        *browser.opened.lock().unwrap(),
        vec!["https://login.example.com/authorize?state=1".to_string()]
    );
}

#[tokio::test]
async fn test_latest_server_version_reads_second_tag() {
    let server = serve(vec![(
        "GET",
        "/tags",
        json_response(json!({"results": [{"name": "latest"}, {"name": "0.9.1"}]})),
    )])
    .await;
    let ctx = context_for(&server).with_latest_version_url(format!("{}/tags", server.uri()));

    let result = server_version::ReadLatestServerVersionTool
        .execute(&ctx, json!({}))
        .await
        .unwrap();
    assert_eq!(result, json!({"result": "0.9.1"}));

    let request = &requests_to(&server, "/tags").await[0];
    assert_eq!(request.url.query(), Some("page_size=2"));
    assert!(header(request, "authorization").is_none());
}

#[tokio::test]
async fn test_server_version_is_local() {
    let server = serve(vec![]).await;

    let result = server_version::ReadServerVersionTool
        .execute(&context_for(&server), serde_json::Value::Null)
        .await
        .unwrap();
    assert_eq!(result, json!({"result": server_version::SERVER_VERSION}));
    assert!(server.received_requests().await.unwrap().is_empty());
}
