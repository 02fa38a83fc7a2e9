use dataguard_client::error::ClientError;
use dataguard_client::{RunsClient, RunsQuery};
use dataguard_common::types::RunStatus;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP exchange with a canned response, returning the
/// raw request text so tests can assert on the request line.
async fn spawn_stub(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let response = format!(
        "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        // Read until the end of the request headers (GET, no body).
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.expect("read request");
            raw.extend_from_slice(&buf[..n]);
            if n == 0 || raw.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let request = String::from_utf8_lossy(&raw).into_owned();
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}"), handle)
}

fn runs_body() -> String {
    r#"[
        {"source_id":"orders_db","status":"PASS","records_checked":1200,"rules_failed":0,"timestamp":"2026-08-20T10:15:00Z"},
        {"source_id":"orders_db","status":"FAIL","records_checked":1180,"rules_failed":2,
         "errors":[{"rule_id":"not_null_email","field":"email","value":null,"reason":"field is null"}],
         "timestamp":"2026-08-20T11:15:00Z"}
    ]"#
    .to_string()
}

#[tokio::test]
async fn fetch_returns_runs_in_response_order() {
    let (base, stub) = spawn_stub("HTTP/1.1 200 OK", &runs_body()).await;
    let client = RunsClient::new(&base);

    let runs = client.fetch_recent_runs(None).await;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].status, RunStatus::Pass);
    assert_eq!(runs[1].status, RunStatus::Fail);
    assert_eq!(runs[1].rules_failed, 2);
    assert_eq!(runs[1].errors.as_ref().map(Vec::len), Some(1));

    let request = stub.await.expect("stub task");
    assert!(request.starts_with("GET /api/runs HTTP/1.1"));
    // No filter supplied, so no query string at all.
    assert!(!request.contains("source_id"));
}

#[tokio::test]
async fn source_filter_is_sent_as_query_parameter() {
    let (base, stub) = spawn_stub("HTTP/1.1 200 OK", "[]").await;
    let client = RunsClient::new(&base);

    let runs = client.fetch_recent_runs(Some("orders_db")).await;
    assert!(runs.is_empty());

    let request = stub.await.expect("stub task");
    assert!(request.starts_with("GET /api/runs?source_id=orders_db HTTP/1.1"));
}

#[tokio::test]
async fn limit_is_sent_when_present_on_the_query() {
    let (base, stub) = spawn_stub("HTTP/1.1 200 OK", "[]").await;
    let client = RunsClient::new(&base);

    let query = RunsQuery {
        source_id: Some("orders_db".to_string()),
        limit: Some(5),
    };
    let runs = client.try_fetch_runs(&query).await.expect("fetch");
    assert!(runs.is_empty());

    let request = stub.await.expect("stub task");
    assert!(request.starts_with("GET /api/runs?source_id=orders_db&limit=5 HTTP/1.1"));
}

#[tokio::test]
async fn cache_is_disabled_on_every_request() {
    let (base, stub) = spawn_stub("HTTP/1.1 200 OK", "[]").await;
    let client = RunsClient::new(&base);

    client.fetch_recent_runs(None).await;

    let request = stub.await.expect("stub task").to_lowercase();
    assert!(request.contains("cache-control: no-cache"));
}

#[tokio::test]
async fn trailing_slash_on_base_url_is_tolerated() {
    let (base, stub) = spawn_stub("HTTP/1.1 200 OK", "[]").await;
    let client = RunsClient::new(format!("{base}/"));

    client.fetch_recent_runs(None).await;

    let request = stub.await.expect("stub task");
    assert!(request.starts_with("GET /api/runs HTTP/1.1"));
}

#[tokio::test]
async fn null_body_collapses_to_empty() {
    // The Go-style server encodes a nil result set as JSON null.
    let (base, _stub) = spawn_stub("HTTP/1.1 200 OK", "null").await;
    let client = RunsClient::new(&base);

    let runs = client
        .try_fetch_runs(&RunsQuery::default())
        .await
        .expect("null body is a success");
    assert!(runs.is_empty());
}

#[tokio::test]
async fn absent_body_collapses_to_empty() {
    let (base, _stub) = spawn_stub("HTTP/1.1 200 OK", "").await;
    let client = RunsClient::new(&base);

    let runs = client
        .try_fetch_runs(&RunsQuery::default())
        .await
        .expect("empty body is a success");
    assert!(runs.is_empty());
}

#[tokio::test]
async fn non_success_status_is_a_protocol_error() {
    let (base, _stub) = spawn_stub("HTTP/1.1 500 Internal Server Error", "boom").await;
    let client = RunsClient::new(&base);

    let err = client
        .try_fetch_runs(&RunsQuery::default())
        .await
        .expect_err("500 must surface");
    match err {
        ClientError::Status(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let (base, _stub) = spawn_stub("HTTP/1.1 200 OK", "{not json").await;
    let client = RunsClient::new(&base);

    let err = client
        .try_fetch_runs(&RunsQuery::default())
        .await
        .expect_err("malformed body must surface");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn unknown_status_value_is_a_decode_error() {
    let body = r#"[{"source_id":"s","status":"DEGRADED","records_checked":1,"rules_failed":0,"timestamp":"2026-08-20T10:15:00Z"}]"#;
    let (base, _stub) = spawn_stub("HTTP/1.1 200 OK", body).await;
    let client = RunsClient::new(&base);

    let err = client
        .try_fetch_runs(&RunsQuery::default())
        .await
        .expect_err("unknown status must be rejected");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn every_failure_class_collapses_to_empty_for_the_dashboard() {
    // Protocol failure.
    let (base, _stub) = spawn_stub("HTTP/1.1 502 Bad Gateway", "").await;
    assert!(RunsClient::new(&base).fetch_recent_runs(None).await.is_empty());

    // Decode failure.
    let (base, _stub) = spawn_stub("HTTP/1.1 200 OK", "not-json").await;
    assert!(RunsClient::new(&base).fetch_recent_runs(None).await.is_empty());

    // Transport failure: bind then drop the listener so the port refuses.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = RunsClient::new(format!("http://{addr}"));
    assert!(client.fetch_recent_runs(None).await.is_empty());
}
