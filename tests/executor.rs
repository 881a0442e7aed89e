use std::time::Duration;

use golem_lib::http::{RequestError, RequestExecutor};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn executor(timeout: Duration) -> RequestExecutor {
    RequestExecutor::with_options(timeout, false).unwrap()
}

#[tokio::test]
async fn test_ok_response_is_captured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/200"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "abc123")
                .set_body_string("hello world"),
        )
        .mount(&server)
        .await;

    let response = executor(Duration::from_secs(30))
        .execute("GET", &format!("{}/200", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, "200 OK");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "hello world");
    assert_eq!(response.size, 11);
    assert!(response
        .headers
        .iter()
        .any(|h| h.key == "x-request-id" && h.value == "abc123"));
    assert!(response.response_time < Duration::from_secs(30));
}

#[tokio::test]
async fn test_error_status_is_not_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let response = executor(Duration::from_secs(30))
        .execute("delete", &format!("{}/items/1", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, "500 Internal Server Error");
    assert_eq!(response.body, "boom");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = executor(Duration::from_millis(300))
        .execute("GET", &format!("{}/timeout", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Timeout), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_every_method_is_sent_as_given() {
    let server = MockServer::start().await;
    for verb in ["POST", "PUT", "PATCH"] {
        Mock::given(method(verb))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(202).set_body_string(verb))
            .mount(&server)
            .await;
    }

    let executor = executor(Duration::from_secs(30));
    for verb in ["POST", "PUT", "PATCH"] {
        let response = executor
            .execute(verb, &format!("{}/echo", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status_code, 202);
        assert_eq!(response.body, verb);
    }
}
