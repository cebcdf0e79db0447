//! End-to-end tests against the live mock control plane.
//!
//! # Design
//! Starts the mock server on a random port, then drives real HTTP through
//! the full pipeline: URL composition, basic-auth injection, query encoding,
//! retry policy, and JSON decoding, including the pagination-cursor walk.

use std::time::Duration;

use ccloud_core::environments::{EnvironmentCreateReq, EnvironmentUpdateReq};
use ccloud_core::service_accounts::{ServiceAccountCreateReq, ServiceAccountListOptions};
use ccloud_core::{BasicAuth, ConfluentClient, Error, NoAuth, PaginationOptions, RetryPolicy};

const AUTH_HEADER: &str = "Basic a2V5OnNlY3JldA==";

/// Start the mock server on a random port and return its base URL.
fn start_server(auth_header: Option<&'static str>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let base = format!("http://{addr}");

    let server_base = base.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, &server_base, auth_header).await
        })
        .unwrap();
    });
    base
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        wait_min: Duration::ZERO,
        wait_max: Duration::ZERO,
    }
}

fn client(base: &str) -> ConfluentClient {
    ConfluentClient::new()
        .with_base_url(base)
        .with_auth(BasicAuth::new("key", "secret"))
        .with_retry_policy(fast_retry())
}

#[test]
fn environment_lifecycle_with_pagination() {
    let base = start_server(Some(AUTH_HEADER));
    let client = client(&base);

    // Step 1: create three environments.
    let mut created_ids = Vec::new();
    for name in ["alpha", "beta", "gamma"] {
        let environment = client
            .create_environment(&EnvironmentCreateReq {
                display_name: name.to_string(),
            })
            .unwrap();
        assert_eq!(environment.display_name, name);
        assert!(environment.base.id.starts_with("env-"));
        created_ids.push(environment.base.id);
    }

    // Step 2: walk the list one page at a time via the cursor. Every
    // environment must appear exactly once, in order.
    let mut seen_ids = Vec::new();
    let mut options = PaginationOptions::page_size(1);
    loop {
        let page = client.list_environments(Some(&options)).unwrap();
        assert!(page.data.len() <= 1);
        for environment in &page.data {
            seen_ids.push(environment.base.id.clone());
        }
        match page.next_page_token() {
            Some(token) => options.page_token = Some(token),
            None => break,
        }
    }
    let mut expected = created_ids.clone();
    expected.sort();
    assert_eq!(seen_ids, expected);

    // Step 3: get one back.
    let fetched = client.get_environment(&created_ids[0]).unwrap();
    assert_eq!(fetched.base.id, created_ids[0]);

    // Step 4: rename it.
    let renamed = client
        .update_environment(
            &created_ids[0],
            &EnvironmentUpdateReq {
                display_name: "renamed".to_string(),
            },
        )
        .unwrap();
    assert_eq!(renamed.display_name, "renamed");

    // Step 5: delete, then confirm the 404 carries the server's message.
    client.delete_environment(&created_ids[0]).unwrap();
    let err = client.get_environment(&created_ids[0]).unwrap_err();
    match err {
        Error::UnexpectedStatus { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "environment not found");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Deleting again is the DELETE-gets-404 path.
    let err = client.delete_environment(&created_ids[0]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
}

#[test]
fn service_accounts_filter_by_display_name() {
    let base = start_server(Some(AUTH_HEADER));
    let client = client(&base);

    for (name, description) in [
        ("ingest", "ingest pipeline"),
        ("billing", "billing jobs"),
        ("audit", "audit exports"),
    ] {
        client
            .create_service_account(&ServiceAccountCreateReq {
                display_name: name.to_string(),
                description: description.to_string(),
            })
            .unwrap();
    }

    let options = ServiceAccountListOptions {
        display_names: vec!["ingest".to_string(), "audit".to_string()],
        ..ServiceAccountListOptions::default()
    };
    let page = client.list_service_accounts(Some(&options)).unwrap();
    let mut names: Vec<&str> = page.data.iter().map(|a| a.display_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["audit", "ingest"]);
}

#[test]
fn missing_credentials_surface_as_unauthorized_after_retries() {
    let base = start_server(Some(AUTH_HEADER));
    let client = ConfluentClient::new()
        .with_base_url(&base)
        .with_auth(NoAuth)
        .with_retry_policy(fast_retry());

    // 401 is retried; after the attempts run out the last response is
    // interpreted by the caller.
    let err = client.list_environments(None).unwrap_err();
    match err {
        Error::UnexpectedStatus { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("unexpected error: {other}"),
    }
}
