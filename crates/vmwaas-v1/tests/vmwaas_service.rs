//! End-to-end tests of the client against a mock service.

use async_trait::async_trait;
use mockall::mock;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vmwaas_core::{Authenticator, Error, JsonPatchOperation, NoAuthAuthenticator, RetryPolicy};
use vmwaas_v1::models::{
    ClusterPrototype, DirectorSiteStatus, FileShares, PvdcPrototype, StorageType,
    VdcDirectorSitePrototype,
};
use vmwaas_v1::{
    CreateDirectorSitesOptions, CreateVdcOptions, DeleteDirectorSitesPvdcsClusterOptions,
    DeleteVdcOptions, GetDirectorSiteOptions,
    GetDirectorSitesPriceQuoteOptions, GetDirectorSitesPvdcsClusterOptions, GetVdcOptions,
    ListVdcsOptions, UpdateDirectorSitesPvdcsClusterOptions, VmwareClient,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mock! {
    pub Auth {}

    #[async_trait]
    impl Authenticator for Auth {
        async fn authenticate(&self, request: &mut reqwest::Request) -> vmwaas_core::Result<()>;
        fn authentication_type(&self) -> &'static str;
        fn validate(&self) -> vmwaas_core::Result<()>;
    }
}

fn bearer_mock() -> MockAuth {
    let mut auth = MockAuth::new();
    auth.expect_validate().returning(|| Ok(()));
    auth.expect_authentication_type().return_const("bearerToken");
    auth.expect_authenticate().returning(|request| {
        request
            .headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer test-token"));
        Ok(())
    });
    auth
}

fn client_for(server: &MockServer) -> VmwareClient {
    VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(NoAuthAuthenticator::new())
        .build()
        .unwrap()
}

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::enabled(max_retries, Duration::from_millis(100))
        .with_initial_delay(Duration::from_millis(10))
}

fn site_pvdcs() -> Vec<PvdcPrototype> {
    vec![PvdcPrototype::new(
        "p1",
        "dal10",
        vec![ClusterPrototype::new("c1", 2, "bm.lite", FileShares::default())
            .with_storage_type(StorageType::Nfs)],
    )]
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

#[tokio::test]
async fn test_create_site_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/director_sites"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({
            "name": "s1",
            "resource_group": "rg1",
            "pvdcs": [{
                "name": "p1",
                "data_center": "dal10",
                "clusters": [{
                    "name": "c1",
                    "storage_type": "nfs",
                    "host_count": 2,
                    "file_shares": {},
                    "host_profile": "bm.lite"
                }]
            }]
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("X-Global-Transaction-ID", "txn-create-1")
                .set_body_json(json!({"id": "site-1", "name": "s1", "status": "Creating"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(bearer_mock())
        .build()
        .unwrap();

    let options = CreateDirectorSitesOptions::new(site_pvdcs())
        .with_name("s1")
        .with_resource_group("rg1");
    let response = client.create_director_sites(&options).await.unwrap();

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    assert_eq!(response.transaction_id(), Some("txn-create-1"));
    let site = response.result.unwrap();
    assert_eq!(site.status, Some(DirectorSiteStatus::Creating));
}

#[tokio::test]
async fn test_missing_required_field_makes_no_call() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .create_director_sites(&CreateDirectorSitesOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
    assert!(err.is_preflight());

    let err = client
        .get_director_sites_price_quote(&GetDirectorSitesPriceQuoteOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    let err = client
        .create_vdc(&CreateVdcOptions::default().with_name("v1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    let mut no_body = UpdateDirectorSitesPvdcsClusterOptions::new("s1", "p1", "c1", Vec::new());
    no_body.body = None;
    let err = client
        .update_director_sites_pvdcs_cluster(&no_body)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_empty_path_param_makes_no_call() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .get_director_site(&GetDirectorSiteOptions::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UrlError(_)));

    let err = client
        .get_director_sites_pvdcs_cluster(&GetDirectorSitesPvdcsClusterOptions::new(
            "s1", "", "c1",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UrlError(_)));

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_dot_segment_ids_make_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .delete_director_sites_pvdcs_cluster(&DeleteDirectorSitesPvdcsClusterOptions::new(
            "site-1", "..", "..",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UrlError(_)));

    let err = client
        .delete_vdc(&DeleteVdcOptions::new("."))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UrlError(_)));

    let err = client
        .delete_vdc(&DeleteVdcOptions::new("%2E%2E"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UrlError(_)));

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_retry_then_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vdcs"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vdcs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vdcs": [{"id": "vdc-1", "status": "ReadyToUse"}]
        })))
        .mount(&server)
        .await;

    let client = VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(bearer_mock())
        .with_retry_policy(fast_retries(3))
        .build()
        .unwrap();

    let response = client.list_vdcs(&ListVdcsOptions::new()).await.unwrap();
    assert_eq!(response.result.unwrap().vdcs[0].id, "vdc-1");
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_retries_stop_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vdcs"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(NoAuthAuthenticator::new())
        .with_retry_policy(fast_retries(2))
        .build()
        .unwrap();

    let err = client.list_vdcs(&ListVdcsOptions::new()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_error_envelope_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/vdcs/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"code": "not_found", "message": "VDC not found"})),
        )
        .mount(&server)
        .await;

    let client = VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(NoAuthAuthenticator::new())
        .with_retry_policy(fast_retries(3))
        .build()
        .unwrap();

    let err = client
        .delete_vdc(&DeleteVdcOptions::new("missing"))
        .await
        .unwrap_err();

    match &err {
        Error::ServiceError(service_error) => {
            assert_eq!(service_error.status, StatusCode::NOT_FOUND);
            assert_eq!(service_error.code.as_deref(), Some("not_found"));
            assert_eq!(service_error.message, "VDC not found");
        }
        other => panic!("expected ServiceError, got {other:?}"),
    }
    assert!(!err.is_retryable());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_client_error_is_attempted_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vdcs/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"code": "bad_request", "message": "malformed id"}],
            "trace": "trace-1"
        })))
        .mount(&server)
        .await;

    let client = VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(NoAuthAuthenticator::new())
        .with_retry_policy(fast_retries(4))
        .build()
        .unwrap();

    let err = client.get_vdc(&GetVdcOptions::new("bad")).await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_patch_preserves_operation_order() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/director_sites/s1/pvdcs/p1/clusters/c1"))
        .and(header("Content-Type", "application/json-patch+json"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"message": "updating"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = UpdateDirectorSitesPvdcsClusterOptions::new(
        "s1",
        "p1",
        "c1",
        vec![
            JsonPatchOperation::replace("/host_count", 3),
            JsonPatchOperation::add("/file_shares/STORAGE_TWO_IOPS_GB", 1024),
        ],
    );
    client
        .update_director_sites_pvdcs_cluster(&options)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!([
            {"op": "replace", "path": "/host_count", "value": 3},
            {"op": "add", "path": "/file_shares/STORAGE_TWO_IOPS_GB", "value": 1024}
        ])
    );
}

#[tokio::test]
async fn test_identical_calls_send_identical_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vdcs"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "vdc-9"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = CreateVdcOptions::new("web", VdcDirectorSitePrototype::new("s1", "c1"))
        .with_resource_group("rg-1");

    client.create_vdc(&options).await.unwrap();
    client.create_vdc(&options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, requests[1].body);
    assert_eq!(
        String::from_utf8(requests[0].body.clone()).unwrap(),
        r#"{"director_site":{"cluster":{"id":"c1"},"id":"s1"},"name":"web","resource_group":{"id":"rg-1"}}"#
    );
}

#[tokio::test]
async fn test_empty_success_body_leaves_result_unset() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/vdcs/vdc-1"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .delete_vdc(&DeleteVdcOptions::new("vdc-1"))
        .await
        .unwrap();

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    assert!(response.result.is_none());
}

#[tokio::test]
async fn test_cancelled_token_makes_no_call() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .list_vdcs_with_token(&ListVdcsOptions::new(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() {
    let server = MockServer::start().await;

    let mut auth = MockAuth::new();
    auth.expect_validate().returning(|| Ok(()));
    auth.expect_authentication_type().return_const("bearerToken");
    auth.expect_authenticate()
        .times(1)
        .returning(|_| Err(Error::AuthError("token expired".to_string())));

    let client = VmwareClient::builder()
        .with_service_url(server.uri())
        .with_authenticator(auth)
        .with_retry_policy(fast_retries(3))
        .build()
        .unwrap();

    let err = client.list_vdcs(&ListVdcsOptions::new()).await.unwrap_err();
    assert!(matches!(err, Error::AuthError(_)));
    assert_eq!(request_count(&server).await, 0);
}

#[test]
fn test_cumulative_backoff_is_bounded() {
    let max_interval = Duration::from_secs(2);
    let policy = RetryPolicy::enabled(5, max_interval);

    let total: Duration = (1..=policy.max_retries)
        .map(|attempt| policy.retry_delay(attempt, None))
        .sum();
    assert!(total <= max_interval * policy.max_retries);

    // A long server-requested delay is still capped.
    assert_eq!(
        policy.retry_delay(1, Some(Duration::from_secs(600))),
        max_interval
    );
}
