//! Unit tests for the bitbucket_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Test Constants ---
const TEST_WORKSPACE: &str = "acme";
const TEST_USERNAME: &str = "ci-bot";
const TEST_PASSWORD: &str = "app-secret";
// base64("ci-bot:app-secret")
const TEST_AUTH_HEADER: &str = "Basic Y2ktYm90OmFwcC1zZWNyZXQ=";

fn create_test_client(mock_server: &MockServer) -> BitbucketClient {
    let credentials = Credentials::new(
        TEST_USERNAME,
        SecretString::from(TEST_PASSWORD.to_string()),
    );
    BitbucketClient::new(&mock_server.uri(), credentials).expect("Failed to create client")
}

#[tokio::test]
async fn test_list_members_page_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/workspaces/{TEST_WORKSPACE}/members")))
        .and(query_param("page", "1"))
        .and(header("authorization", TEST_AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagelen": 50,
            "page": 1,
            "size": 2,
            "values": [
                { "user": { "uuid": "{u1}", "account_id": "a1", "display_name": "One" } },
                { "user": { "uuid": "{u2}", "account_id": "a2", "display_name": "Two" } }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_members_page(TEST_WORKSPACE, 1).await;

    if let Err(e) = &result {
        eprintln!("list_members_page error: {e:?}");
    }
    let page = result.expect("members page");
    assert_eq!(page.values.len(), 2);
    assert_eq!(page.values[0].account_id(), "a1");
    assert_eq!(page.values[1].uuid(), "{u2}");
}

#[tokio::test]
async fn test_list_repositories_page_sends_page_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repositories/{TEST_WORKSPACE}")))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagelen": 10,
            "page": 3,
            "values": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let page = client
        .list_repositories_page(TEST_WORKSPACE, 3)
        .await
        .expect("repositories page");

    assert!(page.is_empty());
    assert_eq!(page.page, Some(3));
}

#[tokio::test]
async fn test_list_repositories_page_decodes_repositories() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repositories/{TEST_WORKSPACE}")))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [
                {
                    "slug": "repo-x",
                    "name": "Repo X",
                    "full_name": "acme/repo-x",
                    "is_private": true,
                    "project": { "key": "PLAT", "name": "Platform" }
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let page = client
        .list_repositories_page(TEST_WORKSPACE, 1)
        .await
        .expect("repositories page");

    assert_eq!(page.values.len(), 1);
    assert_eq!(page.values[0].slug(), "repo-x");
    assert_eq!(page.values[0].full_name(), "acme/repo-x");
}

#[tokio::test]
async fn test_add_default_reviewer_encodes_uuid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!(
            "/repositories/{TEST_WORKSPACE}/repo-x/default-reviewers/%7Bu1%7D"
        )))
        .and(header("authorization", TEST_AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "{u1}",
            "account_id": "a1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .add_default_reviewer(TEST_WORKSPACE, "repo-x", "{u1}")
        .await;

    if let Err(e) = &result {
        eprintln!("add_default_reviewer error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_remove_default_reviewer_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!(
            "/repositories/{TEST_WORKSPACE}/repo-x/default-reviewers/u1"
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .remove_default_reviewer(TEST_WORKSPACE, "repo-x", "u1")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_branching_model_settings_sends_typed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!(
            "/repositories/{TEST_WORKSPACE}/repo-x/branching-model/settings"
        )))
        .and(body_json(json!({
            "branch_types": [
                { "kind": "bugfix", "enabled": true, "prefix": "bugfix/" },
                { "kind": "feature", "enabled": true, "prefix": "feature/" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let settings = BranchingModelSettings {
        branch_types: vec![
            BranchTypeSetting::enabled(BranchTypeKind::Bugfix, "bugfix/"),
            BranchTypeSetting::enabled(BranchTypeKind::Feature, "feature/"),
        ],
    };

    let result = client
        .update_branching_model_settings(TEST_WORKSPACE, "repo-x", &settings)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_branch_restriction_sends_typed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/repositories/{TEST_WORKSPACE}/repo-x/branch-restrictions"
        )))
        .and(body_json(json!({
            "kind": "require_approvals_to_merge",
            "branch_match_kind": "branching_model",
            "branch_type": "development",
            "pattern": "",
            "value": 2
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let restriction =
        BranchRestriction::for_branch_type(RestrictionKind::RequireApprovalsToMerge, "development")
            .with_value(2);

    let result = client
        .create_branch_restriction(TEST_WORKSPACE, "repo-x", &restriction)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/workspaces/{TEST_WORKSPACE}/members")))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_members_page(TEST_WORKSPACE, 1).await;

    assert!(matches!(result, Err(Error::AuthError(_))));
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .add_default_reviewer(TEST_WORKSPACE, "missing", "u1")
        .await;

    match result {
        Err(Error::NotFound(path)) => {
            assert_eq!(path, "/repositories/acme/missing/default-reviewers/u1")
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limit_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_repositories_page(TEST_WORKSPACE, 1).await;

    assert!(matches!(result, Err(Error::RateLimitExceeded)));
}

#[tokio::test]
async fn test_server_error_maps_to_unexpected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let restriction = BranchRestriction::for_branch_type(
        RestrictionKind::EnforceMergeChecks,
        "development",
    );

    let result = client
        .create_branch_restriction(TEST_WORKSPACE, "repo-x", &restriction)
        .await;

    match result {
        Err(Error::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal failure");
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_page_maps_to_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_repositories_page(TEST_WORKSPACE, 1).await;

    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[tokio::test]
async fn test_base_url_path_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/2.0/repositories/{TEST_WORKSPACE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "values": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let credentials = Credentials::new(
        TEST_USERNAME,
        SecretString::from(TEST_PASSWORD.to_string()),
    );
    let client = BitbucketClient::new(&format!("{}/2.0/", mock_server.uri()), credentials)
        .expect("Failed to create client");

    let result = client.list_repositories_page(TEST_WORKSPACE, 1).await;

    assert!(result.is_ok());
}

#[test]
fn test_new_rejects_invalid_base_url() {
    let credentials = Credentials::new(
        TEST_USERNAME,
        SecretString::from(TEST_PASSWORD.to_string()),
    );

    let result = BitbucketClient::new("not a url", credentials);

    assert!(matches!(result, Err(Error::InvalidBaseUrl(_))));
}

#[test]
fn test_new_rejects_non_http_scheme() {
    let credentials = Credentials::new(
        TEST_USERNAME,
        SecretString::from(TEST_PASSWORD.to_string()),
    );

    let result = BitbucketClient::new("ftp://example.com/2.0", credentials);

    assert!(matches!(result, Err(Error::InvalidBaseUrl(_))));
}

#[test]
fn test_credentials_debug_does_not_leak_password() {
    let credentials = Credentials::new(
        TEST_USERNAME,
        SecretString::from(TEST_PASSWORD.to_string()),
    );

    let debug_output = format!("{credentials:?}");

    assert!(debug_output.contains(TEST_USERNAME));
    assert!(!debug_output.contains(TEST_PASSWORD));
}
