mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};

use common::{send, test_app_with_identity, MemoryStore, StaticIdentity, TEST_USER};

#[tokio::test]
async fn authenticated_audience_receives_a_token_pair() -> Result<()> {
    let app = test_app_with_identity(MemoryStore::new(), StaticIdentity::authenticated());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}", TEST_USER),
        None,
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aud"], "authenticated");
    let access = body["access_token"].as_str().unwrap().to_string();
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    // The issued access token opens protected routes; the refresh token must not
    let uri = format!("/api/assets/user/{}", TEST_USER);
    let (status, _) = send(&app, Method::GET, &uri, Some(&access), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &uri, Some(&refresh), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn other_audiences_get_no_tokens() -> Result<()> {
    let app = test_app_with_identity(MemoryStore::new(), StaticIdentity::with_aud(Some("anon")));

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}", TEST_USER),
        None,
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aud"], "anon");
    assert!(body.get("access_token").is_none());
    assert!(body.get("refresh_token").is_none());
    Ok(())
}

#[tokio::test]
async fn missing_audience_claim_is_not_found() -> Result<()> {
    let app = test_app_with_identity(MemoryStore::new(), StaticIdentity::with_aud(None));

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}", TEST_USER),
        None,
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn identity_provider_failure_surfaces_as_data_access_error() -> Result<()> {
    let app = test_app_with_identity(MemoryStore::new(), StaticIdentity::failing(404));

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}", TEST_USER),
        None,
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DATA_ACCESS_ERROR");
    Ok(())
}
