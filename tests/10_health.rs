mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;

    // OK with a database, SERVICE_UNAVAILABLE without one
    let status = res.status();
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        status
    );

    let body: Value = res.json().await?;
    assert_eq!(body["status"], status.as_u16());
    Ok(())
}

#[tokio::test]
async fn root_lists_service_info() -> Result<()> {
    let server = common::ensure_server().await?;

    let body: Value = reqwest::get(format!("{}/", server.base_url)).await?.json().await?;
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["name"], "Restaurant API");
    assert!(body["errors"].is_null());
    Ok(())
}

#[tokio::test]
async fn api_requires_a_token() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/api/reservations", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await?;
    assert_eq!(body["status"], 401);
    assert!(body["data"].is_null());
    Ok(())
}
