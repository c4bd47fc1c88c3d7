mod common;

use anyhow::Result;
use reqwest::header::SET_COOKIE;
use reqwest::StatusCode;

fn sets_session_cookie(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("session=") && !v.contains("Max-Age=0"))
}

#[tokio::test]
async fn missing_token_is_unauthorized_and_sets_no_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(!sets_session_cookie(&res));
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No token provided");
    Ok(())
}

#[tokio::test]
async fn blank_token_is_treated_as_missing() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&serde_json::json!({ "token": "   " }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(!sets_session_cookie(&res));
    Ok(())
}

#[tokio::test]
async fn invalid_json_body_gets_the_error_envelope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("this is not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(!sets_session_cookie(&res));
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request body");
    Ok(())
}

#[tokio::test]
async fn malformed_token_is_unauthorized_and_sets_no_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth", server.base_url))
        .json(&serde_json::json!({ "token": "not.a.jwt" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(!sets_session_cookie(&res));
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid token");
    Ok(())
}
