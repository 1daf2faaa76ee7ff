// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proxyfetch::{BodyVariant, Error, HttpClient, RedirectPolicy, RequestOptions};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_json_with_token_cookies_and_query() {
    let server = MockServer::start().await;
    let host = server.address().to_string();

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer secret"))
        .and(header("cookie", "sid=abc; lang=fi"))
        .and(header("host", host.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=def; Path=/")
                .set_body_raw(r#"{"items":[1,2,3]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let resp = client
        .get(
            format!("{}/api/items", server.uri()),
            RequestOptions::new()
                .query("page", "2")
                .token("secret")
                .cookie("sid", "abc")
                .cookie("lang", "fi"),
        )
        .await
        .unwrap();

    assert!(resp.ok);
    assert_eq!(resp.cookies.get("sid").map(String::as_str), Some("def"));
    let supports = resp.supports();
    assert!(supports.json && supports.text && !supports.dom && !supports.binary);

    let first = resp.json().unwrap().unwrap();
    assert_eq!(first, serde_json::json!({"items": [1, 2, 3]}));
    assert_eq!(resp.json().unwrap().unwrap(), first);
}

#[tokio::test]
async fn get_html_exposes_dom() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Hi</title></head><body><p id='m'>Moi maailma</p></body></html>",
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let resp = HttpClient::new()
        .unwrap()
        .get(format!("{}/page", server.uri()), RequestOptions::new())
        .await
        .unwrap();

    assert!(resp.supports().dom);
    assert!(resp.json().is_none());
    assert!(resp.binary().is_none());

    let doc = resp.dom().unwrap().unwrap();
    assert_eq!(doc.title().as_deref(), Some("Hi"));
    assert_eq!(doc.get_element_by_id("m").unwrap().text_content(), "Moi maailma");
    assert_eq!(doc.text_content(), "HiMoi maailma");
}

#[tokio::test]
async fn get_binary_body() {
    let server = MockServer::start().await;
    let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    let resp = HttpClient::new()
        .unwrap()
        .get(server.uri(), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(resp.binary().unwrap().as_ref(), png.as_slice());
    assert!(resp.supports().text);
    assert!(resp.dom().is_none());
}

#[tokio::test]
async fn post_sends_variant_headers_and_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("content-length", "12"))
        .and(body_string("name=a+b&x=1"))
        .respond_with(ResponseTemplate::new(201).set_body_raw("created", "text/plain"))
        .mount(&server)
        .await;

    let resp = HttpClient::new()
        .unwrap()
        .post(
            format!("{}/submit", server.uri()),
            RequestOptions::new().body(BodyVariant::form("name=a+b&x=1")),
        )
        .await
        .unwrap();

    assert_eq!(resp.status, 201);
    assert!(!resp.ok);
    assert_eq!(resp.text().as_deref(), Some("created"));
}

#[tokio::test]
async fn post_without_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = HttpClient::new()
        .unwrap()
        .post(server.uri(), RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingBody));
    assert_eq!(err.status(), 400);
}

#[tokio::test]
async fn head_returns_headers_only() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "a=1"))
        .mount(&server)
        .await;

    let resp = HttpClient::new()
        .unwrap()
        .head(server.uri(), RequestOptions::new())
        .await
        .unwrap();

    assert!(resp.ok);
    assert_eq!(resp.cookies.get("a").map(String::as_str), Some("1"));
    assert!(resp.body().is_none());
}

#[tokio::test]
async fn redirect_policy_none_returns_3xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&server)
        .await;

    let resp = HttpClient::new()
        .unwrap()
        .get(
            format!("{}/old", server.uri()),
            RequestOptions::new().redirect(RedirectPolicy::None),
        )
        .await
        .unwrap();

    assert_eq!(resp.status, 302);
    assert!(!resp.ok);
}

#[tokio::test]
async fn timeout_is_a_typed_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = HttpClient::new()
        .unwrap()
        .get(
            server.uri(),
            RequestOptions::new().timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(matches!(err, Error::Timeout { duration_ms: 100, .. }));
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    let err = HttpClient::new()
        .unwrap()
        .get("http://127.0.0.1:1/", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn http_proxy_receives_proxy_authorization() {
    let proxy = MockServer::start().await;
    let token = format!("Basic {}", STANDARD.encode("user:pass"));

    Mock::given(method("GET"))
        .and(path("/via-proxy"))
        .and(header("proxy-authorization", token.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_raw("proxied", "text/plain"))
        .expect(1)
        .mount(&proxy)
        .await;

    let proxy_url = format!("http://user:pass@{}", proxy.address());
    let resp = HttpClient::new()
        .unwrap()
        .get(
            "http://destination.invalid/via-proxy",
            RequestOptions::new().proxy(proxy_url),
        )
        .await
        .unwrap();

    assert!(resp.ok);
    assert_eq!(resp.text().as_deref(), Some("proxied"));
}

#[tokio::test]
async fn malformed_proxy_is_rejected() {
    let err = HttpClient::new()
        .unwrap()
        .get(
            "http://example.com/",
            RequestOptions::new().proxy("gopher://proxy:70"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidProxyUrl(_)));
}
