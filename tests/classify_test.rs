//! Content-type probing over HTTP

use serpsheet::classify::{LinkKind, classify};
use serpsheet::http::build_client;
use std::time::Duration;

#[tokio::test]
async fn test_pdf_and_html_routes() {
    let mut server = mockito::Server::new_async().await;
    let _pdf = server
        .mock("GET", "/doc")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.5")
        .create_async()
        .await;
    let _html = server
        .mock("GET", "/page")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body("<html></html>")
        .create_async()
        .await;

    let client = build_client(Duration::from_secs(5)).unwrap();

    let pdf = classify(&client, &format!("{}/doc", server.url())).await.unwrap();
    assert_eq!(pdf, LinkKind::Pdf);

    let page = classify(&client, &format!("{}/page", server.url())).await.unwrap();
    assert_eq!(page, LinkKind::Page);
}

#[tokio::test]
async fn test_error_status_still_classifies() {
    let mut server = mockito::Server::new_async().await;
    let _gone = server
        .mock("GET", "/gone")
        .with_status(404)
        .with_header("content-type", "text/html")
        .create_async()
        .await;

    let client = build_client(Duration::from_secs(5)).unwrap();
    let kind = classify(&client, &format!("{}/gone", server.url())).await.unwrap();
    assert_eq!(kind, LinkKind::Page);
}

#[tokio::test]
async fn test_connection_failure_is_an_error() {
    let client = build_client(Duration::from_secs(5)).unwrap();
    let result = classify(&client, "http://127.0.0.1:1/nothing").await;
    assert!(result.is_err());
}
