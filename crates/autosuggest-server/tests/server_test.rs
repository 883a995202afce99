use autosuggest_server::{Catalog, SuggestionServer};
use serde_json::{json, Value};
use std::io::Write;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn start(catalog: Catalog) -> SocketAddr {
    let server = SuggestionServer::bind("127.0.0.1:0", catalog).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.serve());
    addr
}

/// Send a raw request and return (status, headers, body).
async fn send(addr: SocketAddr, request: &str) -> (u16, String, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    (status, head.to_string(), body.to_string())
}

async fn get(addr: SocketAddr, target: &str) -> (u16, String, Value) {
    let (status, head, body) = send(addr, &format!("GET {} HTTP/1.1\r\nHost: test\r\n\r\n", target)).await;
    (status, head, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_query_filters_countries() {
    let addr = start(Catalog::countries()).await;
    let (status, head, body) = get(addr, "/suggestions?query=Bos").await;
    assert_eq!(status, 200);
    assert!(head.contains("Access-Control-Allow-Origin: *"));
    assert_eq!(
        body,
        json!({"suggestions": [{"value": "Bosnia and Herzegovina", "data": "BA"}]})
    );
}

#[tokio::test]
async fn test_absent_query_returns_all() {
    let catalog = Catalog::countries();
    let total = catalog.len();
    let addr = start(catalog).await;
    let (_, _, body) = get(addr, "/countries").await;
    let all = body["suggestions"].as_array().unwrap();
    assert_eq!(all.len(), total);
    assert_eq!(all[0]["value"], "Afghanistan");
}

#[tokio::test]
async fn test_encoded_query() {
    let addr = start(Catalog::countries()).await;
    let (_, _, body) = get(addr, "/suggestions?query=United%20K").await;
    assert_eq!(body["suggestions"][0]["data"], "GB");
}

#[tokio::test]
async fn test_unknown_path_and_method() {
    let addr = start(Catalog::countries()).await;
    let (status, _, body) = get(addr, "/missing").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not found");

    let (status, head, _) = send(addr, "DELETE /suggestions HTTP/1.1\r\n\r\n").await;
    assert_eq!(status, 405);
    assert!(head.contains("Allow: GET, OPTIONS"));

    let (status, _, body) = send(addr, "OPTIONS /suggestions HTTP/1.1\r\n\r\n").await;
    assert_eq!(status, 204);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_bad_request_line() {
    let addr = start(Catalog::countries()).await;
    let (status, _, _) = send(addr, "nonsense\r\n\r\n").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_catalog_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"rs": "Rust", "rb": "Ruby", "py": "Python"}}"#).unwrap();
    let catalog = Catalog::from_json_file(file.path()).unwrap();
    let addr = start(catalog).await;

    let (_, _, body) = get(addr, "/suggestions?query=R").await;
    assert_eq!(
        body,
        json!({"suggestions": [{"value": "Rust", "data": "rs"}, {"value": "Ruby", "data": "rb"}]})
    );
}

#[tokio::test]
async fn test_server_survives_dropped_connection() {
    let addr = start(Catalog::countries()).await;
    drop(TcpStream::connect(addr).await.unwrap());
    let (status, _, _) = get(addr, "/suggestions?query=Peru").await;
    assert_eq!(status, 200);
}
