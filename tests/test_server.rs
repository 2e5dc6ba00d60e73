use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use breakwater::http::request::Method;
use breakwater::http::response::{Response, ResponseBuilder};
use breakwater::http::status::StatusCode;
use breakwater::server::{HttpProtocol, Protocol, Server};
use breakwater::site::Site;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn protocols() -> Vec<Arc<dyn Protocol>> {
    // Port 0: the OS picks a free port, recovered via local_addrs().
    vec![Arc::new(HttpProtocol::with_port(0))]
}

async fn start(site: Site) -> (Server, SocketAddr) {
    let mut server = Server::new(site, protocols(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    server.start().await.unwrap();
    let addr = server.local_addrs()[0];
    (server, addr)
}

async fn roundtrip(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

fn hello_site() -> Site {
    Site::builder()
        .route(&[Method::GET], "/", "hello")
        .handler("hello", |_req| Ok(Response::ok("Hello World!")))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_success_response() {
    let (mut server, addr) = start(hello_site()).await;

    let response = roundtrip(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {response}");
    assert!(response.contains("connection: close"));
    assert!(response.ends_with("Hello World!"));

    server.stop().await;
}

#[tokio::test]
async fn test_not_found_on_empty_site() {
    let site = Site::builder().build().unwrap();
    let (mut server, addr) = start(site).await;

    let response = roundtrip(addr, b"GET /missing HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_method_is_not_implemented() {
    let (mut server, addr) = start(hello_site()).await;

    let response = roundtrip(addr, b"FOO /x HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 501"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_request_line_is_bad_request() {
    let (mut server, addr) = start(hello_site()).await;

    let response = roundtrip(addr, b"GET /404\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 400"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_request_split_across_writes() {
    let (mut server, addr) = start(hello_site()).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    for piece in [
        b"GET / HT".as_slice(),
        b"TP/1.1\r\nHost: loc".as_slice(),
        b"alhost\r\n\r\n".as_slice(),
    ] {
        stream.write_all(piece).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response);

    assert!(response.starts_with("HTTP/1.1 200 OK"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_abrupt_close_leaves_server_alive() {
    let (mut server, addr) = start(hello_site()).await;

    // Peer sends a partial request and disconnects; no response expected.
    {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();
        stream.shutdown().await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        assert!(response.is_empty());
    }

    // The server still answers subsequent connections.
    let response = roundtrip(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 200 OK"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_path_params_reach_handler() {
    let site = Site::builder()
        .route(&[Method::GET], "/users/:id", "show_user")
        .handler("show_user", |req| {
            let id = req.path_param("id").unwrap_or("?");
            Ok(Response::ok(format!("user {id}")))
        })
        .build()
        .unwrap();
    let (mut server, addr) = start(site).await;

    let response = roundtrip(addr, b"GET /users/42 HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "got: {response}");
    assert!(response.ends_with("user 42"));

    server.stop().await;
}

#[tokio::test]
async fn test_stream_body_arrives_intact() {
    let payload = vec![b'x'; 50_000];
    let expected = payload.clone();
    let site = Site::builder()
        .route(&[Method::GET], "/big", "big")
        .handler("big", move |_req| {
            Ok(ResponseBuilder::new(StatusCode::Ok)
                .stream(std::io::Cursor::new(payload.clone()))
                .build())
        })
        .build()
        .unwrap();
    let (mut server, addr) = start(site).await;

    let response = roundtrip(addr, b"GET /big HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    assert!(head.starts_with("HTTP/1.1 200 OK"));
    // Stream bodies are close-delimited, not length-prefixed.
    assert!(!head.to_ascii_lowercase().contains("content-length"));
    assert_eq!(body.len(), expected.len());
    assert_eq!(body.as_bytes(), expected.as_slice());

    server.stop().await;
}

#[tokio::test]
async fn test_stop_refuses_new_connections() {
    let (mut server, addr) = start(hello_site()).await;
    server.stop().await;

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_start_twice_is_an_error() {
    let (mut server, _addr) = start(hello_site()).await;

    assert!(server.start().await.is_err());

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deploy_keeps_in_flight_request_consistent() {
    let old_site = Site::builder()
        .route(&[Method::GET], "/page", "page")
        .handler("page", |_req| {
            // Hold the in-flight request open across the deploy.
            std::thread::sleep(Duration::from_millis(300));
            Ok(Response::ok("old generation"))
        })
        .build()
        .unwrap();
    let new_site = Site::builder()
        .route(&[Method::GET], "/page", "page")
        .handler("page", |_req| Ok(Response::ok("new generation")))
        .build()
        .unwrap();

    let (mut server, addr) = start(old_site).await;

    let mut in_flight = TcpStream::connect(addr).await.unwrap();
    in_flight
        .write_all(b"GET /page HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    // Let the request be accepted and dispatched before deploying.
    tokio::time::sleep(Duration::from_millis(100)).await;

    server.deploy(new_site).await.unwrap();
    let new_addr = server.local_addrs()[0];

    // The in-flight request completes against the site it started with.
    let mut response = Vec::new();
    in_flight.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response);
    assert!(response.ends_with("old generation"), "got: {response}");

    // New connections see the new site.
    let response = roundtrip(new_addr, b"GET /page HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(response.ends_with("new generation"), "got: {response}");

    server.stop().await;
}
