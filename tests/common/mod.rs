//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use journeys::config::HttpConfig;
use journeys::id::UuidV4;
use journeys::routing::Router;
use journeys::{HttpServer, Shutdown};

/// A server running on an ephemeral local port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub shutdown: Arc<Shutdown>,
    pub handle: JoinHandle<std::io::Result<()>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// HTTP settings small enough to exercise the limits quickly.
pub fn test_http_config() -> HttpConfig {
    HttpConfig {
        max_body_bytes: 256,
        request_timeout_secs: 1,
        shutdown_grace_secs: 1,
    }
}

/// Start the full journeys application.
pub async fn spawn_app() -> TestApp {
    let shutdown = Arc::new(Shutdown::new());
    let routes = journeys::app::routes(shutdown.subscribe(), Arc::new(UuidV4)).unwrap();
    spawn_routes(routes, shutdown, test_http_config()).await
}

/// Start a server over an arbitrary route table.
pub async fn spawn_routes(routes: Router, shutdown: Arc<Shutdown>, http: HttpConfig) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(routes, &http, shutdown.subscribe());
    let handle = tokio::spawn(server.run(listener));

    TestApp {
        addr,
        shutdown,
        handle,
    }
}

/// A valid create-journey request body.
pub const JOURNEY: &str = r#"{"name":"Trip","tracking_enabled":true,"start_date":"2024-01-01T00:00:00Z","end_date":"2024-01-10T00:00:00Z"}"#;
