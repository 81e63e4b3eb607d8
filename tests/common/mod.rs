//! Shared utilities for integration tests.

use std::net::SocketAddr;

use response_helper::{HttpServer, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A demo server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve the demo routes in the background.
    pub async fn start() -> Self {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();

        let listener = TcpListener::bind(&config.listener.bind_address)
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = HttpServer::new(config);
        let handle = tokio::spawn(server.run_until(listener, async {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

/// A client that never reuses connections, so shutdown is not held open.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
