//! Shared harness: serves the router on an ephemeral port for the test's lifetime.

#![allow(dead_code)]

use tokio::net::TcpListener;
use ucanai_pilot::{create_router, AppConfig};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    server_handle: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(AppConfig::default()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let port = listener.local_addr().expect("No local address").port();

        let app = create_router(&config);
        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            server_handle,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
