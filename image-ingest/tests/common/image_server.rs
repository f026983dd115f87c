use std::net::SocketAddr;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

/// Local HTTP server standing in for the image host
///
/// `/images/{name}` answers with the configured payload, every other path
/// answers 404 with a short text body.
pub struct ImageServer {
    addr: SocketAddr,
}

impl ImageServer {
    pub async fn start(payload: Vec<u8>) -> Self {
        let router = Router::new()
            .route(
                "/images/{name}",
                get(move || {
                    let payload = payload.clone();
                    async move { payload }
                }),
            )
            .fallback(|| async { (StatusCode::NOT_FOUND, "not found") });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind image server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Image server failed");
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}
