#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{extract::Path, http::StatusCode, routing::get, Router};

/// A stand-in for the ESP32: serves `/led/:color/:command`, answers every
/// request with `status` after `delay`, and remembers each path it saw.
pub struct FakeEsp32 {
    pub addr: SocketAddr,
    pub hits: Arc<Mutex<Vec<String>>>,
}

impl FakeEsp32 {
    pub async fn start(status: StatusCode, delay: Duration) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));

        let recorded = hits.clone();
        let app = Router::new().route(
            "/led/:color/:command",
            get(move |Path((color, command)): Path<(String, String)>| {
                let recorded = recorded.clone();
                async move {
                    recorded
                        .lock()
                        .unwrap()
                        .push(format!("/led/{}/{}", color, command));
                    tokio::time::sleep(delay).await;
                    status
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, hits }
    }

    pub async fn ok() -> Self {
        Self::start(StatusCode::OK, Duration::ZERO).await
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

/// An address where nothing is listening.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
