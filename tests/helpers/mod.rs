//! Shared test fixtures: in-memory mailers and request helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Method, header},
    response::Response,
};
use folio_contact::{Ack, Envelope, Mailer, OutgoingEmail, SendError};
use http_body_util::BodyExt;

/// Accepts every message and keeps a copy
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<Ack, SendError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(email);

        Ok(Ack {
            id: Some(format!("msg_{}", sent.len())),
        })
    }
}

/// Fails every send like an unreachable provider
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<Ack, SendError> {
        Err(SendError::Transport("connection refused".to_string()))
    }
}

pub fn envelope() -> Envelope {
    Envelope {
        from: "Portfolio <hello@example.com>".to_string(),
        to: "owner@example.com".to_string(),
    }
}

pub fn app_with(mailer: Arc<dyn Mailer>) -> Router {
    folio::create_app(mailer, envelope())
}

pub fn contact_request(body: impl Into<Body>) -> Request {
    Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    format!("http://{addr}")
}
