//! Scripted transport for unit tests.

use crate::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type Reply = Result<HttpResponse, TransportError>;

#[derive(Default)]
struct Inner {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
    gated: bool,
    entered: Notify,
    release: Notify,
    waiting: AtomicUsize,
}

/// Replays queued replies in order and records every request it sees.
///
/// An exhausted queue answers `200 {}`. A gated transport parks each request
/// until [`MockTransport::release`] is called.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            inner: Arc::new(Inner {
                gated: true,
                ..Inner::default()
            }),
        }
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(HttpResponse::new(status, body.to_string())))
    }

    pub fn reply_text(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    pub fn fail(&self, reason: &str) -> &Self {
        self.push(Err(TransportError::Network(reason.to_string())))
    }

    /// Queue a `200` listing built from `(entry_id, data)` pairs.
    pub fn listing(&self, rows: &[(&str, Value)]) -> &Self {
        let data: Vec<Value> = rows
            .iter()
            .map(|(id, data)| json!({"entry_id": id, "data": data}))
            .collect();
        self.reply(200, json!({ "data": data }))
    }

    fn push(&self, reply: Reply) -> &Self {
        self.inner.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    /// Wait until a request is parked at the gate.
    pub async fn entered(&self) {
        self.inner.entered.notified().await;
    }

    /// Let one parked request through.
    pub fn release(&self) {
        self.inner.release.notify_one();
    }

    /// Requests currently parked at the gate.
    pub fn waiting(&self) -> usize {
        self.inner.waiting.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.inner.requests.lock().unwrap().push(request);

        if self.inner.gated {
            self.inner.waiting.fetch_add(1, Ordering::SeqCst);
            self.inner.entered.notify_one();
            self.inner.release.notified().await;
            self.inner.waiting.fetch_sub(1, Ordering::SeqCst);
        }

        let reply = self.inner.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}
