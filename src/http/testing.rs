// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! A scripted transport for exercising the adapter and everything above it
//! without a server.

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{Error, Request, Response, Transport};

enum Reply {
    Respond(Response),
    Unreachable,
}

/// Answers requests in order from a script and records what was sent. Once
/// the script runs out every request fails as unreachable.
#[derive(Default)]
pub(crate) struct Fake {
    script: Mutex<VecDeque<Reply>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Fake {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn respond(self, status: u16, body: Value) -> Self {
        self.respond_with(status, body, HeaderMap::new())
    }

    #[must_use]
    pub(crate) fn respond_with(self, status: u16, body: Value, headers: HeaderMap) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = if body.is_null() {
            Vec::new()
        } else {
            body.to_string().into_bytes()
        };
        self.push(Reply::Respond(
            Response::new(status, body).with_headers(headers),
        ))
    }

    #[must_use]
    pub(crate) fn unreachable(self) -> Self {
        self.push(Reply::Unreachable)
    }

    fn push(mut self, reply: Reply) -> Self {
        self.script.get_mut().push_back(reply);
        self
    }

    /// A handle on the requests sent so far.
    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<Request>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl Transport for Fake {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        self.requests.lock().await.push(req);
        match self.script.lock().await.pop_front() {
            Some(Reply::Respond(res)) => Ok(res),
            Some(Reply::Unreachable) | None => Err(Error::network("connection refused")),
        }
    }
}
