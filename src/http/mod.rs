// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The HTTP client adapter.
//!
//! Every request goes through the same steps: the path is joined to the
//! configured base URL, default headers are applied, each interceptor's
//! pre-request hook runs, the transport sends the request, each interceptor's
//! post-response hook sees the response, and finally the status is classified.
//! Interceptors never change the outcome of a request; a 401 is reported to
//! the caller even after the session has been invalidated because of it.

mod credential;
mod error;
mod pipeline;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

use std::sync::Arc;

use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::model::Envelope;

pub(crate) use credential::{AuthStrategy, Bearer, Token};
pub(crate) use error::Error;
pub(crate) use pipeline::{Interceptor, Pipeline};
pub(crate) use reqwest::{Method, StatusCode};
pub(crate) use transport::{Cookies, Reqwest, Transport};

pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/";

#[derive(Clone, Debug)]
pub(crate) struct Config {
    base_url: Url,
    content_type: HeaderValue,
    include_credentials: bool,
}

impl Config {
    pub(crate) fn new(mut base_url: Url) -> Self {
        // Without the trailing slash, joining would replace the last segment
        // of the base path instead of appending to it.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            content_type: HeaderValue::from_static("application/json"),
            include_credentials: true,
        }
    }

    #[must_use]
    pub(crate) fn with_content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = content_type;
        self
    }

    #[must_use]
    pub(crate) const fn with_credentials(mut self, include_credentials: bool) -> Self {
        self.include_credentials = include_credentials;
        self
    }

    pub(crate) const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) const fn include_credentials(&self) -> bool {
        self.include_credentials
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Value>,
}

impl Request {
    pub(crate) fn new(method: Method, url: Url, body: Option<Value>) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body,
        }
    }

    pub(crate) const fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) const fn url(&self) -> &Url {
        &self.url
    }

    #[cfg(test)]
    pub(crate) const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    #[cfg(test)]
    pub(crate) const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Method, Url, HeaderMap, Option<Value>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    pub(crate) fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    #[must_use]
    pub(crate) fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// The body as JSON, falling back to the raw text as a JSON string.
    pub(crate) fn payload(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        Some(serde_json::from_slice(&self.body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&self.body).into_owned())
        }))
    }

    pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decodes the standard reply envelope. An empty body is an empty
    /// envelope.
    pub(crate) fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>, Error> {
        if self.is_empty() {
            return Ok(Envelope::default());
        }
        self.json()
    }
}

pub(crate) struct Adapter {
    config: Config,
    transport: Box<dyn Transport>,
    pipeline: Pipeline,
}

impl Adapter {
    pub(crate) fn new<T: Transport + 'static>(config: Config, transport: T) -> Self {
        Self {
            config,
            transport: Box::new(transport),
            pipeline: Pipeline::default(),
        }
    }

    #[must_use]
    pub(crate) fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.pipeline.push(interceptor);
        self
    }

    #[cfg(test)]
    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, Error> {
        let mut req = Request::new(method, self.config.endpoint(path)?, body);
        let headers = req.headers_mut();
        let _ = headers.insert(header::CONTENT_TYPE, self.config.content_type.clone());
        let _ = headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        self.pipeline
            .before(&mut req, self.config.include_credentials)
            .await;

        debug!("Sending {} {}", req.method(), req.url());
        let res = self.transport.send(req).await?;
        debug!("Received {}", res.status());

        self.pipeline.after(&res).await;
        Error::check(res)
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Response, Error> {
        self.send(Method::GET, path, None).await
    }

    pub(crate) async fn post(&self, path: &str, body: Option<Value>) -> Result<Response, Error> {
        self.send(Method::POST, path, body).await
    }

    pub(crate) async fn put(&self, path: &str, body: Option<Value>) -> Result<Response, Error> {
        self.send(Method::PUT, path, body).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.send(Method::DELETE, path, None).await
    }
}
