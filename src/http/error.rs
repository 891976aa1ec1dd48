// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error as StdError, fmt};

use reqwest::{header::InvalidHeaderValue, StatusCode};
use serde_json::Value;
use thiserror::Error;

use super::Response;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("could not reach the server: {0}")]
    Network(Box<dyn StdError + Send + Sync>),
    #[error("not authenticated: {0}")]
    Auth(Failure),
    #[error("request rejected: {0}")]
    Validation(Failure),
    #[error("server error: {0}")]
    Server(Failure),
    #[error("unexpected response: {0}")]
    Unexpected(Failure),
    #[error("response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request path: {0}")]
    Path(#[from] url::ParseError),
    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl Error {
    pub(crate) fn network<E: Into<Box<dyn StdError + Send + Sync>>>(source: E) -> Self {
        Self::Network(source.into())
    }

    /// Sorts a response into success or one of the failure classes.
    pub(crate) fn check(response: Response) -> Result<Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let failure = Failure {
            status,
            body: response.payload(),
        };
        Err(if status == StatusCode::UNAUTHORIZED {
            Self::Auth(failure)
        } else if status.is_client_error() {
            Self::Validation(failure)
        } else if status.is_server_error() {
            Self::Server(failure)
        } else {
            Self::Unexpected(failure)
        })
    }

    /// The response that caused this error, if the server answered at all.
    pub(crate) const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Auth(failure)
            | Self::Validation(failure)
            | Self::Server(failure)
            | Self::Unexpected(failure) => Some(failure),
            Self::Network(_) | Self::Decode(_) | Self::Path(_) | Self::Header(_) => None,
        }
    }
}

/// A non-successful response, kept so callers can explain what went wrong.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Failure {
    status: StatusCode,
    body: Option<Value>,
}

impl Failure {
    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// Parsed JSON body, or the raw text as a JSON string if it was not JSON.
    pub(crate) const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The `message` field of a JSON object body.
    pub(crate) fn message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(message) = self.message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}
