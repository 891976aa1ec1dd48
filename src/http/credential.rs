// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use async_trait::async_trait;
use clap::ValueEnum;
use futures_util::lock::Mutex;
use reqwest::header::{self, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::{error::Result, storage::Storage};

use super::{Error, Interceptor, Request, Response};

/// How the server learns who is making a request. A deployment uses exactly
/// one of these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum AuthStrategy {
    /// The client holds a token and sends it in the `Authorization` header.
    Bearer,
    /// The server sets a session cookie and the transport sends it back.
    Cookie,
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_possible_value().ok_or(fmt::Error)?;
        f.write_str(value.get_name())
    }
}

#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub(crate) struct Token(SecretString);

impl Token {
    pub(crate) fn new(value: String) -> Self {
        Self(SecretString::new(value))
    }

    /// Reads a token out of an `Authorization: Bearer ...` header.
    pub(crate) fn from_authorization(res: &Response) -> Option<Self> {
        res.headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self::new(value.to_owned()))
    }

    fn header_value(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0.expose_secret()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.expose_secret())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

/// Holds the bearer token and attaches it to outgoing requests.
pub(crate) struct Bearer {
    storage: Mutex<Box<dyn Storage<Token>>>,
}

impl Bearer {
    pub(crate) fn new(storage: Box<dyn Storage<Token>>) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    pub(crate) async fn token(&self) -> Result<Option<Token>> {
        self.storage.lock().await.get().await
    }

    pub(crate) async fn set(&self, token: &Token) -> Result<()> {
        self.storage.lock().await.set(token).await
    }

    pub(crate) async fn clear(&self) -> Result<()> {
        self.storage.lock().await.remove().await
    }
}

#[async_trait]
impl Interceptor for Bearer {
    fn injects_credentials(&self) -> bool {
        true
    }

    async fn before(&self, req: &mut Request) -> Result<()> {
        if let Some(token) = self.token().await? {
            let _ = req
                .headers_mut()
                .insert(header::AUTHORIZATION, token.header_value()?);
        }
        Ok(())
    }
}
