// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use async_trait::async_trait;
use futures_util::lock::Mutex;
use log::{debug, warn};
use reqwest::{
    cookie::{CookieStore, Jar},
    header::HeaderValue,
};
use url::Url;

use crate::{error::Result, metadata, storage::Storage};

use super::{Config, Error, Request, Response};

/// Moves requests over the wire.
#[async_trait]
pub(crate) trait Transport: Send + Sync {
    async fn send(&self, req: Request) -> Result<Response, Error>;
}

/// The session cookie jar for cookie-based authentication. Its contents for
/// the base URL are saved after every response so that the next process can
/// pick the session back up.
///
/// Only the `name=value` pairs are saved. A restored cookie therefore has no
/// expiry on our side; it lasts until the session ends, at which point
/// [`Cookies::clear`] drops it from memory and storage.
pub(crate) struct Cookies {
    jar: RwLock<Jar>,
    url: Url,
    storage: Mutex<Box<dyn Storage<String>>>,
}

impl Cookies {
    pub(crate) async fn load(url: Url, mut storage: Box<dyn Storage<String>>) -> Self {
        let jar = Jar::default();
        match storage.get().await {
            Ok(Some(header)) => {
                for cookie in header.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                    jar.add_cookie_str(cookie, &url);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("We could not restore saved cookies: {}", e),
        }
        Self {
            jar: RwLock::new(jar),
            url,
            storage: Mutex::new(storage),
        }
    }

    fn jar(&self) -> RwLockReadGuard<'_, Jar> {
        self.jar.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn header(&self) -> Option<String> {
        self.jar()
            .cookies(&self.url)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }

    async fn save(&self) -> Result<()> {
        let header = self.header();
        let mut storage = self.storage.lock().await;
        match header {
            Some(header) => storage.set(&header).await,
            None => storage.remove().await,
        }
    }

    /// Forgets every cookie, both in the jar and in storage.
    pub(crate) async fn clear(&self) -> Result<()> {
        *self.jar.write().unwrap_or_else(PoisonError::into_inner) = Jar::default();
        self.storage.lock().await.remove().await
    }
}

impl CookieStore for Cookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar().cookies(url)
    }
}

pub(crate) struct Reqwest {
    client: reqwest::Client,
    cookies: Option<Arc<Cookies>>,
}

impl Reqwest {
    /// Builds the transport. `cookies` backs the client's cookie jar unless
    /// the configuration leaves credentials out.
    pub(crate) fn new(config: &Config, cookies: Option<Arc<Cookies>>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(metadata::USER_AGENT.as_str());

        let cookies = cookies.filter(|_| config.include_credentials());
        if let Some(ref cookies) = cookies {
            builder = builder.cookie_provider(Arc::clone(cookies));
        }

        Ok(Self {
            client: builder.build().map_err(Error::network)?,
            cookies,
        })
    }
}

#[async_trait]
impl Transport for Reqwest {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let (method, url, headers, body) = req.into_parts();

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let res = builder.send().await.map_err(Error::network)?;
        let status = res.status();
        let headers = res.headers().clone();
        let body = res.bytes().await.map_err(Error::network)?;

        if let Some(cookies) = &self.cookies {
            if let Err(e) = cookies.save().await {
                warn!("We could not save the session cookie: {}", e);
            } else {
                debug!("Saved session cookies for {}", cookies.url);
            }
        }

        Ok(Response::new(status, body.to_vec()).with_headers(headers))
    }
}
