// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod file;
#[cfg(feature = "keychain")]
mod keychain;
mod memory;
#[cfg(feature = "secret-service")]
mod secret_service;

use async_trait::async_trait;

use crate::error::Result;

pub(crate) use file::File;
#[cfg(feature = "keychain")]
pub(crate) use keychain::Keychain;
pub(crate) use memory::Memory;
#[cfg(feature = "secret-service")]
pub(crate) use secret_service::SecretService;

/// Key under which the durable user snapshot is kept.
pub(crate) const USER_KEY: &str = "user";
/// Key under which a bearer token is kept.
pub(crate) const TOKEN_KEY: &str = "token";
/// Key under which the transport's cookie header is kept.
pub(crate) const COOKIES_KEY: &str = "cookies";

/// A single key-value slot. Each instance is bound to one key when it is
/// constructed; `get`, `set` and `remove` then operate on that key only.
///
/// Removing a value that is not present is not an error.
#[async_trait]
pub(crate) trait Storage<T>: Send + Sync {
    async fn get(&mut self) -> Result<Option<T>>;
    async fn set(&mut self, data: &T) -> Result<()>;
    async fn remove(&mut self) -> Result<()>;
}

#[async_trait]
impl<Tn: Sync, T: Storage<Tn> + ?Sized> Storage<Tn> for Box<T> {
    async fn get(&mut self) -> Result<Option<Tn>> {
        (**self).get().await
    }

    async fn set(&mut self, data: &Tn) -> Result<()> {
        (**self).set(data).await
    }

    async fn remove(&mut self) -> Result<()> {
        (**self).remove().await
    }
}
