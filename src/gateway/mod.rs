// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! One request type per remote action. Each type knows its method, path and
//! response shape; its serialized fields are the request body.

pub(crate) mod auth;
pub(crate) mod captcha;
pub(crate) mod hall;
pub(crate) mod movie;
pub(crate) mod reservation;
pub(crate) mod showtime;

use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Serialize, Serializer};
use serde_json::Value;

use crate::{
    http::{self, Adapter, Method},
    model::Envelope,
};

#[async_trait]
pub(crate) trait Executor: Serialize + Send + Sync + Sized {
    type Response: DeserializeOwned;

    const METHOD: Method;

    fn path(&self) -> String;

    fn body(&self) -> Result<Option<Value>, http::Error> {
        if Self::METHOD == Method::GET || Self::METHOD == Method::DELETE {
            return Ok(None);
        }
        Ok(Some(serde_json::to_value(self)?).filter(|body| !body.is_null()))
    }

    /// Sends the request and hands back the raw response.
    async fn send(self, adapter: &Adapter) -> Result<http::Response, http::Error> {
        let path = self.path();
        let body = self.body()?;
        if Self::METHOD == Method::GET {
            adapter.get(&path).await
        } else if Self::METHOD == Method::POST {
            adapter.post(&path, body).await
        } else if Self::METHOD == Method::PUT {
            adapter.put(&path, body).await
        } else if Self::METHOD == Method::DELETE {
            adapter.delete(&path).await
        } else {
            adapter.send(Self::METHOD, &path, body).await
        }
    }

    async fn execute(self, adapter: &Adapter) -> Result<Envelope<Self::Response>, http::Error> {
        self.send(adapter).await?.envelope()
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn expose_optional<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        error::Result,
        http::{testing::Fake, Config},
    };

    use super::*;

    #[derive(Serialize)]
    struct Rename {
        name: String,
    }

    impl Executor for Rename {
        type Response = Value;

        const METHOD: Method = Method::PATCH;

        fn path(&self) -> String {
            "/halls/4".to_owned()
        }
    }

    #[tokio::test]
    async fn every_method_reaches_the_adapter() -> Result<()> {
        let fake = Fake::new()
            .respond(200, json!({"data": []}))
            .respond(200, json!({"data": "ok"}));
        let requests = fake.requests();
        let adapter = Adapter::new(Config::new(url::Url::parse("http://cinema.test/api/")?), fake);

        let _ = hall::GetHalls.execute(&adapter).await?;
        let _ = Rename {
            name: "Annex".to_owned(),
        }
        .execute(&adapter)
        .await?;

        let sent = requests.lock().await;
        assert_eq!(sent[0].method(), &Method::GET);
        assert_eq!(sent[0].body(), None);
        assert_eq!(sent[1].method(), &Method::PATCH);
        assert_eq!(sent[1].url().path(), "/api/halls/4");
        assert_eq!(sent[1].body(), Some(&json!({"name": "Annex"})));
        Ok(())
    }
}
