// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{ffi::OsString, path::Path};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::task;

use crate::{
    error::{self, Result},
    metadata,
};

/// What to ask the user for.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    label: String,
    description: String,
}

pub(crate) struct RequestBuilder {
    label: String,
    description: String,
}

impl RequestBuilder {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            description: String::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            label: self.label,
            description: self.description,
        }
    }
}

impl Request {
    /// The password of the account `username`.
    pub(crate) fn account(username: &str) -> Self {
        RequestBuilder::new("Password")
            .with_description(&format!("Enter the password for {username}."))
            .into_request()
    }

    /// The shared secret the server asks for before it creates an admin.
    pub(crate) fn admin_role() -> Self {
        RequestBuilder::new("Admin role password")
            .with_description("Creating an administrator requires the admin role password.")
            .into_request()
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;

    /// Like [`Prompt::prompt`], but giving up is an error.
    async fn require(&self, req: Request) -> Result<SecretString> {
        self.prompt(req)
            .await?
            .ok_or_else(|| error::Password::NoPrompt.into())
    }
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

pub(crate) struct PinentryPrompt {
    executable: Option<OsString>,
}

impl PinentryPrompt {
    pub(crate) const fn new() -> Self {
        Self { executable: None }
    }

    pub(crate) fn new_with_executable<P: AsRef<Path>>(executable: P) -> Self {
        Self {
            executable: Some(executable.as_ref().as_os_str().into()),
        }
    }
}

#[async_trait]
impl Prompt for PinentryPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        fn interact<'input>(
            mut input: pinentry::PassphraseInput<'input>,
            title: &'input str,
            req: &'input Request,
        ) -> Result<SecretString> {
            _ = input.required("You must enter a value to continue.");
            _ = input.with_title(title);
            _ = input.with_description(&req.description);
            _ = input.with_prompt(&req.label);

            Ok(input.interact()?)
        }

        let title = format!("{} - {}", req.label, *metadata::CLIENT_DISPLAY_NAME);

        let input = self
            .executable
            .as_ref()
            .and_then(pinentry::PassphraseInput::with_binary)
            .or_else(pinentry::PassphraseInput::with_default_binary)
            .map(|input| task::spawn_blocking(move || interact(input, &title, &req)));

        Ok(match input {
            Some(fut) => Some(fut.await??),
            None => None,
        })
    }
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        if !req.description.is_empty() {
            eprintln!("{}", req.description);
        }

        Ok(Some(
            task::spawn_blocking(move || {
                rpassword::prompt_password(format!("{}: ", req.label)).map(SecretString::new)
            })
            .await??,
        ))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use crate::error::Error;

    use super::*;

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl Prompt for Fixed {
        async fn prompt(&self, _req: Request) -> Result<Option<SecretString>> {
            Ok(self.0.map(|value| SecretString::new(value.to_owned())))
        }
    }

    #[tokio::test]
    async fn first_prompt_with_an_answer_wins() -> Result<()> {
        let prompts = vec![Fixed(None), Fixed(Some("pw1")), Fixed(Some("pw2"))];

        let answer = prompts.require(Request::account("alice")).await?;

        assert_eq!(answer.expose_secret(), "pw1");
        Ok(())
    }

    #[tokio::test]
    async fn no_answer_is_an_error_when_required() {
        let prompts = vec![Fixed(None)];

        let result = prompts.require(Request::admin_role()).await;

        assert!(matches!(
            result,
            Err(Error::Password(error::Password::NoPrompt))
        ));
    }
}
