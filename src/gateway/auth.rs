// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    http::{Method, Token},
    model::{Role, UserSummary},
};

use super::Executor;

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
pub(crate) struct Register {
    pub(crate) username: String,
    #[serde(serialize_with = "super::expose")]
    pub(crate) password: SecretString,
    pub(crate) user_role: Role,
    /// Captcha key proving a solved challenge.
    pub(crate) key: Option<String>,
    #[serde(serialize_with = "super::expose_optional")]
    pub(crate) admin_role_password: Option<SecretString>,
}

impl Executor for Register {
    type Response = Value;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/users/register".to_owned()
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
pub(crate) struct Login {
    pub(crate) username: String,
    #[serde(serialize_with = "super::expose")]
    pub(crate) password: SecretString,
    pub(crate) key: Option<String>,
}

/// What the server says about the user who just logged in. Servers using
/// bearer authentication also hand out the token here.
#[derive(Debug, Deserialize)]
pub(crate) struct Identity {
    #[serde(flatten)]
    pub(crate) user: UserSummary,
    pub(crate) token: Option<Token>,
}

impl Executor for Login {
    type Response = Identity;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/users/login".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Logout;

impl Executor for Logout {
    type Response = Value;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/users/logout".to_owned()
    }
}
