// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    error::Result,
    model::Role,
    password::{self, Prompt as _},
};

use super::{finish, print_table, Context};

/// Log in and remember the session for later commands.
#[derive(Debug, Parser)]
pub(crate) struct Login {
    username: String,

    /// The key of a solved captcha, if the server asks for one.
    #[arg(long)]
    captcha_key: Option<String>,
}

#[async_trait]
impl super::Command for Login {
    async fn execute(self, cx: &Context) -> Result<()> {
        let password = cx
            .prompt
            .require(password::Request::account(&self.username))
            .await?;

        let _ = finish(
            cx.store
                .login(&self.username, password, self.captcha_key)
                .await,
        )?;
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct Logout;

#[async_trait]
impl super::Command for Logout {
    async fn execute(self, cx: &Context) -> Result<()> {
        let _ = finish(cx.store.logout().await)?;
        Ok(())
    }
}

/// Create an account. This does not log in.
#[derive(Debug, Parser)]
pub(crate) struct Register {
    username: String,

    #[arg(long, value_enum, default_value_t = Role::User)]
    role: Role,

    /// The key of a solved captcha, if the server asks for one.
    #[arg(long)]
    captcha_key: Option<String>,
}

#[async_trait]
impl super::Command for Register {
    async fn execute(self, cx: &Context) -> Result<()> {
        let password = cx
            .prompt
            .require(password::Request::account(&self.username))
            .await?;
        let admin_role_password = if self.role == Role::Admin {
            Some(cx.prompt.require(password::Request::admin_role()).await?)
        } else {
            None
        };

        let _ = finish(
            cx.store
                .register(
                    &self.username,
                    password,
                    self.role,
                    self.captcha_key,
                    admin_role_password,
                )
                .await,
        )?;
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct Whoami;

#[async_trait]
impl super::Command for Whoami {
    async fn execute(self, cx: &Context) -> Result<()> {
        match cx.store.user().await {
            Some(user) => print_table([user]),
            None => println!("Not logged in"),
        }
        Ok(())
    }
}
