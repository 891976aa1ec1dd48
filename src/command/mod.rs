// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    error::{Error, Result},
    model::Envelope,
    password::Prompt,
    session::{Outcome, Store},
};

pub(crate) mod auth;
pub(crate) mod captcha;
pub(crate) mod hall;
pub(crate) mod movie;
pub(crate) mod reservation;
pub(crate) mod showtime;

/// Everything a command needs to talk to the service.
pub(crate) struct Context {
    pub(crate) store: Store,
    pub(crate) prompt: Box<dyn Prompt>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, cx: &Context) -> Result<()>;
}

fn print_table<I: IntoIterator<Item = T>, T: Tabled>(rows: I) {
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_some() {
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
}

/// Prints what the server said about a change it made.
fn print_reply(envelope: Envelope<Value>, fallback: &str) {
    match envelope {
        Envelope {
            data: Some(Value::String(text)),
            ..
        } if !text.is_empty() => println!("{text}"),
        Envelope {
            message: Some(message),
            ..
        } if !message.is_empty() => println!("{message}"),
        _ => println!("{fallback}"),
    }
}

/// Prints the outcome of a session operation, turning a failure into an
/// error so the process exits unsuccessfully.
fn finish<T>(outcome: Outcome<T>) -> Result<Option<T>> {
    if outcome.success {
        println!("{}", outcome.message);
        Ok(outcome.data)
    } else {
        Err(Error::Rejected(outcome.message))
    }
}
