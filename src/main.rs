// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod command;
mod error;
mod gateway;
mod http;
mod metadata;
mod model;
mod password;
mod session;
mod storage;

use std::{path::PathBuf, process, sync::Arc};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{debug, error, info, warn};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    command::Context,
    http::AuthStrategy,
    session::{Credential, Store},
};

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::auth::Login),
    /// Log out and forget the saved session.
    Logout,
    Register(command::auth::Register),
    /// Show who is logged in.
    Whoami,
    /// Browse and manage movies.
    #[command(subcommand)]
    Movies(command::movie::Command),
    /// Browse and manage halls.
    #[command(subcommand)]
    Halls(command::hall::Command),
    /// Browse and manage showtimes.
    #[command(subcommand)]
    Showtimes(command::showtime::Command),
    /// Reserve tickets and manage your reservations.
    #[command(subcommand)]
    Reservations(command::reservation::Command),
    /// Solve the click captcha that guards login and registration.
    #[command(subcommand)]
    Captcha(command::captcha::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, cx: &Context) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(cx).await,
            Self::Logout => command::auth::Logout.execute(cx).await,
            Self::Register(cmd) => cmd.execute(cx).await,
            Self::Whoami => command::auth::Whoami.execute(cx).await,
            Self::Movies(cmd) => cmd.execute(cx).await,
            Self::Halls(cmd) => cmd.execute(cx).await,
            Self::Showtimes(cmd) => cmd.execute(cx).await,
            Self::Reservations(cmd) => cmd.execute(cx).await,
            Self::Captcha(cmd) => cmd.execute(cx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the cinema API. Request paths are resolved relative to
    /// it.
    #[arg(long, env = "BOXOFFICE_URL", default_value = http::DEFAULT_BASE_URL, value_parser = Url::parse)]
    url: Url,

    /// How the server authenticates requests once we have logged in.
    #[arg(long, env = "BOXOFFICE_AUTH_STRATEGY", value_enum, default_value_t = AuthStrategy::Cookie)]
    auth_strategy: AuthStrategy,

    /// The content type sent with every request.
    #[arg(long, env = "BOXOFFICE_CONTENT_TYPE", default_value = "application/json", value_parser = HeaderValue::from_str)]
    content_type: HeaderValue,

    /// Send requests without the saved credential, as if logged out.
    #[arg(long)]
    without_credentials: bool,

    /// Keep the session only for the duration of this command instead of
    /// saving it for later ones.
    #[arg(long)]
    no_persist_session: bool,

    /// The path to the Pinentry program to use when asking for passwords.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

/// Storage for a credential: the bearer token or the session cookies.
async fn get_credential_storage<
    T: Send + Serialize + Sync + for<'de> Deserialize<'de> + Clone + 'static,
>(
    args: &Args,
    key: &str,
) -> Box<dyn storage::Storage<T>> {
    if !args.no_persist_session {
        #[cfg(feature = "secret-service")]
        match storage::SecretService::new(&args.url, key).await {
            Ok(secret_service_storage) => return Box::new(secret_service_storage),
            Err(e) => {
                warn!("We need to fall back to unencrypted file storage because we can't connect to the secret service: {}", e);
            }
        }

        #[cfg(feature = "keychain")]
        match storage::Keychain::new(&args.url, key) {
            Ok(keychain_storage) => return Box::new(keychain_storage),
            Err(e) => {
                warn!("We need to fall back to unencrypted file storage because we can't connect to Keychain: {}", e);
            }
        }

        if let Some(file_storage) = storage::File::new(key) {
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::<T>::new())
}

/// Storage for the user snapshot. It holds nothing secret, so it always goes
/// to a plain file when persistence is on.
fn get_snapshot_storage<
    T: Send + Serialize + Sync + for<'de> Deserialize<'de> + Clone + 'static,
>(
    args: &Args,
) -> Box<dyn storage::Storage<T>> {
    if !args.no_persist_session {
        if let Some(file_storage) = storage::File::new(storage::USER_KEY) {
            return Box::new(file_storage);
        }
        warn!("We can't find a data directory, so the session will not be saved");
    }

    Box::new(storage::Memory::<T>::new())
}

async fn run(args: Args) -> Result<()> {
    if !matches!(args.url.scheme(), "http" | "https") {
        error!(
            "The URL scheme {} of URL {} is not supported",
            args.url.scheme(),
            args.url
        );
        return Err(error::Error::Command);
    }

    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let config = http::Config::new(args.url.clone())
        .with_content_type(args.content_type.clone())
        .with_credentials(!args.without_credentials);
    let cookies = if args.auth_strategy == AuthStrategy::Cookie && config.include_credentials() {
        Some(Arc::new(
            http::Cookies::load(
                config.base_url().clone(),
                get_credential_storage(&args, storage::COOKIES_KEY).await,
            )
            .await,
        ))
    } else {
        None
    };
    let transport = http::Reqwest::new(&config, cookies.as_ref().map(Arc::clone))?;
    let credential = match args.auth_strategy {
        AuthStrategy::Bearer => Credential::Bearer(Arc::new(http::Bearer::new(
            get_credential_storage(&args, storage::TOKEN_KEY).await,
        ))),
        AuthStrategy::Cookie => Credential::Cookie(cookies),
    };
    debug!(
        "Using {} authentication against {}",
        args.auth_strategy,
        config.base_url()
    );

    let store = Store::new(config, transport, get_snapshot_storage(&args), credential);
    if let Some(user) = store.check_auth().await.user() {
        info!("Resuming the session of {}", user.username);
    }

    let cx = Context {
        store,
        prompt: Box::new(prompt),
    };
    command::Command::execute(args.command, &cx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("BOXOFFICE_LOG", "warn")
        .write_style("BOXOFFICE_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
