// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;

use crate::{
    error::Result,
    gateway::{movie, Executor as _},
};

use super::{print_reply, print_table, Context};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List every movie.
    List,
    /// Show one movie.
    Get { id: u64 },
    /// List the showtimes of a movie.
    Showtimes { id: u64 },
    /// Add a movie. Requires an administrator.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Replace the details of a movie. Requires an administrator.
    Update {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a movie. Requires an administrator.
    Delete { id: u64 },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, cx: &Context) -> Result<()> {
        let adapter = cx.store.adapter();
        match self {
            Self::List => {
                print_table(movie::GetMovies.execute(adapter).await?.data.unwrap_or_default());
            }
            Self::Get { id } => {
                print_table(movie::GetMovie { id }.execute(adapter).await?.data);
            }
            Self::Showtimes { id } => {
                print_table(
                    movie::GetMovieShowtimes { id }
                        .execute(adapter)
                        .await?
                        .data
                        .unwrap_or_default(),
                );
            }
            Self::Create { title, description } => print_reply(
                movie::CreateMovie { title, description }
                    .execute(adapter)
                    .await?,
                "Movie created",
            ),
            Self::Update {
                id,
                title,
                description,
            } => print_reply(
                movie::UpdateMovie {
                    id,
                    title,
                    description,
                }
                .execute(adapter)
                .await?,
                "Movie updated",
            ),
            Self::Delete { id } => print_reply(
                movie::DeleteMovie { id }.execute(adapter).await?,
                "Movie deleted",
            ),
        }
        Ok(())
    }
}
