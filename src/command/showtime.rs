// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use clap::Subcommand;

use crate::{
    error::{Error, Result},
    gateway::{showtime, Executor as _},
};

use super::{print_reply, print_table, Context};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List every showtime.
    List,
    /// Show one showtime.
    Get { id: u64 },
    /// Show how many tickets are left for a showtime.
    Availability { id: u64 },
    /// Schedule a movie in a hall. Requires an administrator.
    Create {
        #[arg(long)]
        movie: u64,
        #[arg(long)]
        hall: u64,
        /// When the showtime starts, as an RFC 3339 timestamp.
        #[arg(long, value_parser = DateTime::<FixedOffset>::parse_from_rfc3339)]
        start_at: DateTime<FixedOffset>,
    },
    /// Move a showtime to another time or hall. Requires an administrator.
    Update {
        id: u64,
        #[arg(long)]
        hall: Option<u64>,
        /// When the showtime starts, as an RFC 3339 timestamp.
        #[arg(long, value_parser = DateTime::<FixedOffset>::parse_from_rfc3339)]
        start_at: Option<DateTime<FixedOffset>>,
    },
    /// Cancel a showtime. Requires an administrator.
    Delete { id: u64 },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, cx: &Context) -> Result<()> {
        let adapter = cx.store.adapter();
        match self {
            Self::List => print_table(
                showtime::GetShowtimes
                    .execute(adapter)
                    .await?
                    .data
                    .unwrap_or_default(),
            ),
            Self::Get { id } => {
                print_table(showtime::GetShowtime { id }.execute(adapter).await?.data);
            }
            Self::Availability { id } => {
                let Some(availability) = showtime::GetShowtimeAvailability { id }
                    .execute(adapter)
                    .await?
                    .data
                else {
                    return Err(Error::Rejected(format!(
                        "The server did not say how many tickets are left for showtime {id}"
                    )));
                };
                println!("{} tickets remaining", availability.remaining_tickets);
            }
            Self::Create {
                movie,
                hall,
                start_at,
            } => print_reply(
                showtime::CreateShowtime {
                    movie_id: movie,
                    start_at,
                    hall_id: hall,
                }
                .execute(adapter)
                .await?,
                "Showtime created",
            ),
            Self::Update { id, hall, start_at } => print_reply(
                showtime::UpdateShowtime {
                    id,
                    start_at,
                    hall_id: hall,
                }
                .execute(adapter)
                .await?,
                "Showtime updated",
            ),
            Self::Delete { id } => print_reply(
                showtime::DeleteShowtime { id }.execute(adapter).await?,
                "Showtime deleted",
            ),
        }
        Ok(())
    }
}
