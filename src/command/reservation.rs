// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;

use crate::{
    error::Result,
    gateway::{reservation, Executor as _},
};

use super::{print_reply, print_table, Context};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Reserve a ticket for a showtime.
    Create {
        #[arg(long)]
        showtime: u64,
    },
    /// List your reservations.
    List,
    /// Give a reservation back.
    Cancel { id: u64 },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, cx: &Context) -> Result<()> {
        let adapter = cx.store.adapter();
        match self {
            Self::Create { showtime } => print_reply(
                reservation::CreateReservation {
                    showtime_id: showtime,
                }
                .execute(adapter)
                .await?,
                "Reservation created",
            ),
            Self::List => print_table(
                reservation::GetMyReservations
                    .execute(adapter)
                    .await?
                    .data
                    .unwrap_or_default(),
            ),
            Self::Cancel { id } => print_reply(
                reservation::CancelReservation { id }
                    .execute(adapter)
                    .await?,
                "Reservation cancelled",
            ),
        }
        Ok(())
    }
}
