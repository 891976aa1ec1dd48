// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Args, Subcommand};

use crate::{
    error::Result,
    gateway::{hall, Executor as _},
};

use super::{print_reply, print_table, Context};

#[derive(Debug, Args)]
pub(crate) struct Layout {
    #[arg(long)]
    name: String,
    #[arg(long)]
    seat_count: u32,
    #[arg(long)]
    rows: u32,
    #[arg(long)]
    cols: u32,
}

impl From<Layout> for hall::Layout {
    fn from(layout: Layout) -> Self {
        Self {
            name: layout.name,
            seat_count: layout.seat_count,
            rows: layout.rows,
            cols: layout.cols,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List every hall.
    List,
    /// Show one hall.
    Get { id: u64 },
    /// Add a hall. Requires an administrator.
    Create {
        #[command(flatten)]
        layout: Layout,
    },
    /// Replace the layout of a hall. Requires an administrator.
    Update {
        id: u64,
        #[command(flatten)]
        layout: Layout,
    },
    /// Remove a hall. Requires an administrator.
    Delete { id: u64 },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, cx: &Context) -> Result<()> {
        let adapter = cx.store.adapter();
        match self {
            Self::List => {
                print_table(hall::GetHalls.execute(adapter).await?.data.unwrap_or_default());
            }
            Self::Get { id } => print_table(hall::GetHall { id }.execute(adapter).await?.data),
            Self::Create { layout } => print_reply(
                hall::CreateHall(layout.into()).execute(adapter).await?,
                "Hall created",
            ),
            Self::Update { id, layout } => print_reply(
                hall::UpdateHall {
                    id,
                    layout: layout.into(),
                }
                .execute(adapter)
                .await?,
                "Hall updated",
            ),
            Self::Delete { id } => print_reply(
                hall::DeleteHall { id }.execute(adapter).await?,
                "Hall deleted",
            ),
        }
        Ok(())
    }
}
