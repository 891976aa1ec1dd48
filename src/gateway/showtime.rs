// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;

use crate::{
    http::Method,
    model::{Availability, Showtime},
};

use super::Executor;

#[derive(Debug, Serialize)]
pub(crate) struct GetShowtimes;

impl Executor for GetShowtimes {
    type Response = Vec<Showtime>;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/showtimes/".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetShowtime {
    pub(crate) id: u64,
}

impl Executor for GetShowtime {
    type Response = Showtime;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/showtimes/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetShowtimeAvailability {
    pub(crate) id: u64,
}

impl Executor for GetShowtimeAvailability {
    type Response = Availability;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/showtimes/{}/availability", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateShowtime {
    pub(crate) movie_id: u64,
    pub(crate) start_at: DateTime<FixedOffset>,
    pub(crate) hall_id: u64,
}

impl Executor for CreateShowtime {
    type Response = Value;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/showtimes/".to_owned()
    }
}

/// Moves a showtime. At least one of the fields should be set; the server
/// rejects updates that change nothing.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
pub(crate) struct UpdateShowtime {
    #[serde(skip)]
    pub(crate) id: u64,
    pub(crate) start_at: Option<DateTime<FixedOffset>>,
    pub(crate) hall_id: Option<u64>,
}

impl Executor for UpdateShowtime {
    type Response = Value;

    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/showtimes/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteShowtime {
    pub(crate) id: u64,
}

impl Executor for DeleteShowtime {
    type Response = Value;

    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/showtimes/{}", self.id)
    }
}
