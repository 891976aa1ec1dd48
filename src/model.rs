// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Wire types shared by the gateways, the session store and the commands.

use std::{fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Body of every reply the service sends, successful or not.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Envelope<T> {
    pub(crate) data: Option<T>,
    pub(crate) message: Option<String>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            message: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    User,
    Admin,
    /// A role this client does not know about.
    #[serde(other)]
    #[value(skip)]
    Other,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other => "other",
        })
    }
}

/// The identity the session store keeps in memory and in the durable
/// snapshot. It never carries a credential.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Tabled)]
pub(crate) struct UserSummary {
    #[tabled(rename = "Username")]
    pub(crate) username: String,
    #[tabled(rename = "Role")]
    pub(crate) role: Role,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
pub(crate) struct Movie {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[serde(default)]
    #[tabled(rename = "Description")]
    pub(crate) description: String,
    #[serde(default)]
    #[tabled(rename = "Genre", display_with = "display_optional")]
    pub(crate) genre: Option<String>,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) showtimes: Vec<Showtime>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
pub(crate) struct Hall {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Seats")]
    pub(crate) seat_count: u32,
    #[tabled(rename = "Rows")]
    pub(crate) rows: u32,
    #[tabled(rename = "Columns")]
    pub(crate) cols: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
pub(crate) struct Showtime {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Movie")]
    pub(crate) movie_id: u64,
    #[tabled(rename = "Starts At")]
    pub(crate) start_at: DateTime<FixedOffset>,
    // Older servers do not assign showtimes to halls.
    #[serde(default)]
    #[tabled(rename = "Hall")]
    pub(crate) hall_id: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Tabled)]
pub(crate) struct Reservation {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Showtime")]
    pub(crate) showtime_id: u64,
    #[tabled(rename = "User")]
    pub(crate) user_id: u64,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub(crate) struct Availability {
    pub(crate) remaining_tickets: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Captcha {
    pub(crate) image: String,
    pub(crate) thumb: String,
    pub(crate) key: String,
}

/// A point the user clicked on the captcha image.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct CaptchaDot {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl FromStr for CaptchaDot {
    type Err = ParseCaptchaDotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or(ParseCaptchaDotError::Format)?;
        Ok(Self {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ParseCaptchaDotError {
    #[error("expected a point written as X,Y")]
    Format,
    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] ParseIntError),
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub(crate) struct CaptchaVerdict {
    pub(crate) success: bool,
}

fn display_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
