// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::{
    http::Method,
    model::{Movie, Showtime},
};

use super::Executor;

#[derive(Debug, Serialize)]
pub(crate) struct GetMovies;

impl Executor for GetMovies {
    type Response = Vec<Movie>;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/movies/".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMovie {
    pub(crate) id: u64,
}

impl Executor for GetMovie {
    type Response = Movie;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/movies/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMovieShowtimes {
    pub(crate) id: u64,
}

impl Executor for GetMovieShowtimes {
    type Response = Vec<Showtime>;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/movies/{}/showtimes", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateMovie {
    pub(crate) title: String,
    pub(crate) description: String,
}

impl Executor for CreateMovie {
    type Response = Value;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/movies/".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateMovie {
    #[serde(skip)]
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) description: String,
}

impl Executor for UpdateMovie {
    type Response = Value;

    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/movies/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteMovie {
    pub(crate) id: u64,
}

impl Executor for DeleteMovie {
    type Response = Value;

    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/movies/{}", self.id)
    }
}
