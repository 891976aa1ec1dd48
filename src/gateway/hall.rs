// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::{http::Method, model::Hall};

use super::Executor;

#[derive(Debug, Serialize)]
pub(crate) struct GetHalls;

impl Executor for GetHalls {
    type Response = Vec<Hall>;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/halls/".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetHall {
    pub(crate) id: u64,
}

impl Executor for GetHall {
    type Response = Hall;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        format!("/halls/{}", self.id)
    }
}

/// The seating layout shared by hall creation and updates.
#[derive(Debug, Serialize)]
pub(crate) struct Layout {
    pub(crate) name: String,
    pub(crate) seat_count: u32,
    pub(crate) rows: u32,
    pub(crate) cols: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateHall(pub(crate) Layout);

impl Executor for CreateHall {
    type Response = Value;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/halls/".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateHall {
    #[serde(skip)]
    pub(crate) id: u64,
    #[serde(flatten)]
    pub(crate) layout: Layout,
}

impl Executor for UpdateHall {
    type Response = Value;

    const METHOD: Method = Method::PUT;

    fn path(&self) -> String {
        format!("/halls/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteHall {
    pub(crate) id: u64,
}

impl Executor for DeleteHall {
    type Response = Value;

    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/halls/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::Result;

    use super::*;

    fn layout() -> Layout {
        Layout {
            name: "Main".to_owned(),
            seat_count: 120,
            rows: 10,
            cols: 12,
        }
    }

    #[test]
    fn create_and_update_send_the_same_layout() -> Result<()> {
        let expected = json!({"name": "Main", "seat_count": 120, "rows": 10, "cols": 12});

        assert_eq!(CreateHall(layout()).body()?, Some(expected.clone()));

        let update = UpdateHall {
            id: 4,
            layout: layout(),
        };
        assert_eq!(update.body()?, Some(expected));
        assert_eq!(update.path(), "/halls/4");
        Ok(())
    }

    #[test]
    fn lookups_have_no_body() -> Result<()> {
        assert_eq!(GetHall { id: 4 }.body()?, None);
        assert_eq!(GetHalls.path(), "/halls/");
        Ok(())
    }
}
