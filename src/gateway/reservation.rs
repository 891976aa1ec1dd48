// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::{http::Method, model::Reservation};

use super::Executor;

#[derive(Debug, Serialize)]
pub(crate) struct CreateReservation {
    pub(crate) showtime_id: u64,
}

impl Executor for CreateReservation {
    type Response = Value;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/reservations/".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMyReservations;

impl Executor for GetMyReservations {
    type Response = Vec<Reservation>;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/reservations/me".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CancelReservation {
    pub(crate) id: u64,
}

impl Executor for CancelReservation {
    type Response = Value;

    const METHOD: Method = Method::DELETE;

    fn path(&self) -> String {
        format!("/reservations/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        error::Result,
        http::{self, testing::Fake, Adapter, Config},
    };

    use super::*;

    fn adapter(fake: Fake) -> Result<Adapter> {
        Ok(Adapter::new(
            Config::new(url::Url::parse("http://cinema.test/api/")?),
            fake,
        ))
    }

    #[tokio::test]
    async fn create_sends_numeric_showtime() -> Result<()> {
        let fake =
            Fake::new().respond(201, json!({"data": null, "message": "Reservation created successfully"}));
        let requests = fake.requests();

        let reply = CreateReservation { showtime_id: 12 }
            .execute(&adapter(fake)?)
            .await?;

        assert_eq!(reply.message.as_deref(), Some("Reservation created successfully"));
        assert_eq!(
            requests.lock().await[0].body(),
            Some(&json!({"showtime_id": 12}))
        );
        Ok(())
    }

    #[tokio::test]
    async fn sold_out_showtimes_are_validation_failures() -> Result<()> {
        let fake = Fake::new().respond(
            409,
            json!({"code": "NO_TICKETS", "message": "No tickets available"}),
        );

        let result = CreateReservation { showtime_id: 12 }
            .execute(&adapter(fake)?)
            .await;

        match result {
            Err(http::Error::Validation(failure)) => {
                assert_eq!(failure.message(), Some("No tickets available"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn lists_own_reservations() -> Result<()> {
        let fake = Fake::new().respond(
            200,
            json!({"data": [{"id": 1, "showtime_id": 12, "user_id": 3}]}),
        );

        let reservations = GetMyReservations
            .execute(&adapter(fake)?)
            .await?
            .data
            .unwrap_or_default();

        assert_eq!(
            reservations,
            vec![Reservation {
                id: 1,
                showtime_id: 12,
                user_id: 3
            }]
        );
        Ok(())
    }
}
