// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! API to list the bookings made by the caller.

use crate::driver::Driver;
use crate::model::BookingState;
use crate::rest::httputils::{CallerId, parse_page};
use crate::rest::responses::BookingResponse;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::{EmptyBody, RestError, RestResult};

/// Query parameters accepted by the booking listing APIs.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct BookingsQuery {
    /// Name of the filter to apply.  Defaults to `ALL`.
    pub(crate) state: Option<String>,

    /// Offset of the first booking to return.
    pub(crate) from: Option<i64>,

    /// Maximum number of bookings to return.
    pub(crate) size: Option<i64>,
}

impl BookingsQuery {
    /// Parses the requested filter.
    pub(crate) fn state(&self) -> RestResult<BookingState> {
        Ok(self.state.as_deref().unwrap_or("ALL").parse::<BookingState>()?)
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Query(query): Query<BookingsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let state = query.state()?;
    let page = parse_page(query.from, query.size)?;

    let bookings = driver.get_bookings_by_booker(user_id, state, page).await?;

    let response: Vec<BookingResponse> = bookings.iter().map(BookingResponse::from).collect();
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookingId, BookingStatus};
    use crate::rest::testutils::*;
    use axum::http;
    use shareit_core::rest::testutils::*;
    use shareit_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/bookings".to_owned())
    }

    fn ids(response: Vec<BookingResponse>) -> Vec<BookingId> {
        response.into_iter().map(|b| b.id).collect()
    }

    #[tokio::test]
    async fn test_states() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;
        let past =
            context.create_booking(item.id(), booker.id(), -4, BookingStatus::Approved).await;
        let future1 =
            context.create_booking(item.id(), booker.id(), 2, BookingStatus::Rejected).await;
        let future2 =
            context.create_booking(item.id(), booker.id(), 5, BookingStatus::Waiting).await;

        for (state, exp_ids) in [
            (None, vec![future2.id(), future1.id(), past.id()]),
            (Some("ALL"), vec![future2.id(), future1.id(), past.id()]),
            (Some("CURRENT"), vec![]),
            (Some("FUTURE"), vec![future2.id(), future1.id()]),
            (Some("PAST"), vec![past.id()]),
            (Some("WAITING"), vec![future2.id()]),
            (Some("REJECTED"), vec![future1.id()]),
        ] {
            let query = BookingsQuery { state: state.map(str::to_owned), ..Default::default() };
            let response = OneShotBuilder::new(context.app(), route())
                .with_header(USER_ID_HEADER, booker.id().to_string())
                .with_query(query)
                .send_empty()
                .await
                .expect_json::<Vec<BookingResponse>>()
                .await;
            assert_eq!(exp_ids, ids(response), "Unexpected results for state {:?}", state);
        }
    }

    #[tokio::test]
    async fn test_pagination() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;
        let mut bookings = vec![];
        for day in 1..=5 {
            bookings.push(
                context.create_booking(item.id(), booker.id(), day, BookingStatus::Waiting).await,
            );
        }

        let query = BookingsQuery { from: Some(1), size: Some(2), ..Default::default() };
        let response = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id().to_string())
            .with_query(query)
            .send_empty()
            .await
            .expect_json::<Vec<BookingResponse>>()
            .await;
        assert_eq!(vec![bookings[3].id(), bookings[2].id()], ids(response));
    }

    #[tokio::test]
    async fn test_invalid_query() {
        let context = TestContext::setup().await;

        let booker = context.create_user("booker").await;

        for (query, exp_error) in [
            (
                BookingsQuery { state: Some("SOON".to_owned()), ..Default::default() },
                "Unknown state: SOON",
            ),
            (
                BookingsQuery { from: Some(-1), ..Default::default() },
                "Page offset must not be negative",
            ),
            (BookingsQuery { size: Some(0), ..Default::default() }, "Page size must be positive"),
        ] {
            OneShotBuilder::new(context.app(), route())
                .with_header(USER_ID_HEADER, booker.id().to_string())
                .with_query(query)
                .send_empty()
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(exp_error)
                .await;
        }
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, "8")
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 8 not found")
            .await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, "8")
            .with_query(BookingsQuery { state: Some("SOON".to_owned()), ..Default::default() })
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Unknown state: SOON")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(),
        (USER_ID_HEADER, "1")
    );
}
