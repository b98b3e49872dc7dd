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

//! API to book an item.

use crate::driver::Driver;
use crate::model::ItemId;
use crate::rest::httputils::{CallerId, parse_timestamp};
use crate::rest::responses::BookingResponse;
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::RestError;

/// Message sent to the server to book an item.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    /// Item to book.
    pub(crate) item_id: Option<ItemId>,

    /// Start of the period as an RFC 3339 timestamp.
    pub(crate) start: Option<String>,

    /// End of the period as an RFC 3339 timestamp.
    pub(crate) end: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, RestError> {
    let item_id = match request.item_id {
        Some(item_id) => item_id,
        None => return Err(RestError::InvalidRequest("Booked item must be specified".to_owned())),
    };
    let start = parse_timestamp("Booking start", request.start.as_deref())?;
    let end = parse_timestamp("Booking end", request.end.as_deref())?;

    let details = driver.create_booking(user_id, item_id, start, end).await?;

    Ok((http::StatusCode::CREATED, Json(BookingResponse::from(&details))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::{BookingStatus, ItemPatch};
    use crate::rest::responses::{BookedItemResponse, BookerResponse};
    use crate::rest::testutils::*;
    use shareit_core::rest::testutils::*;
    use shareit_core::test_payload_must_be_json;
    use time::macros::datetime;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/bookings".to_owned())
    }

    fn tomorrow_request(item_id: ItemId) -> CreateBookingRequest {
        CreateBookingRequest {
            item_id: Some(item_id),
            start: Some("2024-05-11T12:00:00Z".to_owned()),
            end: Some("2024-05-12T12:00:00Z".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id().to_string())
            .send_json(tomorrow_request(item.id()))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<BookingResponse>()
            .await;
        let exp_response = BookingResponse {
            id: response.id,
            start: datetime!(2024-05-11 12:00 UTC),
            end: datetime!(2024-05-12 12:00 UTC),
            status: BookingStatus::Waiting,
            booker: BookerResponse { id: booker.id(), name: "booker".to_owned() },
            item: BookedItemResponse { id: item.id(), name: "Drill".to_owned() },
        };
        assert_eq!(exp_response, response);

        let details = db::get_booking(&mut context.ex().await, response.id).await.unwrap();
        assert_eq!(BookingResponse::from(&details), response);
    }

    #[tokio::test]
    async fn test_timestamps_without_offset() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;

        let request = CreateBookingRequest {
            start: Some("2024-05-11T12:00:00".to_owned()),
            end: Some("2024-05-12T08:30:00".to_owned()),
            ..tomorrow_request(item.id())
        };
        let response = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id().to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<BookingResponse>()
            .await;
        assert_eq!(datetime!(2024-05-11 12:00 UTC), response.start);
        assert_eq!(datetime!(2024-05-12 08:30 UTC), response.end);
    }

    #[tokio::test]
    async fn test_item_not_available() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;
        let item = ItemPatch::default().with_available(false).apply(item);
        db::update_item(&mut context.ex().await, &item).await.unwrap();

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id().to_string())
            .send_json(tomorrow_request(item.id()))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error(&format!("Item {} is not available", item.id()))
            .await;
    }

    #[tokio::test]
    async fn test_own_item() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let item = context.create_item(owner.id(), "Drill").await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, owner.id().to_string())
            .send_json(tomorrow_request(item.id()))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(&format!("User {} already owns item {}", owner.id(), item.id()))
            .await;
    }

    #[tokio::test]
    async fn test_item_not_found() {
        let context = TestContext::setup().await;

        let booker = context.create_user("booker").await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id().to_string())
            .send_json(tomorrow_request(ItemId::from(6)))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Item 6 not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_fields() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;

        let past = Some("2024-05-09T12:00:00Z".to_owned());
        let later = Some("2024-05-13T12:00:00Z".to_owned());
        for (request, exp_error) in [
            (
                CreateBookingRequest { item_id: None, ..tomorrow_request(item.id()) },
                "Booked item must be specified",
            ),
            (
                CreateBookingRequest { start: None, ..tomorrow_request(item.id()) },
                "Booking start must be specified",
            ),
            (
                CreateBookingRequest {
                    end: Some("tomorrow".to_owned()),
                    ..tomorrow_request(item.id())
                },
                "Invalid Booking end 'tomorrow'",
            ),
            (
                CreateBookingRequest { start: past, ..tomorrow_request(item.id()) },
                "Booking start in the past",
            ),
            (
                CreateBookingRequest { start: later, ..tomorrow_request(item.id()) },
                "Booking end before start",
            ),
        ] {
            OneShotBuilder::new(context.app(), route())
                .with_header(USER_ID_HEADER, booker.id().to_string())
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(exp_error)
                .await;
        }

        assert!(
            db::get_bookings_by_booker(&mut context.ex().await, booker.id(), Default::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route(),
        (USER_ID_HEADER, "1")
    );
}
