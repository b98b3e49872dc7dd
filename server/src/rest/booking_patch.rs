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

//! API to approve or reject a booking.

use crate::driver::Driver;
use crate::model::BookingId;
use crate::rest::httputils::CallerId;
use crate::rest::responses::BookingResponse;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::{EmptyBody, RestError};

/// Query parameters accepted by this API.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct RefineQuery {
    /// Whether the owner accepts the booking.
    pub(crate) approved: Option<bool>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Path(booking_id): Path<BookingId>,
    Query(query): Query<RefineQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let approved = match query.approved {
        Some(approved) => approved,
        None => return Err(RestError::InvalidRequest("Missing approved parameter".to_owned())),
    };

    let details = driver.refine_booking(user_id, booking_id, approved).await?;

    Ok(Json(BookingResponse::from(&details)))
}
