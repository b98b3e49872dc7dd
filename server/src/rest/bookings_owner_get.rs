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

//! API to list the bookings of the items owned by the caller.

use crate::driver::Driver;
use crate::rest::bookings_get::BookingsQuery;
use crate::rest::httputils::{CallerId, parse_page};
use crate::rest::responses::BookingResponse;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use shareit_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Query(query): Query<BookingsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let state = query.state()?;
    let page = parse_page(query.from, query.size)?;

    let bookings = driver.get_bookings_by_owner(user_id, state, page).await?;

    let response: Vec<BookingResponse> = bookings.iter().map(BookingResponse::from).collect();
    Ok(Json(response))
}
