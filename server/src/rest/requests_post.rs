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

//! API to publish a request for an item that nobody has listed yet.

use crate::driver::Driver;
use crate::rest::httputils::CallerId;
use crate::rest::responses::RequestResponse;
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::RestError;

/// Message sent to the server to publish a request.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct CreateRequestRequest {
    /// What the requester is looking for.
    pub(crate) description: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Json(request): Json<CreateRequestRequest>,
) -> Result<impl IntoResponse, RestError> {
    let details = driver.create_request(user_id, request.description.unwrap_or_default()).await?;

    Ok((http::StatusCode::CREATED, Json(RequestResponse::from(&details))))
}
