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

//! API to list a new item.

use crate::driver::Driver;
use crate::model::RequestId;
use crate::rest::httputils::CallerId;
use crate::rest::responses::ItemResponse;
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::RestError;

/// Message sent to the server to list an item.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateItemRequest {
    /// Short name of the item.
    pub(crate) name: Option<String>,

    /// Free-form description of the item.
    pub(crate) description: Option<String>,

    /// Whether the item can be booked right away.
    pub(crate) available: Option<bool>,

    /// Request that the item answers, if any.
    pub(crate) request_id: Option<RequestId>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, RestError> {
    let item = driver
        .create_item(
            user_id,
            request.name.unwrap_or_default(),
            request.description.unwrap_or_default(),
            request.available,
            request.request_id,
        )
        .await?;

    Ok((http::StatusCode::CREATED, Json(ItemResponse::from(&item))))
}
