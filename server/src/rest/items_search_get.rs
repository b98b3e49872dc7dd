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

//! API to search for available items.

use crate::driver::Driver;
use crate::rest::httputils::CallerId;
use crate::rest::responses::ItemResponse;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::{EmptyBody, RestError};

/// Query parameters accepted by this API.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct SearchQuery {
    /// Text to look for in the name or description of the items.
    pub(crate) text: Option<String>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Query(query): Query<SearchQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let text = query.text.unwrap_or_default();
    let items = driver.search_items(user_id, &text).await?;

    let response: Vec<ItemResponse> = items.iter().map(ItemResponse::from).collect();
    Ok(Json(response))
}
