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

//! API to comment on a previously rented item.

use crate::driver::Driver;
use crate::model::ItemId;
use crate::rest::httputils::CallerId;
use crate::rest::responses::CommentResponse;
use axum::Json;
use axum::extract::{Path, State};
use axum::http;
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::RestError;

/// Message sent to the server to comment on an item.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct CreateCommentRequest {
    /// Contents of the comment.
    pub(crate) text: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Path(item_id): Path<ItemId>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, RestError> {
    let comment = driver.add_comment(user_id, item_id, request.text.unwrap_or_default()).await?;

    Ok((http::StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}
