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

//! API to modify some details of an item.

use crate::driver::Driver;
use crate::model::{ItemId, ItemPatch};
use crate::rest::httputils::CallerId;
use crate::rest::responses::ItemResponse;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::rest::RestError;

/// Message sent to the server to update an item.  Absent fields are left unchanged.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct UpdateItemRequest {
    /// New short name.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) name: Option<String>,

    /// New description.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) description: Option<String>,

    /// New availability.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) available: Option<bool>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Path(item_id): Path<ItemId>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, RestError> {
    let mut patch = ItemPatch::default();
    if let Some(name) = request.name {
        patch = patch.with_name(name)?;
    }
    if let Some(description) = request.description {
        patch = patch.with_description(description)?;
    }
    if let Some(available) = request.available {
        patch = patch.with_available(available);
    }

    let item = driver.update_item(user_id, item_id, patch).await?;

    Ok(Json(ItemResponse::from(&item)))
}
