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

//! API to modify some details of a user.

use crate::driver::Driver;
use crate::model::{UserId, UserPatch};
use crate::rest::responses::UserResponse;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::model::EmailAddress;
use shareit_core::rest::RestError;

/// Message sent to the server to update a user.  Absent fields are left unchanged.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct UpdateUserRequest {
    /// New display name.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) name: Option<String>,

    /// New email address.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) email: Option<String>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, RestError> {
    let mut patch = UserPatch::default();
    if let Some(name) = request.name {
        patch = patch.with_name(name)?;
    }
    if let Some(email) = request.email {
        patch = patch.with_email(EmailAddress::new(email)?);
    }

    let user = driver.update_user(id, patch).await?;

    Ok(Json(UserResponse::from(&user)))
}
