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

//! API to register a new user.

use crate::driver::Driver;
use crate::rest::responses::UserResponse;
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
#[cfg(test)]
use serde::Serialize;
use serde::Deserialize;
use shareit_core::model::EmailAddress;
use shareit_core::rest::RestError;

/// Message sent to the server to register a user.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct CreateUserRequest {
    /// Display name of the new user.
    pub(crate) name: Option<String>,

    /// Email address of the new user, which must not be taken.
    pub(crate) email: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, RestError> {
    let email = EmailAddress::new(request.email.unwrap_or_default())?;
    let user = driver.create_user(request.name.unwrap_or_default(), email).await?;

    Ok((http::StatusCode::CREATED, Json(UserResponse::from(&user))))
}
