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

//! Utilities to extract common parameters from HTTP requests.

use crate::model::{DEFAULT_PAGE_SIZE, Page, UserId};
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shareit_core::rest::{RestError, RestResult, get_unique_header};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Name of the header that carries the identifier of the acting user.
pub(crate) const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Identifier of the user on whose behalf a request is made, as given by `USER_ID_HEADER`.
pub(crate) struct CallerId(pub(crate) UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = match get_unique_header(&parts.headers, USER_ID_HEADER)? {
            Some(value) => value,
            None => {
                return Err(RestError::InvalidRequest(format!("Missing {} header", USER_ID_HEADER)));
            }
        };

        let value = value.to_str().map_err(|e| {
            RestError::InvalidRequest(format!("Bad encoding in {} header: {}", USER_ID_HEADER, e))
        })?;

        match value.parse::<i64>() {
            Ok(id) => Ok(CallerId(UserId::from(id))),
            Err(e) => Err(RestError::InvalidRequest(format!(
                "Invalid {} header '{}': {}",
                USER_ID_HEADER, value, e
            ))),
        }
    }
}

/// Builds the page described by the optional `from` and `size` query parameters.
pub(crate) fn parse_page(from: Option<i64>, size: Option<i64>) -> RestResult<Page> {
    Ok(Page::new(from.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))?)
}

/// Parses the timestamp in the `what` field of a request, which must be present.
///
/// The timestamp can be in RFC 3339 form or an ISO 8601 date and time without an offset, in which
/// case it is taken to be in UTC.
pub(crate) fn parse_timestamp(what: &str, value: Option<&str>) -> RestResult<OffsetDateTime> {
    let value = match value {
        Some(value) => value,
        None => return Err(RestError::InvalidRequest(format!("{} must be specified", what))),
    };
    match OffsetDateTime::parse(value, &Rfc3339) {
        Ok(timestamp) => Ok(timestamp),
        Err(e) => match PrimitiveDateTime::parse(value, &Iso8601::DEFAULT) {
            Ok(timestamp) => Ok(timestamp.assume_utc()),
            Err(_) => {
                Err(RestError::InvalidRequest(format!("Invalid {} '{}': {}", what, value, e)))
            }
        },
    }
}
