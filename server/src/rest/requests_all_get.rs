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

//! API to browse the requests published by other users.

use crate::driver::Driver;
use crate::rest::httputils::{CallerId, parse_page};
use crate::rest::responses::RequestResponse;
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
pub(crate) struct PageQuery {
    /// Offset of the first request to return.
    pub(crate) from: Option<i64>,

    /// Maximum number of requests to return.
    pub(crate) size: Option<i64>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Query(query): Query<PageQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let page = parse_page(query.from, query.size)?;

    let requests = driver.get_other_requests(user_id, page).await?;

    let response: Vec<RequestResponse> = requests.iter().map(RequestResponse::from).collect();
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestId;
    use crate::rest::testutils::*;
    use axum::http;
    use shareit_core::rest::testutils::*;
    use shareit_core::test_payload_must_be_empty;
    use time::Duration;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/requests/all".to_owned())
    }

    fn ids(response: Vec<RequestResponse>) -> Vec<RequestId> {
        response.into_iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_pagination() {
        let context = TestContext::setup().await;

        let viewer = context.create_user("viewer").await;
        let other = context.create_user("other").await;
        let mut requests = vec![];
        for hour in 0..4 {
            let created = NOW + Duration::hours(hour);
            requests.push(context.create_request(other.id(), "Need something", created).await);
        }
        context.create_request(viewer.id(), "Mine", NOW + Duration::hours(10)).await;

        for (query, exp_ids) in [
            (
                PageQuery::default(),
                vec![requests[3].id(), requests[2].id(), requests[1].id(), requests[0].id()],
            ),
            (PageQuery { from: Some(1), size: Some(2) }, vec![requests[2].id(), requests[1].id()]),
            (PageQuery { from: Some(4), size: None }, vec![]),
        ] {
            let response = OneShotBuilder::new(context.app(), route())
                .with_header(USER_ID_HEADER, viewer.id().to_string())
                .with_query(query)
                .send_empty()
                .await
                .expect_json::<Vec<RequestResponse>>()
                .await;
            assert_eq!(exp_ids, ids(response));
        }
    }

    #[tokio::test]
    async fn test_errors() {
        let context = TestContext::setup().await;

        let viewer = context.create_user("viewer").await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, viewer.id().to_string())
            .with_query(PageQuery { from: None, size: Some(-3) })
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Page size must be positive; got -3")
            .await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, "5")
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 5 not found")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(),
        (USER_ID_HEADER, "1")
    );
}
