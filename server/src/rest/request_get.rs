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

//! API to get the details of a request.

use crate::driver::Driver;
use crate::model::RequestId;
use crate::rest::httputils::CallerId;
use crate::rest::responses::RequestResponse;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use shareit_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    Path(request_id): Path<RequestId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let details = driver.get_request(user_id, request_id).await?;

    Ok(Json(RequestResponse::from(&details)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::responses::ItemResponse;
    use crate::rest::testutils::*;
    use axum::http;
    use shareit_core::rest::testutils::*;
    use shareit_core::test_payload_must_be_empty;

    fn route(id: RequestId) -> (http::Method, String) {
        (http::Method::GET, format!("/requests/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let requester = context.create_user("requester").await;
        let owner = context.create_user("owner").await;
        let request = context.create_request(requester.id(), "Need a drill", NOW).await;
        let item = db::create_item(
            &mut context.ex().await,
            owner.id(),
            "Drill",
            "Spare drill",
            true,
            Some(request.id()),
        )
        .await
        .unwrap();

        for viewer in [&requester, &owner] {
            let response = OneShotBuilder::new(context.app(), route(request.id()))
                .with_header(USER_ID_HEADER, viewer.id().to_string())
                .send_empty()
                .await
                .expect_json::<RequestResponse>()
                .await;
            let exp_response = RequestResponse {
                id: request.id(),
                description: "Need a drill".to_owned(),
                created: NOW,
                items: vec![ItemResponse::from(&item)],
            };
            assert_eq!(exp_response, response);
        }
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let user = context.create_user("user").await;

        OneShotBuilder::new(context.app(), route(RequestId::from(9)))
            .with_header(USER_ID_HEADER, user.id().to_string())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Request 9 not found")
            .await;

        OneShotBuilder::new(context.app(), route(RequestId::from(9)))
            .with_header(USER_ID_HEADER, "9")
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 9 not found")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(RequestId::from(1)),
        (USER_ID_HEADER, "1")
    );
}
