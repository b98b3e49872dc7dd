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

//! API to list the requests published by the caller.

use crate::driver::Driver;
use crate::rest::httputils::CallerId;
use crate::rest::responses::RequestResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use shareit_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    CallerId(user_id): CallerId,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let requests = driver.get_own_requests(user_id).await?;

    let response: Vec<RequestResponse> = requests.iter().map(RequestResponse::from).collect();
    Ok(Json(response))
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
    use time::Duration;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/requests".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let requester = context.create_user("requester").await;
        let other = context.create_user("other").await;
        let request1 = context.create_request(requester.id(), "Need a drill", NOW).await;
        context.create_request(other.id(), "Need a saw", NOW).await;
        let request2 =
            context.create_request(requester.id(), "Need a ladder", NOW + Duration::hours(1)).await;
        let item = db::create_item(
            &mut context.ex().await,
            other.id(),
            "Drill",
            "Spare drill",
            true,
            Some(request1.id()),
        )
        .await
        .unwrap();

        let response = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, requester.id().to_string())
            .send_empty()
            .await
            .expect_json::<Vec<RequestResponse>>()
            .await;
        let exp_response = vec![
            RequestResponse {
                id: request2.id(),
                description: "Need a ladder".to_owned(),
                created: NOW + Duration::hours(1),
                items: vec![],
            },
            RequestResponse {
                id: request1.id(),
                description: "Need a drill".to_owned(),
                created: NOW,
                items: vec![ItemResponse::from(&item)],
            },
        ];
        assert_eq!(exp_response, response);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, "4")
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 4 not found")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(),
        (USER_ID_HEADER, "1")
    );
}
