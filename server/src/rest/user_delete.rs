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

//! API to delete a user and everything that belongs to them.

use crate::driver::Driver;
use crate::model::UserId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use shareit_core::rest::{EmptyBody, RestError};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<UserId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    driver.delete_user(id).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::testutils::*;
    use axum::http;
    use shareit_core::db::DbError;
    use shareit_core::rest::testutils::*;
    use shareit_core::test_payload_must_be_empty;

    fn route(id: UserId) -> (http::Method, String) {
        (http::Method::DELETE, format!("/users/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let alice = context.create_user("alice").await;
        let bob = context.create_user("bob").await;
        let item = context.create_item(alice.id(), "Drill").await;

        OneShotBuilder::new(context.app(), route(alice.id()))
            .send_empty()
            .await
            .expect_empty()
            .await;

        let mut ex = context.ex().await;
        assert_eq!(DbError::NotFound, db::get_user(&mut ex, alice.id()).await.unwrap_err());
        assert_eq!(DbError::NotFound, db::get_item(&mut ex, item.id()).await.unwrap_err());
        assert_eq!(bob, db::get_user(&mut ex, bob.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(UserId::from(3)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 3 not found")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(UserId::from(1)));
}
