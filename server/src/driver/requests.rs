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

//! Operations on item requests.

use crate::db;
use crate::driver::{Driver, named_not_found, require_user};
use crate::model::{ItemRequest, ItemRequestDetails, Page, RequestId, UserId};
use log::info;
use shareit_core::db::Executor;
use shareit_core::driver::DriverResult;
use shareit_core::model::require_not_blank;

/// Attaches the items listed in response to each of the `requests`.
async fn load_items(
    ex: &mut Executor,
    requests: Vec<ItemRequest>,
) -> DriverResult<Vec<ItemRequestDetails>> {
    let mut result = Vec::with_capacity(requests.len());
    for request in requests {
        let items = db::get_items_by_request(ex, request.id()).await?;
        result.push(ItemRequestDetails::new(request, items));
    }
    Ok(result)
}

impl Driver {
    /// Publishes a request by `user_id` for an item matching `description`.
    pub(crate) async fn create_request(
        self,
        user_id: UserId,
        description: String,
    ) -> DriverResult<ItemRequestDetails> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let description = require_not_blank("Request description", description)?;
        let request = db::create_request(tx.ex(), user_id, &description, now).await?;
        tx.commit().await?;

        info!("User {} published request {}", request.requester_id(), request.id());
        Ok(ItemRequestDetails::new(request, vec![]))
    }

    /// Gets all requests published by `user_id`, newest first.
    pub(crate) async fn get_own_requests(
        self,
        user_id: UserId,
    ) -> DriverResult<Vec<ItemRequestDetails>> {
        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let requests = db::get_requests_by_requester(tx.ex(), user_id).await?;
        let details = load_items(tx.ex(), requests).await?;
        tx.commit().await?;
        Ok(details)
    }

    /// Gets a page of the requests published by users other than `user_id`, newest first.
    pub(crate) async fn get_other_requests(
        self,
        user_id: UserId,
        page: Page,
    ) -> DriverResult<Vec<ItemRequestDetails>> {
        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let requests = db::get_requests_of_others(tx.ex(), user_id, page).await?;
        let details = load_items(tx.ex(), requests).await?;
        tx.commit().await?;
        Ok(details)
    }

    /// Gets the request `request_id` with the items listed for it.
    pub(crate) async fn get_request(
        self,
        user_id: UserId,
        request_id: RequestId,
    ) -> DriverResult<ItemRequestDetails> {
        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let request =
            named_not_found(db::get_request(tx.ex(), request_id).await, "Request", request_id)?;
        let items = db::get_items_by_request(tx.ex(), request_id).await?;
        tx.commit().await?;
        Ok(ItemRequestDetails::new(request, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use shareit_core::driver::DriverError;
    use time::Duration;

    #[tokio::test]
    async fn test_create_request_ok() {
        let context = TestContext::setup().await;

        let user = context.create_user("user").await;

        let details =
            context.driver().create_request(user.id(), "Need a drill".to_owned()).await.unwrap();
        assert_eq!("Need a drill", details.request().description());
        assert_eq!(user.id(), details.request().requester_id());
        assert_eq!(NOW, details.request().created());
        assert!(details.items().is_empty());

        assert_eq!(
            details.request(),
            &db::get_request(&mut context.ex().await, details.request().id()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_request_errors() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("User 4 not found".to_owned()),
            context.driver().create_request(UserId::from(4), "x".to_owned()).await.unwrap_err()
        );

        let user = context.create_user("user").await;
        assert_eq!(
            DriverError::InvalidInput("Request description cannot be blank".to_owned()),
            context.driver().create_request(user.id(), "".to_owned()).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_own_and_other_requests() {
        let context = TestContext::setup().await;

        let user1 = context.create_user("user1").await;
        let user2 = context.create_user("user2").await;
        let r1 = context.create_request(user1.id(), "Drill", NOW - Duration::days(3)).await;
        let r2 = context.create_request(user1.id(), "Saw", NOW - Duration::days(1)).await;
        let r3 = context.create_request(user2.id(), "Ladder", NOW - Duration::days(2)).await;
        let item = db::create_item(
            &mut context.ex().await,
            user2.id(),
            "Drill",
            "Cordless",
            true,
            Some(r1.id()),
        )
        .await
        .unwrap();

        let own = context.driver().get_own_requests(user1.id()).await.unwrap();
        assert_eq!(
            vec![
                ItemRequestDetails::new(r2.clone(), vec![]),
                ItemRequestDetails::new(r1.clone(), vec![item.clone()]),
            ],
            own
        );

        let others =
            context.driver().get_other_requests(user1.id(), Page::default()).await.unwrap();
        assert_eq!(vec![ItemRequestDetails::new(r3.clone(), vec![])], others);

        let others = context
            .driver()
            .get_other_requests(user2.id(), Page::new(1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(vec![ItemRequestDetails::new(r1, vec![item])], others);

        assert_eq!(
            DriverError::NotFound("User 9 not found".to_owned()),
            context.driver().get_own_requests(UserId::from(9)).await.unwrap_err()
        );
        assert_eq!(
            DriverError::NotFound("User 9 not found".to_owned()),
            context.driver().get_other_requests(UserId::from(9), Page::default()).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_request() {
        let context = TestContext::setup().await;

        let user1 = context.create_user("user1").await;
        let user2 = context.create_user("user2").await;
        let request = context.create_request(user1.id(), "Drill", NOW).await;

        let details = context.driver().get_request(user2.id(), request.id()).await.unwrap();
        assert_eq!(ItemRequestDetails::new(request.clone(), vec![]), details);

        assert_eq!(
            DriverError::NotFound("User 9 not found".to_owned()),
            context.driver().get_request(UserId::from(9), request.id()).await.unwrap_err()
        );
        assert_eq!(
            DriverError::NotFound("Request 9 not found".to_owned()),
            context.driver().get_request(user1.id(), RequestId::from(9)).await.unwrap_err()
        );
    }
}
