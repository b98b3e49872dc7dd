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

//! Operations on items.

use crate::db;
use crate::driver::{Driver, named_not_found, require_user};
use crate::model::{Item, ItemDetails, ItemId, ItemPatch, RequestId, UserId, require_name};
use log::{info, warn};
use shareit_core::db::Executor;
use shareit_core::driver::{DriverError, DriverResult};
use shareit_core::model::require_not_blank;
use time::OffsetDateTime;

/// Gathers the comments on `item` and, if `viewer_id` owns it, its neighboring bookings.
async fn load_details(
    ex: &mut Executor,
    item: Item,
    viewer_id: UserId,
    now: OffsetDateTime,
) -> DriverResult<ItemDetails> {
    let comments = db::get_comments_by_item(ex, item.id()).await?;
    if item.owner_id() != viewer_id {
        return Ok(ItemDetails::new(item, comments));
    }

    let last = db::get_last_booking(ex, item.id(), now).await?;
    let next = db::get_next_booking(ex, item.id(), now).await?;
    Ok(ItemDetails::new(item, comments).with_bookings(last, next))
}

impl Driver {
    /// Lists a new item owned by `owner_id`, optionally in response to `request_id`.
    pub(crate) async fn create_item(
        self,
        owner_id: UserId,
        name: String,
        description: String,
        available: Option<bool>,
        request_id: Option<RequestId>,
    ) -> DriverResult<Item> {
        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), owner_id).await?;

        let name = require_name("Item name", name)?;
        let description = require_not_blank("Item description", description)?;
        let available = available.ok_or_else(|| {
            DriverError::InvalidInput("Item availability must be specified".to_owned())
        })?;
        if let Some(request_id) = request_id {
            if !db::request_exists(tx.ex(), request_id).await? {
                return Err(DriverError::NotFound(format!("Request {} not found", request_id)));
            }
        }

        let item =
            db::create_item(tx.ex(), owner_id, &name, &description, available, request_id).await?;
        tx.commit().await?;

        info!("User {} listed item {}", owner_id, item.id());
        Ok(item)
    }

    /// Applies `patch` to the item `item_id` on behalf of `user_id`, who must own it.
    pub(crate) async fn update_item(
        self,
        user_id: UserId,
        item_id: ItemId,
        patch: ItemPatch,
    ) -> DriverResult<Item> {
        let mut tx = self.db.begin().await?;
        let item = named_not_found(db::get_item(tx.ex(), item_id).await, "Item", item_id)?;
        if item.owner_id() != user_id {
            warn!("User {} tried to update item {} owned by {}", user_id, item_id, item.owner_id());
            return Err(DriverError::Forbidden(format!(
                "User {} does not own item {}",
                user_id, item_id
            )));
        }

        let item = patch.apply(item);
        db::update_item(tx.ex(), &item).await?;
        tx.commit().await?;
        Ok(item)
    }

    /// Gets the item `item_id` as seen by `user_id`.
    pub(crate) async fn get_item(
        self,
        user_id: UserId,
        item_id: ItemId,
    ) -> DriverResult<ItemDetails> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let item = named_not_found(db::get_item(tx.ex(), item_id).await, "Item", item_id)?;
        let details = load_details(tx.ex(), item, user_id, now).await?;
        tx.commit().await?;
        Ok(details)
    }

    /// Gets all items owned by `user_id` sorted by identifier.
    pub(crate) async fn get_items_by_owner(
        self,
        user_id: UserId,
    ) -> DriverResult<Vec<ItemDetails>> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let items = db::get_items_by_owner(tx.ex(), user_id).await?;
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            result.push(load_details(tx.ex(), item, user_id, now).await?);
        }
        tx.commit().await?;
        Ok(result)
    }

    /// Finds the available items whose name or description contain `text`, ignoring case.
    pub(crate) async fn search_items(self, user_id: UserId, text: &str) -> DriverResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let items = db::search_available_items(tx.ex(), text).await?;
        tx.commit().await?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::{BookingStatus, BookingSummary};
    use time::macros::datetime;

    #[tokio::test]
    async fn test_create_item_ok() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;

        let item = context
            .driver()
            .create_item(owner.id(), "Drill".to_owned(), "Cordless".to_owned(), Some(true), None)
            .await
            .unwrap();
        assert_eq!(owner.id(), item.owner_id());
        assert_eq!("Drill", item.name());
        assert_eq!("Cordless", item.description());
        assert!(item.available());
        assert_eq!(None, item.request_id());

        assert_eq!(item, db::get_item(&mut context.ex().await, item.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_item_for_request() {
        let context = TestContext::setup().await;

        let requester = context.create_user("requester").await;
        let owner = context.create_user("owner").await;
        let request = context.create_request(requester.id(), "Need a drill", NOW).await;

        let item = context
            .driver()
            .create_item(
                owner.id(),
                "Drill".to_owned(),
                "Cordless".to_owned(),
                Some(false),
                Some(request.id()),
            )
            .await
            .unwrap();
        assert_eq!(Some(request.id()), item.request_id());
        assert!(!item.available());

        assert_eq!(
            DriverError::NotFound("Request 42 not found".to_owned()),
            context
                .driver()
                .create_item(
                    owner.id(),
                    "Saw".to_owned(),
                    "Sharp".to_owned(),
                    Some(true),
                    Some(RequestId::from(42)),
                )
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_item_errors() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("User 3 not found".to_owned()),
            context
                .driver()
                .create_item(UserId::from(3), "a".to_owned(), "b".to_owned(), Some(true), None)
                .await
                .unwrap_err()
        );

        let owner = context.create_user("owner").await;
        for (name, description, available, exp_error) in [
            ("", "b", Some(true), "Item name cannot be blank"),
            ("a", " ", Some(true), "Item description cannot be blank"),
            ("a", "b", None, "Item availability must be specified"),
        ] {
            assert_eq!(
                DriverError::InvalidInput(exp_error.to_owned()),
                context
                    .driver()
                    .create_item(
                        owner.id(),
                        name.to_owned(),
                        description.to_owned(),
                        available,
                        None
                    )
                    .await
                    .unwrap_err()
            );
        }
        assert!(
            db::get_items_by_owner(&mut context.ex().await, owner.id()).await.unwrap().is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_item_partial() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let item = context.create_item(owner.id(), "Drill").await;

        let patch = ItemPatch::default().with_available(false);
        let updated = context.driver().update_item(owner.id(), item.id(), patch).await.unwrap();
        assert_eq!(item.name(), updated.name());
        assert_eq!(item.description(), updated.description());
        assert!(!updated.available());

        let patch = ItemPatch::default().with_name("Hammer drill").unwrap();
        let updated = context.driver().update_item(owner.id(), item.id(), patch).await.unwrap();
        assert_eq!("Hammer drill", updated.name());
        assert!(!updated.available());

        assert_eq!(updated, db::get_item(&mut context.ex().await, item.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_item_not_owner() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let other = context.create_user("other").await;
        let item = context.create_item(owner.id(), "Drill").await;

        let patch = ItemPatch::default().with_available(false);
        assert_eq!(
            DriverError::Forbidden(format!("User {} does not own item {}", other.id(), item.id())),
            context.driver().update_item(other.id(), item.id(), patch).await.unwrap_err()
        );
        assert_eq!(item, db::get_item(&mut context.ex().await, item.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_item_not_found() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        assert_eq!(
            DriverError::NotFound("Item 7 not found".to_owned()),
            context
                .driver()
                .update_item(owner.id(), ItemId::from(7), ItemPatch::default())
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_item_as_owner_and_as_other() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id(), "Drill").await;

        let last =
            context.create_booking(item.id(), booker.id(), -3, BookingStatus::Approved).await;
        context.create_booking(item.id(), booker.id(), -1, BookingStatus::Rejected).await;
        context.create_booking(item.id(), booker.id(), 1, BookingStatus::Waiting).await;
        let next = context.create_booking(item.id(), booker.id(), 2, BookingStatus::Approved).await;
        let comment = db::create_comment(
            &mut context.ex().await,
            item.id(),
            booker.id(),
            "Works great",
            datetime!(2024-05-08 10:00 UTC),
        )
        .await
        .unwrap();

        let details = context.driver().get_item(owner.id(), item.id()).await.unwrap();
        assert_eq!(&item, details.item());
        assert_eq!(
            Some(&BookingSummary { id: last.id(), booker_id: booker.id() }),
            details.last_booking()
        );
        assert_eq!(
            Some(&BookingSummary { id: next.id(), booker_id: booker.id() }),
            details.next_booking()
        );
        assert_eq!(&[comment.clone()], details.comments());

        let details = context.driver().get_item(booker.id(), item.id()).await.unwrap();
        assert_eq!(&item, details.item());
        assert_eq!(None, details.last_booking());
        assert_eq!(None, details.next_booking());
        assert_eq!(&[comment], details.comments());
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let item = context.create_item(owner.id(), "Drill").await;

        assert_eq!(
            DriverError::NotFound("User 99 not found".to_owned()),
            context.driver().get_item(UserId::from(99), item.id()).await.unwrap_err()
        );
        assert_eq!(
            DriverError::NotFound("Item 99 not found".to_owned()),
            context.driver().get_item(owner.id(), ItemId::from(99)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_items_by_owner() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item1 = context.create_item(owner.id(), "Drill").await;
        let item2 = context.create_item(owner.id(), "Saw").await;
        context.create_item(booker.id(), "Ladder").await;

        let next =
            context.create_booking(item2.id(), booker.id(), 1, BookingStatus::Approved).await;

        let items = context.driver().get_items_by_owner(owner.id()).await.unwrap();
        assert_eq!(2, items.len());
        assert_eq!(&item1, items[0].item());
        assert_eq!(None, items[0].next_booking());
        assert_eq!(&item2, items[1].item());
        assert_eq!(
            Some(&BookingSummary { id: next.id(), booker_id: booker.id() }),
            items[1].next_booking()
        );

        assert_eq!(
            DriverError::NotFound("User 99 not found".to_owned()),
            context.driver().get_items_by_owner(UserId::from(99)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_search_items() {
        let context = TestContext::setup().await;

        let owner = context.create_user("owner").await;
        let drill = context.create_item(owner.id(), "Drill").await;
        let unavailable = context.create_item(owner.id(), "Old drill").await;
        context
            .driver()
            .update_item(owner.id(), unavailable.id(), ItemPatch::default().with_available(false))
            .await
            .unwrap();

        assert_eq!(vec![drill], context.driver().search_items(owner.id(), "DRILL").await.unwrap());
        assert!(context.driver().search_items(owner.id(), "hammer").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_items_blank_text_skips_lookups() {
        let context = TestContext::setup().await;

        context.create_item(context.create_user("owner").await.id(), "Drill").await;

        assert!(context.driver().search_items(UserId::from(99), "").await.unwrap().is_empty());
        assert!(context.driver().search_items(UserId::from(99), "  ").await.unwrap().is_empty());
        assert_eq!(
            DriverError::NotFound("User 99 not found".to_owned()),
            context.driver().search_items(UserId::from(99), "drill").await.unwrap_err()
        );
    }
}
