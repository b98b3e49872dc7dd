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

//! Operations on comments.

use crate::db;
use crate::driver::{Driver, named_not_found, require_user};
use crate::model::{Comment, ItemId, UserId};
use log::{info, warn};
use shareit_core::driver::{DriverError, DriverResult};
use shareit_core::model::require_not_blank;

impl Driver {
    /// Leaves a comment with `text` on `item_id` on behalf of `user_id`, who must have completed
    /// an approved booking of the item.
    pub(crate) async fn add_comment(
        self,
        user_id: UserId,
        item_id: ItemId,
        text: String,
    ) -> DriverResult<Comment> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        named_not_found(db::get_item(tx.ex(), item_id).await, "Item", item_id)?;
        let text = require_not_blank("Comment text", text)?;
        if !db::has_completed_booking(tx.ex(), user_id, item_id, now).await? {
            warn!("User {} tried to comment on item {} without renting it", user_id, item_id);
            return Err(DriverError::InvalidInput(format!(
                "User {} has no completed booking of item {}",
                user_id, item_id
            )));
        }

        let comment = db::create_comment(tx.ex(), item_id, user_id, &text, now).await?;
        tx.commit().await?;

        info!("User {} commented on item {}", comment.author_id(), comment.item_id());
        Ok(comment)
    }
}
