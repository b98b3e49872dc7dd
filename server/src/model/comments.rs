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

//! Comments left by renters on the items they used.

use crate::model::{CommentId, ItemId, UserId};
use shareit_core::model::{ModelResult, require_not_blank};
use time::OffsetDateTime;

/// A comment on an item written by someone who completed a booking of it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Comment {
    /// Identifier assigned by the database.
    id: CommentId,

    /// Item the comment is about.
    item_id: ItemId,

    /// User that wrote the comment.
    author_id: UserId,

    /// Display name of the author at the time the comment was read.
    author_name: String,

    /// Body of the comment.
    text: String,

    /// When the comment was posted.
    created: OffsetDateTime,
}

impl Comment {
    /// Creates a new comment, validating that its `text` is not blank.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        id: CommentId,
        item_id: ItemId,
        author_id: UserId,
        author_name: S1,
        text: S2,
        created: OffsetDateTime,
    ) -> ModelResult<Self> {
        let text = require_not_blank("Comment text", text)?;
        Ok(Self { id, item_id, author_id, author_name: author_name.into(), text, created })
    }

    /// Returns the comment's identifier.
    pub(crate) fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the item the comment is about.
    pub(crate) fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Returns the author of the comment.
    pub(crate) fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the display name of the author.
    pub(crate) fn author_name(&self) -> &str {
        &self.author_name
    }

    /// Returns the body of the comment.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Returns the posting time.
    pub(crate) fn created(&self) -> OffsetDateTime {
        self.created
    }
}
