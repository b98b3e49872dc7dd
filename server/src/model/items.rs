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

//! Items listed for sharing.

use crate::model::{BookingSummary, Comment, ItemId, RequestId, UserId, require_name};
use shareit_core::model::{ModelResult, require_not_blank};

/// An item that its owner offers for booking.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Item {
    /// Identifier assigned by the database.
    id: ItemId,

    /// User that listed the item.
    owner_id: UserId,

    /// Short name of the item.
    name: String,

    /// Free-form description of the item.
    description: String,

    /// Whether the item can currently be booked.
    available: bool,

    /// Request that this item was listed in response to, if any.
    request_id: Option<RequestId>,
}

impl Item {
    /// Creates a new item, validating its `name` and that its `description` is not blank.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        id: ItemId,
        owner_id: UserId,
        name: S1,
        description: S2,
        available: bool,
    ) -> ModelResult<Self> {
        let name = require_name("Item name", name)?;
        let description = require_not_blank("Item description", description)?;
        Ok(Self { id, owner_id, name, description, available, request_id: None })
    }

    /// Links the item to the request it fulfills.
    pub(crate) fn with_request_id(mut self, request_id: Option<RequestId>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the item's identifier.
    pub(crate) fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the identifier of the item's owner.
    pub(crate) fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the item's name.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item's description.
    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the item can be booked.
    pub(crate) fn available(&self) -> bool {
        self.available
    }

    /// Returns the request the item was listed for, if any.
    pub(crate) fn request_id(&self) -> Option<RequestId> {
        self.request_id
    }
}

/// A partial update to an item.  Absent fields keep their current values.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ItemPatch {
    /// New name, if any.
    name: Option<String>,

    /// New description, if any.
    description: Option<String>,

    /// New availability, if any.
    available: Option<bool>,
}

impl ItemPatch {
    /// Sets the new name, which must not be blank nor too long.
    pub(crate) fn with_name<S: Into<String>>(mut self, name: S) -> ModelResult<Self> {
        self.name = Some(require_name("Item name", name)?);
        Ok(self)
    }

    /// Sets the new description, which must not be blank.
    pub(crate) fn with_description<S: Into<String>>(mut self, description: S) -> ModelResult<Self> {
        self.description = Some(require_not_blank("Item description", description)?);
        Ok(self)
    }

    /// Sets the new availability.
    pub(crate) fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Merges this patch into `item` and returns the updated item.  Ownership and the
    /// originating request never change.
    pub(crate) fn apply(self, item: Item) -> Item {
        Item {
            name: self.name.unwrap_or(item.name),
            description: self.description.unwrap_or(item.description),
            available: self.available.unwrap_or(item.available),
            ..item
        }
    }
}

/// An item along with the data shown when looking at it in detail.
#[derive(Debug, PartialEq)]
pub(crate) struct ItemDetails {
    /// The item itself.
    item: Item,

    /// Most recent approved booking that already started.  Only known to the owner.
    last_booking: Option<BookingSummary>,

    /// Earliest approved booking that has not started yet.  Only known to the owner.
    next_booking: Option<BookingSummary>,

    /// Comments left by past renters, oldest first.
    comments: Vec<Comment>,
}

impl ItemDetails {
    /// Creates the detailed view of `item` with its `comments` and no booking information.
    pub(crate) fn new(item: Item, comments: Vec<Comment>) -> Self {
        Self { item, last_booking: None, next_booking: None, comments }
    }

    /// Attaches the owner-only booking information.
    pub(crate) fn with_bookings(
        mut self,
        last_booking: Option<BookingSummary>,
        next_booking: Option<BookingSummary>,
    ) -> Self {
        self.last_booking = last_booking;
        self.next_booking = next_booking;
        self
    }

    /// Returns the item.
    pub(crate) fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the last booking, if known.
    pub(crate) fn last_booking(&self) -> Option<&BookingSummary> {
        self.last_booking.as_ref()
    }

    /// Returns the next booking, if known.
    pub(crate) fn next_booking(&self) -> Option<&BookingSummary> {
        self.next_booking.as_ref()
    }

    /// Returns the comments on the item.
    pub(crate) fn comments(&self) -> &[Comment] {
        &self.comments
    }
}
