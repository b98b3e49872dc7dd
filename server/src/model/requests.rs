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

//! Requests for items that nobody has listed yet.

use crate::model::{Item, RequestId, UserId};
use shareit_core::model::{ModelResult, require_not_blank};
use time::OffsetDateTime;

/// A user's public plea for an item.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ItemRequest {
    /// Identifier assigned by the database.
    id: RequestId,

    /// User that asked for the item.
    requester_id: UserId,

    /// What the requester is looking for.
    description: String,

    /// When the request was posted.
    created: OffsetDateTime,
}

impl ItemRequest {
    /// Creates a new request, validating that its `description` is not blank.
    pub(crate) fn new<S: Into<String>>(
        id: RequestId,
        requester_id: UserId,
        description: S,
        created: OffsetDateTime,
    ) -> ModelResult<Self> {
        let description = require_not_blank("Request description", description)?;
        Ok(Self { id, requester_id, description, created })
    }

    /// Returns the request's identifier.
    pub(crate) fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the user that posted the request.
    pub(crate) fn requester_id(&self) -> UserId {
        self.requester_id
    }

    /// Returns the description of the wanted item.
    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    /// Returns the posting time.
    pub(crate) fn created(&self) -> OffsetDateTime {
        self.created
    }
}

/// A request along with the items listed in response to it.
#[derive(Debug, PartialEq)]
pub(crate) struct ItemRequestDetails {
    /// The request itself.
    request: ItemRequest,

    /// Items whose owners linked them to the request.
    items: Vec<Item>,
}

impl ItemRequestDetails {
    /// Creates the detailed view of `request`.
    pub(crate) fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self { request, items }
    }

    /// Returns the request.
    pub(crate) fn request(&self) -> &ItemRequest {
        &self.request
    }

    /// Returns the items listed for the request.
    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shareit_core::model::ModelError;
    use time::macros::datetime;

    #[test]
    fn test_item_request_blank_description() {
        assert_eq!(
            ModelError("Request description cannot be blank".to_owned()),
            ItemRequest::new(
                RequestId::from(1),
                UserId::from(1),
                "",
                datetime!(2024-01-01 00:00:00 UTC)
            )
            .unwrap_err()
        );
    }
}
