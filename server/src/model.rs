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

//! High-level data types for the marketplace.
//!
//! Entities reference each other by identifier only.  Any data that crosses entity boundaries,
//! such as the name of a booker when displaying a booking, is fetched by the persistence layer
//! and carried in dedicated view types.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use shareit_core::model::{ModelError, ModelResult, require_not_blank};

mod bookings;
pub(crate) use bookings::{
    Booking, BookingDetails, BookingState, BookingStatus, BookingSummary, validate_booking_dates,
};
mod comments;
pub(crate) use comments::Comment;
mod items;
pub(crate) use items::{Item, ItemDetails, ItemPatch};
mod requests;
pub(crate) use requests::{ItemRequest, ItemRequestDetails};
mod users;
pub(crate) use users::{User, UserPatch};

/// Defines a newtype for the database-generated identifier of an entity.
macro_rules! entity_id [
    ( $(#[$doc:meta])* $name:ident ) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
            Serialize,
        )]
        #[serde(transparent)]
        pub(crate) struct $name(i64);

        impl $name {
            /// Returns the raw identifier as stored in the database.
            #[allow(unused)]
            pub(crate) fn as_i64(self) -> i64 {
                self.0
            }
        }
    }
];

entity_id!(
    /// Identifier of a booking.
    BookingId
);
entity_id!(
    /// Identifier of a comment left on an item.
    CommentId
);
entity_id!(
    /// Identifier of a listed item.
    ItemId
);
entity_id!(
    /// Identifier of a request for an item that nobody has listed yet.
    RequestId
);
entity_id!(
    /// Identifier of a registered user.
    UserId
);

/// Maximum length of user and item names, which must match the schema.
pub(crate) const MAX_NAME_LENGTH: usize = 255;

/// Ensures that the `name` of the entity described by `what` is not blank and fits in the
/// database.
pub(crate) fn require_name<S: Into<String>>(what: &str, name: S) -> ModelResult<String> {
    let name = require_not_blank(what, name)?;
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ModelError(format!(
            "{} cannot be longer than {} characters; got {}",
            what, MAX_NAME_LENGTH, length
        )));
    }
    Ok(name)
}

/// Default number of entries returned by paginated listings.
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 10;

/// A window over a listing, expressed as an offset and a maximum number of entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Page {
    /// Number of entries to skip.
    offset: i64,

    /// Maximum number of entries to return.
    limit: i64,
}

impl Page {
    /// Creates a new page starting at entry `from` and holding up to `size` entries.
    pub(crate) fn new(from: i64, size: i64) -> ModelResult<Self> {
        if from < 0 {
            return Err(ModelError(format!("Page offset must not be negative; got {}", from)));
        }
        if size <= 0 {
            return Err(ModelError(format!("Page size must be positive; got {}", size)));
        }
        Ok(Self { offset: from, limit: size })
    }

    /// Returns the number of entries to skip.
    pub(crate) fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the maximum number of entries to return.
    pub(crate) fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { offset: 0, limit: DEFAULT_PAGE_SIZE }
    }
}
