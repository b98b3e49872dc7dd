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

//! JSON representations of the entities returned by the APIs.

use crate::model::*;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

/// A registered user.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    /// Identifier of the user.
    pub(crate) id: UserId,

    /// Display name of the user.
    pub(crate) name: String,

    /// Email address of the user.
    pub(crate) email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}

/// An item as listed by its owner.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemResponse {
    /// Identifier of the item.
    pub(crate) id: ItemId,

    /// Short name of the item.
    pub(crate) name: String,

    /// Free-form description of the item.
    pub(crate) description: String,

    /// Whether the item can be booked.
    pub(crate) available: bool,

    /// Request that the item was listed for, if any.
    pub(crate) request_id: Option<RequestId>,

    /// Owner of the item.
    pub(crate) owner_id: UserId,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_owned(),
            description: item.description().to_owned(),
            available: item.available(),
            request_id: item.request_id(),
            owner_id: item.owner_id(),
        }
    }
}

/// Reference to a booking shown next to an item.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingSummaryResponse {
    /// Identifier of the booking.
    pub(crate) id: BookingId,

    /// User that made the booking.
    pub(crate) booker_id: UserId,
}

impl From<&BookingSummary> for BookingSummaryResponse {
    fn from(summary: &BookingSummary) -> Self {
        Self { id: summary.id, booker_id: summary.booker_id }
    }
}

/// A comment left on an item.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentResponse {
    /// Identifier of the comment.
    pub(crate) id: CommentId,

    /// Contents of the comment.
    pub(crate) text: String,

    /// Name of the user that wrote the comment.
    pub(crate) author_name: String,

    /// When the comment was posted.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created: OffsetDateTime,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            text: comment.text().to_owned(),
            author_name: comment.author_name().to_owned(),
            created: comment.created(),
        }
    }
}

/// An item with its comments and, for its owner, its neighboring bookings.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemDetailsResponse {
    /// The item itself.
    #[serde(flatten)]
    pub(crate) item: ItemResponse,

    /// Most recent approved booking that already started.
    pub(crate) last_booking: Option<BookingSummaryResponse>,

    /// Earliest approved booking that has not started yet.
    pub(crate) next_booking: Option<BookingSummaryResponse>,

    /// Comments on the item, oldest first.
    pub(crate) comments: Vec<CommentResponse>,
}

impl From<&ItemDetails> for ItemDetailsResponse {
    fn from(details: &ItemDetails) -> Self {
        Self {
            item: ItemResponse::from(details.item()),
            last_booking: details.last_booking().map(BookingSummaryResponse::from),
            next_booking: details.next_booking().map(BookingSummaryResponse::from),
            comments: details.comments().iter().map(CommentResponse::from).collect(),
        }
    }
}

/// The user that made a booking.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct BookerResponse {
    /// Identifier of the booker.
    pub(crate) id: UserId,

    /// Display name of the booker.
    pub(crate) name: String,
}

/// The item that a booking is for.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct BookedItemResponse {
    /// Identifier of the item.
    pub(crate) id: ItemId,

    /// Short name of the item.
    pub(crate) name: String,
}

/// A booking.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingResponse {
    /// Identifier of the booking.
    pub(crate) id: BookingId,

    /// Start of the booked period.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) start: OffsetDateTime,

    /// End of the booked period.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) end: OffsetDateTime,

    /// Approval status.
    pub(crate) status: BookingStatus,

    /// User that made the booking.
    pub(crate) booker: BookerResponse,

    /// Booked item.
    pub(crate) item: BookedItemResponse,
}

impl From<&BookingDetails> for BookingResponse {
    fn from(details: &BookingDetails) -> Self {
        let booking = details.booking();
        Self {
            id: booking.id(),
            start: booking.start(),
            end: booking.end(),
            status: booking.status(),
            booker: BookerResponse {
                id: booking.booker_id(),
                name: details.booker_name().to_owned(),
            },
            item: BookedItemResponse {
                id: booking.item_id(),
                name: details.item_name().to_owned(),
            },
        }
    }
}

/// A request for an item along with the items listed for it.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestResponse {
    /// Identifier of the request.
    pub(crate) id: RequestId,

    /// What the requester is looking for.
    pub(crate) description: String,

    /// When the request was published.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created: OffsetDateTime,

    /// Items listed for the request.
    pub(crate) items: Vec<ItemResponse>,
}

impl From<&ItemRequestDetails> for RequestResponse {
    fn from(details: &ItemRequestDetails) -> Self {
        let request = details.request();
        Self {
            id: request.id(),
            description: request.description().to_owned(),
            created: request.created(),
            items: details.items().iter().map(ItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shareit_core::model::EmailAddress;
    use time::macros::datetime;

    #[test]
    fn test_user_response_json() {
        let user =
            User::new(UserId::from(3), "Alice", EmailAddress::from("a@example.com")).unwrap();
        assert_eq!(
            json!({"id": 3, "name": "Alice", "email": "a@example.com"}),
            serde_json::to_value(UserResponse::from(&user)).unwrap()
        );
    }

    #[test]
    fn test_item_details_response_json() {
        let item = Item::new(ItemId::from(5), UserId::from(1), "Drill", "Loud", true)
            .unwrap()
            .with_request_id(Some(RequestId::from(9)));
        let comment = Comment::new(
            CommentId::from(2),
            item.id(),
            UserId::from(4),
            "Bob",
            "Nice",
            datetime!(2024-05-01 08:00:00 UTC),
        )
        .unwrap();
        let details = ItemDetails::new(item, vec![comment]).with_bookings(
            Some(BookingSummary { id: BookingId::from(7), booker_id: UserId::from(4) }),
            None,
        );

        assert_eq!(
            json!({
                "id": 5,
                "name": "Drill",
                "description": "Loud",
                "available": true,
                "requestId": 9,
                "ownerId": 1,
                "lastBooking": {"id": 7, "bookerId": 4},
                "nextBooking": null,
                "comments": [{
                    "id": 2,
                    "text": "Nice",
                    "authorName": "Bob",
                    "created": "2024-05-01T08:00:00Z",
                }],
            }),
            serde_json::to_value(ItemDetailsResponse::from(&details)).unwrap()
        );
    }

    #[test]
    fn test_booking_response_json() {
        let booking = Booking::new(
            BookingId::from(1),
            ItemId::from(2),
            UserId::from(3),
            datetime!(2024-05-11 10:00:00 UTC),
            datetime!(2024-05-12 10:00:00 UTC),
            BookingStatus::Waiting,
        );
        let details = BookingDetails::new(booking, "Bob", "Drill", UserId::from(4));

        assert_eq!(
            json!({
                "id": 1,
                "start": "2024-05-11T10:00:00Z",
                "end": "2024-05-12T10:00:00Z",
                "status": "WAITING",
                "booker": {"id": 3, "name": "Bob"},
                "item": {"id": 2, "name": "Drill"},
            }),
            serde_json::to_value(BookingResponse::from(&details)).unwrap()
        );
    }
}
